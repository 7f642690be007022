//! Language resources loaded once at startup and shared read-only afterward.
//!
//! The resource root follows the NLTK data layout:
//!
//! ```text
//! <root>/corpora/stopwords/english
//! <root>/corpora/wordnet/index.{noun,verb,adj,adv}   (+ optional *.exc)
//! <root>/taggers/averaged_perceptron_tagger_eng/*.json
//! ```

use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::info;
use wordnet_db::{LoadMode, WordNet};
use wordnet_morphy::Morphy;
use wordnet_types::Pos;

use crate::error::{PipelineError, Result};
use crate::lemmatizer::Lemmatizer;
use crate::stopwords::StopWords;
use crate::tagger::{MODEL_DIR, PerceptronTagger, PosTagger};

pub struct LanguageResources {
    pub stopwords: StopWords,
    pub lemmatizer: Lemmatizer,
    pub tagger: Box<dyn PosTagger>,
}

impl LanguageResources {
    pub fn new(stopwords: StopWords, lemmatizer: Lemmatizer, tagger: Box<dyn PosTagger>) -> Self {
        Self {
            stopwords,
            lemmatizer,
            tagger,
        }
    }

    /// Load every resource under `root`. Any missing piece is fatal.
    pub fn load(root: &Path, mode: LoadMode) -> Result<Self> {
        let start = Instant::now();

        let stopwords = StopWords::load(&stopwords_path(root))?;
        info!("loaded {} stopwords", stopwords.len());

        let dict = wordnet_dir(root);
        let wordnet = WordNet::load_with_mode(&dict, mode)
            .map_err(|e| PipelineError::resource("wordnet", e))?;
        let morphy = Morphy::load(&dict).map_err(|e| PipelineError::resource("wordnet", e))?;
        info!(
            "wordnet: {} lemmas, {} noun exceptions (mode: {:?})",
            wordnet.lemma_count(),
            morphy.exception_count(Pos::Noun),
            mode
        );

        let tagger = PerceptronTagger::load(&tagger_dir(root))?;
        info!("pos tagger: {} classes", tagger.class_count());

        info!("language resources loaded in {} ms", start.elapsed().as_millis());
        Ok(Self::new(
            stopwords,
            Lemmatizer::new(wordnet, morphy),
            Box::new(tagger),
        ))
    }
}

pub fn stopwords_path(root: &Path) -> PathBuf {
    root.join("corpora").join("stopwords").join("english")
}

pub fn wordnet_dir(root: &Path) -> PathBuf {
    root.join("corpora").join("wordnet")
}

pub fn tagger_dir(root: &Path) -> PathBuf {
    root.join("taggers").join(MODEL_DIR)
}
