//! End-to-end driver: table in, ranked nouns and two charts out.

use std::path::PathBuf;

use tracing::info;

use crate::chart::{bar_plot, plot_publications_series};
use crate::config::Config;
use crate::error::Result;
use crate::frequency::{FrequencyTable, corpus_words_frequency, vocabulary};
use crate::normalize::Normalizer;
use crate::output::dump_json_list;
use crate::rank::{RankedWord, rank_words, unzip};
use crate::resources::LanguageResources;
use crate::table::{DocumentTable, add_word_count, read_data};
use crate::tagger::{Tagged, noun_words};

/// Everything derived from the text column, before any file is written.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub corpus: Vec<String>,
    pub frequencies: FrequencyTable,
    pub tagged: Vec<Tagged>,
    pub nouns: Vec<String>,
    pub ranked: Vec<RankedWord>,
}

#[derive(Debug, Clone)]
pub struct RunOutput {
    pub documents: usize,
    pub ranked_words: usize,
    pub words_chart: PathBuf,
    pub years_chart: PathBuf,
    pub dump: Option<PathBuf>,
}

/// Clean, count, tag and rank the nouns of `column`.
pub fn analyze(
    table: &DocumentTable,
    resources: &LanguageResources,
    column: &str,
) -> Result<Analysis> {
    let normalizer = Normalizer::new(&resources.stopwords, &resources.lemmatizer);
    let corpus = normalizer.corpus(table, column)?;

    info!("counting word frequencies");
    let frequencies = corpus_words_frequency(&corpus);
    let words = vocabulary(&frequencies);
    info!("{} unique tokens", words.len());

    info!("tagging vocabulary");
    let tagged = resources.tagger.tag(&words);
    let nouns = noun_words(&words, &tagged);
    info!("{} noun tokens", nouns.len());

    let ranked = rank_words(&frequencies, &nouns);
    Ok(Analysis {
        corpus,
        frequencies,
        tagged,
        nouns,
        ranked,
    })
}

/// Load resources from `config` and run the whole pipeline.
pub fn run(config: &Config) -> Result<RunOutput> {
    let resources = LanguageResources::load(&config.resources_dir, config.wordnet_mode)?;
    run_with(config, &resources)
}

/// Run the pipeline with already loaded resources.
pub fn run_with(config: &Config, resources: &LanguageResources) -> Result<RunOutput> {
    let mut table = read_data(&config.data_dir, &config.text_column)?;
    info!("columns: {}", table.columns().join(", "));
    for (idx, row) in table.head(5).iter().enumerate() {
        let preview = serde_json::to_string(row).unwrap_or_default();
        info!("row {idx}: {preview}");
    }

    add_word_count(&mut table, &config.text_column)?;
    let analysis = analyze(&table, resources, &config.text_column)?;

    let dump = match &config.dump_name {
        Some(name) => Some(dump_json_list(&config.data_dir, name, &analysis.ranked)?),
        None => None,
    };

    let (words, counts) = unzip(&analysis.ranked);
    let words_chart = bar_plot(&words, &counts, config.top_k, &config.plot_dir)?;

    let remove: Vec<&str> = config.remove_years.iter().map(String::as_str).collect();
    let years_chart = plot_publications_series(&mut table, &remove, &config.plot_dir)?;

    Ok(RunOutput {
        documents: table.len(),
        ranked_words: analysis.ranked.len(),
        words_chart,
        years_chart,
        dump,
    })
}
