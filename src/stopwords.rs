use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::error::{PipelineError, Result};

/// Fixed stopword set. Membership is exact and case-sensitive.
#[derive(Debug, Clone, Default)]
pub struct StopWords {
    words: HashSet<String>,
}

impl StopWords {
    /// Load a one-word-per-line list; blank lines are ignored.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .map_err(|e| PipelineError::resource("stopwords", format!("{}: {e}", path.display())))?;
        Ok(Self::from_words(raw.lines()))
    }

    pub fn from_words<'a>(words: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            words: words
                .into_iter()
                .map(str::trim)
                .filter(|w| !w.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
