//! Abstract cleaning: noise stripping, stopword removal and lemmatization.

use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, info};

use crate::error::Result;
use crate::lemmatizer::Lemmatizer;
use crate::stopwords::StopWords;
use crate::table::DocumentTable;

static NON_LETTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("[^a-zA-Z]").expect("valid regex"));
// Escaped tag markers. The first pass already removed `&` and `;`, so this
// only fires on input that reaches it through a different path.
static ESCAPED_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("&lt;/?.*?&gt;").expect("valid regex"));
static DIGIT_OR_NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d|\W)+").expect("valid regex"));

pub struct Normalizer<'r> {
    stopwords: &'r StopWords,
    lemmatizer: &'r Lemmatizer,
}

impl<'r> Normalizer<'r> {
    pub fn new(stopwords: &'r StopWords, lemmatizer: &'r Lemmatizer) -> Self {
        Self {
            stopwords,
            lemmatizer,
        }
    }

    /// Clean one document. Text without letters yields an empty string.
    pub fn clean(&self, text: &str) -> String {
        let text = NON_LETTER.replace_all(text, " ");
        let text = ESCAPED_TAG.replace_all(&text, ",");
        let text = DIGIT_OR_NON_WORD.replace_all(&text, " ");

        text.split_whitespace()
            .filter(|word| !self.stopwords.contains(word))
            .map(|word| self.lemmatizer.lemmatize(word))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Clean every row of `column`, preserving row order.
    pub fn corpus(&self, table: &DocumentTable, column: &str) -> Result<Vec<String>> {
        let texts = table.text_column(column)?;
        info!("pre-processing {} documents", texts.len());
        let corpus: Vec<String> = texts
            .iter()
            .enumerate()
            .map(|(row, text)| {
                let cleaned = self.clean(text);
                if cleaned.is_empty() {
                    debug!(row, "document has no content after cleaning");
                }
                cleaned
            })
            .collect();
        Ok(corpus)
    }
}
