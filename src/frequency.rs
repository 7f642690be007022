//! Token counts across the cleaned corpus.

use indexmap::IndexMap;

/// Token -> count, iterated in first-seen order.
pub type FrequencyTable = IndexMap<String, usize>;

/// Count every piece produced by splitting each document on single spaces.
///
/// Empty pieces are counted too: an empty document contributes one `""`
/// token, as does every doubled space.
pub fn corpus_words_frequency<S: AsRef<str>>(corpus: &[S]) -> FrequencyTable {
    let mut counts = FrequencyTable::new();
    for word in corpus.iter().flat_map(|doc| doc.as_ref().split(' ')) {
        *counts.entry(word.to_string()).or_insert(0) += 1;
    }
    counts
}

/// Unique tokens in first-seen order.
pub fn vocabulary(table: &FrequencyTable) -> Vec<&str> {
    table.keys().map(String::as_str).collect()
}
