use std::collections::HashSet;

use serde::Serialize;

use crate::frequency::FrequencyTable;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedWord {
    pub word: String,
    pub count: usize,
}

/// Keep entries whose token is in `nouns`, most frequent first.
///
/// The sort is stable, so ties keep frequency-table (first-seen) order.
pub fn rank_words(frequencies: &FrequencyTable, nouns: &[String]) -> Vec<RankedWord> {
    let keep: HashSet<&str> = nouns.iter().map(String::as_str).collect();
    let mut ranked: Vec<RankedWord> = frequencies
        .iter()
        .filter(|(word, _)| keep.contains(word.as_str()))
        .map(|(word, &count)| RankedWord {
            word: word.clone(),
            count,
        })
        .collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    ranked
}

/// Split into aligned word and count lists.
pub fn unzip(ranked: &[RankedWord]) -> (Vec<&str>, Vec<usize>) {
    ranked.iter().map(|r| (r.word.as_str(), r.count)).unzip()
}
