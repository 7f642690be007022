//! Part-of-speech tagging of the vocabulary and noun filtering.
//!
//! Tags are Penn Treebank labels. The shipped tagger is an averaged
//! perceptron read from three JSON files (weights, tag dictionary, classes).

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::error::{PipelineError, Result};

pub const SINGULAR_NOUN: &str = "NN";
pub const PLURAL_NOUN: &str = "NNS";
pub const PROPER_NOUN: &str = "NNP";
pub const NOUN_TAGS: [&str; 3] = [SINGULAR_NOUN, PLURAL_NOUN, PROPER_NOUN];

pub const MODEL_DIR: &str = "averaged_perceptron_tagger_eng";
const WEIGHTS_FILE: &str = "averaged_perceptron_tagger_eng.weights.json";
const TAGDICT_FILE: &str = "averaged_perceptron_tagger_eng.tagdict.json";
const CLASSES_FILE: &str = "averaged_perceptron_tagger_eng.classes.json";

const START: [&str; 2] = ["-START-", "-START2-"];
const END: [&str; 2] = ["-END-", "-END2-"];

/// A `(token, tag)` pair.
pub type Tagged = (String, String);

/// Assigns one tag per token, in input order.
pub trait PosTagger {
    fn tag(&self, tokens: &[&str]) -> Vec<Tagged>;
}

/// Averaged perceptron tagger.
pub struct PerceptronTagger {
    weights: HashMap<String, HashMap<String, f64>>,
    tagdict: HashMap<String, String>,
    classes: Vec<String>,
}

impl PerceptronTagger {
    /// Load the model from a directory holding the three JSON files.
    pub fn load(model_dir: &Path) -> Result<Self> {
        if !model_dir.is_dir() {
            return Err(PipelineError::resource(
                "pos tagger",
                format!("{} is not a directory", model_dir.display()),
            ));
        }
        let weights = read_json(&model_dir.join(WEIGHTS_FILE))?;
        let tagdict = read_json(&model_dir.join(TAGDICT_FILE))?;
        let classes: Vec<String> = read_json(&model_dir.join(CLASSES_FILE))?;
        if classes.is_empty() {
            return Err(PipelineError::resource("pos tagger", "empty class list"));
        }
        Ok(Self::from_parts(weights, tagdict, classes))
    }

    pub fn from_parts(
        weights: HashMap<String, HashMap<String, f64>>,
        tagdict: HashMap<String, String>,
        classes: impl IntoIterator<Item = String>,
    ) -> Self {
        let mut classes: Vec<String> = classes.into_iter().collect();
        classes.sort();
        classes.dedup();
        Self {
            weights,
            tagdict,
            classes,
        }
    }

    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    /// Highest scoring class; ties go to the greatest tag string.
    fn predict(&self, features: &HashMap<String, u32>) -> String {
        let mut scores: HashMap<&str, f64> = HashMap::new();
        for (feature, &value) in features {
            let Some(weights) = self.weights.get(feature) else {
                continue;
            };
            if value == 0 {
                continue;
            }
            for (label, weight) in weights {
                *scores.entry(label.as_str()).or_default() += f64::from(value) * weight;
            }
        }

        self.classes
            .iter()
            .map(|label| (scores.get(label.as_str()).copied().unwrap_or(0.0), label))
            .max_by(|a, b| a.0.total_cmp(&b.0).then_with(|| a.1.cmp(b.1)))
            .map(|(_, label)| label.clone())
            .unwrap_or_default()
    }
}

impl PosTagger for PerceptronTagger {
    fn tag(&self, tokens: &[&str]) -> Vec<Tagged> {
        let mut context: Vec<String> = START.iter().map(|s| s.to_string()).collect();
        context.extend(tokens.iter().map(|w| normalize(w)));
        context.extend(END.iter().map(|s| s.to_string()));

        let mut prev = START[0].to_string();
        let mut prev2 = START[1].to_string();
        let mut output = Vec::with_capacity(tokens.len());
        for (i, word) in tokens.iter().enumerate() {
            let tag = match self.tagdict.get(*word) {
                Some(tag) => tag.clone(),
                None => self.predict(&features(i, word, &context, &prev, &prev2)),
            };
            output.push((word.to_string(), tag.clone()));
            prev2 = std::mem::replace(&mut prev, tag);
        }
        output
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = fs::read_to_string(path)
        .map_err(|e| PipelineError::resource("pos tagger", format!("{}: {e}", path.display())))?;
    serde_json::from_str(&raw).map_err(|source| PipelineError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Context form of a token.
fn normalize(word: &str) -> String {
    let first = word.chars().next();
    if word.contains('-') && first != Some('-') {
        "!HYPHEN".to_string()
    } else if word.chars().count() == 4 && word.chars().all(|c| c.is_ascii_digit()) {
        "!YEAR".to_string()
    } else if first.is_some_and(|c| c.is_ascii_digit()) {
        "!DIGITS".to_string()
    } else {
        word.to_lowercase()
    }
}

fn suffix(word: &str) -> &str {
    match word.char_indices().rev().nth(2) {
        Some((idx, _)) => &word[idx..],
        None => word,
    }
}

fn features(
    i: usize,
    word: &str,
    context: &[String],
    prev: &str,
    prev2: &str,
) -> HashMap<String, u32> {
    let i = i + START.len();
    let first: String = word.chars().take(1).collect();
    let mut features = HashMap::new();
    let mut add = |parts: &[&str]| {
        *features.entry(parts.join(" ")).or_insert(0) += 1;
    };

    add(&["bias"]);
    add(&["i suffix", suffix(word)]);
    add(&["i pref1", first.as_str()]);
    add(&["i-1 tag", prev]);
    add(&["i-2 tag", prev2]);
    add(&["i tag+i-2 tag", prev, prev2]);
    add(&["i word", context[i].as_str()]);
    add(&["i-1 tag+i word", prev, context[i].as_str()]);
    add(&["i-1 word", context[i - 1].as_str()]);
    add(&["i-1 suffix", suffix(&context[i - 1])]);
    add(&["i-2 word", context[i - 2].as_str()]);
    add(&["i+1 word", context[i + 1].as_str()]);
    add(&["i+1 suffix", suffix(&context[i + 1])]);
    add(&["i+2 word", context[i + 2].as_str()]);
    features
}

/// Vocabulary tokens whose `(token, tag)` pair occurs anywhere in `tagged`.
pub fn words_for_pos(words: &[&str], tagged: &[Tagged], pos: &str) -> Vec<String> {
    let pairs: HashSet<(&str, &str)> = tagged
        .iter()
        .map(|(w, t)| (w.as_str(), t.as_str()))
        .collect();
    words
        .iter()
        .filter(|w| pairs.contains(&(**w, pos)))
        .map(|w| w.to_string())
        .collect()
}

/// `NN`, `NNS` and `NNP` matches concatenated in that order, duplicates kept.
pub fn noun_words(words: &[&str], tagged: &[Tagged]) -> Vec<String> {
    NOUN_TAGS
        .iter()
        .flat_map(|pos| words_for_pos(words, tagged, pos))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tagged(pairs: &[(&str, &str)]) -> Vec<Tagged> {
        pairs
            .iter()
            .map(|(w, t)| (w.to_string(), t.to_string()))
            .collect()
    }

    fn dict_tagger(entries: &[(&str, &str)], classes: &[&str]) -> PerceptronTagger {
        PerceptronTagger::from_parts(
            HashMap::new(),
            entries
                .iter()
                .map(|(w, t)| (w.to_string(), t.to_string()))
                .collect(),
            classes.iter().map(|c| c.to_string()),
        )
    }

    #[test]
    fn normalize_matches_context_rules() {
        assert_eq!(normalize("well-known"), "!HYPHEN");
        assert_eq!(normalize("-x"), "-x");
        assert_eq!(normalize("2019"), "!YEAR");
        assert_eq!(normalize("3d"), "!DIGITS");
        assert_eq!(normalize("Graph"), "graph");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn suffix_takes_last_three_chars() {
        assert_eq!(suffix("networks"), "rks");
        assert_eq!(suffix("ab"), "ab");
        assert_eq!(suffix(""), "");
    }

    #[test]
    fn feature_keys_use_padded_context() {
        let context: Vec<String> = ["-START-", "-START2-", "graph", "-END-", "-END2-"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let feats = features(0, "Graph", &context, "-START-", "-START2-");
        assert_eq!(feats.len(), 14);
        assert!(feats.contains_key("bias"));
        assert!(feats.contains_key("i suffix aph"));
        assert!(feats.contains_key("i pref1 G"));
        assert!(feats.contains_key("i tag+i-2 tag -START- -START2-"));
        assert!(feats.contains_key("i-1 word -START2-"));
        assert!(feats.contains_key("i+2 word -END2-"));
    }

    #[test]
    fn tag_dictionary_wins_then_model_scores() {
        let mut weights = HashMap::new();
        weights.insert(
            "i suffix ing".to_string(),
            HashMap::from([("VBG".to_string(), 2.0), ("NN".to_string(), 0.5)]),
        );
        let tagger = PerceptronTagger::from_parts(
            weights,
            HashMap::from([("model".to_string(), "NN".to_string())]),
            ["NN", "VBG", "JJ"].map(String::from),
        );
        let out = tagger.tag(&["model", "learning", "quantum"]);
        assert_eq!(
            out,
            tagged(&[("model", "NN"), ("learning", "VBG"), ("quantum", "VBG")])
        );
        assert_eq!(tagger.class_count(), 3);
    }

    #[test]
    fn zero_scores_fall_back_to_greatest_label() {
        let tagger = dict_tagger(&[], &["NN", "VB", "JJ"]);
        assert_eq!(tagger.tag(&["x"]), tagged(&[("x", "VB")]));
    }

    #[test]
    fn pair_membership_filter() {
        let words = ["cat", "run", "dogs", "Paris"];
        let tags = tagged(&[
            ("cat", "NN"),
            ("run", "VB"),
            ("dogs", "NNS"),
            ("Paris", "NNP"),
        ]);
        assert_eq!(words_for_pos(&words, &tags, "NN"), vec!["cat"]);
        assert_eq!(noun_words(&words, &tags), vec!["cat", "dogs", "Paris"]);
    }

    #[test]
    fn filter_keeps_duplicates_across_categories() {
        let words = ["set"];
        let tags = tagged(&[("set", "NN"), ("set", "NNS")]);
        assert_eq!(noun_words(&words, &tags), vec!["set", "set"]);
    }

    #[test]
    fn load_reports_missing_model() {
        let tempdir = tempfile::tempdir().unwrap();
        let err = PerceptronTagger::load(&tempdir.path().join(MODEL_DIR))
            .err()
            .expect("missing dir fails");
        assert!(matches!(err, PipelineError::Resource { .. }));
    }
}
