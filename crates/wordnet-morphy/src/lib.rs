//! WordNet-style morphological processing (morphy).
//!
//! Candidate base forms for a surface form come from one of two places:
//! 1. If the surface form is listed in the POS exception file (`*.exc`), the
//!    candidates are the surface form followed by its listed base forms.
//! 2. Otherwise, the surface form followed by every suffix substitution that
//!    applies to it. When none of those exist, the substitutions are applied
//!    again to the previous round's outputs, round after round, until one
//!    exists or no rule applies any more.
//!
//! Candidates are then kept only if the caller-provided predicate says the
//! lemma exists, deduplicated in first-seen order. The crate does not depend
//! on a particular loader; it only needs [`Pos`] and the callback.
//!
//! # Example
//! ```no_run
//! use wordnet_db::WordNet;
//! use wordnet_morphy::Morphy;
//! use wordnet_types::Pos;
//!
//! # fn main() -> anyhow::Result<()> {
//! let dict = "/path/to/wordnet";
//! let wn = WordNet::load(dict)?;
//! let morph = Morphy::load(dict)?;
//!
//! let cands = morph.lemmas_for(Pos::Noun, "wolves", |pos, lemma| wn.lemma_exists(pos, lemma));
//! for cand in cands {
//!     println!("{:?}: {}", cand.source, cand.lemma);
//! }
//! # Ok(()) }
//! ```

use std::borrow::Cow;
use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use wordnet_types::{Pos, lemma_key};

/// Where a candidate lemma originated.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum CandidateSource {
    Surface,
    Exception,
    Rule {
        suffix: &'static str,
        replacement: &'static str,
    },
}

/// A lemma candidate paired with its POS and provenance.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LemmaCandidate<'a> {
    pub pos: Pos,
    pub lemma: Cow<'a, str>,
    pub source: CandidateSource,
}

/// Exception lists plus the fixed suffix rules.
#[derive(Debug, Default)]
pub struct Morphy {
    exceptions: HashMap<Pos, HashMap<String, Vec<String>>>,
}

impl Morphy {
    /// Load morphy exception lists (`*.exc`) from a WordNet dict directory.
    ///
    /// Files are optional; missing ones are treated as empty.
    pub fn load(dict_dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dict_dir.as_ref();
        let mut exceptions = HashMap::new();
        for pos in Pos::ALL {
            exceptions.insert(pos, load_exc(dir.join(pos.exception_file()))?);
        }
        Ok(Self { exceptions })
    }

    /// Add exception entries for one part of speech, replacing any existing
    /// entry for the same surface form.
    pub fn with_exceptions<'s>(
        mut self,
        pos: Pos,
        entries: impl IntoIterator<Item = (&'s str, &'s [&'s str])>,
    ) -> Self {
        let map = self.exceptions.entry(pos).or_default();
        for (surface, lemmas) in entries {
            map.insert(
                lemma_key(surface),
                lemmas.iter().map(|l| lemma_key(l)).collect(),
            );
        }
        self
    }

    /// Number of exception entries loaded for `pos`.
    pub fn exception_count(&self, pos: Pos) -> usize {
        self.exceptions.get(&pos).map_or(0, HashMap::len)
    }

    /// Generate existing lemmas for a surface form, with provenance.
    ///
    /// The callback `lemma_exists` typically delegates to
    /// `WordNet::lemma_exists`.
    pub fn lemmas_for<'a, F>(
        &'a self,
        pos: Pos,
        surface: &str,
        lemma_exists: F,
    ) -> Vec<LemmaCandidate<'a>>
    where
        F: Fn(Pos, &str) -> bool,
    {
        let mut seen: HashSet<Cow<'a, str>> = HashSet::new();
        let mut out: Vec<LemmaCandidate<'a>> = Vec::new();
        let key = lemma_key(surface);

        if lemma_exists(pos, &key) {
            push_unique(
                &mut out,
                &mut seen,
                LemmaCandidate {
                    pos,
                    lemma: Cow::Owned(key.clone()),
                    source: CandidateSource::Surface,
                },
            );
        }

        // A listed irregular form never goes through the suffix rules.
        if let Some(entries) = self.exceptions.get(&pos).and_then(|m| m.get(&key)) {
            for lemma in entries {
                if lemma_exists(pos, lemma) {
                    push_unique(
                        &mut out,
                        &mut seen,
                        LemmaCandidate {
                            pos,
                            lemma: Cow::Borrowed(lemma.as_str()),
                            source: CandidateSource::Exception,
                        },
                    );
                }
            }
            return out;
        }

        // Rules are applied in rounds, each to the previous round's outputs,
        // until a round yields an existing lemma or no rule applies.
        let mut forms = vec![key];
        loop {
            let round = apply_rules(pos, &forms);
            if round.is_empty() {
                break;
            }
            for (candidate, suffix, replacement) in &round {
                if lemma_exists(pos, candidate) {
                    push_unique(
                        &mut out,
                        &mut seen,
                        LemmaCandidate {
                            pos,
                            lemma: Cow::Owned(candidate.clone()),
                            source: CandidateSource::Rule {
                                suffix: *suffix,
                                replacement: *replacement,
                            },
                        },
                    );
                }
            }
            if !out.is_empty() {
                break;
            }
            forms = round.into_iter().map(|(candidate, _, _)| candidate).collect();
        }

        out
    }
}

fn load_exc(path: PathBuf) -> Result<HashMap<String, Vec<String>>> {
    if !path.exists() {
        return Ok(HashMap::new());
    }
    let file =
        File::open(&path).with_context(|| format!("open exception file {}", path.display()))?;
    let reader = BufReader::new(file);
    let mut map = HashMap::new();
    for (lineno, line) in reader.lines().enumerate() {
        let line =
            line.with_context(|| format!("read line {} in {}", lineno + 1, path.display()))?;
        let mut parts = line.split_whitespace();
        let surface = match parts.next() {
            Some(s) => lemma_key(s),
            None => continue,
        };
        let lemmas: Vec<String> = parts.map(lemma_key).collect();
        if !lemmas.is_empty() {
            map.insert(surface, lemmas);
        }
    }
    Ok(map)
}

fn apply_rule(surface: &str, suffix: &str, replacement: &str) -> Option<String> {
    surface
        .strip_suffix(suffix)
        .map(|stem| format!("{stem}{replacement}"))
}

type RuleOutput = (String, &'static str, &'static str);

/// One round of suffix substitutions over `forms`, deduplicated in order.
fn apply_rules(pos: Pos, forms: &[String]) -> Vec<RuleOutput> {
    let mut seen = HashSet::new();
    let mut round = Vec::new();
    for form in forms {
        for &(suffix, replacement) in rules_for(pos) {
            if let Some(candidate) = apply_rule(form, suffix, replacement)
                && seen.insert(candidate.clone())
            {
                round.push((candidate, suffix, replacement));
            }
        }
    }
    round
}

fn push_unique<'a>(
    out: &mut Vec<LemmaCandidate<'a>>,
    seen: &mut HashSet<Cow<'a, str>>,
    candidate: LemmaCandidate<'a>,
) {
    if seen.insert(candidate.lemma.clone()) {
        out.push(candidate);
    }
}

fn rules_for(pos: Pos) -> &'static [(&'static str, &'static str)] {
    match pos {
        Pos::Noun => &[
            ("s", ""),
            ("ses", "s"),
            ("ves", "f"),
            ("xes", "x"),
            ("zes", "z"),
            ("ches", "ch"),
            ("shes", "sh"),
            ("men", "man"),
            ("ies", "y"),
        ],
        Pos::Verb => &[
            ("s", ""),
            ("ies", "y"),
            ("es", "e"),
            ("es", ""),
            ("ed", "e"),
            ("ed", ""),
            ("ing", "e"),
            ("ing", ""),
        ],
        Pos::Adj => &[("er", ""), ("est", ""), ("er", "e"), ("est", "e")],
        Pos::Adv => &[],
    }
}
