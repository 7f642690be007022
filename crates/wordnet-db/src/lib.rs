//! Load the lemma index of a WordNet dictionary.
//!
//! Only the `index.*` files are read: the lemmatizer needs to know whether a
//! candidate base form exists for a part of speech, nothing more. Callers
//! choose between memory-mapped files or owned buffers at runtime via
//! [`LoadMode`]; either way the bytes are released once the index is built.
//!
//! # Example
//! ```no_run
//! use wordnet_db::{LoadMode, WordNet};
//! use wordnet_types::Pos;
//!
//! # fn main() -> anyhow::Result<()> {
//! let wn = WordNet::load_with_mode("/path/to/wordnet", LoadMode::Mmap)?;
//! assert!(wn.lemma_exists(Pos::Noun, "dog"));
//! println!("{} noun lemmas", wn.lemma_count_for(Pos::Noun));
//! # Ok(()) }
//! ```

use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use memmap2::Mmap;
use wordnet_types::{Pos, lemma_key};

/// Strategy for loading dictionary files.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum LoadMode {
    /// Memory-map each index file.
    #[default]
    Mmap,
    /// Read each file into an owned buffer (portable fallback).
    Owned,
}

impl LoadMode {
    /// Parse `mmap` / `owned`, case-insensitively.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.to_ascii_lowercase().as_str() {
            "mmap" => Some(LoadMode::Mmap),
            "owned" => Some(LoadMode::Owned),
            _ => None,
        }
    }
}

enum Buffer {
    Mmap(Mmap),
    Owned(Vec<u8>),
}

impl Buffer {
    fn as_slice(&self) -> &[u8] {
        match self {
            Buffer::Mmap(m) => m.as_ref(),
            Buffer::Owned(v) => v.as_slice(),
        }
    }
}

/// Lemma existence table built from `index.noun`, `index.verb`, `index.adj`
/// and `index.adv`.
pub struct WordNet {
    lemmas: HashMap<Pos, HashSet<String>>,
}

impl WordNet {
    /// Load the lemma index from a WordNet dict directory, memory-mapping files.
    pub fn load(dict_dir: impl AsRef<Path>) -> Result<Self> {
        Self::load_with_mode(dict_dir, LoadMode::Mmap)
    }

    /// Load the lemma index choosing between mmap and owned buffers.
    pub fn load_with_mode(dict_dir: impl AsRef<Path>, mode: LoadMode) -> Result<Self> {
        let dir = dict_dir.as_ref();
        for pos in Pos::ALL {
            let path = dir.join(pos.index_file());
            if !path.exists() {
                anyhow::bail!("missing required WordNet file: {}", path.display());
            }
        }

        let mut lemmas = HashMap::new();
        for pos in Pos::ALL {
            let path = dir.join(pos.index_file());
            let buffer = load_file(&path, mode)?;
            let set = parse_index(buffer.as_slice(), pos)
                .with_context(|| format!("parse {}", path.display()))?;
            lemmas.insert(pos, set);
        }

        Ok(Self { lemmas })
    }

    /// Build an index directly from `(pos, lemma)` pairs.
    pub fn from_lemmas<'a>(entries: impl IntoIterator<Item = (Pos, &'a str)>) -> Self {
        let mut lemmas: HashMap<Pos, HashSet<String>> = HashMap::new();
        for (pos, lemma) in entries {
            lemmas.entry(pos).or_default().insert(lemma_key(lemma));
        }
        Self { lemmas }
    }

    /// Check whether a lemma exists for the given POS.
    pub fn lemma_exists(&self, pos: Pos, lemma: &str) -> bool {
        self.lemmas
            .get(&pos)
            .is_some_and(|set| set.contains(&lemma_key(lemma)))
    }

    /// Number of lemmas across all parts of speech.
    pub fn lemma_count(&self) -> usize {
        self.lemmas.values().map(HashSet::len).sum()
    }

    pub fn lemma_count_for(&self, pos: Pos) -> usize {
        self.lemmas.get(&pos).map_or(0, HashSet::len)
    }
}

fn load_file(path: &Path, mode: LoadMode) -> Result<Buffer> {
    match mode {
        LoadMode::Mmap => {
            let file = File::open(path).with_context(|| format!("open {}", path.display()))?;
            unsafe { Mmap::map(&file) }
                .map(Buffer::Mmap)
                .with_context(|| format!("mmap {}", path.display()))
        }
        LoadMode::Owned => {
            let mut file = File::open(path).with_context(|| format!("open {}", path.display()))?;
            let mut buf = Vec::new();
            file.read_to_end(&mut buf)
                .with_context(|| format!("read {}", path.display()))?;
            Ok(Buffer::Owned(buf))
        }
    }
}

/// Parse one `index.*` file.
///
/// Lines starting with whitespace are the license preamble. Every other line
/// is `lemma pos synset_cnt p_cnt [ptr_symbol...] sense_cnt tagsense_cnt
/// [synset_offset...]`; the counts are checked so a truncated file fails loudly.
fn parse_index(bytes: &[u8], pos: Pos) -> Result<HashSet<String>> {
    let mut lemmas = HashSet::new();
    for (lineno, raw_line) in bytes.split(|b| *b == b'\n').enumerate() {
        let line = strip_cr(raw_line);
        if line.is_empty() || matches!(line.first(), Some(b' ' | b'\t')) {
            continue;
        }
        let line_str = std::str::from_utf8(line)
            .with_context(|| format!("{}:{} invalid utf8", pos.index_file(), lineno + 1))?;
        let tokens: Vec<&str> = line_str.split_ascii_whitespace().collect();
        if tokens.len() < 6 {
            anyhow::bail!(
                "{}:{} malformed index line (too few tokens)",
                pos.index_file(),
                lineno + 1
            );
        }

        let synset_cnt: usize = tokens[2]
            .parse()
            .with_context(|| format!("{}:{} synset_cnt", pos.index_file(), lineno + 1))?;
        let p_cnt: usize = tokens[3]
            .parse()
            .with_context(|| format!("{}:{} p_cnt", pos.index_file(), lineno + 1))?;

        // lemma, pos, synset_cnt, p_cnt, pointers, sense_cnt, tagsense_cnt, offsets
        let expected = 4 + p_cnt + 2 + synset_cnt;
        if tokens.len() != expected {
            anyhow::bail!(
                "{}:{} token count mismatch (expected {}, got {})",
                pos.index_file(),
                lineno + 1,
                expected,
                tokens.len()
            );
        }

        lemmas.insert(lemma_key(tokens[0]));
    }

    Ok(lemmas)
}

fn strip_cr(line: &[u8]) -> &[u8] {
    if line.ends_with(b"\r") {
        &line[..line.len() - 1]
    } else {
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_index_skips_preamble() {
        let bytes = b"  1 This software and database is being provided\n\
dog n 1 1 @ 1 1 01740\n\
hot_dog n 2 0 2 0 00001 00002\r\n";
        let lemmas = parse_index(bytes, Pos::Noun).unwrap();
        assert_eq!(lemmas.len(), 2);
        assert!(lemmas.contains("dog"));
        assert!(lemmas.contains("hot_dog"));
    }

    #[test]
    fn parse_index_rejects_truncated_lines() {
        let err = parse_index(b"dog n 2 1 @ 1 1 01740\n", Pos::Noun).unwrap_err();
        assert!(err.to_string().contains("token count mismatch"));

        let err = parse_index(b"dog n 1\n", Pos::Noun).unwrap_err();
        assert!(err.to_string().contains("too few tokens"));
    }

    #[test]
    fn from_lemmas_is_case_sensitive() {
        let wn = WordNet::from_lemmas([(Pos::Noun, "network"), (Pos::Verb, "run")]);
        assert!(wn.lemma_exists(Pos::Noun, "network"));
        assert!(!wn.lemma_exists(Pos::Noun, "Network"));
        assert!(!wn.lemma_exists(Pos::Verb, "network"));
        assert_eq!(wn.lemma_count(), 2);
        assert_eq!(wn.lemma_count_for(Pos::Adj), 0);
    }

    #[test]
    fn load_mode_parses_case_insensitively() {
        assert_eq!(LoadMode::parse("MMAP"), Some(LoadMode::Mmap));
        assert_eq!(LoadMode::parse("owned"), Some(LoadMode::Owned));
        assert_eq!(LoadMode::parse("lazy"), None);
    }
}
