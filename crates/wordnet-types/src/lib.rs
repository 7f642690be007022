//! Shared types for WordNet lookups.
//!
//! [`Pos`] keys every lookup into the index and exception files, and
//! [`lemma_key`] is the one normalization both sides agree on: WordNet writes
//! multi-word lemmas with underscores, so spaces are folded into `_`.
//!
//! ```rust
//! use wordnet_types::{Pos, lemma_key};
//!
//! assert_eq!(Pos::from_char('s'), Some(Pos::Adj));
//! assert_eq!(Pos::Noun.index_file(), "index.noun");
//! assert_eq!(lemma_key(" ice cream "), "ice_cream");
//! ```

use std::fmt;

/// Part-of-speech marker as used by WordNet files (`n`, `v`, `a`/`s`, `r`).
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub enum Pos {
    Noun,
    Verb,
    Adj,
    Adv,
}

impl Pos {
    pub const ALL: [Pos; 4] = [Pos::Noun, Pos::Verb, Pos::Adj, Pos::Adv];

    /// Parse a WordNet POS character into an enum.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'n' => Some(Pos::Noun),
            'v' => Some(Pos::Verb),
            'a' | 's' => Some(Pos::Adj),
            'r' => Some(Pos::Adv),
            _ => None,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Pos::Noun => 'n',
            Pos::Verb => 'v',
            Pos::Adj => 'a',
            Pos::Adv => 'r',
        }
    }

    /// File stem shared by `index.*` and `*.exc` (`noun`, `verb`, `adj`, `adv`).
    pub fn file_stem(self) -> &'static str {
        match self {
            Pos::Noun => "noun",
            Pos::Verb => "verb",
            Pos::Adj => "adj",
            Pos::Adv => "adv",
        }
    }

    pub fn index_file(self) -> String {
        format!("index.{}", self.file_stem())
    }

    pub fn exception_file(self) -> String {
        format!("{}.exc", self.file_stem())
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_stem())
    }
}

/// Key used for index and exception lookups.
///
/// Trims surrounding whitespace and joins inner spaces with `_`. Case is left
/// alone: WordNet stores lowercase lemmas, so a capitalised form simply does
/// not match.
pub fn lemma_key(text: &str) -> String {
    text.trim().replace(' ', "_")
}
