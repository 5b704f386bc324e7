//! # Alphabet and Partition Keys
//!
//! Every word is stored in the partition named after the first letter of its
//! Bishnupriya text. The [`Alphabet`] is the closed table of legal partition
//! keys; it is built once at startup (see [`crate::config::DictConfig::alphabet`])
//! and passed by reference to everything that needs it.
//!
//! ## Key Derivation
//!
//! Keys are derived from the first *grapheme cluster*, never from the first
//! byte or code point. Bengali script clusters a consonant with its vowel
//! signs (and, under Unicode 15.1+, with virama conjuncts), so the cluster of
//! `কি` is the whole of `কি`. The derived key is therefore the **longest**
//! alphabet letter that prefixes the first cluster:
//!
//! | Text     | First cluster | Key  |
//! |----------|---------------|------|
//! | `কলম`    | `ক`           | `ক`  |
//! | `কিতাব`  | `কি`          | `ক`  |
//! | `ড়া`     | `ড়া`          | `ড়`  |
//!
//! Nukta letters are stored decomposed (`ড` + `়`). Their precomposed code
//! points (U+09DC, U+09DD, U+09DF) are folded to the decomposed form first.
//!
//! A text whose first cluster matches no letter has no key. That is a valid
//! negative result, not an error: such a word can neither be stored nor found
//! by partition.

use crate::error::{DictError, Result};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use unicode_segmentation::UnicodeSegmentation;

/// The Bishnupriya Manipuri partition letters, in display order.
pub const BISHNUPRIYA_LETTERS: [&str; 50] = [
    "অ", "আ", "ই", "ঈ", "উ", "ঊ", "ঋ", "এ", "ঐ", "ও", "ঔ", //
    "ক", "খ", "গ", "ঘ", "ঙ", //
    "চ", "ছ", "জ", "ঝ", "ঞ", //
    "ট", "ঠ", "ড", "ঢ", "ণ", //
    "ত", "থ", "দ", "ধ", "ন", //
    "প", "ফ", "ব", "ভ", "ম", //
    "য", "র", "ল", "শ", "ষ", //
    "স", "হ", "ড়", "ঢ়", "য়", //
    "ৎ", "ং", "ঃ", "ঁ",
];

const PRECOMPOSED_ALIASES: [(&str, &str); 3] = [
    ("\u{09DC}", "\u{09A1}\u{09BC}"),
    ("\u{09DD}", "\u{09A2}\u{09BC}"),
    ("\u{09DF}", "\u{09AF}\u{09BC}"),
];

/// A legal partition name: one alphabet letter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PartitionKey(String);

impl PartitionKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// File name of this partition inside a dataset directory.
    pub fn file_name(&self) -> String {
        format!("{}.json", self.0)
    }
}

impl fmt::Display for PartitionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PartitionKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Immutable table of partition keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    keys: Vec<PartitionKey>,
    /// Indexes into `keys`, longest letter first.
    longest_first: Vec<usize>,
}

impl Alphabet {
    /// Builds an alphabet from letters in display order. Duplicates are dropped.
    pub fn new<I, S>(letters: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut keys: Vec<PartitionKey> = Vec::new();
        for letter in letters {
            let letter = fold_precomposed(letter.as_ref().trim()).into_owned();
            if letter.is_empty() {
                return Err(DictError::InvalidInput(
                    "Alphabet letters cannot be empty".to_string(),
                ));
            }
            if !keys.iter().any(|k| k.0 == letter) {
                keys.push(PartitionKey(letter));
            }
        }
        if keys.is_empty() {
            return Err(DictError::InvalidInput(
                "Alphabet must contain at least one letter".to_string(),
            ));
        }

        let mut longest_first: Vec<usize> = (0..keys.len()).collect();
        longest_first.sort_by(|a, b| keys[*b].0.len().cmp(&keys[*a].0.len()));

        Ok(Self {
            keys,
            longest_first,
        })
    }

    pub fn bishnupriya() -> Self {
        let mut keys: Vec<PartitionKey> = BISHNUPRIYA_LETTERS
            .iter()
            .map(|l| PartitionKey(l.to_string()))
            .collect();
        keys.dedup();
        let mut longest_first: Vec<usize> = (0..keys.len()).collect();
        longest_first.sort_by(|a, b| keys[*b].0.len().cmp(&keys[*a].0.len()));
        Self {
            keys,
            longest_first,
        }
    }

    /// All keys in table order.
    pub fn keys(&self) -> &[PartitionKey] {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Exact lookup of a letter (after precomposed folding).
    pub fn key(&self, letter: &str) -> Option<&PartitionKey> {
        let folded = fold_precomposed(letter.trim());
        self.keys.iter().find(|k| k.0 == folded.as_ref())
    }

    pub fn contains(&self, letter: &str) -> bool {
        self.key(letter).is_some()
    }

    /// Maps a word to the partition it belongs to.
    pub fn derive_key(&self, text: &str) -> Option<&PartitionKey> {
        let first = text.trim_start().graphemes(true).next()?;
        let first = fold_precomposed(first);
        self.longest_first
            .iter()
            .map(|&i| &self.keys[i])
            .find(|k| first.starts_with(k.as_str()))
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Self::bishnupriya()
    }
}

fn fold_precomposed(s: &str) -> Cow<'_, str> {
    for (precomposed, decomposed) in PRECOMPOSED_ALIASES {
        if let Some(rest) = s.strip_prefix(precomposed) {
            return Cow::Owned(format!("{}{}", decomposed, rest));
        }
    }
    Cow::Borrowed(s)
}
