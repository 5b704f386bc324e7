use super::helpers::{contains_folded, language_param, require};
use crate::commands::CmdResult;
use crate::error::Result;
use crate::index::LexicalIndex;
use crate::model::{KeyedEntry, Language};
use crate::store::{Dataset, PartitionBackend};
use tracing::debug;

/// Substring search over one language field of the canonical set.
///
/// A Bishnupriya term can only match words in its own partition (the field
/// searched is the one partitions are keyed on), so only that partition is
/// read. Other languages scan everything.
pub fn run<B: PartitionBackend>(
    index: &LexicalIndex<B>,
    term: &str,
    language: &str,
) -> Result<CmdResult> {
    let term = require(term, "term")?;
    let Some(language) = language_param(language)? else {
        return Ok(CmdResult::default());
    };

    let needle = term.to_lowercase();
    let candidates = candidates(index, term, language);
    let scanned = candidates.len();
    let matches: Vec<KeyedEntry> = candidates
        .into_iter()
        .filter(|k| contains_folded(k.entry.text(language), &needle))
        .collect();

    debug!(%term, %language, scanned, matched = matches.len(), "Search");
    Ok(CmdResult::default().with_listed_entries(matches))
}

fn candidates<B: PartitionBackend>(
    index: &LexicalIndex<B>,
    term: &str,
    language: Language,
) -> Vec<KeyedEntry> {
    if !language.is_primary() {
        return index.scan(Dataset::Canonical);
    }
    match index.alphabet().derive_key(term) {
        Some(key) => index
            .store()
            .load(Dataset::Canonical, key)
            .into_iter()
            .map(|entry| KeyedEntry {
                key: key.clone(),
                entry,
            })
            .collect(),
        None => Vec::new(),
    }
}
