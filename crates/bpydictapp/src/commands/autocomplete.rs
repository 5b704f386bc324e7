use super::helpers::{contains_folded, language_param, require};
use crate::commands::CmdResult;
use crate::error::{DictError, Result};
use crate::index::LexicalIndex;
use crate::model::{KeyedEntry, Language};
use crate::store::{Dataset, PartitionBackend};
use std::collections::HashSet;

struct Candidate {
    keyed: KeyedEntry,
    folded: String,
    is_prefix: bool,
}

/// Prefix-first suggestions.
///
/// For Bishnupriya the candidate set widens in three steps, each only if the
/// previous left fewer than `limit` words: prefix matches in the term's own
/// partition, substring matches in that partition, substring matches
/// everywhere. Other languages take substring matches everywhere at once.
///
/// Ranking sees every candidate: prefix matches first, then the matched text
/// in case-insensitive order. Truncation to `limit` happens last.
pub fn run<B: PartitionBackend>(
    index: &LexicalIndex<B>,
    term: &str,
    language: &str,
    limit: usize,
) -> Result<CmdResult> {
    let term = require(term, "term")?;
    let Some(language) = language_param(language)? else {
        return Ok(CmdResult::default());
    };
    if limit == 0 {
        return Err(DictError::InvalidInput(
            "limit must be at least 1".to_string(),
        ));
    }

    let needle = term.to_lowercase();
    let mut collector = Collector::new(language, &needle);

    if language.is_primary() {
        let own: Vec<KeyedEntry> = match index.alphabet().derive_key(term) {
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
        };

        collector.take(&own, true);
        if collector.len() < limit {
            collector.take(&own, false);
        }
        if collector.len() < limit {
            collector.take(&index.scan(Dataset::Canonical), false);
        }
    } else {
        collector.take(&index.scan(Dataset::Canonical), false);
    }

    let mut ranked = collector.candidates;
    ranked.sort_by(|a, b| {
        b.is_prefix
            .cmp(&a.is_prefix)
            .then_with(|| a.folded.cmp(&b.folded))
    });
    ranked.truncate(limit);

    Ok(CmdResult::default().with_listed_entries(ranked.into_iter().map(|c| c.keyed).collect()))
}

struct Collector<'t> {
    language: Language,
    needle: &'t str,
    seen: HashSet<String>,
    candidates: Vec<Candidate>,
}

impl<'t> Collector<'t> {
    fn new(language: Language, needle: &'t str) -> Self {
        Self {
            language,
            needle,
            seen: HashSet::new(),
            candidates: Vec::new(),
        }
    }

    fn len(&self) -> usize {
        self.candidates.len()
    }

    /// Adds unseen matches. `prefix_only` restricts to prefix matches.
    fn take(&mut self, entries: &[KeyedEntry], prefix_only: bool) {
        for keyed in entries {
            if self.seen.contains(&keyed.entry.id) {
                continue;
            }
            let folded = keyed.entry.text(self.language).to_lowercase();
            let is_prefix = folded.starts_with(self.needle);
            let matched = if prefix_only {
                is_prefix
            } else {
                contains_folded(&folded, self.needle)
            };
            if !matched {
                continue;
            }
            self.seen.insert(keyed.entry.id.clone());
            self.candidates.push(Candidate {
                keyed: keyed.clone(),
                folded,
                is_prefix,
            });
        }
    }
}
