use super::helpers::contains_folded;
use crate::error::{DictError, Result};
use crate::index::LexicalIndex;
use crate::model::{KeyedEntry, Language};
use crate::store::{Dataset, PartitionBackend};
use serde::Serialize;

/// Admin listing filter. `limit` falls back to the configured page size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowseQuery {
    /// 1-based.
    pub page: usize,
    pub limit: Option<usize>,
    /// Matched against all three languages.
    pub search: Option<String>,
    /// Restrict to one partition. `"all"` means no restriction.
    pub alphabet: Option<String>,
}

impl Default for BrowseQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: None,
            search: None,
            alphabet: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryPage {
    pub words: Vec<KeyedEntry>,
    pub page: usize,
    pub limit: usize,
    pub total: usize,
    pub total_pages: usize,
}

pub fn run<B: PartitionBackend>(
    index: &LexicalIndex<B>,
    query: &BrowseQuery,
    default_limit: usize,
) -> Result<EntryPage> {
    let limit = query.limit.unwrap_or(default_limit);
    if query.page == 0 || limit == 0 {
        return Err(DictError::InvalidInput(
            "page and limit must be at least 1".to_string(),
        ));
    }

    let alphabet = query
        .alphabet
        .as_deref()
        .map(str::trim)
        .filter(|a| !a.is_empty() && *a != "all");
    let mut words: Vec<KeyedEntry> = match alphabet {
        Some(letter) => match index.alphabet().key(letter) {
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
        },
        None => index.scan(Dataset::Canonical),
    };

    if let Some(term) = query.search.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
        let needle = term.to_lowercase();
        words.retain(|k| {
            Language::ALL
                .iter()
                .any(|lang| contains_folded(k.entry.text(*lang), &needle))
        });
    }

    let total = words.len();
    let page_words = words
        .into_iter()
        .skip((query.page - 1).saturating_mul(limit))
        .take(limit)
        .collect();

    Ok(EntryPage {
        words: page_words,
        page: query.page,
        limit,
        total,
        total_pages: total.div_ceil(limit),
    })
}
