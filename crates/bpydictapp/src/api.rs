//! # API Facade
//!
//! [`DictApi`] is the single entry point for every dictionary operation,
//! whatever the transport (the bundled CLI, an HTTP layer, tests).
//!
//! It is a **thin facade**: it owns the store, the alphabet and the settings,
//! fills in configured defaults and dispatches to `commands/*`. Business logic
//! lives in the commands; presentation lives in the caller.
//!
//! ## Operations
//!
//! | Read | Moderation | Admin |
//! |------|------------|-------|
//! | [`list_all_entries`](DictApi::list_all_entries) | [`submit_pending_entry`](DictApi::submit_pending_entry) | [`create_entry`](DictApi::create_entry) |
//! | [`get_entry`](DictApi::get_entry) | [`list_pending_entries`](DictApi::list_pending_entries) | [`update_entry`](DictApi::update_entry) |
//! | [`list_alphabet_keys`](DictApi::list_alphabet_keys) | [`approve_pending_entry`](DictApi::approve_pending_entry) | [`delete_entry`](DictApi::delete_entry) |
//! | [`list_entries_for_key`](DictApi::list_entries_for_key) | [`reject_pending_entry`](DictApi::reject_pending_entry) | [`stats`](DictApi::stats) |
//! | [`search_entries`](DictApi::search_entries) | | [`browse_entries`](DictApi::browse_entries) |
//! | [`autocomplete_entries`](DictApi::autocomplete_entries) | | [`alphabet_counts`](DictApi::alphabet_counts) |
//! | | | [`doctor`](DictApi::doctor), [`init`](DictApi::init) |
//!
//! Authentication is the transport's job; admin operations here trust their
//! caller.
//!
//! ## Concurrency
//!
//! Every method takes `&self`, so one `DictApi` can be shared across threads
//! (e.g. in an `Arc`). Writes to the same partition are serialized by the
//! store's partition locks; everything else runs in parallel.
//!
//! ## Generic Over PartitionBackend
//!
//! - Production: `DictApi<FsBackend>`
//! - Testing: `DictApi<MemBackend>`

use crate::alphabet::{Alphabet, PartitionKey};
use crate::commands::{self, CmdResult};
use crate::config::DictConfig;
use crate::error::{DictError, Result};
use crate::index::LexicalIndex;
use crate::model::{Entry, KeyedEntry};
use crate::store::fs_backend::FsBackend;
use crate::store::partition_store::PartitionStore;
use crate::store::PartitionBackend;
use serde_json::{Map, Value};
use std::path::Path;

pub use crate::commands::browse::{BrowseQuery, EntryPage};
pub use crate::commands::doctor::DoctorReport;
pub use crate::commands::stats::{AlphabetCount, StatsReport};

pub struct DictApi<B: PartitionBackend> {
    store: PartitionStore<B>,
    alphabet: Alphabet,
    config: DictConfig,
}

impl DictApi<FsBackend> {
    /// Opens the store rooted at `root`, reading `bpydict.toml` there.
    pub fn open(root: &Path) -> Result<Self> {
        let config = DictConfig::load(root)?;
        let backend = FsBackend::new(root.to_path_buf())
            .with_dataset_dirs(&config.canonical_dir, &config.pending_dir);
        Self::new(backend, config)
    }
}

impl<B: PartitionBackend> DictApi<B> {
    pub fn new(backend: B, config: DictConfig) -> Result<Self> {
        let alphabet = config.alphabet()?;
        Ok(Self {
            store: PartitionStore::with_backend(backend),
            alphabet,
            config,
        })
    }

    fn index(&self) -> LexicalIndex<'_, B> {
        LexicalIndex::new(&self.store, &self.alphabet)
    }

    pub fn config(&self) -> &DictConfig {
        &self.config
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    pub fn store(&self) -> &PartitionStore<B> {
        &self.store
    }

    // --- Read -----------------------------------------------------------

    pub fn list_all_entries(&self) -> Vec<Entry> {
        self.index().list_all()
    }

    pub fn get_entry(&self, id: &str) -> Result<KeyedEntry> {
        let id = commands::helpers::require(id, "id")?;
        self.index()
            .get_by_id(id)
            .ok_or_else(|| DictError::EntryNotFound(id.to_string()))
    }

    pub fn list_alphabet_keys(&self) -> &[PartitionKey] {
        self.index().list_partition_keys()
    }

    pub fn list_entries_for_key(&self, key: &str) -> Vec<Entry> {
        self.index().list_by_partition(key)
    }

    pub fn search_entries(&self, term: &str, language: &str) -> Result<CmdResult> {
        commands::search::run(&self.index(), term, language)
    }

    /// `limit` defaults to the configured `autocomplete_limit`.
    pub fn autocomplete_entries(
        &self,
        term: &str,
        language: &str,
        limit: Option<usize>,
    ) -> Result<CmdResult> {
        let limit = limit.unwrap_or(self.config.autocomplete_limit);
        commands::autocomplete::run(&self.index(), term, language, limit)
    }

    // --- Moderation -----------------------------------------------------

    pub fn submit_pending_entry(&self, entry: Entry) -> Result<CmdResult> {
        commands::submit::run(&self.index(), entry)
    }

    pub fn list_pending_entries(&self) -> Result<CmdResult> {
        commands::pending::run(&self.index())
    }

    pub fn approve_pending_entry(&self, id: &str) -> Result<CmdResult> {
        commands::approve::run(&self.index(), id)
    }

    pub fn reject_pending_entry(&self, id: &str) -> Result<CmdResult> {
        commands::reject::run(&self.index(), id)
    }

    // --- Admin ----------------------------------------------------------

    pub fn create_entry(&self, entry: Entry) -> Result<CmdResult> {
        commands::create::run(&self.index(), entry)
    }

    pub fn update_entry(&self, id: &str, patch: &Map<String, Value>) -> Result<CmdResult> {
        commands::update::run(&self.index(), id, patch)
    }

    pub fn delete_entry(&self, id: &str) -> Result<CmdResult> {
        commands::delete::run(&self.index(), id)
    }

    pub fn stats(&self) -> Result<StatsReport> {
        commands::stats::run(&self.index(), self.config.stats_top_categories)
    }

    pub fn alphabet_counts(&self) -> Vec<AlphabetCount> {
        self.index()
            .alphabet_counts()
            .into_iter()
            .map(|(letter, count)| AlphabetCount { letter, count })
            .collect()
    }

    pub fn browse_entries(&self, query: &BrowseQuery) -> Result<EntryPage> {
        commands::browse::run(&self.index(), query, self.config.page_size)
    }

    // --- Maintenance ----------------------------------------------------

    pub fn init(&self) -> Result<CmdResult> {
        commands::init::run(&self.store)
    }

    pub fn doctor(&self) -> Result<DoctorReport> {
        commands::doctor::run(&self.index())
    }
}
