//! # Lexical Index
//!
//! The read-side view over every partition of a dataset. It never keeps a copy
//! of the data: each query walks the alphabet table in order and asks the
//! [`PartitionStore`] for the partitions it needs, so results always reflect
//! the files as they are now.
//!
//! Ordering is canonical everywhere: partitions in alphabet table order,
//! entries in file order within a partition.
//!
//! Lookups by id are a linear scan. The dictionary is tens of partitions and a
//! few thousand words, which keeps a scan well under the cost of maintaining an
//! id map through every mutation.

use crate::alphabet::{Alphabet, PartitionKey};
use crate::model::{Entry, KeyedEntry};
use crate::store::partition_store::PartitionStore;
use crate::store::{Dataset, PartitionBackend};

pub struct LexicalIndex<'a, B: PartitionBackend> {
    store: &'a PartitionStore<B>,
    alphabet: &'a Alphabet,
}

impl<'a, B: PartitionBackend> LexicalIndex<'a, B> {
    pub fn new(store: &'a PartitionStore<B>, alphabet: &'a Alphabet) -> Self {
        Self { store, alphabet }
    }

    pub fn store(&self) -> &'a PartitionStore<B> {
        self.store
    }

    pub fn alphabet(&self) -> &'a Alphabet {
        self.alphabet
    }

    /// Every canonical entry.
    pub fn list_all(&self) -> Vec<Entry> {
        self.scan(Dataset::Canonical)
            .into_iter()
            .map(|keyed| keyed.entry)
            .collect()
    }

    /// Every entry of a dataset, paired with its partition key.
    pub fn scan(&self, dataset: Dataset) -> Vec<KeyedEntry> {
        self.alphabet
            .keys()
            .iter()
            .flat_map(|key| {
                self.store
                    .load(dataset, key)
                    .into_iter()
                    .map(move |entry| KeyedEntry {
                        key: key.clone(),
                        entry,
                    })
            })
            .collect()
    }

    pub fn get_by_id(&self, id: &str) -> Option<KeyedEntry> {
        self.find(Dataset::Canonical, id)
    }

    /// First entry with `id` in a dataset, in canonical order.
    pub fn find(&self, dataset: Dataset, id: &str) -> Option<KeyedEntry> {
        self.alphabet.keys().iter().find_map(|key| {
            self.store
                .load(dataset, key)
                .into_iter()
                .find(|e| e.id == id)
                .map(|entry| KeyedEntry {
                    key: key.clone(),
                    entry,
                })
        })
    }

    /// The full key table, whether or not a partition has data.
    pub fn list_partition_keys(&self) -> &'a [PartitionKey] {
        self.alphabet.keys()
    }

    /// Canonical entries of one partition. Empty for unknown keys.
    pub fn list_by_partition(&self, key: &str) -> Vec<Entry> {
        match self.alphabet.key(key) {
            Some(key) => self.store.load(Dataset::Canonical, key),
            None => Vec::new(),
        }
    }

    /// Canonical entry count of every partition, zeros included.
    pub fn alphabet_counts(&self) -> Vec<(PartitionKey, usize)> {
        self.alphabet
            .keys()
            .iter()
            .map(|key| (key.clone(), self.store.load(Dataset::Canonical, key).len()))
            .collect()
    }
}
