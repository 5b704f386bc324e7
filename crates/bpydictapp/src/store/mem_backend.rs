use super::{Dataset, PartitionBackend};
use crate::alphabet::PartitionKey;
use crate::error::{DictError, Result};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// In-memory storage backend for testing.
///
/// Keeps raw partition text keyed by `(dataset, name)`, so tests can plant
/// malformed content or stray partitions with [`MemBackend::insert_raw`].
pub struct MemBackend {
    partitions: Mutex<HashMap<(Dataset, String), String>>,
    available: AtomicBool,
    simulate_write_error: AtomicBool,
    writes: AtomicUsize,
}

impl Default for MemBackend {
    fn default() -> Self {
        Self {
            partitions: Mutex::new(HashMap::new()),
            available: AtomicBool::new(true),
            simulate_write_error: AtomicBool::new(false),
            writes: AtomicUsize::new(0),
        }
    }
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// A backend whose root does not exist until `init` is called.
    pub fn unavailable() -> Self {
        let backend = Self::default();
        backend.available.store(false, Ordering::SeqCst);
        backend
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.simulate_write_error.store(simulate, Ordering::SeqCst);
    }

    /// Test helper to plant arbitrary partition text, bypassing every check.
    pub fn insert_raw(&self, dataset: Dataset, name: &str, content: &str) {
        self.partitions
            .lock()
            .insert((dataset, name.to_string()), content.to_string());
    }

    pub fn raw(&self, dataset: Dataset, name: &str) -> Option<String> {
        self.partitions
            .lock()
            .get(&(dataset, name.to_string()))
            .cloned()
    }

    /// Number of successful writes so far.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

impl PartitionBackend for MemBackend {
    fn read_partition(&self, dataset: Dataset, key: &PartitionKey) -> Result<Option<String>> {
        Ok(self.raw(dataset, key.as_str()))
    }

    fn write_partition(&self, dataset: Dataset, key: &PartitionKey, content: &str) -> Result<()> {
        if !self.root_available() {
            return Err(DictError::StorageUnavailable(
                "memory store not initialized".to_string(),
            ));
        }
        if self.simulate_write_error.load(Ordering::SeqCst) {
            return Err(DictError::Io(std::io::Error::other("Simulated write error")));
        }
        self.insert_raw(dataset, key.as_str(), content);
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn list_partition_names(&self, dataset: Dataset) -> Result<Vec<String>> {
        let partitions = self.partitions.lock();
        let mut names: Vec<String> = partitions
            .keys()
            .filter(|(d, _)| *d == dataset)
            .map(|(_, name)| name.clone())
            .collect();
        names.sort();
        Ok(names)
    }

    fn root_available(&self) -> bool {
        self.available.load(Ordering::SeqCst)
    }

    fn init(&self) -> Result<()> {
        self.available.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn location(&self) -> PathBuf {
        PathBuf::from("/mem")
    }

    fn partition_path(&self, dataset: Dataset, key: &PartitionKey) -> PathBuf {
        PathBuf::from(format!("/mem/{}/{}", dataset, key.file_name()))
    }
}
