use super::partition::PartitionFile;
use super::{Dataset, PartitionBackend};
use crate::alphabet::PartitionKey;
use crate::error::{DictError, Result};
use crate::identity::backfill_ids;
use crate::model::Entry;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, warn};

type LockTable = HashMap<(Dataset, PartitionKey), Arc<Mutex<()>>>;

/// Partition persistence over a [`PartitionBackend`].
///
/// Reads are fail-soft and lock-free. Every mutation is a whole-partition
/// read-modify-write under that partition's lock (see [`PartitionStore::mutate`]).
pub struct PartitionStore<B: PartitionBackend> {
    backend: B,
    available: AtomicBool,
    locks: Mutex<LockTable>,
}

impl<B: PartitionBackend> PartitionStore<B> {
    pub fn with_backend(backend: B) -> Self {
        let available = backend.root_available();
        if !available {
            warn!("Store root not found; serving empty results until it is initialized");
        }
        Self {
            backend,
            available: AtomicBool::new(available),
            locks: Mutex::new(HashMap::new()),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn is_available(&self) -> bool {
        self.available.load(Ordering::SeqCst)
    }

    pub fn init(&self) -> Result<()> {
        self.backend.init()?;
        self.available.store(true, Ordering::SeqCst);
        Ok(())
    }

    /// Strict read: `Ok(None)` when the file is absent, `MalformedPartition`
    /// when it does not parse. Ids are backfilled on the way out.
    pub fn read_file(&self, dataset: Dataset, key: &PartitionKey) -> Result<Option<PartitionFile>> {
        let Some(text) = self.backend.read_partition(dataset, key)? else {
            return Ok(None);
        };
        let mut file = PartitionFile::parse(key, &text)?;
        let assigned = backfill_ids(file.entries_mut(), key);
        debug!(
            %dataset,
            %key,
            entries = file.entries().len(),
            backfilled = assigned,
            "Loaded partition"
        );
        Ok(Some(file))
    }

    /// Entries of one partition. Never fails: missing, unreadable and
    /// malformed partitions all read as empty.
    pub fn load(&self, dataset: Dataset, key: &PartitionKey) -> Vec<Entry> {
        if !self.is_available() {
            return Vec::new();
        }
        match self.read_file(dataset, key) {
            Ok(Some(file)) => file.into_entries(),
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(%dataset, %key, error = %e, "Treating unreadable partition as empty");
                Vec::new()
            }
        }
    }

    /// Loads a partition for modification. Caller must hold the partition lock.
    ///
    /// A malformed partition is replaced by a fresh one here; its old content
    /// is overwritten by the following save.
    pub fn load_for_update(&self, dataset: Dataset, key: &PartitionKey) -> Result<PartitionFile> {
        self.ensure_available()?;
        match self.read_file(dataset, key) {
            Ok(Some(file)) => Ok(file),
            Ok(None) => Ok(PartitionFile::fresh(key)),
            Err(DictError::MalformedPartition { reason, .. }) => {
                warn!(
                    %dataset,
                    %key,
                    %reason,
                    "Malformed partition will be replaced on write"
                );
                Ok(PartitionFile::fresh(key))
            }
            Err(e) => Err(e),
        }
    }

    /// Whole-partition overwrite, atomic through the backend.
    pub fn save(&self, dataset: Dataset, key: &PartitionKey, file: &PartitionFile) -> Result<()> {
        self.ensure_available()?;
        let content = file.to_json()?;
        self.backend.write_partition(dataset, key, &content)?;
        debug!(%dataset, %key, entries = file.entries().len(), "Saved partition");
        Ok(())
    }

    /// The write lock of one partition.
    pub fn partition_lock(&self, dataset: Dataset, key: &PartitionKey) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock();
        locks
            .entry((dataset, key.clone()))
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Read-modify-write of one partition under its lock.
    ///
    /// `f` sees the current content; the partition is saved only if `f`
    /// returns Ok. An Err leaves the partition untouched.
    pub fn mutate<T, F>(&self, dataset: Dataset, key: &PartitionKey, f: F) -> Result<T>
    where
        F: FnOnce(&mut PartitionFile) -> Result<T>,
    {
        self.ensure_available()?;
        let lock = self.partition_lock(dataset, key);
        let _guard = lock.lock();

        let mut file = self.load_for_update(dataset, key)?;
        let out = f(&mut file)?;
        self.save(dataset, key, &file)?;
        Ok(out)
    }

    fn ensure_available(&self) -> Result<()> {
        if self.is_available() {
            Ok(())
        } else {
            Err(DictError::StorageUnavailable(
                "store root does not exist".to_string(),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::Alphabet;
    use crate::store::mem_backend::MemBackend;

    fn ka() -> PartitionKey {
        Alphabet::default().key("ক").cloned().unwrap()
    }

    fn store() -> PartitionStore<MemBackend> {
        PartitionStore::with_backend(MemBackend::new())
    }

    #[test]
    fn missing_partition_loads_empty() {
        assert!(store().load(Dataset::Canonical, &ka()).is_empty());
    }

    #[test]
    fn malformed_partition_loads_empty() {
        let store = store();
        store
            .backend()
            .insert_raw(Dataset::Canonical, "ক", "{ definitely not json");
        assert!(store.load(Dataset::Canonical, &ka()).is_empty());
        assert!(matches!(
            store.read_file(Dataset::Canonical, &ka()),
            Err(DictError::MalformedPartition { .. })
        ));
    }

    #[test]
    fn load_backfills_stable_ids() {
        let store = store();
        store.backend().insert_raw(
            Dataset::Canonical,
            "ক",
            r#"[{"bpy":"কলম","bn":"কলম","en":"pen"},{"id":"x1","bpy":"কল"}]"#,
        );
        let first = store.load(Dataset::Canonical, &ka());
        let second = store.load(Dataset::Canonical, &ka());
        assert_eq!(first, second);
        assert_eq!(first[0].id, "359052fa7a59");
        assert_eq!(first[1].id, "x1");
    }

    #[test]
    fn datasets_are_independent() {
        let store = store();
        store
            .mutate(Dataset::Pending, &ka(), |file| {
                file.entries_mut().push(Entry::new("কলম", "", ""));
                Ok(())
            })
            .unwrap();
        assert!(store.load(Dataset::Canonical, &ka()).is_empty());
        assert_eq!(store.load(Dataset::Pending, &ka()).len(), 1);
    }

    #[test]
    fn mutate_preserves_bare_shape() {
        let store = store();
        store
            .backend()
            .insert_raw(Dataset::Canonical, "ক", r#"[{"id":"a","bpy":"কলম"}]"#);
        store
            .mutate(Dataset::Canonical, &ka(), |file| {
                file.entries_mut().push(Entry::new("কল", "", ""));
                Ok(())
            })
            .unwrap();

        let raw = store.backend().raw(Dataset::Canonical, "ক").unwrap();
        assert!(raw.trim_start().starts_with('['));
        assert_eq!(store.load(Dataset::Canonical, &ka()).len(), 2);
    }

    #[test]
    fn mutate_error_skips_write() {
        let store = store();
        let result: Result<()> = store.mutate(Dataset::Canonical, &ka(), |_| {
            Err(DictError::EntryNotFound("nope".into()))
        });
        assert!(result.is_err());
        assert_eq!(store.backend().write_count(), 0);
        assert!(store.backend().raw(Dataset::Canonical, "ক").is_none());
    }

    #[test]
    fn malformed_partition_is_replaced_on_write() {
        let store = store();
        store.backend().insert_raw(Dataset::Canonical, "ক", "garbage");
        store
            .mutate(Dataset::Canonical, &ka(), |file| {
                file.entries_mut().push(Entry::new("কলম", "", ""));
                Ok(())
            })
            .unwrap();
        let entries = store.load(Dataset::Canonical, &ka());
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].bpy, "কলম");
    }

    #[test]
    fn unavailable_root_reads_empty_and_refuses_writes() {
        let store = PartitionStore::with_backend(MemBackend::unavailable());
        assert!(!store.is_available());
        assert!(store.load(Dataset::Canonical, &ka()).is_empty());

        let err = store
            .mutate(Dataset::Canonical, &ka(), |_| Ok(()))
            .unwrap_err();
        assert!(matches!(err, DictError::StorageUnavailable(_)));

        store.init().unwrap();
        assert!(store.is_available());
        store.mutate(Dataset::Canonical, &ka(), |_| Ok(())).unwrap();
    }

    #[test]
    fn write_failure_propagates() {
        let store = store();
        store.backend().set_simulate_write_error(true);
        let result = store.mutate(Dataset::Canonical, &ka(), |file| {
            file.entries_mut().push(Entry::new("কলম", "", ""));
            Ok(())
        });
        assert!(result.is_err());
        assert!(store.load(Dataset::Canonical, &ka()).is_empty());
    }

    #[test]
    fn same_partition_shares_a_lock() {
        let store = store();
        let a = store.partition_lock(Dataset::Canonical, &ka());
        let b = store.partition_lock(Dataset::Canonical, &ka());
        let c = store.partition_lock(Dataset::Pending, &ka());
        assert!(Arc::ptr_eq(&a, &b));
        assert!(!Arc::ptr_eq(&a, &c));
    }
}
