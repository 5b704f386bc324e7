//! # Storage Layer
//!
//! The dictionary is stored as plain JSON files, one file per alphabet letter,
//! in two parallel datasets:
//!
//! 1. **Canonical**: approved words, searchable, public.
//! 2. **Pending**: user submissions awaiting moderation, admin-only.
//!
//! The same letter may have a partition in both datasets at once; the two are
//! fully independent.
//!
//! ## Layers
//!
//! - [`PartitionBackend`] handles the "how" of storage: raw partition text in
//!   and out, atomically. [`fs_backend::FsBackend`] is the production
//!   implementation, [`mem_backend::MemBackend`] is for tests.
//! - [`partition_store::PartitionStore`] handles the "what": parsing, the
//!   two on-disk shapes, id backfill, fail-soft reads and per-partition write
//!   locks.
//!
//! ## Storage Layout
//!
//! ```text
//! <data_dir>/
//! ├── alphabets/          # Canonical dataset
//! │   ├── অ.json
//! │   └── ক.json
//! └── usersData/          # Pending dataset
//!     └── ক.json
//! ```
//!
//! ## Partition Shapes
//!
//! A partition file is either a bare JSON array of words or an object
//! `{ "letter": "ক", "words": [...] }` with optional extra metadata. The shape
//! is decided once when the file is read and preserved on every write (see
//! [`partition::PartitionFile`]). Partitions created by this crate use the
//! wrapped shape.
//!
//! ## Failure Policy
//!
//! - Missing partition file: empty partition, not an error.
//! - Malformed partition file: logged and read as empty. The next write to that
//!   letter replaces it with a fresh, well-formed partition. **The malformed
//!   content is lost at that point**; run `doctor` to find such files first.
//! - Missing store root: reported once at startup, every read is empty and
//!   every write fails with `StorageUnavailable`.

use crate::alphabet::PartitionKey;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

pub mod fs_backend;
pub mod mem_backend;
pub mod partition;
pub mod partition_store;

/// Which of the two parallel partition sets an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dataset {
    Canonical,
    Pending,
}

impl Dataset {
    pub const ALL: [Dataset; 2] = [Dataset::Canonical, Dataset::Pending];
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dataset::Canonical => f.write_str("canonical"),
            Dataset::Pending => f.write_str("pending"),
        }
    }
}

/// Abstract interface for raw partition I/O.
///
/// Implementations are shared between concurrent callers, hence `Send + Sync`
/// and `&self` everywhere.
pub trait PartitionBackend: Send + Sync {
    /// Read the raw text of a partition.
    /// Returns Ok(None) if the partition does not exist.
    /// Returns Err only on actual I/O errors (permissions, disk failure).
    fn read_partition(&self, dataset: Dataset, key: &PartitionKey) -> Result<Option<String>>;

    /// Replace a partition's content.
    /// MUST be atomic (e.g. write to tmp then rename): readers see the old or
    /// the new content, never a mix.
    fn write_partition(&self, dataset: Dataset, key: &PartitionKey, content: &str) -> Result<()>;

    /// Names (without `.json`) of all partition files present in a dataset,
    /// whether or not they are legal keys.
    fn list_partition_names(&self, dataset: Dataset) -> Result<Vec<String>>;

    /// Whether the store root exists.
    fn root_available(&self) -> bool;

    /// Create the store root and dataset locations. Idempotent.
    fn init(&self) -> Result<()>;

    /// The store root, for messages.
    fn location(&self) -> PathBuf;

    /// Where a partition lives. For FsBackend this is the real path,
    /// for MemBackend a virtual one.
    fn partition_path(&self, dataset: Dataset, key: &PartitionKey) -> PathBuf;
}
