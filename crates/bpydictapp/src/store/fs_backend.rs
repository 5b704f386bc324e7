use super::{Dataset, PartitionBackend};
use crate::alphabet::PartitionKey;
use crate::error::{DictError, Result};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use uuid::Uuid;

const PARTITION_EXT: &str = "json";

pub struct FsBackend {
    root: PathBuf,
    canonical_dir: String,
    pending_dir: String,
}

impl FsBackend {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            canonical_dir: "alphabets".to_string(),
            pending_dir: "usersData".to_string(),
        }
    }

    pub fn with_dataset_dirs(mut self, canonical: &str, pending: &str) -> Self {
        self.canonical_dir = canonical.to_string();
        self.pending_dir = pending.to_string();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn dataset_dir(&self, dataset: Dataset) -> PathBuf {
        match dataset {
            Dataset::Canonical => self.root.join(&self.canonical_dir),
            Dataset::Pending => self.root.join(&self.pending_dir),
        }
    }

    fn ensure_dir(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path).map_err(DictError::Io)?;
        }
        Ok(())
    }
}

/// A temp file that is removed on drop unless it was renamed into place.
struct TempFile {
    path: PathBuf,
    committed: bool,
}

impl TempFile {
    fn create(dir: &Path, content: &str) -> Result<Self> {
        let tmp = Self {
            path: dir.join(format!(".partition-{}.tmp", Uuid::new_v4())),
            committed: false,
        };
        let mut file = File::create(&tmp.path).map_err(DictError::Io)?;
        file.write_all(content.as_bytes()).map_err(DictError::Io)?;
        file.sync_all().map_err(DictError::Io)?;
        Ok(tmp)
    }

    fn persist(mut self, target: &Path) -> Result<()> {
        fs::rename(&self.path, target).map_err(DictError::Io)?;
        self.committed = true;
        Ok(())
    }
}

impl Drop for TempFile {
    fn drop(&mut self) {
        if !self.committed {
            let _ = fs::remove_file(&self.path);
        }
    }
}

impl PartitionBackend for FsBackend {
    fn read_partition(&self, dataset: Dataset, key: &PartitionKey) -> Result<Option<String>> {
        let path = self.partition_path(dataset, key);
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path).map_err(DictError::Io)?;
        Ok(Some(content))
    }

    fn write_partition(&self, dataset: Dataset, key: &PartitionKey, content: &str) -> Result<()> {
        if !self.root_available() {
            return Err(DictError::StorageUnavailable(format!(
                "store root {} does not exist",
                self.root.display()
            )));
        }
        let dir = self.dataset_dir(dataset);
        self.ensure_dir(&dir)?;

        // Atomic write: same directory so the rename never crosses filesystems
        let tmp = TempFile::create(&dir, content)?;
        tmp.persist(&self.partition_path(dataset, key))
    }

    fn list_partition_names(&self, dataset: Dataset) -> Result<Vec<String>> {
        let dir = self.dataset_dir(dataset);
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut names = Vec::new();
        for entry in fs::read_dir(&dir).map_err(DictError::Io)? {
            let path = entry.map_err(DictError::Io)?.path();
            if !path.is_file() {
                continue;
            }
            if path.extension().and_then(|e| e.to_str()) != Some(PARTITION_EXT) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    fn root_available(&self) -> bool {
        self.root.is_dir()
    }

    fn init(&self) -> Result<()> {
        self.ensure_dir(&self.root)?;
        for dataset in Dataset::ALL {
            self.ensure_dir(&self.dataset_dir(dataset))?;
        }
        Ok(())
    }

    fn location(&self) -> PathBuf {
        self.root.clone()
    }

    fn partition_path(&self, dataset: Dataset, key: &PartitionKey) -> PathBuf {
        self.dataset_dir(dataset).join(key.file_name())
    }
}
