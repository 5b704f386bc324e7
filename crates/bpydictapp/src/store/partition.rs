use crate::alphabet::PartitionKey;
use crate::error::{DictError, Result};
use crate::model::Entry;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The content of one partition file, in whichever shape it was found.
///
/// Legacy data files are bare arrays; newer ones wrap the array in an object
/// that also names the letter. Writes keep the shape they were read with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PartitionFile {
    BareList(Vec<Entry>),
    Wrapped(WrappedPartition),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WrappedPartition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub letter: Option<String>,
    #[serde(default)]
    pub words: Vec<Entry>,
    /// Any other partition-level metadata, kept as found.
    #[serde(flatten)]
    pub meta: Map<String, Value>,
}

impl PartitionFile {
    /// An empty partition in the wrapped shape.
    pub fn fresh(key: &PartitionKey) -> Self {
        PartitionFile::Wrapped(WrappedPartition {
            letter: Some(key.to_string()),
            words: Vec::new(),
            meta: Map::new(),
        })
    }

    pub fn parse(key: &PartitionKey, text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| DictError::MalformedPartition {
            key: key.to_string(),
            reason: e.to_string(),
        })
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn entries(&self) -> &[Entry] {
        match self {
            PartitionFile::BareList(words) => words,
            PartitionFile::Wrapped(wrapped) => &wrapped.words,
        }
    }

    pub fn entries_mut(&mut self) -> &mut Vec<Entry> {
        match self {
            PartitionFile::BareList(words) => words,
            PartitionFile::Wrapped(wrapped) => &mut wrapped.words,
        }
    }

    pub fn into_entries(self) -> Vec<Entry> {
        match self {
            PartitionFile::BareList(words) => words,
            PartitionFile::Wrapped(wrapped) => wrapped.words,
        }
    }

    pub fn is_bare(&self) -> bool {
        matches!(self, PartitionFile::BareList(_))
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.entries().iter().position(|e| e.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }
}
