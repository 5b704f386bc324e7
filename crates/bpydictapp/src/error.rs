use thiserror::Error;

#[derive(Error, Debug)]
pub enum DictError {
    #[error("Word not found: {0}")]
    EntryNotFound(String),

    #[error("No such pending word: {0}")]
    PendingNotFound(String),

    #[error("Missing parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Malformed partition {key}: {reason}")]
    MalformedPartition { key: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(#[from] confique::Error),
}

/// Coarse classification a transport layer maps onto its own status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    InvalidInput,
    Storage,
}

impl DictError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DictError::EntryNotFound(_) | DictError::PendingNotFound(_) => ErrorKind::NotFound,
            DictError::MissingParameter(_) | DictError::InvalidInput(_) => ErrorKind::InvalidInput,
            DictError::StorageUnavailable(_)
            | DictError::MalformedPartition { .. }
            | DictError::Io(_)
            | DictError::Serialization(_)
            | DictError::Config(_) => ErrorKind::Storage,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }
}

pub type Result<T> = std::result::Result<T, DictError>;
