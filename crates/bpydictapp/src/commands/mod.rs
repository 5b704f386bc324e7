//! # Command Layer
//!
//! The business logic of the dictionary. Each operation lives in its own
//! submodule as a plain `run` function over a [`LexicalIndex`](crate::index::LexicalIndex)
//! (which carries the store and the alphabet).
//!
//! Commands never print, prompt or pick exit codes. They return a
//! [`CmdResult`] (entries plus structured messages) or a typed report, and the
//! caller decides how to present it.
//!
//! ## Writes
//!
//! Every write goes through [`PartitionStore::mutate`](crate::store::partition_store::PartitionStore::mutate)
//! or takes the partition locks itself when it touches two partitions
//! (approve, a moving update). Lock order is always pending before canonical,
//! and canonical partitions in key order.
//!
//! ## Testing
//!
//! Command tests run against [`MemBackend`](crate::store::mem_backend::MemBackend);
//! filesystem behavior is covered by the integration tests.
//!
//! ## Command Modules
//!
//! - [`search`]: Substring search in one language
//! - [`autocomplete`]: Prefix-first suggestions
//! - [`submit`]: Public submission into the pending set
//! - [`pending`]: Moderation queue listing
//! - [`approve`]: Pending to canonical
//! - [`reject`]: Drop a submission
//! - [`create`]: Admin insert into canonical
//! - [`update`]: Admin patch, moving partitions when the word's letter changes
//! - [`delete`]: Admin removal
//! - [`stats`]: Dashboard counts
//! - [`browse`]: Paged admin listing
//! - [`doctor`]: Consistency report
//! - [`init`]: Create the store layout
//! - [`helpers`]: Parameter validation shared by the above

use crate::model::KeyedEntry;
use serde::Serialize;

pub mod approve;
pub mod autocomplete;
pub mod browse;
pub mod create;
pub mod delete;
pub mod doctor;
pub mod helpers;
pub mod init;
pub mod pending;
pub mod reject;
pub mod search;
pub mod stats;
pub mod submit;
pub mod update;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
}

#[derive(Debug, Clone, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default, Serialize)]
pub struct CmdResult {
    /// Entries written by the command, as stored after the write.
    pub affected_entries: Vec<KeyedEntry>,
    /// Entries to display.
    pub listed_entries: Vec<KeyedEntry>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_listed_entries(mut self, entries: Vec<KeyedEntry>) -> Self {
        self.listed_entries = entries;
        self
    }

    pub fn with_affected_entries(mut self, entries: Vec<KeyedEntry>) -> Self {
        self.affected_entries = entries;
        self
    }
}
