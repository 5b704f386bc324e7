//! # bpydictapp
//!
//! The core of a trilingual Bishnupriya Manipuri / Bengali / English
//! dictionary. It stores words as plain JSON partitions (one per alphabet
//! letter) and provides search, autocomplete, a moderation queue for public
//! submissions and admin editing.
//!
//! The crate is UI-agnostic: it never prints and never parses command lines or
//! HTTP requests. The `bpydict` binary is one client; a web service would be
//! another.
//!
//! ## Architecture
//!
//! ```text
//! api.rs          DictApi facade: defaults, dispatch
//!   └── commands/ one module per operation, returns CmdResult / reports
//!        └── index.rs   LexicalIndex: ordered views across partitions
//!             └── store/     PartitionStore + backends (fs, memory)
//! ```
//!
//! Cross-cutting pieces:
//!
//! - [`alphabet`]: the partition key table and grapheme-based key derivation
//! - [`model`]: `Entry`, `Language`, `KeyedEntry`
//! - [`identity`]: deterministic backfill ids and fresh ids
//! - [`config`]: layered settings
//! - [`error`]: `DictError` and its coarse `ErrorKind`
//!
//! ## Logging
//!
//! The library emits [`tracing`] events and installs no subscriber; that is
//! the binary's decision.

pub mod alphabet;
pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod identity;
pub mod index;
pub mod model;
pub mod store;

#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;
