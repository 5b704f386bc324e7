//! # CLI Behavior
//!
//! This is **one possible client** of the dictionary, not the application
//! itself. It is the only place that knows about terminal I/O, exit codes and
//! output formatting.
//!
//! ## Store Location
//!
//! `--data-dir` (or `BPYDICT_DATA_DIR`) picks the store root. Without it, the
//! platform data directory is used (via `directories`). Run `bpydict init`
//! once to create the layout.
//!
//! ## Output
//!
//! Human-readable, colored output by default. `--json` prints the structured
//! result instead, for scripting.
//!
//! ## Logging
//!
//! Library events go to stderr through `tracing-subscriber`. The filter comes
//! from `BPYDICT_LOG` (e.g. `BPYDICT_LOG=bpydictapp=debug`); otherwise
//! warnings only, or everything at debug with `-v`.
//!
//! ## Module Structure
//!
//! - `setup`: Argument parsing via clap
//! - `commands`: Dispatch to the API and choose the printer
//! - `print`: Terminal formatting

mod commands;
mod print;
pub mod setup;

pub use commands::run;
