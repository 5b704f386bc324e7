//! # bpydict CLI
//!
//! A terminal client for the dictionary store. The binary is intentionally
//! thin: everything lives in `src/cli/`, and this file only invokes
//! `cli::run()` and turns a failure into an exit code.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  CLI Layer (crates/bpydict/src/cli/)                     │
//! │  - clap argument parsing (setup.rs)                      │
//! │  - tracing setup + dispatch (commands.rs)                │
//! │  - colored terminal output / --json (print.rs)           │
//! └──────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌──────────────────────────────────────────────────────────┐
//! │  bpydictapp::api::DictApi                                │
//! │  - store, alphabet, settings; dispatch to commands/*     │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Exit codes: 0 on success, 1 on any error, 2 on usage errors (clap).

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
