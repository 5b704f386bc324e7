//! # Configuration
//!
//! Dictionary settings are loaded with [`confique`] from, in priority order:
//!
//! 1. **Environment variables**: `BPYDICT_CANONICAL_DIR`, `BPYDICT_PAGE_SIZE`, etc.
//! 2. **Store Config**: `bpydict.toml` in the store root.
//! 3. **Compiled Defaults**: via `#[config(default = ...)]`.
//!
//! The store root itself is not a setting here; the caller picks it (the CLI
//! takes `--data-dir` / `BPYDICT_DATA_DIR`) and passes it to [`DictConfig::load`].
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `canonical_dir` | `alphabets` | Directory of approved words |
//! | `pending_dir` | `usersData` | Directory of submissions awaiting review |
//! | `autocomplete_limit` | `10` | Suggestions returned when no limit is given |
//! | `stats_top_categories` | `10` | Categories listed by `stats` |
//! | `page_size` | `10` | Words per page when browsing |
//! | `alphabet` | Bishnupriya letters | Partition letters, in display order |

use crate::alphabet::Alphabet;
use crate::error::{DictError, Result};
use confique::Config;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const CONFIG_FILE_NAME: &str = "bpydict.toml";

#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct DictConfig {
    /// Directory (under the store root) holding approved words.
    #[config(default = "alphabets", env = "BPYDICT_CANONICAL_DIR")]
    pub canonical_dir: String,

    /// Directory (under the store root) holding pending submissions.
    #[config(default = "usersData", env = "BPYDICT_PENDING_DIR")]
    pub pending_dir: String,

    #[config(default = 10, env = "BPYDICT_AUTOCOMPLETE_LIMIT")]
    pub autocomplete_limit: usize,

    #[config(default = 10, env = "BPYDICT_STATS_TOP_CATEGORIES")]
    pub stats_top_categories: usize,

    #[config(default = 10, env = "BPYDICT_PAGE_SIZE")]
    pub page_size: usize,

    /// Partition letters. When absent, the Bishnupriya alphabet.
    pub alphabet: Option<Vec<String>>,
}

impl Default for DictConfig {
    fn default() -> Self {
        Self {
            canonical_dir: "alphabets".to_string(),
            pending_dir: "usersData".to_string(),
            autocomplete_limit: 10,
            stats_top_categories: 10,
            page_size: 10,
            alphabet: None,
        }
    }
}

impl DictConfig {
    /// Loads env overrides and `bpydict.toml` from `root` (if present) over
    /// the defaults.
    pub fn load(root: &Path) -> Result<Self> {
        let config = DictConfig::builder()
            .env()
            .file(root.join(CONFIG_FILE_NAME))
            .load()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("canonical_dir", &self.canonical_dir),
            ("pending_dir", &self.pending_dir),
        ] {
            if value.trim().is_empty() {
                return Err(DictError::InvalidInput(format!("{} cannot be empty", name)));
            }
        }
        if self.canonical_dir == self.pending_dir {
            return Err(DictError::InvalidInput(
                "canonical_dir and pending_dir must differ".to_string(),
            ));
        }
        if self.autocomplete_limit == 0 || self.page_size == 0 {
            return Err(DictError::InvalidInput(
                "autocomplete_limit and page_size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Builds the partition key table. Called once at startup.
    pub fn alphabet(&self) -> Result<Alphabet> {
        match &self.alphabet {
            Some(letters) => Alphabet::new(letters),
            None => Ok(Alphabet::bishnupriya()),
        }
    }
}
