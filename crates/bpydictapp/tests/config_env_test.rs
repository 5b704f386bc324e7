//! Environment overrides live in their own test binary: the variables are
//! process-wide and no other test here may load config meanwhile.

use bpydictapp::config::{DictConfig, CONFIG_FILE_NAME};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_env_overrides_file_and_defaults() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join(CONFIG_FILE_NAME),
        "stats_top_categories = 7\npage_size = 25\n",
    )
    .unwrap();

    std::env::set_var("BPYDICT_STATS_TOP_CATEGORIES", "3");
    std::env::set_var("BPYDICT_PENDING_DIR", "queue");
    let config = DictConfig::load(dir.path());
    std::env::remove_var("BPYDICT_STATS_TOP_CATEGORIES");
    std::env::remove_var("BPYDICT_PENDING_DIR");

    let config = config.unwrap();
    assert_eq!(config.stats_top_categories, 3);
    assert_eq!(config.pending_dir, "queue");
    assert_eq!(config.page_size, 25);
    assert_eq!(config.canonical_dir, "alphabets");
}
