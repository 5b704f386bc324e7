use super::helpers::require;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{DictError, Result};
use crate::index::LexicalIndex;
use crate::model::KeyedEntry;
use crate::store::{Dataset, PartitionBackend};
use tracing::info;

pub fn run<B: PartitionBackend>(index: &LexicalIndex<B>, id: &str) -> Result<CmdResult> {
    let id = require(id, "id")?;
    let located = index
        .get_by_id(id)
        .ok_or_else(|| DictError::EntryNotFound(id.to_string()))?;
    let key = located.key;

    let removed = index.store().mutate(Dataset::Canonical, &key, |file| {
        let position = file
            .position(id)
            .ok_or_else(|| DictError::EntryNotFound(id.to_string()))?;
        Ok(file.entries_mut().remove(position))
    })?;
    info!(%id, %key, "Word deleted");

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("Word deleted: {}", removed.bpy)));
    Ok(result.with_affected_entries(vec![KeyedEntry {
        key,
        entry: removed,
    }]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::MemEnv;

    #[test]
    fn deletes_from_its_partition() {
        let env = MemEnv::new();
        env.plant(
            Dataset::Canonical,
            "ক",
            r#"[{"id":"k1","bpy":"কলম"},{"id":"k2","bpy":"কল"}]"#,
        );
        let result = run(&env.index(), "k1").unwrap();
        assert_eq!(result.affected_entries[0].entry.bpy, "কলম");

        let ids: Vec<String> = env.index().list_all().into_iter().map(|e| e.id).collect();
        assert_eq!(ids, vec!["k2"]);
    }

    #[test]
    fn missing_id_is_not_found_and_writes_nothing() {
        let env = MemEnv::new();
        env.plant(Dataset::Canonical, "ক", r#"[{"id":"k1","bpy":"কলম"}]"#);
        let err = run(&env.index(), "nope").unwrap_err();
        assert!(matches!(err, DictError::EntryNotFound(_)));
        assert_eq!(env.store.backend().write_count(), 0);
    }

    #[test]
    fn pending_words_are_not_deletable_here() {
        let env = MemEnv::new();
        env.plant(
            Dataset::Pending,
            "ক",
            r#"[{"id":"p1","bpy":"কলম","status":"pending"}]"#,
        );
        assert!(run(&env.index(), "p1").unwrap_err().is_not_found());
    }
}
