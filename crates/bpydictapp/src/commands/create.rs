use super::helpers::storage_key;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::identity::fresh_id;
use crate::index::LexicalIndex;
use crate::model::{Entry, KeyedEntry};
use crate::store::{Dataset, PartitionBackend};
use tracing::info;

/// Admin insert straight into the canonical set.
pub fn run<B: PartitionBackend>(index: &LexicalIndex<B>, entry: Entry) -> Result<CmdResult> {
    let key = storage_key(index.alphabet(), &entry.bpy)?.clone();

    let mut entry = entry;
    entry.strip_submission_fields();
    entry.id = fresh_id();

    index.store().mutate(Dataset::Canonical, &key, |file| {
        file.entries_mut().push(entry.clone());
        Ok(())
    })?;
    info!(id = %entry.id, %key, "Word created");

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("Word added: {}", entry.bpy)));
    Ok(result.with_affected_entries(vec![KeyedEntry { key, entry }]))
}
