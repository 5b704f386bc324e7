use super::helpers::storage_key;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::identity::fresh_id;
use crate::index::LexicalIndex;
use crate::model::{Entry, EntryStatus, KeyedEntry};
use crate::store::{Dataset, PartitionBackend};
use chrono::{SecondsFormat, Utc};
use tracing::info;

/// Queues a public submission for moderation.
pub fn run<B: PartitionBackend>(index: &LexicalIndex<B>, entry: Entry) -> Result<CmdResult> {
    let key = storage_key(index.alphabet(), &entry.bpy)?.clone();

    let mut entry = entry;
    entry.strip_submission_fields();
    entry.id = fresh_id();
    entry.status = Some(EntryStatus::Pending);
    entry.added_at = Some(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true));

    index.store().mutate(Dataset::Pending, &key, |file| {
        file.entries_mut().push(entry.clone());
        Ok(())
    })?;
    info!(id = %entry.id, %key, "Word submitted for review");

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Submitted for review: {}",
        entry.bpy
    )));
    Ok(result.with_affected_entries(vec![KeyedEntry { key, entry }]))
}
