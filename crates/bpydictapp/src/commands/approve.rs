use super::helpers::{require, storage_key};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{DictError, Result};
use crate::index::LexicalIndex;
use crate::model::KeyedEntry;
use crate::store::{Dataset, PartitionBackend};
use tracing::{info, warn};

/// Moves a pending word into the canonical set.
///
/// The canonical write happens first. If removing the word from pending then
/// fails, the word is in both sets; approving it again finds it already in
/// canonical, skips the insert and finishes the removal. Once it has left
/// pending, approving it again is `PendingNotFound`.
pub fn run<B: PartitionBackend>(index: &LexicalIndex<B>, id: &str) -> Result<CmdResult> {
    let id = require(id, "id")?;
    let store = index.store();

    let located = index
        .find(Dataset::Pending, id)
        .ok_or_else(|| DictError::PendingNotFound(id.to_string()))?;
    let pending_key = located.key;

    let pending_lock = store.partition_lock(Dataset::Pending, &pending_key);
    let _pending_guard = pending_lock.lock();

    // Re-read under the lock: another moderator may have got here first
    let mut pending = store.load_for_update(Dataset::Pending, &pending_key)?;
    let position = pending
        .position(id)
        .ok_or_else(|| DictError::PendingNotFound(id.to_string()))?;

    let mut entry = pending.entries()[position].clone();
    entry.strip_submission_fields();
    let canonical_key = storage_key(index.alphabet(), &entry.bpy)?.clone();

    let inserted = store.mutate(Dataset::Canonical, &canonical_key, |file| {
        if file.contains(id) {
            return Ok(false);
        }
        file.entries_mut().push(entry.clone());
        Ok(true)
    })?;
    if !inserted {
        info!(%id, key = %canonical_key, "Word already canonical, finishing approval");
    }

    pending.entries_mut().remove(position);
    if let Err(e) = store.save(Dataset::Pending, &pending_key, &pending) {
        warn!(
            %id,
            key = %pending_key,
            error = %e,
            "Approved word could not be removed from pending; approve again to finish"
        );
        return Err(e);
    }
    info!(%id, key = %canonical_key, "Word approved");

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("Word approved: {}", entry.bpy)));
    Ok(result.with_affected_entries(vec![KeyedEntry {
        key: canonical_key,
        entry,
    }]))
}
