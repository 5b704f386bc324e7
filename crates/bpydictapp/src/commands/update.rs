use super::helpers::{require, storage_key};
use crate::alphabet::PartitionKey;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{DictError, Result};
use crate::index::LexicalIndex;
use crate::model::{Entry, KeyedEntry};
use crate::store::{Dataset, PartitionBackend};
use serde_json::{Map, Value};
use tracing::{info, warn};

/// Times a word may move away between locating it and locking it.
const MAX_ATTEMPTS: usize = 3;

/// Shallow-merges `patch` over a canonical word.
///
/// The merge runs against the word as read under the partition lock, so
/// concurrent patches to the same word all land. The merged word's partition is
/// re-derived from its Bishnupriya text. If the patch changed the first
/// letter, the word moves: it is appended to the new partition and removed
/// from the old one, with both partitions locked.
pub fn run<B: PartitionBackend>(
    index: &LexicalIndex<B>,
    id: &str,
    patch: &Map<String, Value>,
) -> Result<CmdResult> {
    let id = require(id, "id")?;

    for _ in 0..MAX_ATTEMPTS {
        let located = index
            .get_by_id(id)
            .ok_or_else(|| DictError::EntryNotFound(id.to_string()))?;
        // Unlocked preview: picks the partitions to lock, and rejects a bad
        // patch before any lock is taken
        let preview = located.entry.patched(patch)?;
        let target = storage_key(index.alphabet(), &preview.bpy)?.clone();

        if let Some(updated) = apply_locked(index, &located.key, &target, id, patch)? {
            let mut result = CmdResult::default();
            if target == located.key {
                result.add_message(CmdMessage::success(format!("Word updated: {}", updated.bpy)));
            } else {
                result.add_message(CmdMessage::success(format!(
                    "Word updated: {} (moved {} -> {})",
                    updated.bpy, located.key, target
                )));
            }
            info!(%id, key = %target, "Word updated");
            return Ok(result.with_affected_entries(vec![KeyedEntry {
                key: target,
                entry: updated,
            }]));
        }
    }
    Err(DictError::EntryNotFound(id.to_string()))
}

/// Merges and writes under the locks of `from` and `to`.
///
/// Returns `Ok(None)` when the word changed underneath since it was located
/// (gone from `from`, or now merging into a partition other than `to`); the
/// caller locates it again.
fn apply_locked<B: PartitionBackend>(
    index: &LexicalIndex<B>,
    from: &PartitionKey,
    to: &PartitionKey,
    id: &str,
    patch: &Map<String, Value>,
) -> Result<Option<Entry>> {
    let store = index.store();

    // Canonical partitions lock in key order
    let (first, second) = if from <= to { (from, to) } else { (to, from) };
    let first_lock = store.partition_lock(Dataset::Canonical, first);
    let second_lock = (first != second).then(|| store.partition_lock(Dataset::Canonical, second));
    let _first_guard = first_lock.lock();
    let _second_guard = second_lock.as_ref().map(|lock| lock.lock());

    let mut source = store.load_for_update(Dataset::Canonical, from)?;
    let Some(position) = source.position(id) else {
        return Ok(None);
    };
    let updated = source.entries()[position].patched(patch)?;
    if storage_key(index.alphabet(), &updated.bpy)? != to {
        return Ok(None);
    }

    if from == to {
        source.entries_mut()[position] = updated.clone();
        store.save(Dataset::Canonical, from, &source)?;
        return Ok(Some(updated));
    }

    let mut destination = store.load_for_update(Dataset::Canonical, to)?;
    source.entries_mut().remove(position);
    destination.entries_mut().push(updated.clone());

    // Destination first: a failure in between leaves a copy, never a loss
    store.save(Dataset::Canonical, to, &destination)?;
    if let Err(e) = store.save(Dataset::Canonical, from, &source) {
        warn!(
            %id,
            from = %from,
            to = %to,
            error = %e,
            "Moved word is now in both partitions; delete the stale copy"
        );
        return Err(e);
    }
    Ok(Some(updated))
}
