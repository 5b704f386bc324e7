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
        .find(Dataset::Pending, id)
        .ok_or_else(|| DictError::PendingNotFound(id.to_string()))?;
    let key = located.key;

    let removed = index.store().mutate(Dataset::Pending, &key, |file| {
        let position = file
            .position(id)
            .ok_or_else(|| DictError::PendingNotFound(id.to_string()))?;
        Ok(file.entries_mut().remove(position))
    })?;
    info!(%id, %key, "Word rejected");

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("Word rejected: {}", removed.bpy)));
    Ok(result.with_affected_entries(vec![KeyedEntry {
        key,
        entry: removed,
    }]))
}
