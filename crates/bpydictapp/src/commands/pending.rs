use crate::commands::CmdResult;
use crate::error::Result;
use crate::index::LexicalIndex;
use crate::store::{Dataset, PartitionBackend};

/// The moderation queue: every pending-status word with its partition.
pub fn run<B: PartitionBackend>(index: &LexicalIndex<B>) -> Result<CmdResult> {
    let pending = index
        .scan(Dataset::Pending)
        .into_iter()
        .filter(|k| k.entry.is_pending())
        .collect();
    Ok(CmdResult::default().with_listed_entries(pending))
}
