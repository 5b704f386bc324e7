use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::partition_store::PartitionStore;
use crate::store::PartitionBackend;

pub fn run<B: PartitionBackend>(store: &PartitionStore<B>) -> Result<CmdResult> {
    store.init()?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Initialized dictionary store at {}",
        store.backend().location().display()
    )));
    Ok(result)
}
