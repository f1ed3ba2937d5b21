use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::{RecordStore, StorageBackend};

/// The `limit` latest records, newest first.
pub fn run<B: StorageBackend>(store: &RecordStore<B>, limit: usize) -> Result<CmdResult> {
    let records = store.read_last_records(limit)?;
    let mut result = CmdResult::default();
    if records.is_empty() {
        result.add_message(CmdMessage::info("No records yet."));
    }
    Ok(result.with_records(records))
}
