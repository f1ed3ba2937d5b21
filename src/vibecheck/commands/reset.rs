use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::{RecordStore, StorageBackend};

/// Drops every record. Confirmation is the caller's business.
///
/// Works on a ledger that can no longer be read; the removed count is then
/// unknown and reported as a warning.
pub fn run<B: StorageBackend>(store: &RecordStore<B>) -> Result<CmdResult> {
    let removed = store.reset()?;

    let mut result = CmdResult::default();
    match removed {
        Some(count) => result.add_message(CmdMessage::success(format!(
            "Ledger reset ({} records removed).",
            count
        ))),
        None => {
            result.add_message(CmdMessage::warning(
                "The old ledger could not be read, its contents were discarded.",
            ));
            result.add_message(CmdMessage::success("Ledger reset."));
        }
    }
    Ok(result)
}
