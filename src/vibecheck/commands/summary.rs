use crate::analytics;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::{RecordStore, StorageBackend};
use chrono::NaiveDate;

pub fn run<B: StorageBackend>(store: &RecordStore<B>, today: NaiveDate) -> Result<CmdResult> {
    let records = store.read_all_records()?;
    let mut result = CmdResult::default();
    if records.is_empty() {
        result.add_message(CmdMessage::info("No records yet."));
    }
    Ok(result.with_summary(analytics::summarize(&records, today)))
}
