use crate::commands::{CmdMessage, CmdResult};
use crate::error::{LedgerError, Result};
use crate::model::{Amount, Kind, Mood};
use crate::store::{RecordStore, StorageBackend};
use chrono::NaiveDateTime;

/// A ledger entry as the user describes it, before it becomes a record.
#[derive(Debug, Clone)]
pub struct NewEntry {
    pub timestamp: NaiveDateTime,
    pub kind: Kind,
    pub amount: Amount,
    pub note: String,
    pub mood: Mood,
    pub category: Option<String>,
}

/// Prefixes the note with `[Category]` when a category is given.
pub fn compose_note(note: &str, category: Option<&str>) -> String {
    let note = note.trim();
    match category.map(str::trim).filter(|c| !c.is_empty()) {
        None => note.to_string(),
        Some(category) if note.is_empty() => format!("[{}]", category),
        Some(category) => format!("[{}] {}", category, note),
    }
}

pub fn run<B: StorageBackend>(store: &RecordStore<B>, entry: NewEntry) -> Result<CmdResult> {
    if !entry.amount.is_positive() {
        return Err(LedgerError::InvalidInput(format!(
            "Amount must be greater than zero, got {}",
            entry.amount
        )));
    }

    let note = compose_note(&entry.note, entry.category.as_deref());
    let record = store.append(
        entry.timestamp,
        entry.kind,
        entry.amount,
        &note,
        entry.mood.emoji(),
    )?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Recorded {} of {} {}",
        record.kind, record.amount, record.mood_tag
    )));
    Ok(result.with_records(vec![record]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::now;
    use crate::store::mem_backend::MemBackend;
    use std::str::FromStr;

    fn entry(amount: &str) -> NewEntry {
        NewEntry {
            timestamp: now(),
            kind: Kind::Expense,
            amount: Amount::from_str(amount).unwrap(),
            note: "lunch".into(),
            mood: Mood::Happy,
            category: None,
        }
    }

    #[test]
    fn records_entry_with_mood_emoji() {
        let store = RecordStore::with_backend(MemBackend::new());
        let result = run(&store, entry("9.90")).unwrap();
        assert_eq!(result.records.len(), 1);
        assert_eq!(result.records[0].mood_tag, "😀");
        assert_eq!(store.read_all_records().unwrap(), result.records);
    }

    #[test]
    fn rejects_zero_and_negative_amounts() {
        let store = RecordStore::with_backend(MemBackend::new());
        assert!(matches!(
            run(&store, entry("0")),
            Err(LedgerError::InvalidInput(_))
        ));
        assert!(run(&store, entry("-3")).is_err());
        assert!(store.read_all_records().unwrap().is_empty());
    }

    #[test]
    fn category_prefixes_note() {
        let store = RecordStore::with_backend(MemBackend::new());
        let mut e = entry("1");
        e.category = Some("Food".into());
        let result = run(&store, e).unwrap();
        assert_eq!(result.records[0].note, "[Food] lunch");
    }

    #[test]
    fn compose_note_variants() {
        assert_eq!(compose_note("  hi ", None), "hi");
        assert_eq!(compose_note("", Some("Rent")), "[Rent]");
        assert_eq!(compose_note("june", Some("Rent")), "[Rent] june");
        assert_eq!(compose_note("june", Some("  ")), "june");
    }
}
