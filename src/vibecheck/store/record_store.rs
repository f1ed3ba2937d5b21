use super::backend::StorageBackend;
use super::events::{Observers, RecordsChanged, SubscriptionId};
use crate::codec;
use crate::error::{LedgerError, Result};
use crate::model::{Amount, Kind, Record};
use chrono::NaiveDateTime;
use log::{debug, info, warn};
use std::path::PathBuf;
use std::sync::mpsc::Receiver;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// What `append` does when the existing file cannot be read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReadFailurePolicy {
    /// Start over from a header-only file and append to that.
    /// Keeps recording possible on a damaged file, at the cost of the
    /// unreadable history.
    #[default]
    TreatAsEmpty,
    /// Fail the append with `FileRead` and leave the file alone.
    Fail,
}

/// The ledger: one file, accessed one operation at a time.
///
/// Every file-touching operation takes `lock`, so concurrent callers sharing
/// the store through an `Arc` never interleave. Observers are notified after
/// the lock is released.
pub struct RecordStore<B: StorageBackend> {
    backend: B,
    lock: Mutex<()>,
    observers: Observers,
    read_failure_policy: ReadFailurePolicy,
}

impl<B: StorageBackend> RecordStore<B> {
    pub fn with_backend(backend: B) -> Self {
        Self {
            backend,
            lock: Mutex::new(()),
            observers: Observers::new(),
            read_failure_policy: ReadFailurePolicy::default(),
        }
    }

    pub fn with_read_failure_policy(mut self, policy: ReadFailurePolicy) -> Self {
        self.read_failure_policy = policy;
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn location(&self) -> PathBuf {
        self.backend.location()
    }

    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(RecordsChanged) + Send + Sync + 'static,
    {
        self.observers.subscribe(callback)
    }

    pub fn subscribe_channel(&self) -> (SubscriptionId, Receiver<RecordsChanged>) {
        self.observers.subscribe_channel()
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    /// Create the directory and a header-only file if missing.
    ///
    /// An existing file is left as is, whatever it contains.
    pub fn ensure_exists(&self) -> Result<()> {
        let guard = self.acquire();
        self.ensure_exists_locked(&guard)
    }

    /// Append one record and return it as it was stored.
    ///
    /// The note is sanitized (line breaks to spaces, `|` to `/`, trimmed) and
    /// the mood tag cut to its first grapheme before serialization.
    pub fn append(
        &self,
        timestamp: NaiveDateTime,
        kind: Kind,
        amount: Amount,
        note: &str,
        mood_tag: &str,
    ) -> Result<Record> {
        let record = Record {
            timestamp,
            kind,
            amount: amount.rounded(),
            note: codec::sanitize_note(note),
            mood_tag: codec::first_grapheme(mood_tag),
        };
        let line = codec::serialize(&record);

        {
            let guard = self.acquire();
            self.ensure_exists_locked(&guard)?;

            let mut content = match self.backend.read() {
                Ok(content) => content,
                Err(e) if self.read_failure_policy == ReadFailurePolicy::TreatAsEmpty => {
                    warn!("Ledger unreadable before append, starting from header: {}", e);
                    codec::header_content()
                }
                Err(e) => return Err(e),
            };
            if !content.is_empty() && !content.ends_with('\n') {
                content.push('\n');
            }
            content.push_str(&line);

            self.backend.replace(&content)?;
            debug!("Appended record at {}", codec::format_timestamp(&record.timestamp));
        }

        self.observers.publish();
        Ok(record)
    }

    /// At most `limit` of the most recent records, newest first.
    ///
    /// Unparseable lines inside the window are dropped, not replaced.
    pub fn read_last_records(&self, limit: usize) -> Result<Vec<Record>> {
        let content = self.read_content()?;
        if limit == 0 {
            return Ok(Vec::new());
        }

        let lines: Vec<&str> = codec::data_lines(&content).collect();
        let start = lines.len().saturating_sub(limit);
        let records: Vec<Record> = lines[start..]
            .iter()
            .rev()
            .filter_map(|line| codec::parse_line(line))
            .collect();
        debug!("Read {} recent records (limit {})", records.len(), limit);
        Ok(records)
    }

    /// Every parseable record, oldest first.
    pub fn read_all_records(&self) -> Result<Vec<Record>> {
        let content = self.read_content()?;
        let records: Vec<Record> = codec::data_lines(&content)
            .filter_map(codec::parse_line)
            .collect();
        debug!("Read {} records", records.len());
        Ok(records)
    }

    /// Truncate the ledger back to the header line.
    ///
    /// Returns how many data lines were dropped, or `None` when the old
    /// content could not be read. An unreadable file is still reset.
    ///
    /// This is a plain overwrite, not an atomic replace: a failure part way
    /// may leave a damaged header, fixed by resetting again.
    pub fn reset(&self) -> Result<Option<usize>> {
        let removed = {
            let guard = self.acquire();
            self.ensure_exists_locked(&guard)?;
            let removed = match self.backend.read() {
                Ok(content) => Some(codec::data_lines(&content).count()),
                Err(e) => {
                    warn!("Ledger unreadable before reset: {}", e);
                    None
                }
            };
            self.backend.overwrite(&codec::header_content())?;
            info!("Ledger reset at {}", self.backend.location().display());
            removed
        };

        self.observers.publish();
        Ok(removed)
    }

    fn read_content(&self) -> Result<String> {
        let guard = self.acquire();
        self.ensure_exists_locked(&guard)?;
        self.backend.read()
    }

    // Takes the guard to prove the caller holds the lock.
    fn ensure_exists_locked(&self, _guard: &MutexGuard<'_, ()>) -> Result<()> {
        self.backend.prepare_location()?;
        if self.backend.exists()? {
            return Ok(());
        }
        self.backend
            .create(&codec::header_content())
            .map_err(|e| match e {
                LedgerError::FileWrite(io) => LedgerError::FileCreate(io),
                other => other,
            })?;
        info!("Created ledger at {}", self.backend.location().display());
        Ok(())
    }

    fn acquire(&self) -> MutexGuard<'_, ()> {
        self.lock.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::HEADER;
    use crate::store::mem_backend::MemBackend;
    use chrono::NaiveDate;
    use std::str::FromStr;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn ts(minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(10, minute, 0)
            .unwrap()
    }

    fn amount(s: &str) -> Amount {
        Amount::from_str(s).unwrap()
    }

    fn store() -> RecordStore<MemBackend> {
        RecordStore::with_backend(MemBackend::new())
    }

    fn append_n(store: &RecordStore<MemBackend>, n: u32) {
        for i in 0..n {
            store
                .append(ts(i), Kind::Expense, amount("1"), &format!("note {}", i), "😀")
                .unwrap();
        }
    }

    fn first_line(store: &RecordStore<MemBackend>) -> String {
        store
            .backend()
            .content()
            .unwrap()
            .lines()
            .next()
            .unwrap()
            .to_string()
    }

    #[test]
    fn ensure_exists_writes_header_once() {
        let store = store();
        store.ensure_exists().unwrap();
        assert_eq!(store.backend().content().unwrap(), format!("{}\n", HEADER));
        store.ensure_exists().unwrap();
        assert_eq!(store.backend().content().unwrap(), format!("{}\n", HEADER));
    }

    #[test]
    fn ensure_exists_leaves_existing_content_alone() {
        let store = RecordStore::with_backend(MemBackend::with_content("not a header\n"));
        store.ensure_exists().unwrap();
        assert_eq!(store.backend().content().unwrap(), "not a header\n");
    }

    #[test]
    fn append_stores_sanitized_line() {
        let store = store();
        let record = store
            .append(ts(0), Kind::Expense, amount("12.5"), "a|b\nc", "🥳")
            .unwrap();
        assert_eq!(record.note, "a/b c");

        let content = store.backend().content().unwrap();
        assert_eq!(
            content,
            format!("{}\n2024-01-01 10:00:00|支出|12.50|a/b c|🥳\n", HEADER)
        );

        let all = store.read_all_records().unwrap();
        assert_eq!(all, vec![record]);
        assert_eq!(all[0].note, "a/b c");
    }

    #[test]
    fn append_truncates_mood_to_one_glyph() {
        let store = store();
        let record = store
            .append(ts(0), Kind::Income, amount("1"), "", "🥳🤡😤")
            .unwrap();
        assert_eq!(record.mood_tag, "🥳");
    }

    #[test]
    fn read_all_is_oldest_first() {
        let store = store();
        append_n(&store, 3);
        let notes: Vec<String> = store
            .read_all_records()
            .unwrap()
            .into_iter()
            .map(|r| r.note)
            .collect();
        assert_eq!(notes, vec!["note 0", "note 1", "note 2"]);
    }

    #[test]
    fn read_last_is_newest_first_and_bounded() {
        let store = store();
        append_n(&store, 5);

        let last = store.read_last_records(2).unwrap();
        let notes: Vec<&str> = last.iter().map(|r| r.note.as_str()).collect();
        assert_eq!(notes, vec!["note 4", "note 3"]);

        assert_eq!(store.read_last_records(5).unwrap().len(), 5);
        assert_eq!(store.read_last_records(50).unwrap().len(), 5);
        assert!(store.read_last_records(0).unwrap().is_empty());
    }

    #[test]
    fn reads_on_missing_file_create_it() {
        let store = store();
        assert!(store.read_all_records().unwrap().is_empty());
        assert_eq!(first_line(&store), HEADER);
    }

    #[test]
    fn malformed_lines_are_skipped() {
        let content = format!(
            "{}\n2024-01-01 10:00:00|支出|1.00|first|😀\nbroken|line\n2024-01-01 10:01:00|收入|2.00|second|🥳\n",
            HEADER
        );
        let store = RecordStore::with_backend(MemBackend::with_content(&content));

        let all = store.read_all_records().unwrap();
        let notes: Vec<&str> = all.iter().map(|r| r.note.as_str()).collect();
        assert_eq!(notes, vec!["first", "second"]);

        let last = store.read_last_records(10).unwrap();
        let notes: Vec<&str> = last.iter().map(|r| r.note.as_str()).collect();
        assert_eq!(notes, vec!["second", "first"]);
    }

    #[test]
    fn reset_keeps_only_header_and_is_idempotent() {
        let store = store();
        append_n(&store, 3);
        assert_eq!(store.reset().unwrap(), Some(3));
        assert_eq!(store.backend().content().unwrap(), format!("{}\n", HEADER));
        assert_eq!(store.reset().unwrap(), Some(0));
        assert_eq!(store.backend().content().unwrap(), format!("{}\n", HEADER));
        assert!(store.read_all_records().unwrap().is_empty());
    }

    #[test]
    fn reset_counts_unparseable_lines_too() {
        let content = format!("{}\ngarbage\n2024-01-01 10:00:00|支出|1.00|x|😀\n", HEADER);
        let store = RecordStore::with_backend(MemBackend::with_content(&content));
        assert_eq!(store.reset().unwrap(), Some(2));
    }

    #[test]
    fn reset_recovers_an_unreadable_ledger() {
        let store = store();
        append_n(&store, 2);
        store.backend().set_simulate_read_error(true);
        assert_eq!(store.reset().unwrap(), None);
        store.backend().set_simulate_read_error(false);
        assert_eq!(store.backend().content().unwrap(), format!("{}\n", HEADER));
    }

    #[test]
    fn header_survives_appends_and_resets() {
        let store = store();
        append_n(&store, 2);
        assert_eq!(first_line(&store), HEADER);
        store.reset().unwrap();
        assert_eq!(first_line(&store), HEADER);
        append_n(&store, 1);
        assert_eq!(first_line(&store), HEADER);
    }

    #[test]
    fn write_failure_leaves_file_untouched() {
        let store = store();
        append_n(&store, 1);
        let before = store.backend().content();

        store.backend().set_simulate_write_error(true);
        let err = store
            .append(ts(9), Kind::Expense, amount("1"), "lost", "😀")
            .unwrap_err();
        assert!(matches!(err, LedgerError::FileWrite(_)));
        assert_eq!(store.backend().content(), before);
    }

    #[test]
    fn create_failure_is_reported_as_file_create() {
        let store = store();
        store.backend().set_simulate_write_error(true);
        let err = store.ensure_exists().unwrap_err();
        assert!(matches!(err, LedgerError::FileCreate(_)));
    }

    #[test]
    fn unreadable_file_is_restarted_from_header_by_default() {
        let store = store();
        append_n(&store, 2);
        store.backend().set_simulate_read_error(true);
        store
            .append(ts(30), Kind::Income, amount("5"), "fresh", "😀")
            .unwrap();
        store.backend().set_simulate_read_error(false);

        let all = store.read_all_records().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].note, "fresh");
        assert_eq!(first_line(&store), HEADER);
    }

    #[test]
    fn unreadable_file_fails_append_under_strict_policy() {
        let store = store().with_read_failure_policy(ReadFailurePolicy::Fail);
        append_n(&store, 2);
        store.backend().set_simulate_read_error(true);
        let err = store
            .append(ts(30), Kind::Income, amount("5"), "fresh", "😀")
            .unwrap_err();
        assert!(matches!(err, LedgerError::FileRead(_)));

        store.backend().set_simulate_read_error(false);
        assert_eq!(store.read_all_records().unwrap().len(), 2);
    }

    #[test]
    fn read_failure_surfaces_on_reads() {
        let store = store();
        store.ensure_exists().unwrap();
        store.backend().set_simulate_read_error(true);
        assert!(matches!(
            store.read_all_records().unwrap_err(),
            LedgerError::FileRead(_)
        ));
        assert!(matches!(
            store.read_last_records(3).unwrap_err(),
            LedgerError::FileRead(_)
        ));
    }

    #[test]
    fn append_adds_missing_trailing_newline() {
        let content = format!("{}\n2024-01-01 10:00:00|支出|1.00|first|😀", HEADER);
        let store = RecordStore::with_backend(MemBackend::with_content(&content));
        store
            .append(ts(1), Kind::Expense, amount("2"), "second", "😀")
            .unwrap();
        assert_eq!(store.read_all_records().unwrap().len(), 2);
    }

    #[test]
    fn mutations_notify_observers() {
        let store = store();
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);
        store.subscribe(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        append_n(&store, 2);
        store.read_all_records().unwrap();
        store.read_last_records(1).unwrap();
        store.reset().unwrap();
        assert_eq!(hits.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn failed_append_does_not_notify() {
        let store = store();
        let (_id, rx) = store.subscribe_channel();
        store.backend().set_simulate_write_error(true);
        assert!(store
            .append(ts(0), Kind::Expense, amount("1"), "x", "😀")
            .is_err());
        assert_eq!(rx.try_iter().count(), 0);
    }

    #[test]
    fn observer_can_read_back_without_deadlock() {
        let store = Arc::new(store());
        let seen = Arc::new(AtomicUsize::new(0));
        let (reader, seen_by_cb) = (Arc::downgrade(&store), Arc::clone(&seen));
        store.subscribe(move |_| {
            if let Some(store) = reader.upgrade() {
                let n = store.read_all_records().unwrap().len();
                seen_by_cb.store(n, Ordering::SeqCst);
            }
        });

        append_n(&store, 2);
        assert_eq!(seen.load(Ordering::SeqCst), 2);
    }
}
