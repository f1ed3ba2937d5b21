//! # Storage Layer
//!
//! The ledger is a single UTF-8 text file. [`RecordStore`] owns it and exposes
//! the operations the rest of the crate uses: ensure-exists, append,
//! read-last-N, read-all and reset.
//!
//! ## Layers
//!
//! - [`backend::StorageBackend`]: raw I/O on one file (exists, create, read,
//!   atomic replace, overwrite). No format knowledge.
//!   - [`fs_backend::FsBackend`]: production, a directory on disk.
//!   - [`mem_backend::MemBackend`]: in-memory, with error simulation for tests.
//! - [`RecordStore`]: header, codec, the access lock, change notification.
//! - [`events`]: the observer registry the store publishes to.
//!
//! ## Storage Format
//!
//! ```text
//! MyAccounting/
//! ├── accounting_records.txt   # header line + one line per record
//! ├── config.json              # optional settings
//! └── .records-{uuid}.tmp      # transient, renamed over the ledger on append
//! ```
//!
//! ## Concurrency
//!
//! All file access goes through one mutex per store, so a store shared with
//! `Arc` can be used from any number of threads. Nothing is locked at the OS
//! level: a second process writing the same file is not coordinated with.

pub mod backend;
pub mod events;
pub mod fs_backend;
pub mod mem_backend;
mod record_store;

pub use backend::StorageBackend;
pub use events::{RecordsChanged, SubscriptionId};
pub use record_store::{ReadFailurePolicy, RecordStore};
