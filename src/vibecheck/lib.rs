//! # Vibecheck Architecture
//!
//! Vibecheck is a **mood-tagged expense ledger library**. Each entry records
//! when money moved, which way, how much, a short note and how it felt. The
//! whole history lives in one plain text file that stays readable (and
//! greppable) without this crate.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, formats output, handles terminal I/O   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands, owns the shared store handle  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs, analytics.rs)                │
//! │  - Input validation, note composition, aggregations         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/, codec.rs)                           │
//! │  - RecordStore: one file, one lock, atomic appends          │
//! │  - StorageBackend: FsBackend (production), MemBackend       │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## The Ledger File
//!
//! ```text
//! 时间|类型|价格|备注|心情
//! 2024-01-01 10:00:00|支出|12.50|a/b c|🥳
//! ```
//!
//! A fixed header, then one line per record. See [`codec`] for the format and
//! [`store`] for how it is written.
//!
//! ## No I/O Assumptions in Core
//!
//! From `api.rs` inward, code takes regular Rust arguments, returns
//! `Result<CmdResult>`, and never writes to stdout/stderr or exits. Logging
//! goes through the `log` facade; the binary decides where it ends up.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: One module per operation
//! - [`analytics`]: Totals, regret split, daily stats
//! - [`store`]: Record store, storage backends, change notification
//! - [`codec`]: Line format
//! - [`model`]: `Record`, `Kind`, `Amount`, `Mood`
//! - [`config`]: Settings file
//! - [`init`]: Data directory resolution and context setup
//! - [`error`]: Error types

pub mod analytics;
pub mod api;
pub mod codec;
pub mod commands;
pub mod config;
pub mod error;
pub mod init;
pub mod model;
pub mod store;

#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;
