//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer and the single
//! entry point for UI clients (the CLI today).
//!
//! It dispatches to the matching command, applies defaults that come from
//! configuration (how many recent records to show), and hands out the shared
//! store handle for clients that want to observe changes. It holds no
//! business logic and never prints.
//!
//! ## Shared Store
//!
//! The [`RecordStore`] is built once by the entry point (see [`crate::init`])
//! and passed in as an `Arc`. Clones of that handle can go to background
//! threads; every clone talks to the same lock and the same observers.

use crate::commands;
use crate::error::Result;
use crate::store::{RecordStore, RecordsChanged, StorageBackend, SubscriptionId};
use chrono::NaiveDate;
use std::path::PathBuf;
use std::sync::Arc;

pub struct LedgerApi<B: StorageBackend> {
    store: Arc<RecordStore<B>>,
    config_dir: PathBuf,
}

impl<B: StorageBackend> LedgerApi<B> {
    pub fn new(store: Arc<RecordStore<B>>, config_dir: PathBuf) -> Self {
        Self { store, config_dir }
    }

    pub fn add(&self, entry: commands::add::NewEntry) -> Result<commands::CmdResult> {
        commands::add::run(&*self.store, entry)
    }

    /// Latest records, newest first. `None` uses the configured default.
    pub fn recent(&self, limit: Option<usize>) -> Result<commands::CmdResult> {
        let limit = match limit {
            Some(limit) => limit,
            None => crate::config::LedgerConfig::load(&self.config_dir)?.recent_limit,
        };
        commands::recent::run(&*self.store, limit)
    }

    pub fn list(&self) -> Result<commands::CmdResult> {
        commands::list::run(&*self.store)
    }

    pub fn summary(&self, today: NaiveDate) -> Result<commands::CmdResult> {
        commands::summary::run(&*self.store, today)
    }

    pub fn reset(&self) -> Result<commands::CmdResult> {
        commands::reset::run(&*self.store)
    }

    pub fn paths(&self) -> Result<commands::CmdResult> {
        commands::paths::run(&*self.store)
    }

    pub fn config(&self, action: ConfigAction) -> Result<commands::CmdResult> {
        commands::config::run(&self.config_dir, action)
    }

    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(RecordsChanged) + Send + Sync + 'static,
    {
        self.store.subscribe(callback)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.store.unsubscribe(id)
    }

    pub fn store(&self) -> Arc<RecordStore<B>> {
        Arc::clone(&self.store)
    }
}

pub use crate::commands::add::NewEntry;
pub use crate::commands::config::ConfigAction;
pub use crate::commands::{CmdMessage, CmdResult, MessageLevel};
