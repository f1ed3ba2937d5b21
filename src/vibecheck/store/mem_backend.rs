use super::backend::StorageBackend;
use crate::error::{LedgerError, Result};
use std::io;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Default)]
struct MemState {
    content: Option<String>,
    simulate_read_error: bool,
    simulate_write_error: bool,
}

/// In-memory storage backend for testing.
///
/// Uses a `Mutex` rather than `RefCell` because the store is shared across
/// threads.
#[derive(Default)]
pub struct MemBackend {
    state: Mutex<MemState>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with an existing file body, header included.
    pub fn with_content(content: &str) -> Self {
        let backend = Self::default();
        backend.state().content = Some(content.to_string());
        backend
    }

    /// Raw file body, `None` if the file was never created.
    pub fn content(&self) -> Option<String> {
        self.state().content.clone()
    }

    /// Enable read error simulation for testing error handling.
    pub fn set_simulate_read_error(&self, simulate: bool) {
        self.state().simulate_read_error = simulate;
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.state().simulate_write_error = simulate;
    }

    fn state(&self) -> MutexGuard<'_, MemState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn simulated(what: &str) -> io::Error {
    io::Error::other(format!("Simulated {} error", what))
}

impl StorageBackend for MemBackend {
    fn prepare_location(&self) -> Result<()> {
        Ok(())
    }

    fn exists(&self) -> Result<bool> {
        Ok(self.state().content.is_some())
    }

    fn create(&self, content: &str) -> Result<()> {
        let mut state = self.state();
        if state.simulate_write_error {
            return Err(LedgerError::FileCreate(simulated("create")));
        }
        state.content = Some(content.to_string());
        Ok(())
    }

    fn read(&self) -> Result<String> {
        let state = self.state();
        if state.simulate_read_error {
            return Err(LedgerError::FileRead(simulated("read")));
        }
        state
            .content
            .clone()
            .ok_or_else(|| LedgerError::FileRead(io::Error::from(io::ErrorKind::NotFound)))
    }

    fn replace(&self, content: &str) -> Result<()> {
        let mut state = self.state();
        if state.simulate_write_error {
            return Err(LedgerError::FileWrite(simulated("write")));
        }
        state.content = Some(content.to_string());
        Ok(())
    }

    fn overwrite(&self, content: &str) -> Result<()> {
        self.replace(content)
    }

    fn location(&self) -> PathBuf {
        PathBuf::from("/mem/accounting_records.txt")
    }
}
