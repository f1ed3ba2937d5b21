use crate::api::LedgerApi;
use crate::error::{LedgerError, Result};
use crate::store::fs_backend::FsBackend;
use crate::store::RecordStore;
use directories::ProjectDirs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Environment variable overriding the ledger directory.
pub const HOME_ENV: &str = "VIBECHECK_HOME";

/// Fixed subdirectory holding the ledger inside the platform data directory.
pub const LEDGER_DIR_NAME: &str = "MyAccounting";

pub struct LedgerContext {
    pub api: LedgerApi<FsBackend>,
    pub data_dir: PathBuf,
}

/// Pick the ledger directory: explicit override, then `VIBECHECK_HOME`, then
/// `<platform data dir>/MyAccounting`.
pub fn resolve_data_dir(data_override: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = data_override {
        return Ok(dir);
    }
    if let Some(dir) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    let proj_dirs = ProjectDirs::from("com", "vibecheck", "vibecheck").ok_or_else(|| {
        LedgerError::DirectoryAccess(io::Error::new(
            io::ErrorKind::NotFound,
            "could not determine the application data directory",
        ))
    })?;
    Ok(proj_dirs.data_dir().join(LEDGER_DIR_NAME))
}

/// Build the one store for this process and the API around it.
pub fn initialize_in(data_dir: &Path) -> Result<LedgerContext> {
    let store = Arc::new(RecordStore::with_backend(FsBackend::new(
        data_dir.to_path_buf(),
    )));
    let api = LedgerApi::new(store, data_dir.to_path_buf());

    Ok(LedgerContext {
        api,
        data_dir: data_dir.to_path_buf(),
    })
}

pub fn initialize(data_override: Option<PathBuf>) -> Result<LedgerContext> {
    let data_dir = resolve_data_dir(data_override)?;
    initialize_in(&data_dir)
}
