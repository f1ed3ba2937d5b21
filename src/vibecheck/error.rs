use std::io;
use thiserror::Error;

/// Failures surfaced by the ledger.
///
/// Malformed record lines are never reported here: readers drop them.
#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Cannot access the ledger directory: {0}")]
    DirectoryAccess(#[source] io::Error),

    #[error("Cannot create the ledger directory: {0}")]
    DirectoryCreate(#[source] io::Error),

    #[error("Cannot create the ledger file: {0}")]
    FileCreate(#[source] io::Error),

    #[error("Cannot read the ledger file: {0}")]
    FileRead(#[source] io::Error),

    #[error("Cannot write the ledger file: {0}")]
    FileWrite(#[source] io::Error),

    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, LedgerError>;
