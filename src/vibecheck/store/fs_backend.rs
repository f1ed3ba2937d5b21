use super::backend::StorageBackend;
use crate::error::{LedgerError, Result};
use std::fs;
use std::io;
use std::path::PathBuf;
use uuid::Uuid;

pub const LEDGER_FILE_NAME: &str = "accounting_records.txt";

/// Filesystem backend: one text file inside one directory.
pub struct FsBackend {
    root: PathBuf,
}

impl FsBackend {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    fn file_path(&self) -> PathBuf {
        self.root.join(LEDGER_FILE_NAME)
    }

    fn tmp_path(&self) -> PathBuf {
        self.root.join(format!(".records-{}.tmp", Uuid::new_v4()))
    }
}

impl StorageBackend for FsBackend {
    fn prepare_location(&self) -> Result<()> {
        match fs::metadata(&self.root) {
            Ok(meta) if meta.is_dir() => Ok(()),
            Ok(_) => Err(LedgerError::DirectoryAccess(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("{} exists and is not a directory", self.root.display()),
            ))),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                fs::create_dir_all(&self.root).map_err(LedgerError::DirectoryCreate)
            }
            Err(e) => Err(LedgerError::DirectoryAccess(e)),
        }
    }

    fn exists(&self) -> Result<bool> {
        self.file_path()
            .try_exists()
            .map_err(LedgerError::DirectoryAccess)
    }

    fn create(&self, content: &str) -> Result<()> {
        // Atomic so a crash never leaves a header-less file behind
        let tmp_path = self.tmp_path();
        fs::write(&tmp_path, content).map_err(LedgerError::FileCreate)?;
        fs::rename(&tmp_path, self.file_path()).map_err(LedgerError::FileCreate)?;
        Ok(())
    }

    fn read(&self) -> Result<String> {
        fs::read_to_string(self.file_path()).map_err(LedgerError::FileRead)
    }

    fn replace(&self, content: &str) -> Result<()> {
        // Atomic Write
        let tmp_path = self.tmp_path();
        fs::write(&tmp_path, content).map_err(LedgerError::FileWrite)?;
        fs::rename(&tmp_path, self.file_path()).map_err(LedgerError::FileWrite)?;
        Ok(())
    }

    fn overwrite(&self, content: &str) -> Result<()> {
        fs::write(self.file_path(), content).map_err(LedgerError::FileWrite)
    }

    fn location(&self) -> PathBuf {
        self.file_path()
    }
}
