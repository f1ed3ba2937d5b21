use crate::store::fs_backend::FsBackend;
use crate::store::RecordStore;
use std::path::PathBuf;
use tempfile::TempDir;

pub struct TestEnv {
    // We keep _temp_dir to ensure the directory is not dropped until the test is done
    pub _temp_dir: TempDir,
    pub store: RecordStore<FsBackend>,
    pub root: PathBuf,
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl TestEnv {
    /// A store whose directory does not exist yet, under a fresh temp dir.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("failed to create temp dir");
        let root = temp_dir.path().join("MyAccounting");
        let store = RecordStore::with_backend(FsBackend::new(root.clone()));
        Self {
            _temp_dir: temp_dir,
            store,
            root,
        }
    }

    pub fn ledger_path(&self) -> PathBuf {
        self.store.location()
    }

    pub fn ledger_content(&self) -> String {
        std::fs::read_to_string(self.ledger_path()).expect("ledger should exist")
    }
}
