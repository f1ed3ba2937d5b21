use crate::error::Result;
use std::path::PathBuf;

/// Abstract interface for raw ledger file I/O.
///
/// This trait handles the "how" of storage (filesystem vs memory), while
/// [`RecordStore`](super::RecordStore) handles the "what": the header, the
/// codec, serialization of access and change notification.
///
/// Backends do no locking of their own; the store calls them one operation
/// at a time.
pub trait StorageBackend: Send + Sync {
    /// Make sure the containing location exists (directories for `FsBackend`).
    fn prepare_location(&self) -> Result<()>;

    /// Whether the ledger file is present.
    fn exists(&self) -> Result<bool>;

    /// Create the ledger file with the given initial content.
    fn create(&self, content: &str) -> Result<()>;

    /// Read the whole ledger file.
    fn read(&self) -> Result<String>;

    /// Replace the whole ledger file.
    /// MUST be atomic (write to tmp then rename) so readers see either the
    /// old or the new content, never a mix.
    fn replace(&self, content: &str) -> Result<()>;

    /// Overwrite the ledger file in place. Not required to be atomic.
    fn overwrite(&self, content: &str) -> Result<()>;

    /// Location of the ledger file. For `MemBackend` a virtual path.
    fn location(&self) -> PathBuf;
}
