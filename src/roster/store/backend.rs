use super::RecordMap;
use crate::error::Result;
use std::path::PathBuf;

/// Abstract interface for raw storage I/O.
/// This trait handles the "how" of storage (filesystem vs memory),
/// while RecordStore handles the "what" (the keyed collection and its rules).
pub trait StorageBackend {
    /// Read the whole record set.
    /// Returns Ok(None) if nothing has been stored yet.
    /// Returns Err if stored data exists but cannot be read or parsed.
    fn load_records(&self) -> Result<Option<RecordMap>>;

    /// Overwrite the stored record set with `records`.
    /// MUST replace the previous contents as a whole (no partial writes).
    fn save_records(&self, records: &RecordMap) -> Result<()>;

    /// Copy unreadable stored data aside so a later save does not destroy it.
    /// Returns the location of the copy, if one was made.
    fn preserve_unreadable(&self) -> Result<Option<PathBuf>>;

    /// Where the records live. For FsBackend, the real path; for MemBackend, a virtual one.
    fn location(&self) -> PathBuf;
}
