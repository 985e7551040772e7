use crate::commands::{existing, CmdMessage, CmdResult};
use crate::error::{Result, RosterError};
use crate::store::backend::StorageBackend;
use crate::store::RecordStore;

/// Removes the student. Confirmation is the caller's job.
pub fn run<B: StorageBackend>(store: &mut RecordStore<B>, id: &str) -> Result<CmdResult> {
    let id = id.trim();
    let record = existing(store, id)?;

    if !store.delete(id)? {
        return Err(RosterError::StudentNotFound(id.to_string()));
    }

    let mut result = CmdResult::default().with_affected_students(vec![record]);
    result.add_message(CmdMessage::success("Student deleted successfully!"));
    Ok(result)
}
