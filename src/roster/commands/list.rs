use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::backend::StorageBackend;
use crate::store::RecordStore;

pub fn run<B: StorageBackend>(store: &RecordStore<B>) -> Result<CmdResult> {
    let students = store.list();
    let mut result = CmdResult::default();
    if students.is_empty() {
        result.add_message(CmdMessage::info("No students found in the database."));
    }
    Ok(result.with_listed_students(students))
}
