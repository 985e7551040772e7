use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, RosterError};
use crate::model::StudentInput;
use crate::store::backend::StorageBackend;
use crate::store::RecordStore;

pub fn run<B: StorageBackend>(
    store: &mut RecordStore<B>,
    input: &StudentInput,
) -> Result<CmdResult> {
    let id = input.student_id.trim();
    if store.contains(id) {
        return Err(RosterError::DuplicateId(id.to_string()));
    }

    let record = input.validate()?;
    store.add(record.clone())?;

    let mut result = CmdResult::default().with_affected_students(vec![record]);
    result.add_message(CmdMessage::success("Student added successfully!"));
    Ok(result)
}
