use crate::commands::{existing, CmdMessage, CmdResult};
use crate::error::{Result, RosterError};
use crate::model::StudentChanges;
use crate::store::backend::StorageBackend;
use crate::store::RecordStore;

pub fn run<B: StorageBackend>(
    store: &mut RecordStore<B>,
    id: &str,
    changes: &StudentChanges,
) -> Result<CmdResult> {
    let id = id.trim();
    let current = existing(store, id)?;

    if changes.is_empty() {
        let mut result = CmdResult::default().with_affected_students(vec![current]);
        result.add_message(CmdMessage::info("Nothing to update."));
        return Ok(result);
    }

    let next = changes.apply(&current)?;
    if !store.update(id, next)? {
        return Err(RosterError::StudentNotFound(id.to_string()));
    }

    let updated = existing(store, id)?;
    let mut result = CmdResult::default().with_affected_students(vec![updated]);
    result.add_message(CmdMessage::success("Student updated successfully!"));
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::add;
    use crate::commands::test_support::{ada, store};
    use crate::validate::ValidationError;

    #[test]
    fn updates_only_supplied_fields() {
        let mut store = store();
        add::run(&mut store, &ada()).unwrap();
        let enrolled = store.get("S1").unwrap().enrollment_date.clone();

        let changes = StudentChanges {
            age: Some("21".into()),
            grade: Some("B".into()),
            ..Default::default()
        };
        let result = run(&mut store, "S1", &changes).unwrap();

        let stored = store.get("S1").unwrap();
        assert_eq!(stored.age, 21);
        assert_eq!(stored.grade, "B");
        assert_eq!(stored.name, "Ada");
        assert_eq!(stored.enrollment_date, enrolled);
        assert_eq!(result.affected_students[0], *stored);
    }

    #[test]
    fn missing_student_is_not_found() {
        let mut store = store();
        let changes = StudentChanges {
            name: Some("X".into()),
            ..Default::default()
        };
        assert!(matches!(
            run(&mut store, "S9", &changes),
            Err(RosterError::StudentNotFound(_))
        ));
        assert_eq!(store.backend().save_count(), 0);
    }

    #[test]
    fn invalid_change_leaves_record_untouched() {
        let mut store = store();
        add::run(&mut store, &ada()).unwrap();

        let changes = StudentChanges {
            name: Some("Ada L.".into()),
            phone: Some("12a34".into()),
            ..Default::default()
        };
        let err = run(&mut store, "S1", &changes).unwrap_err();
        assert!(matches!(err, RosterError::Invalid(ValidationError::Phone(_))));
        assert_eq!(store.get("S1").unwrap().name, "Ada");
        assert_eq!(store.backend().save_count(), 1);
    }

    #[test]
    fn empty_changes_do_not_write() {
        let mut store = store();
        add::run(&mut store, &ada()).unwrap();

        let result = run(&mut store, "S1", &StudentChanges::default()).unwrap();
        assert_eq!(result.messages[0].content, "Nothing to update.");
        assert_eq!(store.backend().save_count(), 1);
    }
}
