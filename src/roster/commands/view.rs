use crate::commands::{existing, CmdResult};
use crate::error::Result;
use crate::store::backend::StorageBackend;
use crate::store::RecordStore;

pub fn run<B: StorageBackend>(store: &RecordStore<B>, id: &str) -> Result<CmdResult> {
    let record = existing(store, id.trim())?;
    Ok(CmdResult::default().with_listed_students(vec![record]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::add;
    use crate::commands::test_support::{ada, store};
    use crate::error::RosterError;

    #[test]
    fn views_existing_student() {
        let mut store = store();
        add::run(&mut store, &ada()).unwrap();

        let result = run(&store, "S1").unwrap();
        assert_eq!(result.listed_students[0].name, "Ada");
    }

    #[test]
    fn missing_student_is_not_found() {
        let store = store();
        assert!(matches!(
            run(&store, "S404"),
            Err(RosterError::StudentNotFound(id)) if id == "S404"
        ));
    }
}
