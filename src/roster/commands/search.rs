use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::backend::StorageBackend;
use crate::store::RecordStore;

pub fn run<B: StorageBackend>(store: &RecordStore<B>, query: &str) -> Result<CmdResult> {
    let matches = store.search(query.trim());
    let mut result = CmdResult::default();
    if matches.is_empty() {
        result.add_message(CmdMessage::info("No students found matching your search."));
    } else {
        result.add_message(CmdMessage::info(format!("Found {} student(s)", matches.len())));
    }
    Ok(result.with_listed_students(matches))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::add;
    use crate::commands::test_support::{ada, input, store};

    #[test]
    fn finds_by_name_fragment() {
        let mut store = store();
        add::run(&mut store, &ada()).unwrap();
        add::run(&mut store, &input("S2", "Bob", "30", "B", "bob@x.com")).unwrap();

        let result = run(&store, "aD").unwrap();
        assert_eq!(result.listed_students.len(), 1);
        assert_eq!(result.listed_students[0].student_id, "S1");
        assert_eq!(result.messages[0].content, "Found 1 student(s)");
    }

    #[test]
    fn reports_no_matches() {
        let mut store = store();
        add::run(&mut store, &ada()).unwrap();

        let result = run(&store, "nobody").unwrap();
        assert!(result.listed_students.is_empty());
        assert_eq!(
            result.messages[0].content,
            "No students found matching your search."
        );
    }
}
