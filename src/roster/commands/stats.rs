use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::backend::StorageBackend;
use crate::store::RecordStore;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq)]
pub struct Statistics {
    pub total: usize,
    pub average_age: f64,
    /// Student count per grade, sorted by grade.
    pub grades: Vec<(String, usize)>,
}

pub fn run<B: StorageBackend>(store: &RecordStore<B>) -> Result<CmdResult> {
    let students = store.list();
    if students.is_empty() {
        let mut result = CmdResult::default();
        result.add_message(CmdMessage::info("No students in database."));
        return Ok(result);
    }

    let total = students.len();
    let age_sum: u64 = students.iter().map(|s| u64::from(s.age)).sum();

    let mut grades: BTreeMap<String, usize> = BTreeMap::new();
    for student in &students {
        *grades.entry(student.grade.clone()).or_default() += 1;
    }

    Ok(CmdResult::default().with_statistics(Statistics {
        total,
        average_age: age_sum as f64 / total as f64,
        grades: grades.into_iter().collect(),
    }))
}
