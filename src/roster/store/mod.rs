//! # Storage Layer
//!
//! [`RecordStore`] is the keyed collection of student records. It is loaded in
//! full when opened and written back in full after every successful mutation:
//! no append log, no dirty flag, no batching.
//!
//! ## Backends
//!
//! Raw I/O sits behind the [`backend::StorageBackend`] trait:
//!
//! - [`fs_backend::FsBackend`]: production storage, one JSON file
//! - [`mem_backend::MemBackend`]: in-memory storage for tests, with write
//!   failure simulation
//!
//! ## Storage Format
//!
//! ```text
//! {
//!   "S1": {
//!     "student_id": "S1",
//!     "name": "Ada",
//!     "age": 20,
//!     "grade": "A",
//!     "email": "ada@x.com",
//!     "phone": "123-4567",
//!     "enrollment_date": "2026-10-16"
//!   }
//! }
//! ```
//!
//! ## Failure Policy
//!
//! Loading fails open: unreadable data yields an empty store, but the outcome
//! says so ([`LoadOutcome::Recovered`]) and the unreadable file is copied aside
//! first. Saving never fails open: errors propagate, and the in-memory change
//! that triggered the save is rolled back so memory matches what is on disk.
//!
//! The store does not validate. Callers run [`crate::validate`] first.

use crate::error::Result;
use crate::model::StudentRecord;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::warn;

pub mod backend;
pub mod fs_backend;
pub mod mem_backend;

use backend::StorageBackend;

/// Records keyed by student id. Ordered, so listings are stable.
pub type RecordMap = BTreeMap<String, StudentRecord>;

/// What happened when the store read its backing data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Nothing stored yet; empty is correct.
    Missing,
    Loaded { count: usize },
    /// Stored data could not be read. The store started empty.
    Recovered {
        reason: String,
        backup: Option<PathBuf>,
    },
}

pub struct RecordStore<B: StorageBackend> {
    records: RecordMap,
    backend: B,
}

impl<B: StorageBackend> RecordStore<B> {
    /// Creates the store and loads whatever the backend holds.
    pub fn open(backend: B) -> (Self, LoadOutcome) {
        let mut store = Self {
            records: RecordMap::new(),
            backend,
        };
        let outcome = store.load();
        (store, outcome)
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn location(&self) -> PathBuf {
        self.backend.location()
    }

    /// Replaces the in-memory records with the backend's contents.
    pub fn load(&mut self) -> LoadOutcome {
        match self.backend.load_records() {
            Ok(None) => {
                self.records.clear();
                LoadOutcome::Missing
            }
            Ok(Some(records)) => {
                self.records = records;
                LoadOutcome::Loaded {
                    count: self.records.len(),
                }
            }
            Err(err) => {
                let reason = err.to_string();
                warn!(
                    location = %self.backend.location().display(),
                    %reason,
                    "data unreadable, starting empty"
                );
                let backup = match self.backend.preserve_unreadable() {
                    Ok(backup) => backup,
                    Err(e) => {
                        warn!(error = %e, "could not back up unreadable data");
                        None
                    }
                };
                self.records.clear();
                LoadOutcome::Recovered { reason, backup }
            }
        }
    }

    /// Writes the whole collection to the backend.
    pub fn save(&self) -> Result<()> {
        self.backend.save_records(&self.records)
    }

    /// Inserts keyed by `student_id`, replacing any record with that id.
    pub fn add(&mut self, record: StudentRecord) -> Result<()> {
        let id = record.student_id.clone();
        let previous = self.records.insert(id.clone(), record);
        if let Err(e) = self.save() {
            match previous {
                Some(prev) => self.records.insert(id, prev),
                None => self.records.remove(&id),
            };
            return Err(e);
        }
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&StudentRecord> {
        self.records.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.records.contains_key(id)
    }

    /// Replaces the record stored under `id`. The stored id and enrollment
    /// date win over whatever `record` carries. Returns false if `id` is absent.
    pub fn update(&mut self, id: &str, mut record: StudentRecord) -> Result<bool> {
        let Some(current) = self.records.get(id) else {
            return Ok(false);
        };
        record.student_id = id.to_string();
        record.enrollment_date = current.enrollment_date.clone();

        let previous = self.records.insert(id.to_string(), record);
        if let Err(e) = self.save() {
            if let Some(prev) = previous {
                self.records.insert(id.to_string(), prev);
            }
            return Err(e);
        }
        Ok(true)
    }

    /// Removes the record stored under `id`. Returns false if `id` is absent.
    pub fn delete(&mut self, id: &str) -> Result<bool> {
        let Some(removed) = self.records.remove(id) else {
            return Ok(false);
        };
        if let Err(e) = self.save() {
            self.records.insert(id.to_string(), removed);
            return Err(e);
        }
        Ok(true)
    }

    /// Snapshot of every record, ordered by id.
    pub fn list(&self) -> Vec<StudentRecord> {
        self.records.values().cloned().collect()
    }

    /// Case-insensitive substring search over id, name and email.
    pub fn search(&self, query: &str) -> Vec<StudentRecord> {
        let needle = query.to_lowercase();
        self.records
            .values()
            .filter(|r| r.matches(&needle))
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::mem_backend::MemBackend;
    use super::*;

    fn record(id: &str, name: &str, email: &str) -> StudentRecord {
        StudentRecord::new(id, name, 20, "A", email, "123-4567")
    }

    fn empty_store() -> RecordStore<MemBackend> {
        RecordStore::open(MemBackend::new()).0
    }

    #[test]
    fn open_on_missing_data_is_empty() {
        let (store, outcome) = RecordStore::open(MemBackend::new());
        assert_eq!(outcome, LoadOutcome::Missing);
        assert!(store.is_empty());
    }

    #[test]
    fn add_then_get_returns_equal_record() {
        let mut store = empty_store();
        let ada = record("S1", "Ada", "ada@x.com");
        store.add(ada.clone()).unwrap();

        assert_eq!(store.get("S1"), Some(&ada));
        assert_eq!(store.backend().save_count(), 1);
    }

    #[test]
    fn add_overwrites_existing_id() {
        let mut store = empty_store();
        store.add(record("S1", "Ada", "ada@x.com")).unwrap();
        store.add(record("S1", "Grace", "grace@x.com")).unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(store.get("S1").unwrap().name, "Grace");
    }

    #[test]
    fn get_does_not_persist() {
        let mut store = empty_store();
        store.add(record("S1", "Ada", "ada@x.com")).unwrap();
        let _ = store.get("S1");
        let _ = store.get("nope");
        assert_eq!(store.backend().save_count(), 1);
    }

    #[test]
    fn update_preserves_enrollment_date_and_id() {
        let mut store = empty_store();
        let mut ada = record("S1", "Ada", "ada@x.com");
        ada.enrollment_date = "2020-01-01".into();
        store.add(ada).unwrap();

        let mut fresh = record("other", "Ada L.", "ada@y.com");
        fresh.age = 21;
        assert!(store.update("S1", fresh).unwrap());

        let stored = store.get("S1").unwrap();
        assert_eq!(stored.student_id, "S1");
        assert_eq!(stored.name, "Ada L.");
        assert_eq!(stored.age, 21);
        assert_eq!(stored.email, "ada@y.com");
        assert_eq!(stored.enrollment_date, "2020-01-01");
        assert!(!store.contains("other"));
    }

    #[test]
    fn update_missing_id_changes_nothing() {
        let mut store = empty_store();
        store.add(record("S1", "Ada", "ada@x.com")).unwrap();
        let before = store.list();

        assert!(!store.update("S2", record("S2", "Bob", "bob@x.com")).unwrap());
        assert_eq!(store.list(), before);
        assert_eq!(store.backend().save_count(), 1);
    }

    #[test]
    fn delete_removes_record() {
        let mut store = empty_store();
        store.add(record("S1", "Ada", "ada@x.com")).unwrap();

        assert!(store.delete("S1").unwrap());
        assert!(store.get("S1").is_none());
        assert_eq!(store.backend().save_count(), 2);
        assert_eq!(store.backend().stored().unwrap().len(), 0);
    }

    #[test]
    fn delete_missing_id_changes_nothing() {
        let mut store = empty_store();
        store.add(record("S1", "Ada", "ada@x.com")).unwrap();

        assert!(!store.delete("S9").unwrap());
        assert_eq!(store.len(), 1);
        assert_eq!(store.backend().save_count(), 1);
    }

    #[test]
    fn list_is_ordered_by_id() {
        let mut store = empty_store();
        store.add(record("S2", "Bob", "bob@x.com")).unwrap();
        store.add(record("S1", "Ada", "ada@x.com")).unwrap();

        let ids: Vec<_> = store.list().into_iter().map(|r| r.student_id).collect();
        assert_eq!(ids, vec!["S1", "S2"]);
    }

    #[test]
    fn search_matches_id_name_email_case_insensitively() {
        let mut store = empty_store();
        store.add(record("S1", "Ada Lovelace", "ada@x.com")).unwrap();
        store.add(record("S2", "Bob", "bob@example.org")).unwrap();
        store.add(record("T3", "Carol", "carol@x.com")).unwrap();

        let names = |q: &str| -> Vec<String> {
            store.search(q).into_iter().map(|r| r.name).collect()
        };

        assert_eq!(names("LOVE"), vec!["Ada Lovelace"]);
        assert_eq!(names("s"), vec!["Ada Lovelace", "Bob"]);
        assert_eq!(names("X.COM"), vec!["Ada Lovelace", "Carol"]);
        assert_eq!(names("t3"), vec!["Carol"]);
        assert!(names("zzz").is_empty());
    }

    #[test]
    fn search_ignores_grade_and_phone() {
        let mut store = empty_store();
        let mut r = record("S1", "Ada", "ada@x.com");
        r.grade = "Freshman".into();
        r.phone = "999".into();
        store.add(r).unwrap();

        assert!(store.search("fresh").is_empty());
        assert!(store.search("999").is_empty());
    }

    #[test]
    fn empty_query_matches_everything() {
        let mut store = empty_store();
        store.add(record("S1", "Ada", "ada@x.com")).unwrap();
        store.add(record("S2", "Bob", "bob@x.com")).unwrap();
        assert_eq!(store.search("").len(), 2);
    }

    #[test]
    fn reload_reproduces_saved_records() {
        let mut store = empty_store();
        store.add(record("S1", "Ada", "ada@x.com")).unwrap();
        store.add(record("S2", "Bob", "bob@x.com")).unwrap();
        let saved = store.backend().stored().unwrap();

        let (reopened, outcome) = RecordStore::open(MemBackend::with_records(saved));
        assert_eq!(outcome, LoadOutcome::Loaded { count: 2 });
        assert_eq!(reopened.list(), store.list());
    }

    #[test]
    fn unreadable_data_recovers_to_empty() {
        let (store, outcome) = RecordStore::open(MemBackend::unreadable("bad json"));
        assert!(store.is_empty());
        match outcome {
            LoadOutcome::Recovered { reason, backup } => {
                assert!(reason.contains("bad json"));
                assert!(backup.is_some());
            }
            other => panic!("expected Recovered, got {:?}", other),
        }
    }

    #[test]
    fn failed_add_rolls_back() {
        let mut store = empty_store();
        store.add(record("S1", "Ada", "ada@x.com")).unwrap();
        store.backend().set_simulate_write_error(true);

        assert!(store.add(record("S2", "Bob", "bob@x.com")).is_err());
        assert!(store.add(record("S1", "Grace", "g@x.com")).is_err());
        assert!(!store.contains("S2"));
        assert_eq!(store.get("S1").unwrap().name, "Ada");
    }

    #[test]
    fn failed_update_and_delete_roll_back() {
        let mut store = empty_store();
        store.add(record("S1", "Ada", "ada@x.com")).unwrap();
        store.backend().set_simulate_write_error(true);

        assert!(store.update("S1", record("S1", "Grace", "g@x.com")).is_err());
        assert_eq!(store.get("S1").unwrap().name, "Ada");

        assert!(store.delete("S1").is_err());
        assert!(store.contains("S1"));
    }
}
