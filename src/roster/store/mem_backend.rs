use super::backend::StorageBackend;
use super::RecordMap;
use crate::error::{Result, RosterError};
use std::cell::{Cell, RefCell};
use std::path::PathBuf;

/// In-memory storage backend for testing.
///
/// Uses `RefCell` for interior mutability since roster is single-threaded.
/// This allows the `StorageBackend` trait to use `&self` for all methods.
#[derive(Default)]
pub struct MemBackend {
    records: RefCell<Option<RecordMap>>,
    unreadable: RefCell<Option<String>>,
    simulate_write_error: Cell<bool>,
    saves: Cell<usize>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend that already holds `records`, as if a previous session saved them.
    pub fn with_records(records: RecordMap) -> Self {
        let backend = Self::default();
        *backend.records.borrow_mut() = Some(records);
        backend
    }

    /// Backend whose stored data fails to parse with `reason`.
    pub fn unreadable(reason: impl Into<String>) -> Self {
        let backend = Self::default();
        *backend.unreadable.borrow_mut() = Some(reason.into());
        backend
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.simulate_write_error.set(simulate);
    }

    /// Number of successful saves so far.
    pub fn save_count(&self) -> usize {
        self.saves.get()
    }

    /// What a fresh load would see.
    pub fn stored(&self) -> Option<RecordMap> {
        self.records.borrow().clone()
    }
}

impl StorageBackend for MemBackend {
    fn load_records(&self) -> Result<Option<RecordMap>> {
        if let Some(reason) = self.unreadable.borrow().as_ref() {
            return Err(RosterError::Store(reason.clone()));
        }
        Ok(self.records.borrow().clone())
    }

    fn save_records(&self, records: &RecordMap) -> Result<()> {
        if self.simulate_write_error.get() {
            return Err(RosterError::Store("Simulated write error".to_string()));
        }
        *self.records.borrow_mut() = Some(records.clone());
        *self.unreadable.borrow_mut() = None;
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }

    fn preserve_unreadable(&self) -> Result<Option<PathBuf>> {
        Ok(self
            .unreadable
            .borrow()
            .as_ref()
            .map(|_| PathBuf::from("memory://students.corrupt")))
    }

    fn location(&self) -> PathBuf {
        PathBuf::from("memory://students")
    }
}
