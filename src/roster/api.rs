//! # API Facade
//!
//! The single entry point for roster operations, whatever the UI. It owns the
//! record store and dispatches to `commands/*.rs`; it holds no business logic
//! and does no terminal I/O.
//!
//! `RosterApi<B: StorageBackend>` is generic over the storage backend:
//! - Production: `RosterApi<FsBackend>`
//! - Testing: `RosterApi<MemBackend>`

use crate::commands;
use crate::error::Result;
use crate::model::{StudentChanges, StudentInput, StudentRecord};
use crate::store::backend::StorageBackend;
use crate::store::{LoadOutcome, RecordStore};
use std::path::PathBuf;

pub struct RosterApi<B: StorageBackend> {
    store: RecordStore<B>,
    paths: commands::RosterPaths,
    load_outcome: LoadOutcome,
}

impl<B: StorageBackend> RosterApi<B> {
    /// Opens the store on `backend`, loading its records.
    pub fn new(backend: B, paths: commands::RosterPaths) -> Self {
        let (store, load_outcome) = RecordStore::open(backend);
        Self {
            store,
            paths,
            load_outcome,
        }
    }

    /// How the initial load went.
    pub fn load_outcome(&self) -> &LoadOutcome {
        &self.load_outcome
    }

    pub fn add_student(&mut self, input: &StudentInput) -> Result<commands::CmdResult> {
        commands::add::run(&mut self.store, input)
    }

    pub fn view_student(&self, id: &str) -> Result<commands::CmdResult> {
        commands::view::run(&self.store, id)
    }

    /// Direct lookup for UIs that branch on existence before prompting.
    pub fn get_student(&self, id: &str) -> Option<&StudentRecord> {
        self.store.get(id.trim())
    }

    pub fn update_student(
        &mut self,
        id: &str,
        changes: &StudentChanges,
    ) -> Result<commands::CmdResult> {
        commands::update::run(&mut self.store, id, changes)
    }

    pub fn delete_student(&mut self, id: &str) -> Result<commands::CmdResult> {
        commands::delete::run(&mut self.store, id)
    }

    pub fn list_students(&self) -> Result<commands::CmdResult> {
        commands::list::run(&self.store)
    }

    pub fn search_students(&self, query: &str) -> Result<commands::CmdResult> {
        commands::search::run(&self.store, query)
    }

    pub fn statistics(&self) -> Result<commands::CmdResult> {
        commands::stats::run(&self.store)
    }

    pub fn config(&self, action: ConfigAction) -> Result<commands::CmdResult> {
        commands::config::run(&self.paths, action)
    }

    pub fn data_location(&self) -> PathBuf {
        self.store.location()
    }

    pub fn store(&self) -> &RecordStore<B> {
        &self.store
    }
}

pub use crate::commands::config::ConfigAction;
pub use commands::{CmdMessage, CmdResult, MessageLevel, RosterPaths, Statistics};
