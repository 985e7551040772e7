//! # Command Layer
//!
//! Business rules the store leaves to its callers: duplicate ids are rejected
//! before an add, raw values are validated before any mutation, and updates
//! overlay only the fields the user changed.
//!
//! Every command takes the store (and plain Rust arguments) and returns a
//! [`CmdResult`]. Commands never print.

use crate::config::RosterConfig;
use crate::error::{Result, RosterError};
use crate::model::StudentRecord;
use crate::store::backend::StorageBackend;
use crate::store::RecordStore;
use std::path::PathBuf;

pub mod add;
pub mod config;
pub mod delete;
pub mod list;
pub mod search;
pub mod stats;
pub mod update;
pub mod view;

pub use stats::Statistics;

#[derive(Debug, Clone)]
pub struct RosterPaths {
    pub config_dir: PathBuf,
    pub data_file: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_students: Vec<StudentRecord>,
    pub listed_students: Vec<StudentRecord>,
    pub statistics: Option<Statistics>,
    pub config: Option<RosterConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_students(mut self, students: Vec<StudentRecord>) -> Self {
        self.affected_students = students;
        self
    }

    pub fn with_listed_students(mut self, students: Vec<StudentRecord>) -> Self {
        self.listed_students = students;
        self
    }

    pub fn with_statistics(mut self, statistics: Statistics) -> Self {
        self.statistics = Some(statistics);
        self
    }

    pub fn with_config(mut self, config: RosterConfig) -> Self {
        self.config = Some(config);
        self
    }
}

/// Looks up `id`, turning absence into `StudentNotFound`.
pub(crate) fn existing<B: StorageBackend>(
    store: &RecordStore<B>,
    id: &str,
) -> Result<StudentRecord> {
    store
        .get(id)
        .cloned()
        .ok_or_else(|| RosterError::StudentNotFound(id.to_string()))
}
