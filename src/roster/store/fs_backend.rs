use super::backend::StorageBackend;
use super::RecordMap;
use crate::error::{Result, RosterError};
use chrono::Local;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use uuid::Uuid;

pub const DEFAULT_DATA_FILE: &str = "students.json";

/// Stores every record in one pretty-printed JSON object keyed by student id.
pub struct FsBackend {
    path: PathBuf,
}

impl FsBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn parent_dir(&self) -> PathBuf {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| DEFAULT_DATA_FILE.to_string())
    }

    /// Most recent `<file>.corrupt-*` whose bytes equal `content`, if any.
    fn matching_backup(&self, content: &[u8]) -> Result<Option<PathBuf>> {
        let prefix = format!("{}.corrupt-", self.file_name());
        let mut backups: Vec<PathBuf> = fs::read_dir(self.parent_dir())
            .map_err(RosterError::Io)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| {
                path.file_name()
                    .is_some_and(|name| name.to_string_lossy().starts_with(&prefix))
            })
            .collect();
        // Stamps sort lexically, newest last.
        backups.sort();

        Ok(backups
            .into_iter()
            .rev()
            .find(|path| fs::read(path).is_ok_and(|bytes| bytes == content)))
    }

    fn ensure_dir(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path).map_err(RosterError::Io)?;
        }
        Ok(())
    }
}

impl StorageBackend for FsBackend {
    fn load_records(&self) -> Result<Option<RecordMap>> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no data file yet");
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path).map_err(RosterError::Io)?;
        let records: RecordMap =
            serde_json::from_str(&content).map_err(RosterError::Serialization)?;
        debug!(path = %self.path.display(), count = records.len(), "loaded records");
        Ok(Some(records))
    }

    fn save_records(&self, records: &RecordMap) -> Result<()> {
        let dir = self.parent_dir();
        self.ensure_dir(&dir)?;

        let content = serde_json::to_string_pretty(records).map_err(RosterError::Serialization)?;

        // Atomic write: a crash mid-save leaves the old file intact
        let tmp_file = dir.join(format!(".{}-{}.tmp", self.file_name(), Uuid::new_v4()));
        fs::write(&tmp_file, content).map_err(RosterError::Io)?;
        if let Err(e) = fs::rename(&tmp_file, &self.path) {
            let _ = fs::remove_file(&tmp_file);
            return Err(RosterError::Io(e));
        }

        debug!(path = %self.path.display(), count = records.len(), "saved records");
        Ok(())
    }

    fn preserve_unreadable(&self) -> Result<Option<PathBuf>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = fs::read(&self.path).map_err(RosterError::Io)?;
        if let Some(existing) = self.matching_backup(&content)? {
            debug!(backup = %existing.display(), "unreadable data already backed up");
            return Ok(Some(existing));
        }

        let stamp = Local::now().format("%Y%m%d%H%M%S");
        let backup = self
            .parent_dir()
            .join(format!("{}.corrupt-{}", self.file_name(), stamp));
        fs::write(&backup, content).map_err(RosterError::Io)?;
        debug!(backup = %backup.display(), "backed up unreadable data");
        Ok(Some(backup))
    }

    fn location(&self) -> PathBuf {
        self.path.clone()
    }
}
