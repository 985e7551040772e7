//! # Configuration
//!
//! Roster keeps a small `config.json` in its config directory:
//! `$ROSTER_HOME` when set, otherwise the OS config directory (via `directories`).
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `data-file` | `students.json` | Backing file, relative paths resolve against the working directory |
//! | `confirm-delete` | `true` | Ask for a typed `YES` before deleting |
//!
//! The backing file is resolved in priority order:
//! 1. `--file` on the command line
//! 2. `ROSTER_FILE` environment variable
//! 3. `data-file` from `config.json`

use crate::error::{Result, RosterError};
use crate::store::fs_backend::DEFAULT_DATA_FILE;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";
pub const HOME_ENV: &str = "ROSTER_HOME";
pub const FILE_ENV: &str = "ROSTER_FILE";

pub const KEYS: &[&str] = &["data-file", "confirm-delete"];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RosterConfig {
    #[serde(default = "default_data_file")]
    pub data_file: String,

    #[serde(default = "default_confirm_delete")]
    pub confirm_delete: bool,
}

fn default_data_file() -> String {
    DEFAULT_DATA_FILE.to_string()
}

fn default_confirm_delete() -> bool {
    true
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            confirm_delete: default_confirm_delete(),
        }
    }
}

impl RosterConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(RosterError::Io)?;
        let config: RosterConfig =
            serde_json::from_str(&content).map_err(RosterError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(RosterError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(RosterError::Serialization)?;
        fs::write(config_path, content).map_err(RosterError::Io)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "data-file" => Some(self.data_file.clone()),
            "confirm-delete" => Some(self.confirm_delete.to_string()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "data-file" => {
                if value.trim().is_empty() {
                    return Err(RosterError::Config("data-file cannot be empty".into()));
                }
                self.data_file = value.trim().to_string();
            }
            "confirm-delete" => {
                self.confirm_delete = parse_bool(value).ok_or_else(|| {
                    RosterError::Config(format!(
                        "confirm-delete expects true or false, got {}",
                        value
                    ))
                })?;
            }
            other => return Err(RosterError::Config(format!("Unknown config key: {}", other))),
        }
        Ok(())
    }

    /// The backing file, with relative paths anchored at `cwd`.
    pub fn data_path(&self, cwd: &Path) -> PathBuf {
        let path = PathBuf::from(&self.data_file);
        if path.is_absolute() {
            path
        } else {
            cwd.join(path)
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}
