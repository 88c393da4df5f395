// src/flow/status.rs

//! Durable per-task status records.
//!
//! Each task has exactly one record at
//! `<output root>/<flow>/<task>/status.json`:
//!
//! ```json
//! {
//!   "status": "success",
//!   "timestamp": "2024-05-01T12:00:00",
//!   "exit_code": 0,
//!   "error": "",
//!   "duration_ms": 1520
//! }
//! ```
//!
//! Records are replaced wholesale on every write. A missing or unreadable
//! record reads as `NotStarted`.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::errors::Result;
use crate::fs::FileSystem;
use crate::types::TaskStatus;

/// File name of a task's status record inside its output directory.
pub const STATUS_FILE_NAME: &str = "status.json";

/// Timestamp format used in status records (local time, second precision).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusRecord {
    pub status: TaskStatus,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub exit_code: i32,
    #[serde(default)]
    pub error: String,
    #[serde(default)]
    pub duration_ms: u64,
}

impl StatusRecord {
    pub fn new(status: TaskStatus, exit_code: i32, error: impl Into<String>) -> Self {
        Self {
            status,
            timestamp: chrono::Local::now().format(TIMESTAMP_FORMAT).to_string(),
            exit_code,
            error: error.into(),
            duration_ms: 0,
        }
    }

    pub fn with_duration_ms(mut self, duration_ms: u64) -> Self {
        self.duration_ms = duration_ms;
        self
    }
}

/// Reads and writes status records below one output root.
#[derive(Debug, Clone)]
pub struct StatusStore {
    fs: Arc<dyn FileSystem>,
    output_root: PathBuf,
}

impl StatusStore {
    pub fn new(fs: Arc<dyn FileSystem>, output_root: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            output_root: output_root.into(),
        }
    }

    pub fn output_root(&self) -> &Path {
        &self.output_root
    }

    /// `<output root>/<flow>/<task>`
    pub fn task_dir(&self, flow: &str, task: &str) -> PathBuf {
        self.output_root.join(flow).join(task)
    }

    pub fn status_path(&self, flow: &str, task: &str) -> PathBuf {
        self.task_dir(flow, task).join(STATUS_FILE_NAME)
    }

    /// Current status of a task, read from disk.
    pub fn read(&self, flow: &str, task: &str) -> TaskStatus {
        self.read_record(flow, task)
            .map(|record| record.status)
            .unwrap_or_default()
    }

    /// The full record, or `None` if it is missing or cannot be parsed.
    pub fn read_record(&self, flow: &str, task: &str) -> Option<StatusRecord> {
        let path = self.status_path(flow, task);
        if !self.fs.is_file(&path) {
            return None;
        }

        let contents = match self.fs.read_to_string(&path) {
            Ok(contents) => contents,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "unreadable status record; treating as not started");
                return None;
            }
        };

        match serde_json::from_str::<StatusRecord>(&contents) {
            Ok(record) => Some(record),
            Err(err) => {
                warn!(path = %path.display(), error = %err, "malformed status record; treating as not started");
                None
            }
        }
    }

    /// Replace the record of a task.
    pub fn write(&self, flow: &str, task: &str, record: &StatusRecord) -> Result<()> {
        let dir = self.task_dir(flow, task);
        self.fs.create_dir_all(&dir)?;

        let path = dir.join(STATUS_FILE_NAME);
        let mut json = serde_json::to_string_pretty(record)?;
        json.push('\n');
        self.fs
            .write(&path, json.as_bytes())
            .with_context(|| format!("writing status record for task '{task}' of flow '{flow}'"))?;

        debug!(flow, task, status = %record.status, exit_code = record.exit_code, "wrote status record");
        Ok(())
    }
}
