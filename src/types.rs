// src/types.rs

//! Task status and task outcome values shared by the flow model and the
//! status store.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Persisted state of a single task.
///
/// The on-disk spelling is snake case (`"not_started"`, `"in_progress"`,
/// `"success"`, `"failed"`). Reading is lenient: any other value maps to
/// `NotStarted` instead of failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TaskStatus {
    #[default]
    NotStarted,
    InProgress,
    Success,
    Failed,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::NotStarted => "not_started",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Success => "success",
            TaskStatus::Failed => "failed",
        }
    }

    /// Lenient conversion used when reading status records. Only the exact
    /// spellings are recognised; anything else is `NotStarted`.
    pub fn from_status_str(s: &str) -> Self {
        s.parse().unwrap_or_default()
    }

    pub fn is_success(&self) -> bool {
        matches!(self, TaskStatus::Success)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "not_started" => Ok(TaskStatus::NotStarted),
            "in_progress" => Ok(TaskStatus::InProgress),
            "success" => Ok(TaskStatus::Success),
            "failed" => Ok(TaskStatus::Failed),
            other => Err(format!(
                "invalid task status: {other} (expected \"not_started\", \"in_progress\", \"success\" or \"failed\")"
            )),
        }
    }
}

impl Serialize for TaskStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for TaskStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(TaskStatus::from_status_str(&s))
    }
}

/// Result reported by a task body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskOutcome {
    Success,
    Failed { exit_code: i32, error: String },
}

impl TaskOutcome {
    pub fn failed(exit_code: i32, error: impl Into<String>) -> Self {
        TaskOutcome::Failed {
            exit_code,
            error: error.into(),
        }
    }
}
