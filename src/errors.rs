// src/errors.rs

//! Crate-wide error type and result alias.
//!
//! Every fatal condition of an invocation surfaces as a [`StargateError`].
//! The CLI renders the message and maps the variant to a process exit code
//! via [`StargateError::exit_code`].

use std::fmt;

use thiserror::Error;

use crate::types::TaskStatus;

/// What kind of named entity a lookup failed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupKind {
    Flow,
    Section,
    Task,
    Target,
    FileSet,
}

impl fmt::Display for LookupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LookupKind::Flow => "flow",
            LookupKind::Section => "section",
            LookupKind::Task => "task",
            LookupKind::Target => "target",
            LookupKind::FileSet => "file set",
        };
        f.write_str(s)
    }
}

#[derive(Error, Debug)]
pub enum StargateError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Unknown {kind}: {name}")]
    NotFound { kind: LookupKind, name: String },

    #[error("Duplicate {kind} name: {name}")]
    DuplicateName { kind: LookupKind, name: String },

    #[error(
        "Unmet dependency for {blocked}: task '{dependency}' in section '{dependency_section}' is {status}"
    )]
    UnmetDependency {
        /// What could not run, e.g. `task 'impl'` or `section 'run'`.
        blocked: String,
        dependency_section: String,
        dependency: String,
        status: TaskStatus,
    },

    #[error("Invalid task range: {0}")]
    InvalidRange(String),

    #[error("Task '{task}' in flow '{flow}' failed with exit code {exit_code}: {error}")]
    TaskFailed {
        flow: String,
        task: String,
        exit_code: i32,
        error: String,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StargateError {
    pub fn not_found(kind: LookupKind, name: impl Into<String>) -> Self {
        StargateError::NotFound {
            kind,
            name: name.into(),
        }
    }

    pub fn duplicate(kind: LookupKind, name: impl Into<String>) -> Self {
        StargateError::DuplicateName {
            kind,
            name: name.into(),
        }
    }

    /// Message with the full cause chain, e.g. the OS error behind a failed
    /// file-list write.
    pub fn report(&self) -> String {
        format!("{self:#}")
    }

    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            StargateError::ConfigError(_)
            | StargateError::TomlError(_)
            | StargateError::DuplicateName { .. } => 2,
            StargateError::NotFound { .. } => 3,
            StargateError::UnmetDependency { .. } => 4,
            StargateError::InvalidRange(_) => 5,
            StargateError::TaskFailed { .. } => 6,
            StargateError::IoError(_) | StargateError::JsonError(_) | StargateError::Other(_) => 1,
        }
    }
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, StargateError>;
