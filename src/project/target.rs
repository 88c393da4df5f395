// src/project/target.rs

use crate::config::model::TargetConfig;
use crate::errors::{Result, StargateError};

/// Name of the target built from keys placed directly under `[targets]`.
pub const DEFAULT_TARGET: &str = "default";

/// A named build unit: some file sets plus the flow that builds them.
///
/// File sets are referenced by name and resolved through the
/// [`ProjectConfig`](crate::config::ProjectConfig) that owns them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectTarget {
    name: String,
    filesets: Vec<String>,
    flow: Option<String>,
}

impl ProjectTarget {
    pub fn from_config(name: impl Into<String>, cfg: TargetConfig) -> Self {
        Self {
            name: name.into(),
            filesets: cfg.filesets,
            flow: cfg.flow,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fileset_names(&self) -> &[String] {
        &self.filesets
    }

    pub fn flow_name(&self) -> Option<&str> {
        self.flow.as_deref()
    }

    /// The flow name, or a configuration error if the target has none.
    pub fn require_flow_name(&self) -> Result<&str> {
        self.flow_name().ok_or_else(|| {
            StargateError::ConfigError(format!("target '{}' does not name a flow", self.name))
        })
    }
}
