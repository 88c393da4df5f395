// src/config/model.rs

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::errors::{LookupKind, Result, StargateError};
use crate::files::FileSet;
use crate::project::ProjectTarget;

/// Project file as read from TOML, before validation.
///
/// ```toml
/// [filesets]
/// rtl = ["src/**/*.v"]
///
/// [targets.top]
/// filesets = ["rtl"]
/// flow = "vivado"
///
/// [[flows.demo.sections]]
/// name = "build"
/// tasks = [{ name = "lint", cmd = "verilator --lint-only -f $STARGATE_FILE_LIST" }]
/// ```
///
/// Keys placed directly under `[targets]` (instead of in a `[targets.<name>]`
/// table) describe an implicit target called `default`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawProjectConfig {
    #[serde(default)]
    pub filesets: BTreeMap<String, Vec<String>>,

    #[serde(default)]
    pub targets: BTreeMap<String, toml::Value>,

    #[serde(default)]
    pub flows: BTreeMap<String, FlowConfig>,
}

/// `[targets.<name>]` table.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct TargetConfig {
    /// Names of the file sets whose files this target is built from.
    #[serde(default)]
    pub filesets: Vec<String>,

    /// Name of the flow used to build this target.
    #[serde(default)]
    pub flow: Option<String>,
}

/// `[flows.<name>]`: a flow made of shell-command tasks.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct FlowConfig {
    #[serde(default)]
    pub sections: Vec<SectionConfig>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct SectionConfig {
    pub name: String,
    #[serde(default)]
    pub tasks: Vec<CommandTaskConfig>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct CommandTaskConfig {
    pub name: String,
    /// Shell command; runs in the project directory.
    pub cmd: String,
}

/// Validated project configuration.
///
/// Only [`TryFrom<RawProjectConfig>`] (see `validate.rs`) and the loader
/// construct this, so every file set a target names is known to exist.
#[derive(Debug, Clone)]
pub struct ProjectConfig {
    config_path: PathBuf,
    project_dir: PathBuf,
    filesets: BTreeMap<String, FileSet>,
    targets: BTreeMap<String, ProjectTarget>,
    flows: BTreeMap<String, FlowConfig>,
}

impl ProjectConfig {
    pub(crate) fn new_unchecked(
        filesets: BTreeMap<String, FileSet>,
        targets: BTreeMap<String, ProjectTarget>,
        flows: BTreeMap<String, FlowConfig>,
    ) -> Self {
        Self {
            config_path: PathBuf::new(),
            project_dir: PathBuf::from("."),
            filesets,
            targets,
            flows,
        }
    }

    /// Record where the config was loaded from. File set patterns resolve
    /// relative to `project_dir`.
    pub fn with_location(mut self, config_path: PathBuf, project_dir: PathBuf) -> Self {
        self.config_path = config_path;
        self.project_dir = project_dir;
        self
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn project_dir(&self) -> &Path {
        &self.project_dir
    }

    pub fn filesets(&self) -> impl Iterator<Item = &FileSet> {
        self.filesets.values()
    }

    pub fn fileset(&self, name: &str) -> Option<&FileSet> {
        self.filesets.get(name)
    }

    pub fn targets(&self) -> impl Iterator<Item = &ProjectTarget> {
        self.targets.values()
    }

    pub fn target(&self, name: &str) -> Result<&ProjectTarget> {
        self.targets
            .get(name)
            .ok_or_else(|| StargateError::not_found(LookupKind::Target, name))
    }

    /// The file sets referenced by `target`, in reference order.
    pub fn target_filesets(&self, target: &ProjectTarget) -> Result<Vec<&FileSet>> {
        target
            .fileset_names()
            .iter()
            .map(|name| {
                self.fileset(name)
                    .ok_or_else(|| StargateError::not_found(LookupKind::FileSet, name.as_str()))
            })
            .collect()
    }

    pub fn flows(&self) -> &BTreeMap<String, FlowConfig> {
        &self.flows
    }
}
