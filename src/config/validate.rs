// src/config/validate.rs

use std::collections::{BTreeMap, HashSet};

use crate::config::model::{FlowConfig, ProjectConfig, RawProjectConfig, TargetConfig};
use crate::errors::{Result, StargateError};
use crate::files::FileSet;
use crate::project::{DEFAULT_TARGET, ProjectTarget};

impl TryFrom<RawProjectConfig> for ProjectConfig {
    type Error = StargateError;

    fn try_from(raw: RawProjectConfig) -> std::result::Result<Self, Self::Error> {
        let filesets: BTreeMap<String, FileSet> = raw
            .filesets
            .into_iter()
            .map(|(name, patterns)| {
                let fileset = FileSet::with_patterns(name.as_str(), patterns);
                (name, fileset)
            })
            .collect();

        let targets = parse_targets(raw.targets)?;
        validate_target_filesets(&targets, &filesets)?;
        validate_flows(&raw.flows)?;

        Ok(ProjectConfig::new_unchecked(filesets, targets, raw.flows))
    }
}

/// Split `[targets]` into named targets and the implicit `default` target.
fn parse_targets(raw: BTreeMap<String, toml::Value>) -> Result<BTreeMap<String, ProjectTarget>> {
    let mut targets = BTreeMap::new();
    let mut default_target: Option<TargetConfig> = None;

    for (key, value) in raw {
        if value.is_table() {
            let cfg: TargetConfig = value.try_into().map_err(|e| {
                StargateError::ConfigError(format!("invalid target '{key}': {e}"))
            })?;
            targets.insert(key.clone(), ProjectTarget::from_config(key, cfg));
        } else {
            let cfg = default_target.get_or_insert_with(TargetConfig::default);
            apply_target_property(cfg, &key, value)?;
        }
    }

    if let Some(cfg) = default_target {
        if targets.contains_key(DEFAULT_TARGET) {
            return Err(StargateError::ConfigError(format!(
                "target '{DEFAULT_TARGET}' is declared both as a table and with keys directly under [targets]"
            )));
        }
        targets.insert(
            DEFAULT_TARGET.to_string(),
            ProjectTarget::from_config(DEFAULT_TARGET, cfg),
        );
    }

    Ok(targets)
}

fn apply_target_property(cfg: &mut TargetConfig, key: &str, value: toml::Value) -> Result<()> {
    match key {
        "filesets" => {
            cfg.filesets = value.try_into().map_err(|e| {
                StargateError::ConfigError(format!(
                    "target '{DEFAULT_TARGET}': `filesets` must be a list of names: {e}"
                ))
            })?;
        }
        "flow" => {
            let flow = value.as_str().ok_or_else(|| {
                StargateError::ConfigError(format!(
                    "target '{DEFAULT_TARGET}': `flow` must be a string"
                ))
            })?;
            cfg.flow = Some(flow.to_string());
        }
        other => {
            return Err(StargateError::ConfigError(format!(
                "invalid key '{other}' in target {DEFAULT_TARGET}"
            )));
        }
    }
    Ok(())
}

fn validate_target_filesets(
    targets: &BTreeMap<String, ProjectTarget>,
    filesets: &BTreeMap<String, FileSet>,
) -> Result<()> {
    for target in targets.values() {
        for name in target.fileset_names() {
            if !filesets.contains_key(name) {
                return Err(StargateError::ConfigError(format!(
                    "target '{}' references unknown file set '{}'",
                    target.name(),
                    name
                )));
            }
        }
    }
    Ok(())
}

fn validate_flows(flows: &BTreeMap<String, FlowConfig>) -> Result<()> {
    for (flow_name, flow) in flows {
        if flow_name.trim().is_empty() {
            return Err(StargateError::ConfigError(
                "flow names must not be empty".to_string(),
            ));
        }

        let mut sections = HashSet::new();
        let mut tasks = HashSet::new();
        for section in &flow.sections {
            if section.name.trim().is_empty() {
                return Err(StargateError::ConfigError(format!(
                    "flow '{flow_name}' has a section with an empty name"
                )));
            }
            if !sections.insert(section.name.as_str()) {
                return Err(StargateError::ConfigError(format!(
                    "flow '{flow_name}' declares section '{}' more than once",
                    section.name
                )));
            }

            for task in &section.tasks {
                if task.name.trim().is_empty() {
                    return Err(StargateError::ConfigError(format!(
                        "section '{}' of flow '{flow_name}' has a task with an empty name",
                        section.name
                    )));
                }
                if !tasks.insert(task.name.as_str()) {
                    return Err(StargateError::ConfigError(format!(
                        "flow '{flow_name}' declares task '{}' more than once",
                        task.name
                    )));
                }
                if task.cmd.trim().is_empty() {
                    return Err(StargateError::ConfigError(format!(
                        "task '{}' of flow '{flow_name}' has an empty `cmd`",
                        task.name
                    )));
                }
            }
        }
    }
    Ok(())
}
