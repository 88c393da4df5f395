// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::config::model::{ProjectConfig, RawProjectConfig};
use crate::errors::{Result, StargateError};

/// Default project file name, looked up in the current working directory.
pub const DEFAULT_CONFIG_FILE: &str = "stargate.toml";

/// Load a project file from a given path and return the raw `RawProjectConfig`.
///
/// This only performs TOML deserialization (which already rejects unknown
/// top-level keys); it does **not** perform semantic validation. Use
/// [`load_and_validate`] for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawProjectConfig> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(StargateError::ConfigError(format!(
            "project config file {} does not exist",
            path.display()
        )));
    }
    if !path.is_file() {
        return Err(StargateError::ConfigError(format!(
            "project config path {} is not a file",
            path.display()
        )));
    }

    info!(path = %path.display(), "reading project config file");
    let contents = fs::read_to_string(path)?;
    let config: RawProjectConfig = toml::from_str(&contents)?;

    Ok(config)
}

/// Load a project file from path, validate it and record its location.
///
/// This is the recommended entry point for the rest of the application:
///
/// - Reads TOML, rejecting unknown sections and target keys.
/// - Checks that every file set a target references exists.
/// - Checks command flows for empty or repeated names.
/// - Resolves the project directory (the file's parent, made absolute).
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<ProjectConfig> {
    let path = path.as_ref();
    let raw_config = load_from_path(path)?;
    let config = ProjectConfig::try_from(raw_config)?;

    let config_path = std::path::absolute(path)?;
    let project_dir = config_path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("/"));

    Ok(config.with_location(config_path, project_dir))
}

/// Log the loaded file sets and targets (`--verbose`).
pub fn dump_config(config: &ProjectConfig) {
    info!("==== Project file: {}", config.config_path().display());

    for fileset in config.filesets() {
        info!("==== File set: {}", fileset.name());
        for pattern in fileset.patterns() {
            info!("  Pattern: {}", pattern);
        }
    }

    for target in config.targets() {
        info!(
            flow = target.flow_name().unwrap_or("-"),
            filesets = ?target.fileset_names(),
            "==== Target: {}",
            target.name()
        );
    }

    for (name, flow) in config.flows() {
        info!(sections = flow.sections.len(), "==== Flow: {}", name);
    }
}
