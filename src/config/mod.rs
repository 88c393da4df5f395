// src/config/mod.rs

//! Project configuration loading and validation for stargate.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a project file from disk (`loader.rs`).
//! - Validate cross references such as target → file set (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{DEFAULT_CONFIG_FILE, dump_config, load_and_validate, load_from_path};
pub use model::{
    CommandTaskConfig, FlowConfig, ProjectConfig, RawProjectConfig, SectionConfig, TargetConfig,
};
