// src/project/mod.rs

//! Build targets declared by a project.

pub mod target;

pub use target::{DEFAULT_TARGET, ProjectTarget};
