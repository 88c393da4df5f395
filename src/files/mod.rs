// src/files/mod.rs

//! Source file discovery.
//!
//! - [`glob`] expands a single pattern against a directory tree.
//! - [`fileset`] holds named pattern lists from the project config.
//! - [`collector`] turns the file sets of a target into one deduplicated,
//!   order-stable list of absolute paths.

pub mod collector;
pub mod fileset;
pub mod glob;

pub use collector::FileSetCollector;
pub use fileset::FileSet;
pub use glob::{expand_glob, wildcard_match};
