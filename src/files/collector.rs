// src/files/collector.rs

use std::collections::HashSet;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::debug;

use crate::files::fileset::FileSet;
use crate::files::glob::expand_glob;
use crate::fs::FileSystem;

/// Aggregates the patterns of several file sets into one path list.
///
/// The collector borrows its file sets; it is built per target and dropped
/// once the list has been produced.
#[derive(Debug)]
pub struct FileSetCollector<'a> {
    base_path: PathBuf,
    filesets: Vec<&'a FileSet>,
}

impl<'a> FileSetCollector<'a> {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            filesets: Vec::new(),
        }
    }

    pub fn add_fileset(&mut self, fileset: &'a FileSet) {
        self.filesets.push(fileset);
    }

    /// Expand every pattern of every file set, in registration order.
    ///
    /// A path is emitted once, at the position of its first match, no matter
    /// how many patterns or file sets match it.
    pub fn collect(&self, fs: &dyn FileSystem) -> Result<Vec<PathBuf>> {
        let mut seen: HashSet<PathBuf> = HashSet::new();
        let mut paths = Vec::new();

        for fileset in &self.filesets {
            for pattern in fileset.patterns() {
                let expanded = expand_glob(fs, pattern, &self.base_path).with_context(|| {
                    format!(
                        "expanding pattern '{}' of file set '{}'",
                        pattern,
                        fileset.name()
                    )
                })?;

                debug!(
                    fileset = fileset.name(),
                    pattern = %pattern,
                    matches = expanded.len(),
                    "expanded file set pattern"
                );

                for path in expanded {
                    if seen.insert(path.clone()) {
                        paths.push(path);
                    }
                }
            }
        }

        Ok(paths)
    }
}
