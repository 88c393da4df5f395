#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use stargate::flow::StatusStore;
use stargate::fs::RealFileSystem;
use stargate::fs::mock::MockFileSystem;
use tempfile::TempDir;

pub use stargate_test_utils::init_tracing;

/// Create `rel` (and its parents) below `root` with some content.
pub fn touch(root: &Path, rel: &str) -> PathBuf {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, format!("// {rel}\n")).unwrap();
    path
}

/// A temp directory populated with `files` (relative paths).
pub fn tree(files: &[&str]) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    for rel in files {
        touch(dir.path(), rel);
    }
    dir
}

/// Status store over the real filesystem rooted at `root`.
pub fn real_store(root: &Path) -> StatusStore {
    StatusStore::new(Arc::new(RealFileSystem), root.to_path_buf())
}

/// Status store over a fresh in-memory filesystem, rooted at `/out`.
pub fn mock_store() -> (MockFileSystem, StatusStore) {
    let fs = MockFileSystem::new();
    let store = StatusStore::new(Arc::new(fs.clone()), "/out");
    (fs, store)
}

/// Paths relative to `root`, with `/` separators, for readable assertions.
pub fn relative(root: &Path, paths: &[PathBuf]) -> Vec<String> {
    paths
        .iter()
        .map(|p| {
            p.strip_prefix(root)
                .unwrap_or(p)
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect::<Vec<_>>()
                .join("/")
        })
        .collect()
}
