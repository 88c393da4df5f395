// src/files/glob.rs

//! Filesystem glob expansion.
//!
//! A pattern is split into path segments on `/` or `\`. Each segment is one
//! of:
//!
//! - a literal name, joined onto the current directory;
//! - a wildcard (`*` matches any run of characters, `?` exactly one) that is
//!   matched against the entries of the current directory only;
//! - `**`, which matches zero or more whole directory levels.
//!
//! Expansion walks a worklist of `(directory, segment index)` states, so
//! there is no recursion depth limit and missing directories simply produce
//! no results.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::trace;

use crate::fs::FileSystem;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Wildcard(String),
    Recursive,
}

impl Segment {
    fn parse(s: &str) -> Self {
        if s == "**" {
            Segment::Recursive
        } else if s.contains(['*', '?']) {
            Segment::Wildcard(s.to_string())
        } else {
            Segment::Literal(s.to_string())
        }
    }
}

fn split_segments(pattern: &str) -> Vec<Segment> {
    pattern
        .split(['/', '\\'])
        .filter(|s| !s.is_empty() && *s != ".")
        .map(Segment::parse)
        .collect()
}

/// Expand `pattern` relative to `base` into every existing path it denotes.
///
/// Returned paths are absolute, sorted and free of duplicates. A pattern that
/// starts with a separator is anchored at the filesystem root instead of
/// `base`. Matching nothing is not an error.
pub fn expand_glob(fs: &dyn FileSystem, pattern: &str, base: &Path) -> Result<Vec<PathBuf>> {
    let segments = split_segments(pattern);
    let start = if pattern.starts_with(['/', '\\']) {
        PathBuf::from("/")
    } else {
        fs.absolute(base)?
    };

    let mut results = Vec::new();
    let mut worklist: VecDeque<(PathBuf, usize)> = VecDeque::new();
    worklist.push_back((start, 0));

    while let Some((dir, idx)) = worklist.pop_front() {
        let Some(segment) = segments.get(idx) else {
            if fs.exists(&dir) {
                results.push(dir);
            }
            continue;
        };

        match segment {
            Segment::Literal(name) => {
                worklist.push_back((dir.join(name), idx + 1));
            }
            Segment::Wildcard(wildcard) => {
                for entry in list_dir(fs, &dir) {
                    let matched = entry
                        .file_name()
                        .and_then(|n| n.to_str())
                        .is_some_and(|name| wildcard_match(wildcard, name));
                    if matched {
                        worklist.push_back((entry, idx + 1));
                    }
                }
            }
            Segment::Recursive => {
                // Zero levels: continue with the next segment right here.
                worklist.push_back((dir.clone(), idx + 1));
                for entry in list_dir(fs, &dir) {
                    if fs.is_dir(&entry) && !fs.is_symlink(&entry) {
                        worklist.push_back((entry, idx));
                    }
                }
            }
        }
    }

    results.sort();
    results.dedup();
    trace!(pattern, count = results.len(), "expanded glob pattern");
    Ok(results)
}

/// Entries of `dir`, or nothing if it cannot be listed.
fn list_dir(fs: &dyn FileSystem, dir: &Path) -> Vec<PathBuf> {
    if !fs.is_dir(dir) {
        return Vec::new();
    }
    fs.read_dir(dir).unwrap_or_default()
}

/// Single-level glob match of `name` against `pattern`.
///
/// `?` matches exactly one character and `*` any run of characters
/// (including none). On a mismatch after a `*`, the match is retried with the
/// `*` absorbing one more character.
pub fn wildcard_match(pattern: &str, name: &str) -> bool {
    let pat: Vec<char> = pattern.chars().collect();
    let txt: Vec<char> = name.chars().collect();

    let (mut p, mut t) = (0, 0);
    let mut star: Option<usize> = None;
    let mut star_t = 0;

    while t < txt.len() {
        if p < pat.len() && (pat[p] == '?' || pat[p] == txt[t]) {
            p += 1;
            t += 1;
        } else if p < pat.len() && pat[p] == '*' {
            star = Some(p);
            star_t = t;
            p += 1;
        } else if let Some(s) = star {
            p = s + 1;
            star_t += 1;
            t = star_t;
        } else {
            return false;
        }
    }

    while p < pat.len() && pat[p] == '*' {
        p += 1;
    }

    p == pat.len()
}
