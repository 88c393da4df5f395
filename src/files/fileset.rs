// src/files/fileset.rs

/// A named, ordered list of glob patterns.
///
/// Patterns keep their declaration order and duplicates are allowed; the
/// collector takes care of deduplicating the resulting paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSet {
    name: String,
    patterns: Vec<String>,
}

impl FileSet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            patterns: Vec::new(),
        }
    }

    pub fn with_patterns<I, S>(name: impl Into<String>, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            patterns: patterns.into_iter().map(Into::into).collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    pub fn add_pattern(&mut self, pattern: impl Into<String>) {
        self.patterns.push(pattern.into());
    }
}
