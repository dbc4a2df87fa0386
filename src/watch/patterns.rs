// src/watch/patterns.rs

use std::fmt;
use std::path::Path;

use globset::{Glob, GlobSet, GlobSetBuilder};

use crate::errors::{RenderqError, Result};

/// Compiled glob that decides which files in the watched directory are job
/// descriptors.
///
/// Patterns are matched against the *file name* only (e.g. `"*.json"`), never
/// the full path, so the watched directory can live anywhere.
#[derive(Clone)]
pub struct DescriptorMatcher {
    patterns: Vec<String>,
    set: GlobSet,
}

impl fmt::Debug for DescriptorMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DescriptorMatcher")
            .field("patterns", &self.patterns)
            .finish_non_exhaustive()
    }
}

impl DescriptorMatcher {
    /// Compile the given file-name patterns.
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self> {
        if patterns.is_empty() {
            return Err(RenderqError::ConfigError(
                "at least one descriptor pattern is required".to_string(),
            ));
        }

        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let glob = Glob::new(pattern.as_ref()).map_err(|e| {
                RenderqError::ConfigError(format!(
                    "invalid descriptor pattern {:?}: {e}",
                    pattern.as_ref()
                ))
            })?;
            builder.add(glob);
        }

        let set = builder
            .build()
            .map_err(|e| RenderqError::ConfigError(format!("building descriptor globset: {e}")))?;

        Ok(Self {
            patterns: patterns.iter().map(|p| p.as_ref().to_string()).collect(),
            set,
        })
    }

    /// Matcher for a plain extension, e.g. `"json"` → `*.json`.
    pub fn for_extension(extension: &str) -> Result<Self> {
        let ext = extension.trim().trim_start_matches('.');
        Self::new(&[format!("*.{ext}")])
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    /// Returns true if the file name of `path` matches any pattern.
    pub fn matches(&self, path: &Path) -> bool {
        match path.file_name() {
            Some(name) => self.set.is_match(Path::new(name)),
            None => false,
        }
    }
}
