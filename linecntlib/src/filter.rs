//! File filtering and discovery with glob pattern support.
//!
//! This module walks a directory tree and collects the source files whose
//! extension is in the selected [`ExtensionSet`](crate::ExtensionSet),
//! optionally narrowed by include/exclude glob patterns.

use std::path::{Path, PathBuf};

use glob::Pattern;
use tracing::debug;
use walkdir::WalkDir;

use crate::error::LinecntError;
use crate::options::CountOptions;
use crate::Result;

/// Configuration for glob filtering.
#[derive(Debug, Clone, Default)]
pub struct FilterConfig {
    /// Glob patterns to include (if empty, include every file)
    pub include: Vec<Pattern>,
    /// Glob patterns to exclude
    pub exclude: Vec<Pattern>,
}

impl FilterConfig {
    /// Create a new empty filter config (includes all files).
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an include pattern.
    pub fn include(mut self, pattern: &str) -> Result<Self> {
        self.include.push(compile(pattern)?);
        Ok(self)
    }

    /// Add an exclude pattern.
    pub fn exclude(mut self, pattern: &str) -> Result<Self> {
        self.exclude.push(compile(pattern)?);
        Ok(self)
    }

    /// Add multiple include patterns.
    pub fn include_many(mut self, patterns: &[&str]) -> Result<Self> {
        for pattern in patterns {
            self = self.include(pattern)?;
        }
        Ok(self)
    }

    /// Add multiple exclude patterns.
    pub fn exclude_many(mut self, patterns: &[&str]) -> Result<Self> {
        for pattern in patterns {
            self = self.exclude(pattern)?;
        }
        Ok(self)
    }

    /// Check if a path passes the glob filters.
    ///
    /// A path matches if it matches at least one include pattern (or there
    /// are none) and no exclude pattern.
    pub fn matches(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy();

        if self.exclude.iter().any(|p| p.matches(&path_str)) {
            return false;
        }

        self.include.is_empty() || self.include.iter().any(|p| p.matches(&path_str))
    }
}

fn compile(pattern: &str) -> Result<Pattern> {
    Pattern::new(pattern).map_err(|e| LinecntError::InvalidGlob {
        pattern: pattern.to_string(),
        message: e.to_string(),
    })
}

/// Files found by [`discover_files`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Discovery {
    /// Matching files, sorted by path
    pub files: Vec<PathBuf>,
    /// Directories visited, the start directory included
    pub dir_count: u64,
}

/// Check if a directory should be skipped during traversal.
fn should_skip_dir(name: &str) -> bool {
    name.starts_with('.')
}

/// Discover source files under `root`.
///
/// Without `options.recurse` only the files directly inside `root` are
/// considered. Hidden directories are never entered. If `root` is a file,
/// it is returned on its own when it passes the filters.
pub fn discover_files(root: impl AsRef<Path>, options: &CountOptions) -> Result<Discovery> {
    let root = root.as_ref();

    if !root.exists() {
        return Err(LinecntError::PathNotFound(root.to_path_buf()));
    }

    let mut discovery = Discovery::default();

    if root.is_file() {
        if options.accepts(root) {
            discovery.files.push(root.to_path_buf());
        }
        return Ok(discovery);
    }

    let mut walker = WalkDir::new(root).follow_links(true);
    if !options.recurse {
        walker = walker.max_depth(1);
    }

    for entry in walker.into_iter().filter_entry(|e| {
        // Always include the root directory
        if e.depth() == 0 {
            return true;
        }
        if e.file_type().is_dir() {
            let name = e.file_name().to_str().unwrap_or("");
            return !should_skip_dir(name);
        }
        true
    }) {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                debug!(error = %e, "skipping unreadable entry");
                continue;
            }
        };

        if entry.file_type().is_dir() {
            // Without recursion, subdirectories are listed but not entered
            if options.recurse || entry.depth() == 0 {
                discovery.dir_count += 1;
                debug!(dir = %entry.path().display(), "entering directory");
            }
            continue;
        }

        let path = entry.path();
        if path.is_file() && options.accepts(path) {
            discovery.files.push(path.to_path_buf());
        }
    }

    // Sort for deterministic output
    discovery.files.sort();

    Ok(discovery)
}
