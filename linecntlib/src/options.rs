//! Input options for line counting.
//!
//! This module contains the configuration types that decide which files
//! are classified: the extension set, extension presets and the
//! [`CountOptions`] builder.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::filter::FilterConfig;

/// Common groups of source file extensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Preset {
    /// `.c`, `.cpp` and `.h`
    CCpp,
    /// `.java`
    Java,
}

impl Preset {
    /// Extensions covered by this preset.
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            Preset::CCpp => &["cpp", "h", "c"],
            Preset::Java => &["java"],
        }
    }
}

impl FromStr for Preset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "c" | "cpp" | "c++" | "c/c++" => Ok(Preset::CCpp),
            "java" => Ok(Preset::Java),
            _ => Err(format!("Unknown preset: {}", s)),
        }
    }
}

/// Case-insensitive set of file extensions.
///
/// Extensions are stored lowercased and without a leading dot, so
/// `"CPP"`, `".cpp"` and `"cpp"` are the same entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtensionSet {
    extensions: BTreeSet<String>,
}

impl ExtensionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set holding the extensions of one preset.
    pub fn from_preset(preset: Preset) -> Self {
        let mut set = Self::new();
        set.extend_preset(preset);
        set
    }

    /// Add one extension. Empty names are ignored.
    pub fn insert(&mut self, extension: &str) -> bool {
        let normalized = extension.trim_start_matches('.').to_lowercase();
        if normalized.is_empty() {
            return false;
        }
        self.extensions.insert(normalized)
    }

    /// Add every extension of a preset.
    pub fn extend_preset(&mut self, preset: Preset) {
        for extension in preset.extensions() {
            self.insert(extension);
        }
    }

    pub fn contains(&self, extension: &str) -> bool {
        self.extensions
            .contains(&extension.trim_start_matches('.').to_lowercase())
    }

    /// Whether the file's extension is in the set.
    pub fn matches(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.contains(ext))
    }

    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.extensions.len()
    }

    /// Extensions in sorted order, without leading dots.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.extensions.iter().map(|s| s.as_str())
    }
}

impl<S: AsRef<str>> FromIterator<S> for ExtensionSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        for extension in iter {
            set.insert(extension.as_ref());
        }
        set
    }
}

/// Renders as `.c, .cpp and .h`.
impl fmt::Display for ExtensionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let count = self.extensions.len();
        for (i, extension) in self.extensions.iter().enumerate() {
            if i > 0 {
                f.write_str(if i + 1 == count { " and " } else { ", " })?;
            }
            write!(f, ".{}", extension)?;
        }
        Ok(())
    }
}

/// Options for counting lines in a directory.
#[derive(Debug, Clone, Default)]
pub struct CountOptions {
    /// Extensions of files to classify
    pub extensions: ExtensionSet,
    /// Walk subdirectories of the start directory
    pub recurse: bool,
    /// Glob include/exclude filters
    pub filter: FilterConfig,
}

impl CountOptions {
    /// Create new default options (no extensions, no recursion).
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the extension set.
    pub fn extensions(mut self, extensions: ExtensionSet) -> Self {
        self.extensions = extensions;
        self
    }

    /// Add a single extension.
    pub fn extension(mut self, extension: &str) -> Self {
        self.extensions.insert(extension);
        self
    }

    /// Add the extensions of a preset.
    pub fn preset(mut self, preset: Preset) -> Self {
        self.extensions.extend_preset(preset);
        self
    }

    /// Walk subdirectories.
    pub fn recurse(mut self, recurse: bool) -> Self {
        self.recurse = recurse;
        self
    }

    /// Set file filter.
    pub fn filter(mut self, filter: FilterConfig) -> Self {
        self.filter = filter;
        self
    }

    /// Whether a discovered file should be classified.
    pub fn accepts(&self, path: &Path) -> bool {
        self.extensions.matches(path) && self.filter.matches(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extensions_are_case_insensitive() {
        let mut set = ExtensionSet::new();
        set.insert("CPP");
        set.insert(".h");

        assert!(set.contains("cpp"));
        assert!(set.contains("Cpp"));
        assert!(set.contains("H"));
        assert!(!set.contains("c"));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn duplicate_extensions_collapse() {
        let set: ExtensionSet = ["c", "C", ".c"].into_iter().collect();

        assert_eq!(set.len(), 1);
    }

    #[test]
    fn empty_extension_is_ignored() {
        let mut set = ExtensionSet::new();

        assert!(!set.insert("."));
        assert!(set.is_empty());
    }

    #[test]
    fn matches_path_extension() {
        let set = ExtensionSet::from_preset(Preset::CCpp);

        assert!(set.matches(Path::new("src/main.cpp")));
        assert!(set.matches(Path::new("include/API.H")));
        assert!(!set.matches(Path::new("Main.java")));
        assert!(!set.matches(Path::new("Makefile")));
    }

    #[test]
    fn presets() {
        let mut set = ExtensionSet::from_preset(Preset::Java);
        set.extend_preset(Preset::CCpp);

        assert_eq!(set.iter().collect::<Vec<_>>(), vec!["c", "cpp", "h", "java"]);
    }

    #[test]
    fn preset_from_str() {
        assert_eq!("C++".parse::<Preset>(), Ok(Preset::CCpp));
        assert_eq!("java".parse::<Preset>(), Ok(Preset::Java));
        assert!("cobol".parse::<Preset>().is_err());
    }

    #[test]
    fn display_lists_extensions() {
        assert_eq!(ExtensionSet::from_preset(Preset::Java).to_string(), ".java");
        assert_eq!(
            ExtensionSet::from_preset(Preset::CCpp).to_string(),
            ".c, .cpp and .h"
        );
        let two: ExtensionSet = ["inc", "java"].into_iter().collect();
        assert_eq!(two.to_string(), ".inc and .java");
    }

    #[test]
    fn options_builder() {
        let options = CountOptions::new()
            .preset(Preset::Java)
            .extension("inc")
            .recurse(true);

        assert!(options.recurse);
        assert!(options.accepts(Path::new("a/B.java")));
        assert!(options.accepts(Path::new("a/b.INC")));
        assert!(!options.accepts(Path::new("a/b.c")));
    }
}
