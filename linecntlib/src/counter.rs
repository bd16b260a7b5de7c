//! High-level line counting API.
//!
//! This module provides the main entry points: counting in-memory text,
//! a single file, or every matching file below a directory.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::classifier::{classify, Classifier};
use crate::error::LinecntError;
use crate::filter::discover_files;
use crate::options::CountOptions;
use crate::stats::{FileStats, LineCounts, SkippedFile};
use crate::Result;

/// Result of counting lines in a directory.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CountResult {
    /// Aggregated counts across all counted files
    pub total: LineCounts,
    /// Per-file counts, sorted by path
    pub files: Vec<FileStats>,
    /// Files that could not be counted
    pub skipped: Vec<SkippedFile>,
    /// Number of files counted
    pub file_count: u64,
    /// Number of directories visited
    pub dir_count: u64,
}

impl CountResult {
    /// Create a new empty result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one file's counts.
    pub fn add_file(&mut self, file: FileStats) {
        self.total += file.counts;
        self.file_count += 1;
        self.files.push(file);
    }

    /// Code lines per commented line, if any line is commented.
    pub fn code_comment_ratio(&self) -> Option<f64> {
        ratio(self.total.code, self.total.comments)
    }

    /// Average number of lines per file.
    pub fn lines_per_file(&self) -> Option<f64> {
        ratio(self.total.lines, self.file_count)
    }

    /// Average number of code lines per file.
    pub fn code_per_file(&self) -> Option<f64> {
        ratio(self.total.code, self.file_count)
    }

    /// Average number of commented lines per file.
    pub fn comments_per_file(&self) -> Option<f64> {
        ratio(self.total.comments, self.file_count)
    }
}

fn ratio(numerator: u64, denominator: u64) -> Option<f64> {
    (denominator > 0).then(|| numerator as f64 / denominator as f64)
}

/// Count lines in in-memory source text.
///
/// # Example
///
/// ```rust
/// use linecntlib::count_str;
///
/// let counts = count_str("int main() {\n    return 0; // done\n}\n");
/// assert_eq!(counts.lines, 3);
/// assert_eq!(counts.code, 2);
/// assert_eq!(counts.braces, 1);
/// assert_eq!(counts.cpp_comments, 1);
/// ```
pub fn count_str(source: &str) -> LineCounts {
    classify(source).collect()
}

/// Count lines read from `reader`.
///
/// `origin` names the source in errors. Fails with
/// [`LinecntError::MalformedInput`] if the bytes are not valid UTF-8.
pub fn count_reader<R: Read>(reader: R, origin: impl Into<String>) -> Result<LineCounts> {
    Classifier::with_origin(reader, origin).collect()
}

/// Count lines in a single file.
///
/// The whole file is read into memory before it is classified.
///
/// # Example
///
/// ```rust,ignore
/// use linecntlib::count_file;
///
/// let counts = count_file("src/main.cpp")?;
/// println!("Code: {}, Comments: {}", counts.code, counts.comments);
/// ```
pub fn count_file(path: impl AsRef<Path>) -> Result<LineCounts> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|e| LinecntError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let counts = count_reader(bytes.as_slice(), path.display().to_string())?;
    debug!(file = %path.display(), lines = counts.lines, code = counts.code, "counted file");

    Ok(counts)
}

/// Count lines in every matching file below a directory.
///
/// Files are classified in parallel. A file that cannot be read or decoded
/// is recorded in [`CountResult::skipped`] and does not stop the run.
///
/// # Example
///
/// ```rust,ignore
/// use linecntlib::{count_directory, CountOptions, Preset};
///
/// let options = CountOptions::new().preset(Preset::CCpp).recurse(true);
/// let result = count_directory("src/", &options)?;
/// println!("{} files, {} lines", result.file_count, result.total.lines);
/// ```
pub fn count_directory(path: impl AsRef<Path>, options: &CountOptions) -> Result<CountResult> {
    if options.extensions.is_empty() {
        return Err(LinecntError::NoExtensions);
    }

    let discovery = discover_files(path, options)?;

    let counted: Vec<(PathBuf, Result<LineCounts>)> = discovery
        .files
        .into_par_iter()
        .map(|file| {
            let counts = count_file(&file);
            (file, counts)
        })
        .collect();

    let mut result = CountResult::new();
    result.dir_count = discovery.dir_count;

    for (file, counts) in counted {
        match counts {
            Ok(counts) => result.add_file(FileStats::new(file, counts)),
            Err(e) => {
                warn!(file = %file.display(), error = %e, "skipping file");
                result.skipped.push(SkippedFile {
                    path: file,
                    reason: e.to_string(),
                });
            }
        }
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::Preset;
    use std::fs;
    use tempfile::tempdir;

    fn create_source_file(path: &Path, content: &[u8]) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    fn create_project(root: &Path) {
        create_source_file(
            &root.join("main.cpp"),
            br#"#include "util.h"

int main()
{
    // call into util
    return util(); /* done */
}
"#,
        );
        create_source_file(
            &root.join("util.h"),
            b"/*\n * Utilities\n */\nint util();\n",
        );
        create_source_file(
            &root.join("src/util.c"),
            b"int util()\n{\n    return 0;\n}\n",
        );
        create_source_file(&root.join("notes.txt"), b"not source\n");
    }

    #[test]
    fn test_count_str() {
        let counts = count_str("code /* c */ code // cpp\n");

        assert_eq!(counts.lines, 1);
        assert_eq!(counts.code, 1);
        assert_eq!(counts.comments, 1);
        assert_eq!(counts.c_comments, 1);
        assert_eq!(counts.cpp_comments, 1);
    }

    #[test]
    fn test_count_reader_malformed() {
        let result = count_reader(&b"int x;\n\xc3\x28\n"[..], "broken.c");

        assert!(matches!(
            result,
            Err(LinecntError::MalformedInput { line: 2, .. })
        ));
    }

    #[test]
    fn test_count_file() {
        let temp = tempdir().unwrap();
        create_project(temp.path());

        let counts = count_file(temp.path().join("main.cpp")).unwrap();

        assert_eq!(counts.lines, 7);
        assert_eq!(counts.code, 3); // include, main, return
        assert_eq!(counts.braces, 2);
        assert_eq!(counts.empty, 1);
        assert_eq!(counts.comments, 2);
        assert_eq!(counts.cpp_comments, 1);
        assert_eq!(counts.c_comments, 1);
    }

    #[test]
    fn test_count_file_missing() {
        let temp = tempdir().unwrap();
        let result = count_file(temp.path().join("missing.c"));

        assert!(matches!(result, Err(LinecntError::FileRead { .. })));
    }

    #[test]
    fn test_count_file_io_error_names_path() {
        let temp = tempdir().unwrap();
        let dir = temp.path().join("src.c");
        fs::create_dir(&dir).unwrap();

        match count_file(&dir) {
            Err(LinecntError::FileRead { path, .. }) => assert_eq!(path, dir),
            other => panic!("Expected FileRead, got {other:?}"),
        }
    }

    #[test]
    fn test_count_directory_top_level() {
        let temp = tempdir().unwrap();
        create_project(temp.path());

        let options = CountOptions::new().preset(Preset::CCpp);
        let result = count_directory(temp.path(), &options).unwrap();

        assert_eq!(result.file_count, 2);
        assert_eq!(result.dir_count, 1);
        assert_eq!(result.total.lines, 11);
        assert_eq!(result.total.c_comments, 4);
        assert!(result.skipped.is_empty());
    }

    #[test]
    fn test_count_directory_recursive() {
        let temp = tempdir().unwrap();
        create_project(temp.path());

        let options = CountOptions::new().preset(Preset::CCpp).recurse(true);
        let result = count_directory(temp.path(), &options).unwrap();

        assert_eq!(result.file_count, 3);
        assert_eq!(result.dir_count, 2);
        assert_eq!(result.total.lines, 15);
        assert_eq!(result.total.code, 6);
        assert_eq!(result.total.braces, 4);

        let sum: LineCounts = result.files.iter().map(|f| f.counts).sum();
        assert_eq!(sum, result.total);
    }

    #[test]
    fn test_count_directory_skips_malformed_file() {
        let temp = tempdir().unwrap();
        create_project(temp.path());
        create_source_file(&temp.path().join("bad.c"), b"int a;\n\xff\xff\n");

        let options = CountOptions::new().preset(Preset::CCpp);
        let result = count_directory(temp.path(), &options).unwrap();

        assert_eq!(result.file_count, 2);
        assert_eq!(result.total.lines, 11);
        assert_eq!(result.skipped.len(), 1);
        assert!(result.skipped[0].path.ends_with("bad.c"));
        assert!(result.skipped[0].reason.contains("malformed input"));
    }

    #[test]
    fn test_count_directory_requires_extensions() {
        let temp = tempdir().unwrap();

        let result = count_directory(temp.path(), &CountOptions::new());

        assert!(matches!(result, Err(LinecntError::NoExtensions)));
    }

    #[test]
    fn test_count_directory_nonexistent() {
        let options = CountOptions::new().preset(Preset::Java);
        let result = count_directory("/nonexistent/path", &options);

        assert!(matches!(result, Err(LinecntError::PathNotFound(_))));
    }

    #[test]
    fn test_ratios() {
        let mut result = CountResult::new();
        assert_eq!(result.code_comment_ratio(), None);
        assert_eq!(result.lines_per_file(), None);

        result.add_file(FileStats::new(
            PathBuf::from("a.c"),
            count_str("int a; // a\nint b;\n\nint c;\n"),
        ));
        result.add_file(FileStats::new(PathBuf::from("b.c"), count_str("// b\n")));

        assert_eq!(result.file_count, 2);
        assert_eq!(result.code_comment_ratio(), Some(1.5));
        assert_eq!(result.lines_per_file(), Some(2.5));
        assert_eq!(result.code_per_file(), Some(1.5));
        assert_eq!(result.comments_per_file(), Some(1.0));
    }
}
