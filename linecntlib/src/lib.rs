//! # linecntlib
//!
//! A line counting library for C, C++, Java and other languages that share
//! their lexical conventions for comments and literals.
//!
//! ## Overview
//!
//! Every physical line of a source file is classified into exactly one of:
//!
//! - **Code**: anything outside a comment, string and char literals included
//! - **Brace**: a line holding a single `{` or `}` and nothing else
//! - **Empty**: whitespace only
//! - **Comment**: comment content only
//!
//! Independently, each line records whether it carries `/* */` (C) and/or
//! `//` (C++) comment content, so a code line with a trailing comment counts
//! both as code and as commented.
//!
//! ## Features
//!
//! - **Literal-aware scanning**: `"/* not a comment */"` is code
//! - **Multi-line block comments**: every line a block comment touches is commented
//! - **Directory walking**: recursive discovery with case-insensitive extension sets
//! - **Glob filtering**: include/exclude files with glob patterns
//! - **Pure Rust data types**: returns structured, serializable data
//!
//! ## Example
//!
//! ```rust
//! use linecntlib::{count_directory, count_str, CountOptions, Preset};
//! use std::fs;
//! use tempfile::tempdir;
//!
//! // Count in-memory text
//! let counts = count_str("int x; /* x */\n\n{\n");
//! assert_eq!(counts.lines, 3);
//! assert_eq!(counts.code, 1);
//! assert_eq!(counts.c_comments, 1);
//! assert_eq!(counts.empty, 1);
//! assert_eq!(counts.braces, 1);
//!
//! // Count a directory tree
//! let dir = tempdir().unwrap();
//! fs::write(dir.path().join("main.c"), "int main(void)\n{\n    return 0;\n}\n").unwrap();
//!
//! let options = CountOptions::new().preset(Preset::CCpp).recurse(true);
//! let result = count_directory(dir.path(), &options).unwrap();
//! assert_eq!(result.file_count, 1);
//! assert_eq!(result.total.code, 2);
//! assert_eq!(result.total.braces, 2);
//! ```

pub mod classifier;
pub mod counter;
pub mod error;
pub mod filter;
pub mod options;
pub mod stats;

pub use classifier::{classify, Classifier, ScanMode};
pub use counter::{count_directory, count_file, count_reader, count_str, CountResult};
pub use error::LinecntError;
pub use filter::{discover_files, Discovery, FilterConfig};
pub use options::{CountOptions, ExtensionSet, Preset};
pub use stats::{FileStats, LineAccumulator, LineCounts, LineFlags, LineKind, SkippedFile};

/// Result type for linecntlib operations
pub type Result<T> = std::result::Result<T, LinecntError>;
