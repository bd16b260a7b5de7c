//! Core data structures for line statistics

use serde::{Deserialize, Serialize};
use std::iter::Sum;
use std::ops::{Add, AddAssign};
use std::path::PathBuf;

/// Primary classification of a physical line.
///
/// Every line falls into exactly one of these buckets. Comment style is
/// tracked separately on [`LineFlags`] since a code line may also carry
/// comments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LineKind {
    /// Whitespace-only or zero-length line
    Empty,
    /// A single `{` or `}` and nothing else
    Brace,
    /// Anything outside a comment that is not a lone brace
    Code,
    /// Only comment content
    Comment,
}

/// Per-line classification produced by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LineFlags {
    has_code: bool,
    has_c_comment: bool,
    has_cpp_comment: bool,
    is_brace_only: bool,
    is_empty: bool,
}

impl LineFlags {
    /// Build the flags of a completed line.
    ///
    /// `code_chars` is the number of non-whitespace characters outside
    /// comments, `lone_brace` whether the first of them was a brace.
    pub(crate) fn new(
        code_chars: usize,
        lone_brace: bool,
        has_c_comment: bool,
        has_cpp_comment: bool,
    ) -> Self {
        let has_comment = has_c_comment || has_cpp_comment;
        let is_brace_only = code_chars == 1 && lone_brace && !has_comment;
        let has_code = code_chars > 0 && !is_brace_only;

        Self {
            has_code,
            has_c_comment,
            has_cpp_comment,
            is_brace_only,
            is_empty: !has_code && !is_brace_only && !has_comment,
        }
    }

    /// Line carries code outside comments (string and char literals included).
    pub fn has_code(&self) -> bool {
        self.has_code
    }

    /// Line carries `/* */` comment content.
    pub fn has_c_comment(&self) -> bool {
        self.has_c_comment
    }

    /// Line carries a `//` comment.
    pub fn has_cpp_comment(&self) -> bool {
        self.has_cpp_comment
    }

    /// Line carries a comment of either style.
    pub fn has_comment(&self) -> bool {
        self.has_c_comment || self.has_cpp_comment
    }

    pub fn is_brace_only(&self) -> bool {
        self.is_brace_only
    }

    pub fn is_empty(&self) -> bool {
        self.is_empty
    }

    /// The primary classification of this line.
    pub fn kind(&self) -> LineKind {
        if self.is_empty {
            LineKind::Empty
        } else if self.is_brace_only {
            LineKind::Brace
        } else if self.has_code {
            LineKind::Code
        } else {
            LineKind::Comment
        }
    }
}

/// Line counts for one source unit, or a sum over many.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineCounts {
    /// Every physical line
    pub lines: u64,
    /// Lines with code (lone braces excluded)
    pub code: u64,
    /// Lines with a comment of either style, counted once
    pub comments: u64,
    /// Lines with a `//` comment
    pub cpp_comments: u64,
    /// Lines with `/* */` comment content
    pub c_comments: u64,
    /// Whitespace-only lines
    pub empty: u64,
    /// Lines holding a single `{` or `}`
    pub braces: u64,
}

impl LineCounts {
    /// Create new zeroed counts
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one classified line into the counts.
    pub fn add_line(&mut self, flags: &LineFlags) {
        self.lines += 1;

        match flags.kind() {
            LineKind::Empty => self.empty += 1,
            LineKind::Brace => self.braces += 1,
            LineKind::Code => self.code += 1,
            LineKind::Comment => {}
        }

        if flags.has_c_comment() {
            self.c_comments += 1;
        }
        if flags.has_cpp_comment() {
            self.cpp_comments += 1;
        }
        if flags.has_comment() {
            self.comments += 1;
        }
    }

    /// Lines that carry only comments.
    pub fn comment_only(&self) -> u64 {
        self.lines
            .saturating_sub(self.code)
            .saturating_sub(self.empty)
            .saturating_sub(self.braces)
    }
}

impl Add for LineCounts {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            lines: self.lines + other.lines,
            code: self.code + other.code,
            comments: self.comments + other.comments,
            cpp_comments: self.cpp_comments + other.cpp_comments,
            c_comments: self.c_comments + other.c_comments,
            empty: self.empty + other.empty,
            braces: self.braces + other.braces,
        }
    }
}

impl AddAssign for LineCounts {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Sum for LineCounts {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), |acc, counts| acc + counts)
    }
}

impl FromIterator<LineFlags> for LineCounts {
    fn from_iter<I: IntoIterator<Item = LineFlags>>(iter: I) -> Self {
        let mut accumulator = LineAccumulator::new();
        accumulator.extend(iter);
        accumulator.finish()
    }
}

/// Folds a stream of [`LineFlags`] into [`LineCounts`].
#[derive(Debug, Default)]
pub struct LineAccumulator {
    counts: LineCounts,
}

impl LineAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, flags: &LineFlags) {
        self.counts.add_line(flags);
    }

    pub fn finish(self) -> LineCounts {
        self.counts
    }
}

impl Extend<LineFlags> for LineAccumulator {
    fn extend<I: IntoIterator<Item = LineFlags>>(&mut self, iter: I) {
        for flags in iter {
            self.push(&flags);
        }
    }
}

/// Statistics for a single file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileStats {
    /// Path to the file
    pub path: PathBuf,
    /// Line counts for this file
    pub counts: LineCounts,
}

impl FileStats {
    pub fn new(path: PathBuf, counts: LineCounts) -> Self {
        Self { path, counts }
    }
}

/// A file whose scan failed and which is left out of the totals
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedFile {
    pub path: PathBuf,
    /// Rendered error
    pub reason: String,
}
