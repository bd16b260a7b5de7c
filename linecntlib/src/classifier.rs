//! Line classifier for C/C++/Java-like source text.
//!
//! The classifier is a character-level scanner with one character of
//! lookahead. For every physical line it reports whether the line holds
//! code, `/* */` comment content, a `//` comment, a lone brace, or nothing
//! at all.
//!
//! String (`"..."`) and character (`'...'`) literals are tracked so that
//! comment markers inside them are treated as code. Literals never span
//! lines: an unterminated literal is closed at the end of its line. Block
//! comments do span lines, and that is the only state carried from one
//! line to the next.
//!
//! ## Example
//!
//! ```rust
//! use linecntlib::classifier::classify;
//! use linecntlib::LineKind;
//!
//! let kinds: Vec<LineKind> = classify("int x; // one\n{\n\n/* two */\n")
//!     .map(|flags| flags.kind())
//!     .collect();
//!
//! assert_eq!(
//!     kinds,
//!     vec![LineKind::Code, LineKind::Brace, LineKind::Empty, LineKind::Comment]
//! );
//! ```

use std::io::{BufReader, Read};
use std::iter::FusedIterator;

use tracing::trace;
use utf8_chars::BufReadCharsExt;

use crate::error::LinecntError;
use crate::stats::LineFlags;
use crate::Result;

/// Origin reported in errors for readers that were not given a name.
const ANONYMOUS_ORIGIN: &str = "<input>";

/// Scanner state that survives a line break.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScanMode {
    /// Outside any comment
    #[default]
    Normal,
    /// Inside an unterminated `/* ... */` comment
    InBlockComment,
}

/// What has been seen on the line being scanned.
#[derive(Default, Debug, Clone, Copy)]
struct LineContext {
    /// Characters consumed before the line break
    length: usize,
    /// Non-whitespace characters outside comments
    code_chars: usize,
    /// The first code character was `{` or `}`
    lone_brace: bool,
    has_c_comment: bool,
    has_cpp_comment: bool,
}

impl LineContext {
    fn push_code(&mut self, c: char) {
        if c.is_whitespace() {
            return;
        }
        if self.code_chars == 0 {
            self.lone_brace = c == '{' || c == '}';
        }
        self.code_chars += 1;
    }

    fn finish(&self) -> LineFlags {
        LineFlags::new(
            self.code_chars,
            self.lone_brace,
            self.has_c_comment,
            self.has_cpp_comment,
        )
    }
}

/// Classifies the lines of one source unit.
///
/// The classifier is an iterator over [`LineFlags`], one item per physical
/// line. Decoding happens lazily; invalid UTF-8 is reported as
/// [`LinecntError::MalformedInput`] and ends the iteration.
pub struct Classifier<R: Read> {
    reader: BufReader<R>,
    origin: String,
    mode: ScanMode,
    lookahead: Option<char>,
    at_eof: bool,
    failed: bool,
    line_no: u64,
}

impl<R: Read> Classifier<R> {
    /// Create a classifier over any reader.
    pub fn from_reader(reader: R) -> Self {
        Self::with_origin(reader, ANONYMOUS_ORIGIN)
    }

    /// Create a classifier whose errors name `origin` (usually a file path).
    pub fn with_origin(reader: R, origin: impl Into<String>) -> Self {
        Self {
            reader: BufReader::new(reader),
            origin: origin.into(),
            mode: ScanMode::Normal,
            lookahead: None,
            at_eof: false,
            failed: false,
            line_no: 1,
        }
    }

    /// Current cross-line state.
    pub fn mode(&self) -> ScanMode {
        self.mode
    }

    /// Scan the next physical line.
    ///
    /// Returns `Ok(None)` once input is exhausted. A final line without a
    /// line break is only reported if it holds something other than
    /// whitespace.
    pub fn next_line(&mut self) -> Result<Option<LineFlags>> {
        let mut line = LineContext {
            has_c_comment: self.mode == ScanMode::InBlockComment,
            ..Default::default()
        };
        let mut literal: Option<char> = None;
        let mut terminated = false;

        while let Some(c) = self.next_char()? {
            if c == '\n' {
                terminated = true;
                break;
            }
            line.length += 1;

            if self.mode == ScanMode::InBlockComment {
                if c == '*' && self.peek_char()? == Some('/') {
                    self.next_char()?;
                    self.mode = ScanMode::Normal;
                }
                continue;
            }

            if let Some(delimiter) = literal {
                line.push_code(c);
                if c == '\\' {
                    if let Some(escaped) = self.peek_char()?.filter(|&n| n != '\n') {
                        self.next_char()?;
                        line.push_code(escaped);
                    }
                } else if c == delimiter {
                    literal = None;
                }
                continue;
            }

            match c {
                '"' | '\'' => {
                    literal = Some(c);
                    line.push_code(c);
                }
                '/' => match self.peek_char()? {
                    Some('*') => {
                        self.next_char()?;
                        line.has_c_comment = true;
                        self.mode = ScanMode::InBlockComment;
                    }
                    Some('/') => {
                        line.has_cpp_comment = true;
                        terminated = self.skip_line()?;
                        break;
                    }
                    _ => line.push_code(c),
                },
                _ => line.push_code(c),
            }
        }

        if !terminated && line.length == 0 {
            return Ok(None);
        }

        let flags = line.finish();
        if !terminated && flags.is_empty() {
            return Ok(None);
        }

        trace!(origin = %self.origin, line = self.line_no, kind = ?flags.kind(), "classified line");
        self.line_no += 1;

        Ok(Some(flags))
    }

    /// Consume the rest of the line. Returns whether a line break was found.
    fn skip_line(&mut self) -> Result<bool> {
        while let Some(c) = self.next_char()? {
            if c == '\n' {
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn peek_char(&mut self) -> Result<Option<char>> {
        if self.lookahead.is_none() && !self.at_eof {
            self.lookahead = self.read_char()?;
            self.at_eof = self.lookahead.is_none();
        }
        Ok(self.lookahead)
    }

    fn next_char(&mut self) -> Result<Option<char>> {
        self.peek_char()?;
        Ok(self.lookahead.take())
    }

    fn read_char(&mut self) -> Result<Option<char>> {
        let next = self.reader.chars().next();
        match next {
            None => Ok(None),
            Some(Ok(c)) => Ok(Some(c)),
            Some(Err(source)) => Err(LinecntError::MalformedInput {
                origin: self.origin.clone(),
                line: self.line_no,
                source,
            }),
        }
    }
}

impl<R: Read> Iterator for Classifier<R> {
    type Item = Result<LineFlags>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        match self.next_line() {
            Ok(flags) => flags.map(Ok),
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}

impl<R: Read> FusedIterator for Classifier<R> {}

/// Classify the lines of in-memory source text.
pub fn classify(source: &str) -> impl Iterator<Item = LineFlags> + '_ {
    // A `&str` is valid UTF-8 and reading a slice cannot fail.
    Classifier::from_reader(source.as_bytes()).map_while(|flags| flags.ok())
}
