//! Report rendering for CLI output using outstanding

use std::path::Path;

use console::Style;
use linecntlib::{CountResult, ExtensionSet, FileStats};
use outstanding::{render_auto, render_with_output, Theme};
use serde::Serialize;

/// Include template at compile time
const REPORT_TEMPLATE: &str = include_str!("../templates/report.jinja");

/// Re-export OutputMode for callers
pub use outstanding::OutputMode;

/// Files of one directory, pre-formatted
#[derive(Debug, Serialize)]
struct DirectoryGroup {
    /// "*** Directory: ..." line
    heading: String,
    /// One pre-padded row per file
    rows: Vec<String>,
}

/// Data context for the report template
#[derive(Debug, Serialize)]
struct ReportContext {
    /// Selected extensions, e.g. ".c, .cpp and .h"
    extensions: String,
    /// Per-file rows, empty unless verbose
    directories: Vec<DirectoryGroup>,
    /// "Skipped path: reason" lines
    skipped: Vec<String>,
    /// "Processed N files in M directories"
    summary: String,
    /// Totals and ratio lines
    details: Vec<String>,
}

/// Create the theme with styles
fn create_theme() -> Theme {
    Theme::new().add("category", Style::new().bold())
}

/// Format the counts of one file as a verbose row.
fn to_file_row(file: &FileStats) -> String {
    let name = file
        .path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| file.path.display().to_string());
    let counts = &file.counts;

    format!(
        "Lines: {:5}; Code: {:5}; Commented: {:5} (C++: {:3}; C: {:3}); {}",
        counts.lines, counts.code, counts.comments, counts.cpp_comments, counts.c_comments, name
    )
}

/// Group consecutive files by parent directory.
fn group_by_directory(files: &[FileStats]) -> Vec<DirectoryGroup> {
    let mut groups: Vec<DirectoryGroup> = Vec::new();
    let mut current_dir: Option<&Path> = None;

    for file in files {
        let dir = file.path.parent();
        if groups.is_empty() || dir != current_dir {
            let shown = dir.map(|d| d.display().to_string()).unwrap_or_default();
            groups.push(DirectoryGroup {
                heading: format!("*** Directory: {}", shown),
                rows: Vec::new(),
            });
            current_dir = dir;
        }
        if let Some(group) = groups.last_mut() {
            group.rows.push(to_file_row(file));
        }
    }

    groups
}

/// Format the totals block and the summary ratios.
fn detail_lines(result: &CountResult) -> Vec<String> {
    let mut lines = Vec::new();
    let total = &result.total;

    if total.lines > 0 {
        lines.push(format!("Total lines           : {}", total.lines));
        lines.push(format!("Code lines            : {}", total.code));
        lines.push(format!(
            "Commented lines       : {} (C++: {}; C: {})",
            total.comments, total.cpp_comments, total.c_comments
        ));
        lines.push(format!("Empty Lines           : {}", total.empty));
        lines.push(format!("Brace Lines           : {}", total.braces));
    }

    if let Some(ratio) = result.code_comment_ratio() {
        lines.push(format!("Code/comments ratio   : {:.2}", ratio));
    }

    if let (Some(per_file), Some(code), Some(comments)) = (
        result.lines_per_file(),
        result.code_per_file(),
        result.comments_per_file(),
    ) {
        lines.push(format!("Source lines per file : {:.2}", per_file));
        lines.push(format!("Code lines per file   : {:.2}", code));
        lines.push(format!("Comments per file     : {:.2}", comments));
    }

    lines
}

/// Render a count result using outstanding.
///
/// Structured modes serialize the whole result. Text modes fill the report
/// template; with `verbose`, every counted file gets its own row, grouped
/// under the directory it lives in.
pub fn render_count(
    result: &CountResult,
    extensions: &ExtensionSet,
    verbose: bool,
    output_mode: OutputMode,
) -> Result<String, Box<dyn std::error::Error>> {
    let theme = create_theme();

    if output_mode.is_structured() {
        return Ok(render_auto(REPORT_TEMPLATE, result, &theme, output_mode)?);
    }

    let context = ReportContext {
        extensions: extensions.to_string(),
        directories: if verbose {
            group_by_directory(&result.files)
        } else {
            Vec::new()
        },
        skipped: result
            .skipped
            .iter()
            .map(|s| format!("Skipped {}: {}", s.path.display(), s.reason))
            .collect(),
        summary: format!(
            "Processed {} files in {} directories",
            result.file_count, result.dir_count
        ),
        details: detail_lines(result),
    };

    let mut rendered = render_with_output(REPORT_TEMPLATE, &context, &theme, output_mode)?;
    if !rendered.ends_with('\n') {
        rendered.push('\n');
    }

    Ok(rendered)
}
