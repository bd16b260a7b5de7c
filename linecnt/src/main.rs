//! # linecnt
//!
//! A CLI tool for counting code, comment, empty and brace-only lines in
//! C, C++ and Java source trees.
//!
//! ## Overview
//!
//! linecnt is built on top of linecntlib. It walks a directory, classifies
//! every file with a selected extension and prints totals, optionally with
//! a row per file.
//!
//! ## Usage
//!
//! ```bash
//! # Count lines in .cpp, .c and .h files in the current directory
//! linecnt cpp c h
//!
//! # Count C/C++, Java and .inc files in a whole tree, one row per file
//! linecnt -s -v -c -j inc
//!
//! # Start somewhere else and report as JSON
//! linecnt -s -d src -c --output json
//!
//! # Skip generated sources
//! linecnt -s -c --exclude "**/generated/**"
//! ```
//!
//! Set `LINECNT_LOG` (e.g. `LINECNT_LOG=debug`) to see diagnostics on stderr.

mod render;

use std::process::ExitCode;

use anyhow::Context;
use clap::{Arg, ArgAction, ArgMatches, Command};
use linecntlib::{count_directory, CountOptions, ExtensionSet, FilterConfig, Preset};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::render::{render_count, OutputMode};

/// Environment variable holding the log filter
const LOG_ENV: &str = "LINECNT_LOG";

/// Build the clap Command structure
fn build_command() -> Command {
    Command::new("linecnt")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Counts code, comment, empty and brace-only lines in C/C++/Java sources")
        .after_help(
            "Examples:\n  linecnt cpp c h    Count lines in .cpp, .c and .h files\n  linecnt -c -j inc  Count lines in C/C++, Java and .inc files",
        )
        .arg(
            Arg::new("extensions")
                .value_name("EXT")
                .action(ArgAction::Append)
                .help("File extensions to count (e.g. cpp c h)"),
        )
        .arg(
            Arg::new("recurse")
                .short('s')
                .long("recurse")
                .action(ArgAction::SetTrue)
                .help("Process files in the start directory and all subdirectories"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::SetTrue)
                .help("Print a row for every file"),
        )
        .arg(
            Arg::new("dir")
                .short('d')
                .long("dir")
                .value_name("DIR")
                .default_value(".")
                .help("Start in the specified directory"),
        )
        .arg(
            Arg::new("cpp")
                .short('c')
                .long("cpp")
                .action(ArgAction::SetTrue)
                .help("Add standard C/C++ extensions (.c, .cpp, .h)"),
        )
        .arg(
            Arg::new("java")
                .short('j')
                .long("java")
                .action(ArgAction::SetTrue)
                .help("Add standard Java extensions (.java)"),
        )
        .arg(
            Arg::new("preset")
                .short('p')
                .long("preset")
                .value_name("NAME")
                .action(ArgAction::Append)
                .value_parser(|s: &str| s.parse::<Preset>())
                .help("Add a named extension preset (c++, java)"),
        )
        .arg(
            Arg::new("include")
                .short('i')
                .long("include")
                .action(ArgAction::Append)
                .help("Include files matching glob pattern"),
        )
        .arg(
            Arg::new("exclude")
                .short('e')
                .long("exclude")
                .action(ArgAction::Append)
                .help("Exclude files matching glob pattern"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_parser(["auto", "term", "text", "json"])
                .default_value("text")
                .help("Report format (term adds styling, auto styles only on a terminal)"),
        )
}

/// Collect the extension set from positional extensions and preset flags
fn extract_extensions(matches: &ArgMatches) -> ExtensionSet {
    let mut extensions: ExtensionSet = matches
        .get_many::<String>("extensions")
        .map(|v| v.collect())
        .unwrap_or_default();

    if matches.get_flag("cpp") {
        extensions.extend_preset(Preset::CCpp);
    }
    if matches.get_flag("java") {
        extensions.extend_preset(Preset::Java);
    }
    if let Some(presets) = matches.get_many::<Preset>("preset") {
        for preset in presets {
            extensions.extend_preset(*preset);
        }
    }

    extensions
}

/// Map the `--output` value to an outstanding output mode
fn extract_output_mode(matches: &ArgMatches) -> OutputMode {
    match matches.get_one::<String>("output").map(|s| s.as_str()) {
        Some("json") => OutputMode::Json,
        Some("term") => OutputMode::Term,
        Some("auto") => OutputMode::Auto,
        _ => OutputMode::Text,
    }
}

/// Build filter config from matches
fn build_filter(matches: &ArgMatches) -> anyhow::Result<FilterConfig> {
    let mut filter = FilterConfig::new();

    if let Some(includes) = matches.get_many::<String>("include") {
        for pattern in includes {
            filter = filter.include(pattern)?;
        }
    }

    if let Some(excludes) = matches.get_many::<String>("exclude") {
        for pattern in excludes {
            filter = filter.exclude(pattern)?;
        }
    }

    Ok(filter)
}

fn run(matches: &ArgMatches) -> anyhow::Result<String> {
    let dir = matches
        .get_one::<String>("dir")
        .map(|s| s.as_str())
        .unwrap_or(".");
    let verbose = matches.get_flag("verbose");
    let output_mode = extract_output_mode(matches);

    let extensions = extract_extensions(matches);
    let options = CountOptions::new()
        .extensions(extensions.clone())
        .recurse(matches.get_flag("recurse"))
        .filter(build_filter(matches)?);

    debug!(dir, extensions = %extensions, recurse = options.recurse, "counting");

    let result =
        count_directory(dir, &options).with_context(|| format!("cannot count lines in {dir}"))?;

    render_count(&result, &extensions, verbose, output_mode)
        .map_err(|e| anyhow::anyhow!("cannot render report: {e}"))
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    // Ignore the error if a subscriber is already installed
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> ExitCode {
    init_tracing();

    let matches = build_command().get_matches();

    match run(&matches) {
        Ok(output) => {
            print!("{}", output);
            if !output.ends_with('\n') {
                println!();
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
