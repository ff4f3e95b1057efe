// Copyright (c) The wdio-ctrf-json-reporter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Command-line wrapper around the CTRF merge utility.

use camino::Utf8PathBuf;
use clap::Parser;
use color_eyre::Result;
use ctrf_reporter::{
    config::DEFAULT_OUTPUT_DIR,
    merge::{DEFAULT_MERGED_FILENAME, DEFAULT_REPORT_PATTERN, merge_results},
};
use regex::Regex;
use tracing_subscriber::EnvFilter;

/// Merges all CTRF report files in a directory into a single consolidated
/// report.
///
/// Files whose name matches the pattern are parsed as CTRF reports; invalid
/// files are skipped with a warning. The merged report is written back into
/// the same directory.
#[derive(Debug, Parser)]
#[command(version, about)]
struct CtrfMergeApp {
    /// Directory containing CTRF report files.
    #[arg(default_value = DEFAULT_OUTPUT_DIR)]
    dir: Utf8PathBuf,

    /// Regex matched against report filenames.
    #[arg(long, default_value = DEFAULT_REPORT_PATTERN)]
    pattern: Regex,

    /// Name of the merged output file, created inside the directory.
    #[arg(long, default_value = DEFAULT_MERGED_FILENAME)]
    output: String,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let app = CtrfMergeApp::parse();
    let merged = merge_results(&app.dir, &app.pattern, &app.output)?;

    println!(
        "merged {} tests into {}",
        merged.results.summary.tests,
        app.dir.join(&app.output),
    );
    Ok(())
}
