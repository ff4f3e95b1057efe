// Copyright (c) The wdio-ctrf-json-reporter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Merging of per-spec report files into a consolidated report.
//!
//! Each runner process writes its own report file; this module reads every
//! file in a directory whose name matches a pattern, skips the ones that are
//! not valid CTRF reports, combines the rest via
//! [`ctrf_metadata::merge_reports`], and writes the result back into the same
//! directory.

use crate::errors::MergeError;
use camino::Utf8Path;
use ctrf_metadata::Report;
use regex::Regex;
use std::fs;
use tracing::warn;

/// The default name of the merged output file.
pub const DEFAULT_MERGED_FILENAME: &str = "ctrf-merged.json";

/// The default filename pattern for report files, matching what the reporter
/// writes.
pub const DEFAULT_REPORT_PATTERN: &str = r"^ctrf-report-.*\.json$";

/// Reads and parses all CTRF report files in `dir` whose filename matches
/// `pattern`.
///
/// Files that cannot be read, are not valid JSON, or lack the CTRF report
/// shape are skipped with a warning. A missing directory or zero valid
/// reports is an error: there is nothing meaningful to produce.
pub fn read_reports(dir: &Utf8Path, pattern: &Regex) -> Result<Vec<Report>, MergeError> {
    if !dir.is_dir() {
        return Err(MergeError::DirNotFound {
            path: dir.to_owned(),
        });
    }

    let entries = dir.read_dir_utf8().map_err(|error| MergeError::ReadDir {
        path: dir.to_owned(),
        error,
    })?;

    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|error| MergeError::ReadDir {
            path: dir.to_owned(),
            error,
        })?;
        if pattern.is_match(entry.file_name()) {
            paths.push(entry.into_path());
        }
    }
    // Directory iteration order is unspecified; sort so merged output is
    // stable across runs.
    paths.sort();

    let mut reports = Vec::new();
    for path in paths {
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(error) => {
                warn!("failed to read report file {path}: {error}");
                continue;
            }
        };
        let value: serde_json::Value = match serde_json::from_str(&contents) {
            Ok(value) => value,
            Err(error) => {
                warn!("failed to parse report file {path}: {error}");
                continue;
            }
        };
        if !Report::is_report_shape(&value) {
            warn!("skipping invalid CTRF report file: {path}");
            continue;
        }
        match serde_json::from_value(value) {
            Ok(report) => reports.push(report),
            Err(error) => {
                warn!("failed to deserialize report file {path}: {error}");
            }
        }
    }

    if reports.is_empty() {
        return Err(MergeError::NoValidReports {
            path: dir.to_owned(),
            pattern: pattern.as_str().to_owned(),
        });
    }
    Ok(reports)
}

/// Merges all matching report files in `dir` and writes the combined report
/// to `dir/output_name`.
///
/// Returns the merged report.
pub fn merge_results(
    dir: &Utf8Path,
    pattern: &Regex,
    output_name: &str,
) -> Result<Report, MergeError> {
    let reports = read_reports(dir, pattern)?;
    let merged = ctrf_metadata::merge_reports(reports);

    let contents = merged
        .serialize_pretty()
        .map_err(|error| MergeError::Serialize { error })?;
    let path = dir.join(output_name);
    fs::write(&path, contents).map_err(|error| MergeError::Write {
        path: path.clone(),
        error,
    })?;

    Ok(merged)
}
