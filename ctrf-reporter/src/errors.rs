// Copyright (c) The wdio-ctrf-json-reporter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Errors produced by the reporter.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that can occur while loading the prior report for a spec.
///
/// The reporter downgrades all of these to "no history": they are logged and
/// never surfaced to the host run.
#[derive(Debug, Error)]
pub enum PriorReportError {
    /// Error reading the prior report file.
    #[error("failed to read prior report at {path}")]
    Read {
        /// The path that failed to be read.
        path: Utf8PathBuf,
        /// The underlying IO error.
        #[source]
        error: std::io::Error,
    },

    /// The prior report file was not valid JSON, or did not deserialize into
    /// a report.
    #[error("failed to parse prior report at {path}")]
    Parse {
        /// The path that failed to be parsed.
        path: Utf8PathBuf,
        /// The underlying deserialization error.
        #[source]
        error: serde_json::Error,
    },

    /// The prior report file was valid JSON but did not have the structural
    /// shape of a CTRF report.
    #[error("prior report at {path} does not look like a CTRF report")]
    Shape {
        /// The path with the unrecognized shape.
        path: Utf8PathBuf,
    },
}

/// Errors that can occur while writing the report to disk.
///
/// Write failures are caught and logged by the reporter; a failed write never
/// affects the host test run.
#[derive(Debug, Error)]
pub enum WriteReportError {
    /// Error creating the output directory.
    #[error("failed to create output directory {path}")]
    CreateDir {
        /// The directory that failed to be created.
        path: Utf8PathBuf,
        /// The underlying IO error.
        #[source]
        error: std::io::Error,
    },

    /// Error serializing the report.
    #[error("failed to serialize report")]
    Serialize {
        /// The underlying serialization error.
        #[source]
        error: serde_json::Error,
    },

    /// Error writing the report file.
    #[error("failed to write report to {path}")]
    Write {
        /// The path that failed to be written.
        path: Utf8PathBuf,
        /// The underlying IO error.
        #[source]
        error: std::io::Error,
    },
}

/// Errors that can occur while merging reports from a directory.
///
/// Unlike per-event reporter errors, these surface to the caller: with a
/// missing directory or zero valid reports there is nothing meaningful to
/// produce.
#[derive(Debug, Error)]
pub enum MergeError {
    /// The target directory does not exist.
    #[error("the directory {path} does not exist")]
    DirNotFound {
        /// The missing directory.
        path: Utf8PathBuf,
    },

    /// Error listing the target directory.
    #[error("failed to read directory {path}")]
    ReadDir {
        /// The directory that failed to be listed.
        path: Utf8PathBuf,
        /// The underlying IO error.
        #[source]
        error: std::io::Error,
    },

    /// No file in the directory parsed as a valid CTRF report.
    #[error("no valid CTRF reports found in {path} matching `{pattern}`")]
    NoValidReports {
        /// The directory that was searched.
        path: Utf8PathBuf,
        /// The filename pattern that was applied.
        pattern: String,
    },

    /// Error serializing the merged report.
    #[error("failed to serialize merged report")]
    Serialize {
        /// The underlying serialization error.
        #[source]
        error: serde_json::Error,
    },

    /// Error writing the merged report.
    #[error("failed to write merged report to {path}")]
    Write {
        /// The path that failed to be written.
        path: Utf8PathBuf,
        /// The underlying IO error.
        #[source]
        error: std::io::Error,
    },
}
