// Copyright (c) The wdio-ctrf-json-reporter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Best-effort retrieval of the report written by the previous run of the
//! same spec.
//!
//! The prior report is used purely as an oracle for the retry and flakiness
//! computation; it is never merged into the current report.

use crate::errors::PriorReportError;
use camino::{Utf8Path, Utf8PathBuf};
use ctrf_metadata::Report;
use std::fs;

/// Locates and loads the prior report for a spec.
#[derive(Clone, Debug)]
pub struct PriorReportStore {
    /// Path to the prior report file.
    path: Utf8PathBuf,
}

impl PriorReportStore {
    /// Creates a store for the report file with the given derived name inside
    /// the output directory.
    pub fn new(output_dir: &Utf8Path, file_name: &str) -> Self {
        let path = output_dir.join(file_name);
        Self { path }
    }

    /// The path this store reads from.
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Loads the prior report from disk.
    ///
    /// A missing file is `Ok(None)`: the common first-run case is not an
    /// error. Unreadable, unparsable, or structurally unrecognizable files
    /// are errors the caller is expected to downgrade to "no history".
    pub fn load(&self) -> Result<Option<Report>, PriorReportError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(error) => {
                return Err(PriorReportError::Read {
                    path: self.path.clone(),
                    error,
                });
            }
        };

        let value: serde_json::Value =
            serde_json::from_str(&contents).map_err(|error| PriorReportError::Parse {
                path: self.path.clone(),
                error,
            })?;
        if !Report::is_report_shape(&value) {
            return Err(PriorReportError::Shape {
                path: self.path.clone(),
            });
        }
        let report = serde_json::from_value(value).map_err(|error| PriorReportError::Parse {
            path: self.path.clone(),
            error,
        })?;

        Ok(Some(report))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino_tempfile::Utf8TempDir;
    use ctrf_metadata::{Test, TestStatus};

    #[test]
    fn missing_file_is_no_history() {
        let temp_dir = Utf8TempDir::new().unwrap();
        let store = PriorReportStore::new(temp_dir.path(), "ctrf-report-specs-a.json");
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn round_trips_a_written_report() {
        let temp_dir = Utf8TempDir::new().unwrap();
        let mut report = Report::new("webdriverio");
        report
            .results
            .tests
            .push(Test::new("logs in", TestStatus::Failed, 40));
        report.results.summary.record(TestStatus::Failed);

        let store = PriorReportStore::new(temp_dir.path(), "ctrf-report-specs-a.json");
        fs::write(store.path(), report.serialize_pretty().unwrap()).unwrap();

        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded.results.tests.len(), 1);
        assert_eq!(loaded.results.tests[0].status, TestStatus::Failed);
    }

    #[test]
    fn corrupt_json_is_an_error() {
        let temp_dir = Utf8TempDir::new().unwrap();
        let store = PriorReportStore::new(temp_dir.path(), "ctrf-report-specs-a.json");
        fs::write(store.path(), "{ not json").unwrap();

        assert!(matches!(
            store.load(),
            Err(PriorReportError::Parse { .. })
        ));
    }

    #[test]
    fn unrecognized_shape_is_an_error() {
        let temp_dir = Utf8TempDir::new().unwrap();
        let store = PriorReportStore::new(temp_dir.path(), "ctrf-report-specs-a.json");
        fs::write(store.path(), r#"{"results": {"tool": {}, "summary": {}}}"#).unwrap();

        assert!(matches!(store.load(), Err(PriorReportError::Shape { .. })));
    }
}
