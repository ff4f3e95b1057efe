// Copyright (c) The wdio-ctrf-json-reporter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use serde::{Deserialize, Serialize};
use std::fmt;

/// The root element of a CTRF report.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Report {
    /// The results of the run this report describes.
    pub results: Results,
}

impl Report {
    /// Creates a new report for the given tool with a zeroed summary and no
    /// test records.
    pub fn new(tool_name: impl Into<String>) -> Self {
        Self {
            results: Results {
                tool: Tool {
                    name: tool_name.into(),
                    version: None,
                },
                summary: Summary::default(),
                tests: Vec::new(),
                environment: None,
            },
        }
    }

    /// Returns true if the given JSON value has the structural shape of a CTRF
    /// report: a `results` object containing an array `tests`, an object
    /// `summary` and an object `tool`.
    ///
    /// This is a shape check, not schema validation: it is used to decide
    /// whether an untrusted file is worth deserializing at all.
    pub fn is_report_shape(value: &serde_json::Value) -> bool {
        let Some(results) = value.get("results") else {
            return false;
        };
        results.get("tests").is_some_and(serde_json::Value::is_array)
            && results.get("summary").is_some_and(serde_json::Value::is_object)
            && results.get("tool").is_some_and(serde_json::Value::is_object)
    }

    /// Serializes this report to pretty-printed JSON (2-space indentation)
    /// with a trailing newline.
    pub fn serialize_pretty(&self) -> Result<String, serde_json::Error> {
        let mut out = serde_json::to_string_pretty(self)?;
        out.push('\n');
        Ok(out)
    }
}

/// The results of a test run.
///
/// Forms part of [`Report`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Results {
    /// The tool that produced this report.
    pub tool: Tool,

    /// Run-level summary counters.
    pub summary: Summary,

    /// Per-test records, in completion order. Records are appended once and
    /// never reordered or removed.
    pub tests: Vec<Test>,

    /// Environment metadata, present only if at least one field is set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment: Option<Environment>,
}

/// The tool that produced a report.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tool {
    /// The tool name, e.g. `"webdriverio"`.
    pub name: String,

    /// The tool version, if known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// Run-level summary counters.
///
/// Invariant: `tests` always equals the sum of the five per-status counters.
/// [`Summary::record`] is the only mutation path for the counters and
/// maintains this.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Summary {
    /// The total number of test records.
    pub tests: u64,

    /// The number of tests that passed.
    pub passed: u64,

    /// The number of tests that failed.
    pub failed: u64,

    /// The number of tests that were skipped.
    pub skipped: u64,

    /// The number of tests that are pending.
    pub pending: u64,

    /// The number of tests with any other status.
    pub other: u64,

    /// The time the run started, in epoch milliseconds.
    pub start: i64,

    /// The time the run stopped, in epoch milliseconds. Always at least
    /// `start` once both are set.
    pub stop: i64,
}

impl Summary {
    /// Counts one completed test with the given status, incrementing `tests`
    /// and exactly one per-status counter.
    pub fn record(&mut self, status: TestStatus) {
        self.tests += 1;
        match status {
            TestStatus::Passed => self.passed += 1,
            TestStatus::Failed => self.failed += 1,
            TestStatus::Skipped => self.skipped += 1,
            TestStatus::Pending => self.pending += 1,
            TestStatus::Other => self.other += 1,
        }
    }
}

/// A single test record.
///
/// Created when a completion event is processed and never mutated afterwards.
/// Optional fields that are absent are omitted from the serialized form.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Test {
    /// The test name.
    pub name: String,

    /// The normalized terminal status.
    pub status: TestStatus,

    /// How long the test took, in milliseconds.
    pub duration: u64,

    /// The time the test started, in epoch seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<i64>,

    /// The time the test stopped, in epoch seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop: Option<i64>,

    /// The full title of the suite this test belongs to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suite: Option<String>,

    /// The failure message, for failed tests with an error attached.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// The failure stack trace, for failed tests with an error attached.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace: Option<String>,

    /// The raw state string as received from the runner, before
    /// normalization into [`TestStatus`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_status: Option<String>,

    /// A free-form test type tag, e.g. `"e2e"`.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub test_type: Option<String>,

    /// The spec file this test was defined in.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,

    /// The number of retries observed for this test, across runs of the same
    /// spec.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retries: Option<u32>,

    /// Whether this test is considered flaky.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flaky: Option<bool>,

    /// The browser capability string the test ran against.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub browser: Option<String>,
}

impl Test {
    /// Creates a new test record with only the required fields set.
    pub fn new(name: impl Into<String>, status: TestStatus, duration: u64) -> Self {
        Self {
            name: name.into(),
            status,
            duration,
            start: None,
            stop: None,
            suite: None,
            message: None,
            trace: None,
            raw_status: None,
            test_type: None,
            file_path: None,
            retries: None,
            flaky: None,
            browser: None,
        }
    }
}

/// Environment metadata for a run.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Environment {
    /// The name of the application under test.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_name: Option<String>,

    /// The version of the application under test.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_version: Option<String>,

    /// The operating system platform, e.g. `"linux"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub os_platform: Option<String>,

    /// The operating system release.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub os_release: Option<String>,

    /// The operating system version.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub os_version: Option<String>,

    /// The CI build name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build_name: Option<String>,

    /// The CI build number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build_number: Option<String>,

    /// The CI build URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build_url: Option<String>,

    /// An opaque capability payload from the runner.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra: Option<serde_json::Value>,
}

impl Environment {
    /// Returns true if no field is set.
    pub fn is_empty(&self) -> bool {
        self.app_name.is_none()
            && self.app_version.is_none()
            && self.os_platform.is_none()
            && self.os_release.is_none()
            && self.os_version.is_none()
            && self.build_name.is_none()
            && self.build_number.is_none()
            && self.build_url.is_none()
            && self.extra.is_none()
    }
}

/// The normalized terminal status of a test.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestStatus {
    /// The test passed.
    Passed,

    /// The test failed.
    Failed,

    /// The test was skipped.
    Skipped,

    /// The test is pending.
    Pending,

    /// Any other terminal state.
    Other,
}

impl TestStatus {
    /// Maps a raw runner state string to a normalized status. Unrecognized
    /// states map to [`TestStatus::Other`].
    pub fn from_raw(state: &str) -> Self {
        match state {
            "passed" => TestStatus::Passed,
            "failed" => TestStatus::Failed,
            "skipped" => TestStatus::Skipped,
            "pending" => TestStatus::Pending,
            _ => TestStatus::Other,
        }
    }

    /// Returns the wire representation of this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            TestStatus::Passed => "passed",
            TestStatus::Failed => "failed",
            TestStatus::Skipped => "skipped",
            TestStatus::Pending => "pending",
            TestStatus::Other => "other",
        }
    }
}

impl fmt::Display for TestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
