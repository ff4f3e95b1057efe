// Copyright (c) The wdio-ctrf-json-reporter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Lifecycle events consumed by the reporter.
//!
//! Events are produced by the host runner's dispatch and consumed by
//! [`CtrfReporter::write_event`](crate::CtrfReporter::write_event), one at a
//! time, in a fixed order per execution: runner start, then for each suite a
//! suite start followed by its test completions, then runner end.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A lifecycle event from the host runner.
///
/// The event set is fixed and small, so it is modeled as a closed enum rather
/// than open-ended polymorphism.
#[derive(Clone, Debug)]
pub enum RunnerEvent {
    /// The runner process started.
    RunnerStarted {
        /// The session capabilities the runner resolved.
        capabilities: Capabilities,

        /// The spec files this runner process will execute.
        specs: Vec<String>,
    },

    /// A suite started.
    SuiteStarted {
        /// The full suite title.
        full_title: String,

        /// The spec file containing the suite.
        file: String,
    },

    /// A test (or a failed hook reported as one) completed.
    TestFinished {
        /// The test title.
        title: String,

        /// The raw terminal state as reported by the runner.
        state: String,

        /// The time the test started.
        start: DateTime<Utc>,

        /// The time the test ended, if the runner recorded one.
        end: Option<DateTime<Utc>>,

        /// The error attached to a failed test.
        error: Option<TestError>,

        /// The number of in-process retries the runner performed for this
        /// test within the current execution.
        retries: Option<u32>,

        /// How long the test took, in milliseconds.
        duration: u64,
    },

    /// The runner process finished.
    RunnerFinished {
        /// The spec files this runner process executed.
        specs: Vec<String>,
    },
}

/// An error attached to a failed test.
#[derive(Clone, Debug, Default)]
pub struct TestError {
    /// The failure message.
    pub message: Option<String>,

    /// The failure stack trace.
    pub stack: Option<String>,
}

/// The session capabilities reported at runner start.
///
/// `browser_name` and `browser_version` feed the per-test browser string; the
/// full payload, including unrecognized keys, is preserved as the
/// environment's opaque `extra` value.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Capabilities {
    /// The browser name, e.g. `"chrome"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub browser_name: Option<String>,

    /// The browser version.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub browser_version: Option<String>,

    /// Any other capability keys, preserved verbatim.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Capabilities {
    /// Returns true if no capability at all was reported.
    pub fn is_empty(&self) -> bool {
        self.browser_name.is_none() && self.browser_version.is_none() && self.extra.is_empty()
    }

    /// The browser string written to test records: name and version joined
    /// with a space, whichever of the two are present.
    pub fn browser_string(&self) -> String {
        match (&self.browser_name, &self.browser_version) {
            (Some(name), Some(version)) => format!("{name} {version}"),
            (Some(name), None) => name.clone(),
            (None, Some(version)) => version.clone(),
            (None, None) => String::new(),
        }
    }
}
