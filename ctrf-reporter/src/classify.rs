// Copyright (c) The wdio-ctrf-json-reporter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-test status, retry and flakiness classification.
//!
//! Retries and flakiness are cross-run concepts: a single execution cannot
//! know them on its own, so each completion is diffed against the record the
//! previous run of the same spec wrote for the same test name. The rule:
//!
//! * no prior record: retries come from the current execution's own retry
//!   counter, and a pass after in-process retries is flaky;
//! * prior record failed: one more retry than the prior record carried, and a
//!   pass now is flaky while another failure is just broken;
//! * prior record not failed: as if there were no prior record.

use crate::events::TestError;
use ctrf_metadata::{Test, TestStatus};

/// The classifier's verdict for one completed test.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Classification {
    /// The normalized terminal status.
    pub(crate) status: TestStatus,

    /// The retry count, across runs of the same spec.
    pub(crate) retries: u32,

    /// Whether the test is considered flaky.
    pub(crate) flaky: bool,
}

/// Classifies a completed test against its optional prior record.
///
/// `event_retries` is the in-process retry counter from the current
/// execution; `prior` is the first record with a matching name in the prior
/// report, if any.
pub(crate) fn classify(
    state: &str,
    event_retries: Option<u32>,
    prior: Option<&Test>,
) -> Classification {
    let status = TestStatus::from_raw(state);
    let passed = status == TestStatus::Passed;
    let own_retries = event_retries.unwrap_or(0);

    let (retries, flaky) = match prior {
        Some(prior) if prior.status == TestStatus::Failed => {
            (prior.retries.unwrap_or(0) + 1, passed)
        }
        _ => (own_retries, passed && own_retries > 0),
    };

    Classification {
        status,
        retries,
        flaky,
    }
}

/// Extracts failure details from a completion event.
///
/// Populated only when the terminal state is failed and an error is present;
/// absent message or stack fields stay absent rather than becoming empty
/// strings.
pub(crate) fn failure_details(
    status: TestStatus,
    error: Option<&TestError>,
) -> (Option<String>, Option<String>) {
    match (status, error) {
        (TestStatus::Failed, Some(error)) => (error.message.clone(), error.stack.clone()),
        _ => (None, None),
    }
}
