// Copyright (c) The wdio-ctrf-json-reporter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::report::Report;

/// Combines several finalized reports into a single consolidated report.
///
/// Summary counters are summed, `start` is the earliest non-zero start and
/// `stop` the latest stop across the inputs, and test records are concatenated
/// in input order. The tool and environment are taken from the first report
/// that carries them.
///
/// An empty input produces an empty report with an unknown tool name; callers
/// that consider zero reports an error (such as the merge utility) are
/// expected to check before calling.
pub fn merge_reports(reports: Vec<Report>) -> Report {
    let mut merged = Report::new("unknown");
    let mut first = true;

    for report in reports {
        let results = report.results;
        if first {
            merged.results.tool = results.tool;
            first = false;
        }
        if merged.results.environment.is_none() {
            merged.results.environment = results.environment;
        }

        let summary = &mut merged.results.summary;
        summary.tests += results.summary.tests;
        summary.passed += results.summary.passed;
        summary.failed += results.summary.failed;
        summary.skipped += results.summary.skipped;
        summary.pending += results.summary.pending;
        summary.other += results.summary.other;

        if results.summary.start != 0 && (summary.start == 0 || results.summary.start < summary.start)
        {
            summary.start = results.summary.start;
        }
        if results.summary.stop > summary.stop {
            summary.stop = results.summary.stop;
        }

        merged.results.tests.extend(results.tests);
    }

    merged
}
