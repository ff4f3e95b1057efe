// Copyright (c) The wdio-ctrf-json-reporter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end tests for the reporter state machine: event sequences in, CTRF
//! JSON out, with retry and flakiness inferred across runs of the same spec.

use camino::{Utf8Path, Utf8PathBuf};
use camino_tempfile::Utf8TempDir;
use chrono::{TimeZone, Utc};
use ctrf_metadata::{Report, TestStatus};
use ctrf_reporter::{
    CtrfReporter, ReporterConfig,
    events::{Capabilities, RunnerEvent, TestError},
};
use pretty_assertions::assert_eq;
use std::fs;

const SPEC_RELATIVE: &str = "test/specs/login.e2e.ts";
const REPORT_FILE: &str = "ctrf-report-test-specs-login.e2e.json";

struct Fixture {
    _temp_dir: Utf8TempDir,
    cwd: Utf8PathBuf,
    output_dir: Utf8PathBuf,
    spec_file: String,
}

impl Fixture {
    fn new() -> Self {
        let temp_dir = Utf8TempDir::new().unwrap();
        let cwd = temp_dir.path().to_owned();
        let output_dir = cwd.join("ctrf");
        let spec_file = cwd.join(SPEC_RELATIVE).into_string();
        Self {
            _temp_dir: temp_dir,
            cwd,
            output_dir,
            spec_file,
        }
    }

    fn config(&self) -> ReporterConfig {
        ReporterConfig {
            output_dir: self.output_dir.clone(),
            ..ReporterConfig::default()
        }
    }

    fn reporter(&self) -> CtrfReporter {
        CtrfReporter::with_cwd(self.config(), self.cwd.clone())
    }

    fn reporter_with(&self, config: ReporterConfig) -> CtrfReporter {
        CtrfReporter::with_cwd(config, self.cwd.clone())
    }

    fn runner_started(&self) -> RunnerEvent {
        RunnerEvent::RunnerStarted {
            capabilities: chrome_capabilities(),
            specs: vec![self.spec_file.clone()],
        }
    }

    fn suite_started(&self) -> RunnerEvent {
        RunnerEvent::SuiteStarted {
            full_title: "login suite".to_owned(),
            file: self.spec_file.clone(),
        }
    }

    fn runner_finished(&self) -> RunnerEvent {
        RunnerEvent::RunnerFinished {
            specs: vec![self.spec_file.clone()],
        }
    }

    /// Runs one full reporter lifecycle over the given completions.
    fn run(&self, completions: Vec<RunnerEvent>) -> CtrfReporter {
        let mut reporter = self.reporter();
        reporter.write_event(self.runner_started());
        reporter.write_event(self.suite_started());
        for completion in completions {
            reporter.write_event(completion);
        }
        reporter.write_event(self.runner_finished());
        reporter
    }

    fn written_report(&self) -> Report {
        let contents = fs::read_to_string(self.output_dir.join(REPORT_FILE)).unwrap();
        serde_json::from_str(&contents).unwrap()
    }
}

fn chrome_capabilities() -> Capabilities {
    Capabilities {
        browser_name: Some("chrome".to_owned()),
        browser_version: Some("126.0".to_owned()),
        extra: serde_json::Map::new(),
    }
}

fn test_finished(title: &str, state: &str) -> RunnerEvent {
    RunnerEvent::TestFinished {
        title: title.to_owned(),
        state: state.to_owned(),
        start: Utc.timestamp_opt(1_753_042_662, 0).unwrap(),
        end: Some(Utc.timestamp_opt(1_753_042_663, 0).unwrap()),
        error: if state == "failed" {
            Some(TestError {
                message: Some("expected true to be false".to_owned()),
                stack: Some("at specs/login.e2e.ts:12".to_owned()),
            })
        } else {
            None
        },
        retries: None,
        duration: 25,
    }
}

fn assert_summary_invariant(report: &Report) {
    let summary = &report.results.summary;
    assert_eq!(
        summary.tests,
        summary.passed + summary.failed + summary.skipped + summary.pending + summary.other,
    );
}

#[test]
fn two_passes_on_first_run() {
    let fixture = Fixture::new();
    let reporter = fixture.run(vec![
        test_finished("foo", "passed"),
        test_finished("bar", "passed"),
    ]);

    let report = reporter.report();
    let summary = &report.results.summary;
    assert_eq!(summary.tests, 2);
    assert_eq!(summary.passed, 2);
    assert_eq!(summary.failed, 0);
    assert!(summary.start > 0);
    assert!(summary.stop >= summary.start);

    for record in &report.results.tests {
        assert_eq!(record.status, TestStatus::Passed);
        assert_eq!(record.flaky, Some(false));
        assert_eq!(record.retries, Some(0));
        assert_eq!(record.suite.as_deref(), Some("login suite"));
        assert_eq!(record.file_path.as_deref(), Some(fixture.spec_file.as_str()));
        assert_eq!(record.browser.as_deref(), Some("chrome 126.0"));
        assert_eq!(record.test_type.as_deref(), Some("e2e"));
        assert_eq!(record.start, Some(1_753_042_662));
        assert_eq!(record.stop, Some(1_753_042_663));
    }
    assert_eq!(report.results.tests[0].name, "foo");
    assert_eq!(report.results.tests[1].name, "bar");

    // The on-disk report matches the in-memory one.
    let written = fixture.written_report();
    assert_eq!(written.results.tests.len(), 2);
    assert_eq!(written.results.tool.name, "webdriverio");
}

#[test]
fn retries_accumulate_and_flakiness_flips_on_recovery() {
    let fixture = Fixture::new();

    // Run 1: x passes, y fails.
    let run1 = fixture.run(vec![
        test_finished("x", "passed"),
        test_finished("y", "failed"),
    ]);
    let y = &run1.report().results.tests[1];
    assert_eq!(y.retries, Some(0));
    assert_eq!(y.flaky, Some(false));
    assert_eq!(y.message.as_deref(), Some("expected true to be false"));
    assert_eq!(y.trace.as_deref(), Some("at specs/login.e2e.ts:12"));

    // Run 2: y fails again. Still failing is broken, not flaky.
    let run2 = fixture.run(vec![
        test_finished("x", "passed"),
        test_finished("y", "failed"),
    ]);
    let y = &run2.report().results.tests[1];
    assert_eq!(y.retries, Some(1));
    assert_eq!(y.flaky, Some(false));

    // Run 3: y recovers. Failed before, passes now: flaky.
    let run3 = fixture.run(vec![
        test_finished("x", "passed"),
        test_finished("y", "passed"),
    ]);
    let report = run3.report();
    let y = &report.results.tests[1];
    assert_eq!(y.retries, Some(2));
    assert_eq!(y.flaky, Some(true));
    assert_eq!(y.message, None);
    assert_eq!(y.trace, None);
    assert_eq!(report.results.summary.passed, 2);
    assert_eq!(report.results.summary.failed, 0);

    // x passed every run and never became flaky.
    let x = &report.results.tests[0];
    assert_eq!(x.retries, Some(0));
    assert_eq!(x.flaky, Some(false));
}

#[test]
fn in_process_retries_mark_a_pass_flaky_without_history() {
    let fixture = Fixture::new();
    let reporter = fixture.run(vec![RunnerEvent::TestFinished {
        title: "eventually passes".to_owned(),
        state: "passed".to_owned(),
        start: Utc::now(),
        end: None,
        error: None,
        retries: Some(2),
        duration: 90,
    }]);

    let record = &reporter.report().results.tests[0];
    assert_eq!(record.retries, Some(2));
    assert_eq!(record.flaky, Some(true));
    assert_eq!(record.stop, Some(0), "missing end time records stop 0");
}

#[test]
fn pending_test_keeps_raw_status_and_no_message() {
    let fixture = Fixture::new();
    let reporter = fixture.run(vec![test_finished("not yet implemented", "pending")]);

    let report = reporter.report();
    let record = &report.results.tests[0];
    assert_eq!(record.status, TestStatus::Pending);
    assert_eq!(record.raw_status.as_deref(), Some("pending"));
    assert_eq!(record.message, None);
    assert_eq!(record.trace, None);
    assert_eq!(report.results.summary.pending, 1);
}

#[test]
fn unknown_state_counts_as_other() {
    let fixture = Fixture::new();
    let reporter = fixture.run(vec![test_finished("weird", "exploded")]);

    let report = reporter.report();
    assert_eq!(report.results.tests[0].status, TestStatus::Other);
    assert_eq!(report.results.tests[0].raw_status.as_deref(), Some("exploded"));
    assert_eq!(report.results.summary.other, 1);
    assert_summary_invariant(report);
}

#[test]
fn summary_invariant_holds_after_every_event() {
    let fixture = Fixture::new();
    let mut reporter = fixture.reporter();

    let states = ["passed", "failed", "skipped", "pending", "mystery", "passed"];
    reporter.write_event(fixture.runner_started());
    assert_summary_invariant(reporter.report());
    reporter.write_event(fixture.suite_started());
    assert_summary_invariant(reporter.report());
    for (i, state) in states.iter().enumerate() {
        reporter.write_event(test_finished(&format!("test {i}"), state));
        assert_summary_invariant(reporter.report());
    }
    reporter.write_event(fixture.runner_finished());
    assert_summary_invariant(reporter.report());
    assert_eq!(reporter.report().results.summary.tests, states.len() as u64);
}

#[test]
fn minimal_mode_suppresses_optional_fields() {
    let fixture = Fixture::new();
    let config = ReporterConfig {
        minimal: true,
        ..fixture.config()
    };
    let mut reporter = fixture.reporter_with(config);
    reporter.write_event(fixture.runner_started());
    reporter.write_event(fixture.suite_started());
    reporter.write_event(test_finished("lean", "failed"));
    reporter.write_event(fixture.runner_finished());

    let record = &reporter.report().results.tests[0];
    assert_eq!(record.name, "lean");
    assert_eq!(record.status, TestStatus::Failed);
    assert_eq!(record.duration, 25);
    assert_eq!(record.start, None);
    assert_eq!(record.stop, None);
    assert_eq!(record.message, None);
    assert_eq!(record.trace, None);
    assert_eq!(record.raw_status, None);
    assert_eq!(record.test_type, None);
    assert_eq!(record.retries, None);
    assert_eq!(record.flaky, None);
    assert_eq!(record.suite, None);
    assert_eq!(record.file_path, None);
    assert_eq!(record.browser, None);

    let contents = fs::read_to_string(fixture.output_dir.join(REPORT_FILE)).unwrap();
    let value: serde_json::Value = serde_json::from_str(&contents).unwrap();
    let mut keys: Vec<&str> = value["results"]["tests"][0]
        .as_object()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();
    keys.sort_unstable();
    assert_eq!(keys, ["duration", "name", "status"]);
}

#[test]
fn minimal_mode_still_reads_history() {
    let fixture = Fixture::new();

    // Full run 1 so there is a failed record on disk.
    fixture.run(vec![test_finished("y", "failed")]);

    // Minimal run 2: the lookup still works by name and status, the verdict
    // is just not written to the record.
    let config = ReporterConfig {
        minimal: true,
        ..fixture.config()
    };
    let mut reporter = fixture.reporter_with(config);
    reporter.write_event(fixture.runner_started());
    reporter.write_event(fixture.suite_started());
    reporter.write_event(test_finished("y", "passed"));
    reporter.write_event(fixture.runner_finished());

    let record = &reporter.report().results.tests[0];
    assert_eq!(record.retries, None);
    assert_eq!(record.flaky, None);
    assert_eq!(record.status, TestStatus::Passed);
}

#[test]
fn environment_absent_without_details() {
    let fixture = Fixture::new();
    let mut reporter = fixture.reporter();
    reporter.write_event(RunnerEvent::RunnerStarted {
        capabilities: Capabilities::default(),
        specs: vec![fixture.spec_file.clone()],
    });
    reporter.write_event(fixture.suite_started());
    reporter.write_event(test_finished("t", "passed"));
    reporter.write_event(fixture.runner_finished());

    assert!(reporter.report().results.environment.is_none());
    let contents = fs::read_to_string(fixture.output_dir.join(REPORT_FILE)).unwrap();
    assert!(!contents.contains("\"environment\""));
}

#[test]
fn environment_carries_passthrough_and_capabilities() {
    let fixture = Fixture::new();
    let config = ReporterConfig {
        app_name: Some("storefront".to_owned()),
        app_version: Some("2.4.1".to_owned()),
        build_number: Some("1043".to_owned()),
        build_url: Some("https://ci.example.com/1043".to_owned()),
        ..fixture.config()
    };
    let mut reporter = fixture.reporter_with(config);
    reporter.write_event(fixture.runner_started());
    reporter.write_event(fixture.suite_started());
    reporter.write_event(test_finished("t", "passed"));
    reporter.write_event(fixture.runner_finished());

    let environment = reporter.report().results.environment.as_ref().unwrap();
    assert_eq!(environment.app_name.as_deref(), Some("storefront"));
    assert_eq!(environment.app_version.as_deref(), Some("2.4.1"));
    assert_eq!(environment.build_number.as_deref(), Some("1043"));
    let extra = environment.extra.as_ref().unwrap();
    assert_eq!(extra["browserName"], "chrome");
    assert_eq!(extra["browserVersion"], "126.0");
}

#[test]
fn corrupt_prior_report_degrades_to_first_run() {
    let fixture = Fixture::new();
    fs::create_dir_all(&fixture.output_dir).unwrap();
    fs::write(fixture.output_dir.join(REPORT_FILE), "{ definitely not json").unwrap();

    let reporter = fixture.run(vec![test_finished("y", "passed")]);
    let record = &reporter.report().results.tests[0];
    assert_eq!(record.retries, Some(0));
    assert_eq!(record.flaky, Some(false));
}

#[test]
fn write_failure_leaves_report_inspectable() {
    let fixture = Fixture::new();
    // Make the output directory path unusable: it already exists as a file.
    fs::write(&fixture.output_dir, "in the way").unwrap();

    let reporter = fixture.run(vec![test_finished("t", "passed")]);
    assert_eq!(reporter.report().results.summary.passed, 1);
    assert!(!Utf8Path::new(&fixture.output_dir).is_dir());
}

#[test]
fn reports_from_two_specs_do_not_collide() {
    let fixture = Fixture::new();
    let other_spec = fixture.cwd.join("test/specs/cart.e2e.ts").into_string();

    fixture.run(vec![test_finished("login works", "passed")]);

    let mut reporter = fixture.reporter();
    reporter.write_event(RunnerEvent::RunnerStarted {
        capabilities: chrome_capabilities(),
        specs: vec![other_spec.clone()],
    });
    reporter.write_event(RunnerEvent::SuiteStarted {
        full_title: "cart suite".to_owned(),
        file: other_spec.clone(),
    });
    reporter.write_event(test_finished("cart works", "passed"));
    reporter.write_event(RunnerEvent::RunnerFinished {
        specs: vec![other_spec],
    });

    assert!(fixture.output_dir.join(REPORT_FILE).is_file());
    assert!(
        fixture
            .output_dir
            .join("ctrf-report-test-specs-cart.e2e.json")
            .is_file()
    );
}
