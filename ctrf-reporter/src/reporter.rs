// Copyright (c) The wdio-ctrf-json-reporter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Aggregates runner lifecycle events into a CTRF report.
//!
//! The main structure in this module is [`CtrfReporter`].

use crate::{
    classify::{classify, failure_details},
    config::ReporterConfig,
    errors::WriteReportError,
    events::{Capabilities, RunnerEvent, TestError},
    filename::report_file_name,
    history::PriorReportStore,
};
use camino::{Utf8Path, Utf8PathBuf};
use chrono::{DateTime, Utc};
use ctrf_metadata::{Environment, Report, Test};
use std::fs;
use tracing::{debug, warn};

/// The tool name written to every report this reporter produces.
pub const TOOL_NAME: &str = "webdriverio";

/// Builds and persists one CTRF report per spec execution.
///
/// The reporter is invoked synchronously by the host runner's event dispatch,
/// one event at a time, in the fixed lifecycle order; it owns its report
/// exclusively for the duration of one run. Calling [`write_event`] out of
/// lifecycle order is not guarded against.
///
/// All I/O failures are contained: a missing or corrupt prior report degrades
/// retry and flakiness accuracy to "as if first run", and a failed report
/// write leaves the in-memory report inspectable via [`report`] but produces
/// no file. Neither ever affects the host run's outcome.
///
/// [`write_event`]: Self::write_event
/// [`report`]: Self::report
#[derive(Debug)]
pub struct CtrfReporter {
    config: ReporterConfig,
    /// Working directory spec paths are relativized against.
    cwd: Utf8PathBuf,
    report: Report,
    current_suite: String,
    current_spec_file: String,
    current_browser: String,
    prior: PriorRun,
}

/// The cached outcome of the one-shot prior-report load.
#[derive(Debug)]
enum PriorRun {
    /// No suite has started yet.
    NotLoaded,

    /// The load ran and produced no usable history.
    Absent,

    /// The prior report for this spec.
    Loaded(Report),
}

impl PriorRun {
    fn tests(&self) -> &[Test] {
        match self {
            PriorRun::Loaded(report) => &report.results.tests,
            PriorRun::NotLoaded | PriorRun::Absent => &[],
        }
    }
}

impl CtrfReporter {
    /// Creates a new reporter with the given configuration, relativizing spec
    /// paths against the process working directory.
    pub fn new(config: ReporterConfig) -> Self {
        let cwd = std::env::current_dir()
            .ok()
            .and_then(|dir| Utf8PathBuf::from_path_buf(dir).ok())
            .unwrap_or_default();
        Self::with_cwd(config, cwd)
    }

    /// Creates a new reporter with an explicit working directory.
    pub fn with_cwd(config: ReporterConfig, cwd: Utf8PathBuf) -> Self {
        Self {
            config,
            cwd,
            report: Report::new(TOOL_NAME),
            current_suite: String::new(),
            current_spec_file: String::new(),
            current_browser: String::new(),
            prior: PriorRun::NotLoaded,
        }
    }

    /// The in-memory report built so far.
    pub fn report(&self) -> &Report {
        &self.report
    }

    /// Ingests one lifecycle event.
    pub fn write_event(&mut self, event: RunnerEvent) {
        match event {
            RunnerEvent::RunnerStarted {
                capabilities,
                specs: _,
            } => self.on_runner_started(&capabilities),
            RunnerEvent::SuiteStarted { full_title, file } => {
                self.on_suite_started(full_title, file);
            }
            RunnerEvent::TestFinished {
                title,
                state,
                start,
                end,
                error,
                retries,
                duration,
            } => self.on_test_finished(title, &state, start, end, error, retries, duration),
            RunnerEvent::RunnerFinished { specs } => self.on_runner_finished(&specs),
        }
    }

    fn on_runner_started(&mut self, capabilities: &Capabilities) {
        self.report.results.summary.start = Utc::now().timestamp_millis();
        self.current_browser = capabilities.browser_string();

        let environment = Environment {
            app_name: self.config.app_name.clone(),
            app_version: self.config.app_version.clone(),
            os_platform: self.config.os_platform.clone(),
            os_release: self.config.os_release.clone(),
            os_version: self.config.os_version.clone(),
            build_name: self.config.build_name.clone(),
            build_number: self.config.build_number.clone(),
            build_url: self.config.build_url.clone(),
            extra: if capabilities.is_empty() {
                None
            } else {
                serde_json::to_value(capabilities).ok()
            },
        };
        if !environment.is_empty() {
            self.report.results.environment = Some(environment);
        }
    }

    fn on_suite_started(&mut self, full_title: String, file: String) {
        self.current_suite = full_title;
        self.current_spec_file = file;

        // The prior report is loaded once, at the first suite start, and
        // cached for the rest of the run.
        if matches!(self.prior, PriorRun::NotLoaded) {
            let file_name = report_file_name(&self.current_spec_file, &self.cwd);
            let store = PriorReportStore::new(&self.config.output_dir, &file_name);
            self.prior = match store.load() {
                Ok(Some(report)) => {
                    if self.config.debug {
                        debug!("read prior report from {}", store.path());
                    }
                    PriorRun::Loaded(report)
                }
                Ok(None) => PriorRun::Absent,
                Err(error) => {
                    if self.config.debug {
                        debug!("ignoring prior report: {error}");
                    }
                    PriorRun::Absent
                }
            };
        }
    }

    #[expect(clippy::too_many_arguments)]
    fn on_test_finished(
        &mut self,
        title: String,
        state: &str,
        start: DateTime<Utc>,
        end: Option<DateTime<Utc>>,
        error: Option<TestError>,
        retries: Option<u32>,
        duration: u64,
    ) {
        let prior_record = self.prior.tests().iter().find(|test| test.name == title);
        let classification = classify(state, retries, prior_record);

        let mut record = Test::new(title, classification.status, duration);
        if !self.config.minimal {
            record.start = Some(start.timestamp());
            record.stop = Some(end.map_or(0, |end| end.timestamp()));
            let (message, trace) = failure_details(classification.status, error.as_ref());
            record.message = message;
            record.trace = trace;
            record.raw_status = Some(state.to_owned());
            record.test_type = Some(self.config.test_type.clone());
            record.retries = Some(classification.retries);
            record.flaky = Some(classification.flaky);
            record.suite = Some(self.current_suite.clone());
            record.file_path = Some(self.current_spec_file.clone());
            record.browser = Some(self.current_browser.clone());
        }

        self.report.results.tests.push(record);
        self.report.results.summary.record(classification.status);
    }

    fn on_runner_finished(&mut self, specs: &[String]) {
        self.report.results.summary.stop = Utc::now().timestamp_millis();

        let spec_file = specs
            .first()
            .map(String::as_str)
            .unwrap_or(&self.current_spec_file);
        let file_name = report_file_name(spec_file, &self.cwd);

        match self.write_report(&file_name) {
            Ok(path) => {
                if self.config.debug {
                    debug!("successfully wrote report to {path}");
                }
            }
            Err(error) => {
                // The host run must never fail because of reporter I/O.
                warn!("failed to write CTRF report: {error}");
            }
        }
    }

    fn write_report(&self, file_name: &str) -> Result<Utf8PathBuf, WriteReportError> {
        let output_dir: &Utf8Path = &self.config.output_dir;
        fs::create_dir_all(output_dir).map_err(|error| WriteReportError::CreateDir {
            path: output_dir.to_owned(),
            error,
        })?;

        let contents = self
            .report
            .serialize_pretty()
            .map_err(|error| WriteReportError::Serialize { error })?;

        let path = output_dir.join(file_name);
        fs::write(&path, contents).map_err(|error| WriteReportError::Write {
            path: path.clone(),
            error,
        })?;

        Ok(path)
    }
}
