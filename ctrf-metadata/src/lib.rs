// Copyright (c) The wdio-ctrf-json-reporter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Data model and serializer for CTRF (Common Test Report Format) JSON.
//!
//! CTRF is a tool-agnostic JSON schema for test results: one `Report` per run,
//! carrying run-level summary counters, an ordered list of per-test records,
//! and optional environment metadata. This crate provides the typed model, a
//! structural shape check for untrusted inputs, pretty-printed serialization,
//! and a combinator for merging several finalized reports into one.
//!
//! The model is produced by reporters (see the `ctrf-reporter` crate) and
//! consumed by anything that understands CTRF.

mod merge;
mod report;

pub use merge::merge_reports;
pub use report::{Environment, Report, Results, Summary, Test, TestStatus, Tool};
