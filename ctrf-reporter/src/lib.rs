// Copyright (c) The wdio-ctrf-json-reporter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! CTRF JSON report generation from WebdriverIO-style runner lifecycle events.
//!
//! The central type is [`CtrfReporter`]: it consumes the closed set of
//! lifecycle events in [`events`], incrementally builds a
//! [`ctrf_metadata::Report`], and persists it as one JSON file per spec
//! execution. Retry and flakiness information is inferred by diffing against
//! the report written by the previous run of the same spec ([`history`]).
//!
//! The [`merge`] module combines several such per-spec reports into a single
//! consolidated report; the `ctrf-merge` binary wraps it.

pub mod config;
pub mod errors;
pub mod events;
pub mod filename;
pub mod history;
pub mod merge;
pub mod reporter;

mod classify;

pub use config::ReporterConfig;
pub use reporter::CtrfReporter;
