// Copyright (c) The wdio-ctrf-json-reporter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reporter configuration.

use camino::Utf8PathBuf;
use serde::Deserialize;

/// The default directory reports are written to.
pub const DEFAULT_OUTPUT_DIR: &str = "ctrf";

/// The default test type tag attached to records.
pub const DEFAULT_TEST_TYPE: &str = "e2e";

/// Options recognized by [`CtrfReporter`](crate::CtrfReporter).
///
/// The host runner hands reporter options through as JSON, so this
/// deserializes from the same camelCase keys the original reporter options
/// use. Unset fields take their defaults.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReporterConfig {
    /// The directory the report file is written to. Created recursively if
    /// absent.
    pub output_dir: Utf8PathBuf,

    /// If true, test records carry only `name`, `status` and `duration`.
    pub minimal: bool,

    /// Free-form test type tag written to each record.
    pub test_type: String,

    /// Environment passthrough: the name of the application under test.
    pub app_name: Option<String>,

    /// Environment passthrough: the application version.
    pub app_version: Option<String>,

    /// Environment passthrough: the operating system platform.
    pub os_platform: Option<String>,

    /// Environment passthrough: the operating system release.
    pub os_release: Option<String>,

    /// Environment passthrough: the operating system version.
    pub os_version: Option<String>,

    /// Environment passthrough: the CI build name.
    pub build_name: Option<String>,

    /// Environment passthrough: the CI build number.
    pub build_number: Option<String>,

    /// Environment passthrough: the CI build URL.
    pub build_url: Option<String>,

    /// Enables the reporter's own diagnostic logging.
    pub debug: bool,
}

impl Default for ReporterConfig {
    fn default() -> Self {
        Self {
            output_dir: DEFAULT_OUTPUT_DIR.into(),
            minimal: false,
            test_type: DEFAULT_TEST_TYPE.to_owned(),
            app_name: None,
            app_version: None,
            os_platform: None,
            os_release: None,
            os_version: None,
            build_name: None,
            build_number: None,
            build_url: None,
            debug: false,
        }
    }
}
