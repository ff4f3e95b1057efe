// Copyright (c) The wdio-ctrf-json-reporter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Derivation of the report filename from a spec file path.
//!
//! Successive runs of the same spec must produce the same filename, since the
//! retry-history lookup reads the file written by the previous run. Different
//! specs must produce different filenames, so two spec files never clobber
//! each other's report within one output directory.

use camino::{Utf8Component, Utf8Path};

/// Characters rejected by common filesystems (the Windows set).
const INVALID_CHARS: [char; 7] = ['<', '>', ':', '"', '|', '?', '*'];

/// Derives the report filename for a spec file path.
///
/// The path is relativized against `cwd` when it is contained within it;
/// otherwise the path is used as given, which keeps same-named specs in
/// different directories from colliding. The result is deterministic for a
/// given (path, cwd) pair.
pub fn report_file_name(spec_file: &str, cwd: &Utf8Path) -> String {
    // The host runner sometimes hands the spec through as a file URL.
    let path = spec_file.strip_prefix("file://").unwrap_or(spec_file);
    let path = Utf8Path::new(path);
    let relative = path.strip_prefix(cwd).unwrap_or(path);

    let identifier = relative
        .components()
        .filter_map(|component| match component {
            Utf8Component::Normal(segment) => Some(segment),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("-");

    let identifier = identifier
        .strip_suffix(".js")
        .or_else(|| identifier.strip_suffix(".ts"))
        .unwrap_or(identifier.as_str());

    let sanitized: String = identifier
        .chars()
        .map(|c| {
            if INVALID_CHARS.contains(&c) || (c as u32) < 0x20 {
                '_'
            } else {
                c
            }
        })
        .collect();

    // Windows rejects names ending in a dot or space.
    let trimmed = sanitized.trim().trim_end_matches(['.', ' ']);

    format!("ctrf-report-{trimmed}.json")
}
