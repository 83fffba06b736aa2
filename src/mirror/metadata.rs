// git-mirror: Bare Repository Mirror Synchronizer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Per-mirror metadata files read by gitweb, cgit and git-daemon.
//!
//! ```text
//! <mirror>/description           UTF-8 text + '\n', rewritten only when known
//! <mirror>/git-daemon-export-ok  empty sentinel, created once, never touched
//! ```

use std::fs::OpenOptions;
use std::io::ErrorKind;
use std::path::Path;

use crate::error::MetadataWriteError;

/// Description record file name.
pub const DESCRIPTION_FILE: &str = "description";

/// Export marker file name.
pub const EXPORT_MARKER: &str = "git-daemon-export-ok";

/// Replace the description of the mirror at `mirror_dir`.
///
/// `None` leaves the existing file alone; `Some("")` writes a lone newline.
/// Returns whether the file was written.
///
/// # Errors
///
/// Returns a `MetadataWriteError` if the file cannot be written.
pub fn write_description(
    mirror_dir: &Path,
    description: Option<&str>,
) -> Result<bool, MetadataWriteError> {
    let Some(description) = description else {
        return Ok(false);
    };

    let path = mirror_dir.join(DESCRIPTION_FILE);
    let mut content = String::with_capacity(description.len() + 1);
    content.push_str(description);
    content.push('\n');

    std::fs::write(&path, content).map_err(|source| MetadataWriteError { path, source })?;
    Ok(true)
}

/// Make sure the export marker exists.
///
/// An existing marker is never opened for writing, whatever its content.
/// Returns whether the marker was created by this call.
///
/// # Errors
///
/// Returns a `MetadataWriteError` if the marker cannot be created.
pub fn ensure_export_marker(mirror_dir: &Path) -> Result<bool, MetadataWriteError> {
    let path = mirror_dir.join(EXPORT_MARKER);
    match OpenOptions::new().write(true).create_new(true).open(&path) {
        Ok(_) => Ok(true),
        Err(e) if e.kind() == ErrorKind::AlreadyExists => Ok(false),
        Err(source) => Err(MetadataWriteError { path, source }),
    }
}
