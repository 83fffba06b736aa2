// git-mirror: Bare Repository Mirror Synchronizer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Recursive mirror removal with read-only recovery.
//!
//! ```text
//! remove_mirror_dir(dir)
//!   for each entry (depth first)
//!     remove --ok--> next
//!        |
//!     PermissionDenied
//!        v
//!     clear read-only on entry + parent
//!        v
//!     remove again --err--> DeletionError(path)
//! ```
//!
//! `git clone --mirror` leaves pack files read-only. On Windows the
//! read-only attribute blocks deletion, on Unix a read-only directory does.

use std::fs;
use std::io;
use std::path::Path;

use tracing::trace;

use crate::error::DeletionError;

/// Remove `dir` and everything below it.
///
/// # Errors
///
/// Returns a `DeletionError` naming the first path that could not be removed
/// even after its read-only bits were cleared.
pub fn remove_mirror_dir(dir: &Path) -> Result<(), DeletionError> {
    remove_tree(dir)
}

fn remove_tree(dir: &Path) -> Result<(), DeletionError> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::PermissionDenied => {
            clear_readonly(dir).map_err(|source| deletion(dir, source))?;
            fs::read_dir(dir).map_err(|source| deletion(dir, source))?
        }
        Err(source) => return Err(deletion(dir, source)),
    };

    for entry in entries {
        let entry = entry.map_err(|source| deletion(dir, source))?;
        let path = entry.path();
        let file_type = entry
            .file_type()
            .map_err(|source| deletion(&path, source))?;

        if file_type.is_dir() {
            remove_tree(&path)?;
        } else {
            remove_with_recovery(&path, |p| fs::remove_file(p))?;
        }
    }

    remove_with_recovery(dir, |p| fs::remove_dir(p))
}

/// Run `op`, and on a permission error clear the read-only bits of `path` and
/// its parent before running it exactly once more.
fn remove_with_recovery(
    path: &Path,
    op: impl Fn(&Path) -> io::Result<()>,
) -> Result<(), DeletionError> {
    match op(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::PermissionDenied => {
            trace!(path = %path.display(), "clearing read-only bit and retrying");
            clear_readonly(path).map_err(|source| deletion(path, source))?;
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                clear_readonly(parent).map_err(|source| deletion(parent, source))?;
            }
            op(path).map_err(|source| deletion(path, source))
        }
        Err(source) => Err(deletion(path, source)),
    }
}

/// Make `path` writable by its owner. Symlinks are left alone.
fn clear_readonly(path: &Path) -> io::Result<()> {
    let metadata = fs::symlink_metadata(path)?;
    if metadata.file_type().is_symlink() {
        return Ok(());
    }

    let mut permissions = metadata.permissions();

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        // directories also need r-x to be listed and emptied
        let wanted = if metadata.is_dir() { 0o700 } else { 0o200 };
        let mode = permissions.mode();
        if mode & wanted == wanted {
            return Ok(());
        }
        permissions.set_mode(mode | wanted);
    }

    #[cfg(not(unix))]
    {
        if !permissions.readonly() {
            return Ok(());
        }
        #[allow(clippy::permissions_set_readonly_false)]
        permissions.set_readonly(false);
    }

    fs::set_permissions(path, permissions)
}

fn deletion(path: &Path, source: io::Error) -> DeletionError {
    DeletionError {
        path: path.to_path_buf(),
        source,
    }
}
