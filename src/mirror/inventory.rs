// git-mirror: Bare Repository Mirror Synchronizer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Local mirror discovery.
//!
//! ```text
//! <root>/
//!   poky.git/                  (present, owned)
//!   meta-arm.git -> /data/..   (present only, a link to a directory)
//!   .git/                      (skipped, control directory)
//!   notes.git                  (skipped, not a directory)
//!   scratch/                   (skipped, no suffix)
//! ```
//!
//! Sets are sorted so deletion order is deterministic.

use std::collections::BTreeSet;
use std::path::Path;

use anyhow::Context;

use crate::error::Result;

use super::identifier::MirrorIdentifier;

/// Mirrors found under the root at one point in time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocalMirrors {
    /// Every mirror name resolving to a directory, symlinks followed.
    pub present: BTreeSet<MirrorIdentifier>,
    /// Real directories only. Links are never candidates for removal.
    pub owned: BTreeSet<MirrorIdentifier>,
}

/// Snapshot of the mirrors under `root`.
///
/// Only immediate children are considered.
///
/// # Errors
///
/// Returns an error if `root` cannot be listed.
pub fn list_local_mirrors(root: &Path) -> Result<LocalMirrors> {
    let mut mirrors = LocalMirrors::default();

    for entry in
        std::fs::read_dir(root).with_context(|| format!("failed to read {}", root.display()))?
    {
        let entry = entry.with_context(|| format!("failed to read entry in {}", root.display()))?;

        // Non UTF-8 names can never match a derived identifier
        let Some(identifier) = entry
            .file_name()
            .to_str()
            .and_then(MirrorIdentifier::from_dir_name)
        else {
            continue;
        };

        let file_type = entry
            .file_type()
            .with_context(|| format!("failed to stat {}", entry.path().display()))?;
        if file_type.is_dir() {
            mirrors.present.insert(identifier.clone());
            mirrors.owned.insert(identifier);
        } else if file_type.is_symlink() && entry.path().is_dir() {
            mirrors.present.insert(identifier);
        }
    }

    Ok(mirrors)
}
