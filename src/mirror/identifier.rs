// git-mirror: Bare Repository Mirror Synchronizer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Repository URL → local mirror directory name.
//!
//! ```text
//! https://host/group/name.git  --> name.git
//! https://host/group/name      --> name.git
//! https://host/group/name/     --> name.git
//! git@host:name                --> name.git
//! ```

use std::fmt;
use std::path::Path;

/// Suffix of every bare mirror directory.
pub const MIRROR_SUFFIX: &str = ".git";

/// Canonical local directory name of a mirrored repository.
///
/// This is the join key between the repository list and the mirror root.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MirrorIdentifier(String);

impl MirrorIdentifier {
    /// Derive the identifier from a clone URL.
    ///
    /// Takes the last path segment and appends [`MIRROR_SUFFIX`] unless the
    /// segment's extension already is exactly `git` (case-sensitive). A
    /// dot-file such as `.git` has no extension and gets the suffix appended.
    ///
    /// Callers must reject empty URLs beforehand.
    #[must_use]
    pub fn derive(url: &str) -> Self {
        let segment = last_segment(url);
        if has_mirror_extension(segment) {
            Self(segment.to_string())
        } else {
            Self(format!("{segment}{MIRROR_SUFFIX}"))
        }
    }

    /// Recognize an existing directory name as a mirror.
    ///
    /// Names that do not end in [`MIRROR_SUFFIX`], and the bare suffix itself
    /// (a colocated `.git` control directory), are not mirrors.
    #[must_use]
    pub fn from_dir_name(name: &str) -> Option<Self> {
        (name.ends_with(MIRROR_SUFFIX) && name != MIRROR_SUFFIX).then(|| Self(name.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MirrorIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<Path> for MirrorIdentifier {
    fn as_ref(&self) -> &Path {
        Path::new(&self.0)
    }
}

/// Final segment of a URL path, ignoring trailing slashes.
fn last_segment(url: &str) -> &str {
    let trimmed = url.trim_end_matches('/');
    // scp-like `host:path` addresses have no slash before the repository name
    trimmed
        .rsplit(['/', ':'])
        .next()
        .unwrap_or(trimmed)
}

/// Same notion of "extension" as a file name: the part after the last dot,
/// provided the dot is not the first character.
fn has_mirror_extension(segment: &str) -> bool {
    match segment.rsplit_once('.') {
        Some((stem, ext)) => !stem.is_empty() && ext == &MIRROR_SUFFIX[1..],
        None => false,
    }
}
