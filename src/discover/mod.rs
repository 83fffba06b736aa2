// git-mirror: Bare Repository Mirror Synchronizer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Repository list producers.
//!
//! ```text
//! GitHub REST API --> GithubDiscoverer --+
//!                                        +--> [RepoListing] --> export_listing --> repos.json
//! cgit index page --> CgitDiscoverer ----+                                          |
//!                                                                                    v
//!                                                                           git-mirror sync
//! ```
//!
//! Both producers share [`PageFetcher`](crate::net::PageFetcher) for
//! retries and [`Excludes`] for filtering.

pub mod cgit;
pub mod github;

#[cfg(test)]
mod tests;

use std::io::Write;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use wax::{Glob, Program as _};

use crate::error::{ConfigError, Result};

pub use cgit::CgitDiscoverer;
pub use github::GithubDiscoverer;

/// One discovered repository, as written to the repository list.
///
/// Only `https` and `description` are read back by `sync`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoListing {
    pub name: String,
    pub description: Option<String>,
    pub owner: String,
    /// cgit section heading the repository was listed under.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    /// `git://` clone URL, empty when the host offers none.
    pub git: String,
    /// `https://` clone URL.
    pub https: String,
}

/// Repository names to skip, either literal or glob patterns.
#[derive(Debug, Clone, Default)]
pub struct Excludes {
    names: Vec<String>,
    globs: Vec<Glob<'static>>,
}

impl Excludes {
    /// Compile `patterns`. Patterns containing glob metacharacters are
    /// compiled as globs, everything else is matched literally.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for a malformed glob.
    pub fn new<I, S>(patterns: I) -> std::result::Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut excludes = Self::default();
        for pattern in patterns {
            let pattern = pattern.as_ref();
            if pattern.contains(['*', '?', '[', '{', '<']) {
                let glob = Glob::new(pattern).map_err(|e| ConfigError::InvalidValue {
                    section: "discover".to_string(),
                    key: "excludes".to_string(),
                    message: format!("invalid glob pattern '{pattern}': {e}"),
                })?;
                excludes.globs.push(glob.into_owned());
            } else {
                excludes.names.push(pattern.to_string());
            }
        }
        Ok(excludes)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty() && self.globs.is_empty()
    }

    /// Whether the repository at `url` should be skipped.
    ///
    /// Tests the last URL segment (`meta-arm.git`) and that segment cut at
    /// its first dot (`meta-arm`).
    #[must_use]
    pub fn matches_url(&self, url: &str) -> bool {
        let base = url_basename(url);
        let stem = base.split('.').next().unwrap_or(base);
        [base, stem].into_iter().any(|candidate| self.matches_name(candidate))
    }

    fn matches_name(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name) || self.globs.iter().any(|g| g.is_match(name))
    }
}

/// Last non-empty path segment of `url`.
pub(crate) fn url_basename(url: &str) -> &str {
    let trimmed = url.trim_end_matches('/');
    trimmed.rsplit('/').next().unwrap_or(trimmed)
}

/// Write `listing` as pretty JSON to `path`.
///
/// The file is written to a temporary sibling first and renamed into place,
/// so an existing list is never left half-written.
///
/// # Errors
///
/// Returns an error if `listing` is empty or the file cannot be written.
pub fn export_listing(listing: &[RepoListing], path: &Path) -> Result<()> {
    if listing.is_empty() {
        anyhow::bail!("empty repository list, not writing {}", path.display());
    }

    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut file = tempfile::NamedTempFile::new_in(dir)
        .with_context(|| format!("failed to create temporary file in {}", dir.display()))?;
    serde_json::to_writer_pretty(&mut file, listing)
        .with_context(|| format!("failed to serialize repository list for {}", path.display()))?;
    file.write_all(b"\n")
        .with_context(|| format!("failed to write {}", path.display()))?;
    file.persist(path)
        .with_context(|| format!("failed to write {}", path.display()))?;

    Ok(())
}
