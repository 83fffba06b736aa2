// git-mirror: Bare Repository Mirror Synchronizer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Declarative repository list.
//!
//! ```json
//! [
//!   { "name": "poky", "https": "https://git.yoctoproject.org/git/poky", "description": "Poky" },
//!   { "https": "https://github.com/user/tool.git", "description": null }
//! ]
//! ```
//!
//! Only `https` (required) and `description` (optional) are read; other
//! fields written by the discoverers are ignored.

use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

use super::identifier::MirrorIdentifier;

/// One repository that should be mirrored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DesiredRepository {
    /// Remote URL, primary key of the entry.
    #[serde(rename = "https")]
    pub clone_url: String,
    /// `None` leaves an existing description untouched.
    #[serde(default)]
    pub description: Option<String>,
}

impl DesiredRepository {
    #[must_use]
    pub fn new(clone_url: impl Into<String>, description: Option<&str>) -> Self {
        Self {
            clone_url: clone_url.into(),
            description: description.map(str::to_string),
        }
    }

    /// Local directory name of this repository's mirror.
    #[must_use]
    pub fn identifier(&self) -> MirrorIdentifier {
        MirrorIdentifier::derive(&self.clone_url)
    }
}

/// Read and validate the repository list at `path`.
///
/// # Errors
///
/// Returns a `ConfigError` if the file cannot be read, is not a JSON array of
/// objects carrying an `https` string, or an entry has an empty `https` or
/// one without a repository name.
pub fn load_manifest(path: &Path) -> Result<Vec<DesiredRepository>, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
        path: path.display().to_string(),
        source,
    })?;
    parse_manifest(&content, &path.display().to_string())
}

/// Parse a repository list; `origin` names the source in error messages.
///
/// # Errors
///
/// See [`load_manifest`].
pub fn parse_manifest(content: &str, origin: &str) -> Result<Vec<DesiredRepository>, ConfigError> {
    let repos: Vec<DesiredRepository> =
        serde_json::from_str(content).map_err(|e| ConfigError::ParseError {
            path: origin.to_string(),
            message: e.to_string(),
        })?;

    for (index, repo) in repos.iter().enumerate() {
        if repo.clone_url.trim().is_empty() {
            return Err(ConfigError::InvalidEntry {
                path: origin.to_string(),
                index,
                message: "'https' must not be empty".to_string(),
            });
        }
        // `/` or `host:` would land in the `.git` control directory
        if MirrorIdentifier::from_dir_name(repo.identifier().as_str()).is_none() {
            return Err(ConfigError::InvalidEntry {
                path: origin.to_string(),
                index,
                message: format!("'{}' does not name a repository", repo.clone_url),
            });
        }
    }

    Ok(repos)
}
