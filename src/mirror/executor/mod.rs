// git-mirror: Bare Repository Mirror Synchronizer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Mirror operations on a single repository.
//!
//! ```text
//! MirrorExecutor (trait)
//!   create          clone --mirror, then write_metadata
//!   update          remote update --prune, then write_metadata
//!   write_metadata  description (if known) + export marker
//!   delete          recursive removal with read-only recovery
//!        |
//!        v
//! GitExecutor: GitCli + mirror root + SharedReporter
//! ```

use std::path::{Path, PathBuf};

use crate::error::MirrorResult;
use crate::git::GitCli;

use super::identifier::MirrorIdentifier;
use super::manifest::DesiredRepository;
use super::metadata::{DESCRIPTION_FILE, EXPORT_MARKER, ensure_export_marker, write_description};
use super::remove::remove_mirror_dir;
use super::report::SharedReporter;

/// Applies one mirror operation at a time.
///
/// Failures are returned, never retried.
pub trait MirrorExecutor {
    /// Directory holding the mirrors this executor operates on.
    fn root(&self) -> &Path;

    /// Produce a complete bare mirror of `repo` and write its metadata.
    ///
    /// # Errors
    ///
    /// `ExecutionError` if the clone fails, `MetadataWriteError` if the
    /// metadata cannot be written afterwards.
    fn create(&self, repo: &DesiredRepository) -> MirrorResult<()>;

    /// Refresh an existing mirror of `repo` and its metadata.
    ///
    /// # Errors
    ///
    /// `ExecutionError` if the fetch fails, `MetadataWriteError` if the
    /// metadata cannot be written afterwards.
    fn update(&self, repo: &DesiredRepository) -> MirrorResult<()>;

    /// Write the description (when known) and ensure the export marker.
    ///
    /// # Errors
    ///
    /// `MetadataWriteError` naming the file that failed.
    fn write_metadata(
        &self,
        identifier: &MirrorIdentifier,
        description: Option<&str>,
    ) -> MirrorResult<()>;

    /// Remove the local mirror.
    ///
    /// # Errors
    ///
    /// `DeletionError` if the directory survives read-only recovery.
    fn delete(&self, identifier: &MirrorIdentifier) -> MirrorResult<()>;
}

/// Executor backed by the git command line.
pub struct GitExecutor {
    git: GitCli,
    root: PathBuf,
    reporter: SharedReporter,
}

impl GitExecutor {
    #[must_use]
    pub fn new(git: GitCli, root: impl Into<PathBuf>, reporter: SharedReporter) -> Self {
        Self {
            git,
            root: root.into(),
            reporter,
        }
    }

    fn mirror_dir(&self, identifier: &MirrorIdentifier) -> PathBuf {
        self.root.join(identifier)
    }
}

impl MirrorExecutor for GitExecutor {
    fn root(&self) -> &Path {
        &self.root
    }

    fn create(&self, repo: &DesiredRepository) -> MirrorResult<()> {
        let identifier = repo.identifier();
        let dest = self.mirror_dir(&identifier);

        self.reporter.command(&format!(
            "git clone --mirror {} {}",
            repo.clone_url,
            dest.display()
        ));
        self.git.clone_mirror(&repo.clone_url, &dest)?;

        self.write_metadata(&identifier, repo.description.as_deref())
    }

    fn update(&self, repo: &DesiredRepository) -> MirrorResult<()> {
        let identifier = repo.identifier();
        let dir = self.mirror_dir(&identifier);

        self.reporter.command(&format!(
            "git --git-dir {} remote update --prune",
            dir.display()
        ));
        self.git.remote_update_prune(&dir)?;

        self.write_metadata(&identifier, repo.description.as_deref())
    }

    fn write_metadata(
        &self,
        identifier: &MirrorIdentifier,
        description: Option<&str>,
    ) -> MirrorResult<()> {
        let dir = self.mirror_dir(identifier);

        if write_description(&dir, description)? {
            self.reporter.metadata(identifier, DESCRIPTION_FILE);
        }
        if ensure_export_marker(&dir)? {
            self.reporter.metadata(identifier, EXPORT_MARKER);
        }
        Ok(())
    }

    fn delete(&self, identifier: &MirrorIdentifier) -> MirrorResult<()> {
        remove_mirror_dir(&self.mirror_dir(identifier))?;
        Ok(())
    }
}
