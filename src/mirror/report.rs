// git-mirror: Bare Repository Mirror Synchronizer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Outcome reporting for sync runs.
//!
//! ```text
//! Reconciler --+--> SyncReporter::started / skipped / failed / finished
//! Executor   --+--> SyncReporter::command / metadata
//!                        |
//!                        v
//!                 TracingReporter (console + rolling file)
//! ```
//!
//! The reporter is handed to the reconciler and executor at construction;
//! neither reaches for a process-wide logger on its own.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::error::MirrorError;

use super::identifier::MirrorIdentifier;

/// Operation applied to one repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SyncAction {
    /// First clone of a repository missing locally.
    Mirror,
    /// Fetch into an existing mirror.
    Update,
    /// Removal of a mirror no longer listed.
    Delete,
}

impl SyncAction {
    /// Short lowercase name for structured log fields.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Mirror => "mirror",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }

    /// Capitalized label used in human-readable lines.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Mirror => "Mirror",
            Self::Update => "Update",
            Self::Delete => "Delete",
        }
    }
}

impl std::fmt::Display for SyncAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One failed repository of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncFailure {
    pub action: SyncAction,
    /// Clone URL for mirror/update, identifier for delete.
    pub subject: String,
    pub message: String,
}

/// What a sync run did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub mirrored: Vec<MirrorIdentifier>,
    pub updated: Vec<MirrorIdentifier>,
    pub deleted: Vec<MirrorIdentifier>,
    pub failures: Vec<SyncFailure>,
    /// The run stopped early on user request.
    pub interrupted: bool,
    /// Operations were only reported, not executed.
    pub dry_run: bool,
}

impl SyncReport {
    #[must_use]
    pub const fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    /// Whether the process should exit successfully.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        !self.has_failures() && !self.interrupted
    }
}

/// Receives every observable step of a sync run.
pub trait SyncReporter {
    /// An operation is about to run.
    fn started(&self, action: SyncAction, subject: &str);

    /// An operation was planned but not executed (dry run).
    fn skipped(&self, action: SyncAction, subject: &str);

    /// An operation failed; the run continues with the next repository.
    fn failed(&self, action: SyncAction, subject: &str, error: &MirrorError);

    /// An external command is about to be executed.
    fn command(&self, _command_line: &str) {}

    /// A metadata file of `identifier` was written.
    fn metadata(&self, _identifier: &MirrorIdentifier, _file: &str) {}

    /// The run is over.
    fn finished(&self, _report: &SyncReport) {}
}

/// Shared handle passed to both the reconciler and the executor.
pub type SharedReporter = Arc<dyn SyncReporter + Send + Sync>;

/// Production reporter writing through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl SyncReporter for TracingReporter {
    fn started(&self, action: SyncAction, subject: &str) {
        info!(target: "git_mirror", action = %action, "{}: {}", action.label(), subject);
    }

    fn skipped(&self, action: SyncAction, subject: &str) {
        info!(target: "git_mirror", action = %action, "[DRY-RUN] would {}: {}", action, subject);
    }

    fn failed(&self, action: SyncAction, subject: &str, error: &MirrorError) {
        error!(target: "git_mirror", action = %action, "{} failed: {}: {}", action.label(), subject, error);
    }

    fn command(&self, command_line: &str) {
        debug!(target: "git_mirror", "running {command_line}");
    }

    fn metadata(&self, identifier: &MirrorIdentifier, file: &str) {
        debug!(target: "git_mirror", mirror = %identifier, "wrote {file}");
    }

    fn finished(&self, report: &SyncReport) {
        let summary = format!(
            "{} mirrored, {} updated, {} deleted, {} failed",
            report.mirrored.len(),
            report.updated.len(),
            report.deleted.len(),
            report.failures.len()
        );
        if report.interrupted {
            warn!(target: "git_mirror", "interrupted: {summary}");
        } else if report.has_failures() {
            warn!(target: "git_mirror", "finished with failures: {summary}");
        } else {
            info!(target: "git_mirror", "finished: {summary}");
        }
    }
}
