// git-mirror: Bare Repository Mirror Synchronizer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Desired list vs. local mirrors.
//!
//! ```text
//! snapshot = list_local_mirrors(executor.root())   (once, before any change)
//!
//! for repo in desired (list order)
//!     id in snapshot.present or created? --yes--> update
//!                                        --no---> create
//!
//! if delete
//!     for id in snapshot.owned - ids(desired) (sorted)
//!         delete
//! ```
//!
//! Any per-repository failure is reported and recorded, then the loop moves
//! on. Nothing is rolled back.

use std::collections::BTreeSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::Context;
use bon::Builder;

use crate::error::{MirrorError, MirrorResult, Result};

use super::executor::MirrorExecutor;
use super::identifier::MirrorIdentifier;
use super::inventory::list_local_mirrors;
use super::manifest::DesiredRepository;
use super::report::{SharedReporter, SyncAction, SyncFailure, SyncReport};

/// Knobs of a single run.
#[derive(Debug, Clone, Default, Builder)]
pub struct SyncOptions {
    /// Remove local mirrors that are no longer listed.
    #[builder(setters(name = with_delete), default)]
    delete: bool,
    /// Report operations without executing them.
    #[builder(setters(name = with_dry_run), default)]
    dry_run: bool,
    /// Checked between repositories; `true` ends the run early.
    #[builder(setters(name = with_interrupt))]
    interrupt: Option<Arc<AtomicBool>>,
}

impl SyncOptions {
    #[must_use]
    pub const fn delete(&self) -> bool {
        self.delete
    }

    #[must_use]
    pub const fn dry_run(&self) -> bool {
        self.dry_run
    }

    fn is_interrupted(&self) -> bool {
        self.interrupt
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }
}

/// Operation for `identifier` given the pre-run snapshot and the mirrors
/// already created earlier in this run.
#[must_use]
pub fn classify(
    snapshot: &BTreeSet<MirrorIdentifier>,
    created: &BTreeSet<MirrorIdentifier>,
    identifier: &MirrorIdentifier,
) -> SyncAction {
    if snapshot.contains(identifier) || created.contains(identifier) {
        SyncAction::Update
    } else {
        SyncAction::Mirror
    }
}

/// Local mirrors that no desired repository maps to, in sorted order.
#[must_use]
pub fn deletion_set(
    snapshot: &BTreeSet<MirrorIdentifier>,
    desired: &[DesiredRepository],
) -> BTreeSet<MirrorIdentifier> {
    let wanted: BTreeSet<MirrorIdentifier> =
        desired.iter().map(DesiredRepository::identifier).collect();
    snapshot.difference(&wanted).cloned().collect()
}

/// Drives a [`MirrorExecutor`] until the mirror root matches the desired list.
pub struct Reconciler<'a, E: MirrorExecutor + ?Sized> {
    executor: &'a E,
    reporter: SharedReporter,
    options: SyncOptions,
}

impl<'a, E: MirrorExecutor + ?Sized> Reconciler<'a, E> {
    #[must_use]
    pub fn new(executor: &'a E, reporter: SharedReporter, options: SyncOptions) -> Self {
        Self {
            executor,
            reporter,
            options,
        }
    }

    /// Run one reconciliation pass.
    ///
    /// # Errors
    ///
    /// Returns an error only if the executor's root cannot be listed. Failures of
    /// individual repositories end up in [`SyncReport::failures`].
    pub fn run(&self, desired: &[DesiredRepository]) -> Result<SyncReport> {
        let root = self.executor.root();
        let snapshot = list_local_mirrors(root)
            .with_context(|| format!("failed to list mirrors in {}", root.display()))?;

        let mut report = SyncReport {
            dry_run: self.options.dry_run(),
            ..SyncReport::default()
        };
        let mut created = BTreeSet::new();

        for repo in desired {
            if self.options.is_interrupted() {
                report.interrupted = true;
                break;
            }

            let identifier = repo.identifier();
            let action = classify(&snapshot.present, &created, &identifier);

            let result = self.apply(action, &repo.clone_url, || match action {
                SyncAction::Update => self.executor.update(repo),
                _ => self.executor.create(repo),
            });

            match result {
                Ok(()) => {
                    if action == SyncAction::Mirror {
                        created.insert(identifier.clone());
                        report.mirrored.push(identifier);
                    } else {
                        report.updated.push(identifier);
                    }
                }
                Err(failure) => {
                    // the clone itself worked, the directory is there
                    if action == SyncAction::Mirror && failure.cloned {
                        created.insert(identifier);
                    }
                    report.failures.push(failure.record);
                }
            }
        }

        if self.options.delete() && !report.interrupted {
            for identifier in deletion_set(&snapshot.owned, desired) {
                if self.options.is_interrupted() {
                    report.interrupted = true;
                    break;
                }

                match self.apply(SyncAction::Delete, identifier.as_str(), || {
                    self.executor.delete(&identifier)
                }) {
                    Ok(()) => report.deleted.push(identifier),
                    Err(failure) => report.failures.push(failure.record),
                }
            }
        }

        self.reporter.finished(&report);
        Ok(report)
    }

    /// Report and execute one operation, converting its error into a failure record.
    fn apply(
        &self,
        action: SyncAction,
        subject: &str,
        op: impl FnOnce() -> MirrorResult<()>,
    ) -> std::result::Result<(), Failure> {
        if self.options.dry_run() {
            self.reporter.skipped(action, subject);
            return Ok(());
        }

        self.reporter.started(action, subject);
        op().map_err(|error| {
            self.reporter.failed(action, subject, &error);
            Failure {
                cloned: matches!(error, MirrorError::Metadata(_)),
                record: SyncFailure {
                    action,
                    subject: subject.to_string(),
                    message: error.to_string(),
                },
            }
        })
    }
}

struct Failure {
    /// The git part succeeded and only metadata failed.
    cloned: bool,
    record: SyncFailure,
}
