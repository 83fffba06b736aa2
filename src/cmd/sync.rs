// git-mirror: Bare Repository Mirror Synchronizer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `git-mirror sync` implementation.

use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use anyhow::Context;
use tracing::info;

use crate::cli::sync::SyncArgs;
use crate::config::Config;
use crate::error::{MirrorError, Result};
use crate::git::GitCli;
use crate::mirror::{
    GitExecutor, Reconciler, SharedReporter, SyncOptions, SyncReport, TracingReporter,
    load_manifest,
};

/// Main handler for the sync command.
///
/// Blocking; run it off the async runtime.
///
/// # Errors
///
/// Returns an error if the repository list cannot be loaded, git cannot be
/// found, the mirror root cannot be listed, or the run ended with failed
/// repositories or was interrupted.
pub fn run_sync_command(
    args: &SyncArgs,
    config: &Config,
    interrupt: Arc<AtomicBool>,
) -> Result<SyncReport> {
    let desired = load_manifest(&args.file).map_err(MirrorError::from)?;
    info!(
        "{} repositories listed in {}",
        desired.len(),
        args.file.display()
    );

    let git = GitCli::locate(&config.mirror.git)?;
    let root = &config.mirror.root;
    let reporter: SharedReporter = Arc::new(TracingReporter);
    let executor = GitExecutor::new(git, root, Arc::clone(&reporter));

    let options = SyncOptions::builder()
        .with_delete(args.delete)
        .with_dry_run(config.global.dry)
        .with_interrupt(interrupt)
        .build();

    let report = Reconciler::new(&executor, reporter, options)
        .run(&desired)
        .with_context(|| format!("sync of {} failed", root.display()))?;

    if report.interrupted {
        anyhow::bail!("interrupted");
    }
    if report.has_failures() {
        anyhow::bail!("{} repositories failed", report.failures.len());
    }
    Ok(report)
}
