// git-mirror: Bare Repository Mirror Synchronizer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Mirror reconciliation.
//!
//! ```text
//! repos.json --> manifest --> [DesiredRepository]
//!                                   |
//! <root>/*.git --> inventory --> snapshot
//!                                   |
//!                                   v
//!                              Reconciler ---> SyncReporter
//!                                   |
//!                                   v
//!                           MirrorExecutor (GitExecutor)
//!                           clone / fetch / metadata / remove
//! ```

pub mod executor;
pub mod identifier;
pub mod inventory;
pub mod manifest;
pub mod metadata;
pub mod reconcile;
pub mod remove;
pub mod report;

pub use executor::{GitExecutor, MirrorExecutor};
pub use identifier::MirrorIdentifier;
pub use inventory::{LocalMirrors, list_local_mirrors};
pub use manifest::{DesiredRepository, load_manifest};
pub use reconcile::{Reconciler, SyncOptions};
pub use report::{SharedReporter, SyncAction, SyncReport, SyncReporter, TracingReporter};

#[cfg(test)]
mod test_utils;
