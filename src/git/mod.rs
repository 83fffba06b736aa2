// git-mirror: Bare Repository Mirror Synchronizer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git command-line backend.
//!
//! ```text
//! MirrorExecutor --> GitCli --> git (PATH or mirror.git)
//!                    .clone_mirror         git clone --mirror URL DEST
//!                    .remote_update_prune  git --git-dir DIR remote update --prune
//! ```
//!
//! Only the exit status is interpreted: 0 is success, anything else is an
//! `ExecutionError` carrying git's stderr. There is no timeout; a hanging
//! git blocks the run.

pub mod shell;

pub use shell::GitCli;

#[cfg(test)]
mod tests;
