// git-mirror: Bare Repository Mirror Synchronizer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use clap::Args;
use std::path::PathBuf;

/// Arguments of `git-mirror sync`.
#[derive(Debug, Clone, Args)]
pub struct SyncArgs {
    /// JSON repository list (array of objects with an `https` URL).
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Deletes local mirrors that are not in the list.
    #[arg(short = 'd', long)]
    pub delete: bool,
}
