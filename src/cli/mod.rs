// git-mirror: Bare Repository Mirror Synchronizer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for git-mirror using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! git-mirror [global options] <command>
//! version
//! sync <FILE> [--delete]
//! discover {github <USER> | cgit <INDEX_URL>} [-o FILE] [-x PATTERN]...
//! ```

pub mod discover;
pub mod global;
pub mod sync;


use crate::cli::discover::DiscoverArgs;
use crate::cli::global::GlobalOptions;
use crate::cli::sync::SyncArgs;
use clap::{Parser, Subcommand};

/// Bare Repository Mirror Synchronizer
///
/// Keeps a directory of bare git mirrors in sync with a repository list.
#[derive(Debug, Parser)]
#[command(
    name = "git-mirror",
    author,
    version,
    about = "Bare Repository Mirror Synchronizer",
    long_about = "git-mirror Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Keeps a directory of bare git mirrors in sync with a JSON\n\
                  repository list. `git-mirror discover` builds such a list from\n\
                  a GitHub user or a cgit index, `git-mirror sync repos.json`\n\
                  clones what is missing and fetches what exists. See\n\
                  `git-mirror <command> --help` for more information about a command.",
    after_help = "CONFIGURATION:\n\n\
                  git-mirror reads `git-mirror.toml` from the current directory if\n\
                  present, then every file given with --config, then GIT_MIRROR_*\n\
                  environment variables (e.g. GIT_MIRROR_MIRROR__ROOT=/srv/git).\n\
                  Command-line flags override all of them."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Shows the version.
    #[command(visible_alias = "-v")]
    Version,

    /// Mirrors every repository of a list, optionally deleting unlisted ones.
    Sync(SyncArgs),

    /// Builds a repository list from a hosting platform.
    Discover(DiscoverArgs),
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}
