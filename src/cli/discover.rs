// git-mirror: Bare Repository Mirror Synchronizer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `git-mirror discover` arguments.
//!
//! ```text
//! discover github <USER>      [-o FILE] [-x PATTERN]...
//! discover cgit <INDEX_URL>   [-o FILE] [-x PATTERN]...
//! ```

use clap::{Args, Subcommand};
use std::path::PathBuf;

/// Arguments of `git-mirror discover`.
#[derive(Debug, Clone, Args)]
pub struct DiscoverArgs {
    #[command(subcommand)]
    pub source: DiscoverSource,
}

/// Where repositories are discovered.
#[derive(Debug, Clone, Subcommand)]
pub enum DiscoverSource {
    /// Lists the public repositories of a GitHub user.
    Github(GithubArgs),

    /// Lists the repositories of a cgit index page.
    Cgit(CgitArgs),
}

#[derive(Debug, Clone, Args)]
pub struct GithubArgs {
    /// GitHub user name.
    #[arg(value_name = "USER")]
    pub user: String,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, Clone, Args)]
pub struct CgitArgs {
    /// URL of the cgit repository index.
    #[arg(value_name = "INDEX_URL")]
    pub index_url: String,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Options shared by all sources.
#[derive(Debug, Clone, Default, Args)]
pub struct OutputArgs {
    /// Output file (default depends on the source).
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Repository name or glob to skip, added to `discover.excludes`.
    /// Can be specified multiple times.
    #[arg(short = 'x', long = "exclude", value_name = "PATTERN", action = clap::ArgAction::Append)]
    pub excludes: Vec<String>,
}
