// git-mirror: Bare Repository Mirror Synchronizer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `git-mirror discover` implementation.

use std::path::PathBuf;

use tracing::info;

use crate::cli::discover::{DiscoverArgs, DiscoverSource, OutputArgs};
use crate::config::Config;
use crate::discover::{CgitDiscoverer, Excludes, GithubDiscoverer, export_listing};
use crate::error::{MirrorError, Result};
use crate::net::{FetchPolicy, PageFetcher};

/// Main handler for the discover command.
///
/// Returns the path of the written repository list.
///
/// # Errors
///
/// Returns an error if an exclude pattern is invalid, the source cannot be
/// read, nothing was found, or the list cannot be written.
pub async fn run_discover_command(args: &DiscoverArgs, config: &Config) -> Result<PathBuf> {
    let output_args = match &args.source {
        DiscoverSource::Github(github) => &github.output,
        DiscoverSource::Cgit(cgit) => &cgit.output,
    };
    let excludes = build_excludes(config, output_args)?;
    let fetcher = PageFetcher::new(FetchPolicy::from(&config.discover))?;

    let (listing, default_output) = match &args.source {
        DiscoverSource::Github(github) => {
            let discoverer = GithubDiscoverer::new(
                &fetcher,
                &config.discover.github_api,
                github.user.as_str(),
                &excludes,
            );
            (discoverer.collect().await, discoverer.default_output())
        }
        DiscoverSource::Cgit(cgit) => {
            let discoverer = CgitDiscoverer::new(&fetcher, &cgit.index_url, &excludes)?;
            (
                discoverer.collect().await?,
                discoverer.default_output().to_string(),
            )
        }
    };

    let path = output_args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(default_output));
    export_listing(&listing, &path)?;
    info!("{} repositories written to {}", listing.len(), path.display());

    Ok(path)
}

/// Configured excludes followed by the ones given on the command line.
fn build_excludes(config: &Config, args: &OutputArgs) -> Result<Excludes> {
    let patterns = config.discover.excludes.iter().chain(&args.excludes);
    let excludes = Excludes::new(patterns).map_err(MirrorError::from)?;
    Ok(excludes)
}
