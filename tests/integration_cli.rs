// git-mirror: Bare Repository Mirror Synchronizer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for CLI parsing.
//!
//! Tests the CLI module with realistic command-line argument patterns.

use clap::Parser;
use git_mirror::cli::discover::DiscoverSource;
use git_mirror::cli::{Cli, Command};

// =============================================================================
// Version Command
// =============================================================================

#[test]
fn cli_version_alias() {
    let cli = Cli::try_parse_from(["git-mirror", "-v"]).unwrap();
    assert!(matches!(cli.command, Some(Command::Version)));
}

// =============================================================================
// Sync Command
// =============================================================================

#[test]
fn cli_sync_delete() {
    let cli = Cli::try_parse_from(["git-mirror", "sync", "repos.json", "--delete"]).unwrap();
    insta::assert_debug_snapshot!(cli, @r#"
    Cli {
        global: GlobalOptions {
            configs: [],
            dry: false,
            log_level: None,
            file_log_level: None,
            log_file: None,
        },
        command: Some(
            Sync(
                SyncArgs {
                    file: "repos.json",
                    delete: true,
                },
            ),
        ),
    }
    "#);
}

#[test]
fn cli_sync_rejects_extra_positional() {
    let result = Cli::try_parse_from(["git-mirror", "sync", "a.json", "b.json"]);
    assert!(result.is_err());
}

#[test]
fn cli_sync_rejects_unknown_flag() {
    let result = Cli::try_parse_from(["git-mirror", "sync", "repos.json", "--force"]);
    assert!(result.is_err());
}

// =============================================================================
// Discover Command
// =============================================================================

#[test]
fn cli_discover_requires_source() {
    let result = Cli::try_parse_from(["git-mirror", "discover"]);
    assert!(result.is_err());
}

#[test]
fn cli_discover_cgit_with_output() {
    let cli = Cli::try_parse_from([
        "git-mirror",
        "discover",
        "cgit",
        "https://git.yoctoproject.org/cgit.cgi/",
        "--output",
        "yocto_repos.json",
        "--exclude",
        "yocto-testresults",
    ])
    .unwrap();

    let Some(Command::Discover(args)) = cli.command else {
        panic!("expected discover command");
    };
    let DiscoverSource::Cgit(cgit) = args.source else {
        panic!("expected cgit source");
    };
    assert_eq!(
        cgit.output.output.as_deref(),
        Some(std::path::Path::new("yocto_repos.json"))
    );
    assert_eq!(cgit.output.excludes, vec!["yocto-testresults"]);
}

#[test]
fn cli_discover_unknown_source() {
    let result = Cli::try_parse_from(["git-mirror", "discover", "gitlab", "user"]);
    assert!(result.is_err());
}
