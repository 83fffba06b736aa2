// git-mirror: Bare Repository Mirror Synchronizer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::ffi::OsStr;
use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

use super::GitCli;
use crate::error::{ExecutionError, MirrorError, ProcessError};

fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("failed to create temp dir")
}

/// Initialize a git repository with an initial commit.
fn init_test_repo_with_commit(path: &Path) -> std::io::Result<()> {
    let output = Command::new("git")
        .args(["init", "--quiet"])
        .current_dir(path)
        .output()?;
    if !output.status.success() {
        return Err(std::io::Error::other(
            String::from_utf8_lossy(&output.stderr).to_string(),
        ));
    }

    Command::new("git")
        .args(["config", "user.email", "test@example.com"])
        .current_dir(path)
        .output()?;
    Command::new("git")
        .args(["config", "user.name", "Test"])
        .current_dir(path)
        .output()?;

    let output = Command::new("git")
        .args(["commit", "--allow-empty", "-m", "Initial commit", "--quiet"])
        .current_dir(path)
        .output()?;
    if !output.status.success() {
        return Err(std::io::Error::other(
            String::from_utf8_lossy(&output.stderr).to_string(),
        ));
    }
    Ok(())
}

#[test]
fn test_locate_missing_binary() {
    let err = GitCli::locate("git-mirror-no-such-binary-xyz").unwrap_err();
    assert!(
        matches!(
            err,
            MirrorError::Process(ref e) if matches!(**e, ProcessError::ExecutableNotFound { .. })
        ),
        "got {err:?}"
    );
}

#[test]
fn test_new_keeps_program() {
    let git = GitCli::new("/opt/git/bin/git");
    assert_eq!(git.program(), Path::new("/opt/git/bin/git"));
}

#[test]
fn test_run_reports_exit_code_and_stderr() {
    let temp = temp_dir();
    let git = GitCli::new("git");

    let err = git
        .run(
            &[OsStr::new("--git-dir"), OsStr::new("absent.git"), OsStr::new("fetch")],
            temp.path(),
        )
        .unwrap_err();

    let MirrorError::Execution(inner) = err else {
        panic!("expected execution error, got {err:?}");
    };
    let ExecutionError::CommandFailed {
        command,
        code,
        message,
    } = *inner;
    assert_eq!(command, "git --git-dir absent.git fetch");
    assert!(code.is_some_and(|c| c != 0));
    assert!(!message.is_empty());
}

#[test]
fn test_run_missing_program_is_spawn_failure() {
    let temp = temp_dir();
    let git = GitCli::new(temp.path().join("no-git-here"));

    let err = git.run(&[OsStr::new("--version")], temp.path()).unwrap_err();
    assert!(matches!(err, MirrorError::Process(_)), "got {err:?}");
}

#[test]
fn test_clone_mirror_then_update() {
    let temp = temp_dir();
    let upstream = temp.path().join("upstream");
    std::fs::create_dir(&upstream).unwrap();
    init_test_repo_with_commit(&upstream).unwrap();

    let root = temp.path().join("mirrors");
    std::fs::create_dir(&root).unwrap();
    let dest = root.join("upstream.git");
    let git = GitCli::new("git");

    git.clone_mirror(&upstream.to_string_lossy(), &dest).unwrap();
    assert!(dest.join("HEAD").is_file());
    assert!(dest.join("config").is_file());

    let bare = git
        .run(
            &[OsStr::new("rev-parse"), OsStr::new("--is-bare-repository")],
            &dest,
        )
        .unwrap();
    assert_eq!(bare, "true");

    git.remote_update_prune(&dest).unwrap();
}

#[test]
fn test_clone_mirror_unreachable_source() {
    let temp = temp_dir();
    let git = GitCli::new("git");
    let source = temp.path().join("does-not-exist");

    let err = git
        .clone_mirror(&source.to_string_lossy(), &temp.path().join("x.git"))
        .unwrap_err();

    assert!(matches!(err, MirrorError::Execution(_)), "got {err:?}");
    assert!(!temp.path().join("x.git").exists());
}
