// git-mirror: Bare Repository Mirror Synchronizer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::trace;

use crate::error::{ExecutionError, MirrorResult, ProcessError};

/// Shell-based git backend.
#[derive(Debug, Clone)]
pub struct GitCli {
    program: PathBuf,
}

impl GitCli {
    /// Use `program` as-is, without checking it exists.
    #[must_use]
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Resolve `name` (a bare name looked up on `PATH`, or a path).
    ///
    /// # Errors
    ///
    /// Returns `ProcessError::ExecutableNotFound` if nothing executable matches.
    pub fn locate(name: &str) -> MirrorResult<Self> {
        let program = which::which(name).map_err(|_| ProcessError::ExecutableNotFound {
            name: name.to_string(),
        })?;
        Ok(Self { program })
    }

    #[must_use]
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Create a bare mirror of `url` at `dest`.
    ///
    /// Runs in the parent of `dest` so relative destinations behave the same
    /// as an interactive `git clone --mirror`.
    ///
    /// # Errors
    ///
    /// Returns an `ExecutionError` if git exits non-zero, or a `ProcessError`
    /// if git cannot be started.
    pub fn clone_mirror(&self, url: &str, dest: &Path) -> MirrorResult<()> {
        let (parent, dest_name) = split_parent(dest);
        self.run(
            &[
                OsStr::new("clone"),
                OsStr::new("--mirror"),
                OsStr::new("--quiet"),
                OsStr::new("--"),
                OsStr::new(url),
                dest_name,
            ],
            parent,
        )?;
        Ok(())
    }

    /// Fetch every remote of the bare repository at `git_dir`, pruning refs
    /// deleted upstream.
    ///
    /// # Errors
    ///
    /// Returns an `ExecutionError` if git exits non-zero, or a `ProcessError`
    /// if git cannot be started.
    pub fn remote_update_prune(&self, git_dir: &Path) -> MirrorResult<()> {
        let (cwd, dir_name) = split_parent(git_dir);
        self.run(
            &[
                OsStr::new("--git-dir"),
                dir_name,
                OsStr::new("remote"),
                OsStr::new("update"),
                OsStr::new("--prune"),
            ],
            cwd,
        )?;
        Ok(())
    }

    /// Execute git. Sets `GCM_INTERACTIVE=never` and `GIT_TERMINAL_PROMPT=0`
    /// and closes stdin so credential prompts fail instead of blocking.
    ///
    /// Returns trimmed stdout.
    pub(crate) fn run(&self, args: &[&OsStr], cwd: &Path) -> MirrorResult<String> {
        let command_line = self.command_line(args);
        trace!(cwd = %cwd.display(), "{command_line}");

        let output = Command::new(&self.program)
            .args(args)
            .current_dir(cwd)
            .env("GCM_INTERACTIVE", "never")
            .env("GIT_TERMINAL_PROMPT", "0")
            .stdin(Stdio::null())
            .output()
            .map_err(|source| ProcessError::SpawnFailed {
                command: command_line.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(ExecutionError::CommandFailed {
                command: command_line,
                code: output.status.code(),
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            }
            .into());
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    #[allow(clippy::unused_self)]
    fn command_line(&self, args: &[&OsStr]) -> String {
        let mut line = String::from("git");
        for arg in args {
            line.push(' ');
            line.push_str(&arg.to_string_lossy());
        }
        line
    }
}

/// Parent directory to run git in, and the name to pass relative to it.
fn split_parent(path: &Path) -> (&Path, &OsStr) {
    let parent = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let name = path.file_name().unwrap_or(path.as_os_str());
    (parent, name)
}
