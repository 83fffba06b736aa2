// git-mirror: Bare Repository Mirror Synchronizer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!              MirrorError (16 bytes)
//!                      |
//!   +-------+------+---+-----+--------+-------+
//!   |       |      |         |        |       |
//!   v       v      v         v        v       v
//! Config   Exec  Metadata  Deletion Process  Net
//!  Box     Box     Box       Box      Box    Box
//!
//! Sub-errors (unboxed internally):
//!   Config    ReadError, ParseError, InvalidEntry, InvalidValue
//!   Execution CommandFailed (git exited non-zero)
//!   Metadata  description / git-daemon-export-ok write failed
//!   Deletion  removal failed after read-only recovery
//!   Process   ExecutableNotFound, SpawnFailed
//!   Network   HttpError, Reqwest, InvalidUrl, RetriesExhausted, Decode
//! ```
//!
//! `Config` errors abort a sync run. The other per-repository
//! errors are caught at the reconciler loop and recorded in the report.
//! Application code above the library layer uses `anyhow` via [`Result`].

use std::path::PathBuf;

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`MirrorError`].
pub type MirrorResult<T> = std::result::Result<T, MirrorError>;

/// Top-level application error type.
///
/// All sub-errors are boxed to keep this enum small on the stack.
#[derive(Debug, Error)]
pub enum MirrorError {
    /// Configuration or repository list error.
    #[error("config error: {0}")]
    Config(#[from] Box<ConfigError>),

    /// External git invocation failed.
    #[error("execution error: {0}")]
    Execution(#[from] Box<ExecutionError>),

    /// Mirror metadata could not be written.
    #[error("metadata error: {0}")]
    Metadata(#[from] Box<MetadataWriteError>),

    /// Mirror directory could not be removed.
    #[error("deletion error: {0}")]
    Deletion(#[from] Box<DeletionError>),

    /// Process could not be started.
    #[error("process error: {0}")]
    Process(#[from] Box<ProcessError>),

    /// Network operation failed.
    #[error("network error: {0}")]
    Network(#[from] Box<NetworkError>),
}

// --- From implementations for boxing ---

/// Macro to generate `From` implementations that box the source error.
macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for MirrorError {
                fn from(err: $error) -> Self {
                    MirrorError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    ConfigError => Config,
    ExecutionError => Execution,
    MetadataWriteError => Metadata,
    DeletionError => Deletion,
    ProcessError => Process,
    NetworkError => Network,
}

// --- Config Errors ---

/// Configuration and repository list errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read a file.
    #[error("failed to read '{path}': {source}")]
    ReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse a file.
    #[error("failed to parse '{path}': {message}")]
    ParseError { path: String, message: String },

    /// A repository list entry is unusable.
    #[error("invalid entry #{index} in '{path}': {message}")]
    InvalidEntry {
        path: String,
        index: usize,
        message: String,
    },

    /// Invalid configuration value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },
}

// --- Execution Errors ---

/// Failures of the external git process.
#[derive(Debug, Error)]
pub enum ExecutionError {
    /// git exited with a non-zero status.
    #[error("'{command}' exited with {}: {message}", exit_code_label(*.code))]
    CommandFailed {
        command: String,
        code: Option<i32>,
        message: String,
    },
}

fn exit_code_label(code: Option<i32>) -> String {
    code.map_or_else(|| "signal".to_string(), |c| format!("code {c}"))
}

// --- Metadata Errors ---

/// Writing the description record or the export marker failed.
#[derive(Debug, Error)]
#[error("failed to write '{}': {source}", .path.display())]
pub struct MetadataWriteError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

// --- Deletion Errors ---

/// Removing a mirror directory failed, even after clearing read-only bits.
#[derive(Debug, Error)]
#[error("failed to remove '{}': {source}", .path.display())]
pub struct DeletionError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

// --- Process Errors ---

/// Process start-up errors.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// Executable not found in PATH.
    #[error("executable not found: '{name}' (not in PATH)")]
    ExecutableNotFound { name: String },

    /// Failed to spawn process.
    #[error("failed to spawn process '{command}': {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },
}

// --- Network Errors ---

/// Network operation errors.
#[derive(Debug, Error)]
pub enum NetworkError {
    /// HTTP error response.
    #[error("http error {status}: {url}")]
    HttpError { status: u16, url: String },

    /// Error from reqwest library.
    #[error("reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),

    /// Invalid URL.
    #[error("invalid url: {0}")]
    InvalidUrl(String),

    /// Every attempt to fetch a page failed.
    #[error("giving up on {url} after {attempts} attempts: {last}")]
    RetriesExhausted {
        url: String,
        attempts: u32,
        last: String,
    },

    /// The response body did not have the expected shape.
    #[error("unexpected response from {url}: {message}")]
    Decode { url: String, message: String },
}
