// git-mirror: Bare Repository Mirror Synchronizer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration types for git-mirror.
//!
//! # Config Structure
//!
//! ```text
//! Config: GlobalConfig, MirrorConfig, DiscoverConfig
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::logging::{LogLevel, LogRotation};

/// Global configuration options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Log intended mirror operations without running them.
    pub dry: bool,
    /// Log level for console output (0-6).
    pub output_log_level: LogLevel,
    /// Log level for file output (0-6).
    pub file_log_level: LogLevel,
    /// Path to log file.
    pub log_file: PathBuf,
    /// Rotation policy of the log file.
    pub log_rotation: LogRotation,
    /// Number of rotated log files kept.
    pub max_log_files: usize,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            dry: false,
            output_log_level: LogLevel::INFO,
            file_log_level: LogLevel::TRACE,
            log_file: PathBuf::from("git-mirror.log"),
            log_rotation: LogRotation::Daily,
            max_log_files: 3,
        }
    }
}

/// Mirror root and git settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MirrorConfig {
    /// Directory holding the bare mirrors.
    pub root: PathBuf,
    /// git executable name or path.
    pub git: String,
}

impl Default for MirrorConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            git: "git".to_string(),
        }
    }
}

/// Settings for the repository list producers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DiscoverConfig {
    /// User-Agent header sent with every request.
    pub user_agent: String,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    /// Extra attempts after the first failed one.
    pub retries: u32,
    pub retry_interval_secs: u64,
    /// Base URL of the GitHub REST API.
    pub github_api: String,
    /// Repository names or glob patterns to skip.
    pub excludes: Vec<String>,
}

impl Default for DiscoverConfig {
    fn default() -> Self {
        Self {
            user_agent: format!("git-mirror/{}", env!("CARGO_PKG_VERSION")),
            connect_timeout_secs: 15,
            request_timeout_secs: 15,
            retries: 3,
            retry_interval_secs: 3,
            github_api: "https://api.github.com".to_string(),
            excludes: Vec::new(),
        }
    }
}

impl DiscoverConfig {
    #[must_use]
    pub const fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    #[must_use]
    pub const fn retry_interval(&self) -> Duration {
        Duration::from_secs(self.retry_interval_secs)
    }
}
