// git-mirror: Bare Repository Mirror Synchronizer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management for git-mirror.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. git-mirror.toml (cwd, optional)
//! 3. --config FILE (repeatable)
//! 4. GIT_MIRROR_* env vars
//! 5. CLI overrides
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! GIT_MIRROR_GLOBAL__DRY=true          → global.dry = true
//! GIT_MIRROR_MIRROR__ROOT=/srv/git     → mirror.root = "/srv/git"
//! GIT_MIRROR_DISCOVER__RETRIES=5       → discover.retries = 5
//! ```
//!
//! The declarative repository list is not part of this configuration,
//! see [`crate::mirror::manifest`].

pub mod loader;
pub mod types;


use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{ConfigError, Result};

use loader::ConfigLoader;
use types::{DiscoverConfig, GlobalConfig, MirrorConfig};

/// Name of the configuration file picked up from the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "git-mirror.toml";

/// Prefix of configuration environment variables.
pub const ENV_PREFIX: &str = "GIT_MIRROR";

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Global options.
    pub global: GlobalConfig,
    /// Mirror root and git executable.
    pub mirror: MirrorConfig,
    /// Repository list producers.
    pub discover: DiscoverConfig,
}

impl Config {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use git_mirror::config::Config;
    ///
    /// let config = Config::builder()
    ///     .add_toml_file_optional("git-mirror.toml")
    ///     .with_env_prefix("GIT_MIRROR")
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load configuration from a single TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, contains invalid TOML, or
    /// does not match the `Config` structure.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::builder().add_toml_file(path).build()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or does not match the
    /// `Config` structure.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// Reject values that deserialize fine but cannot work.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::InvalidValue` naming the offending key.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.mirror.git.trim().is_empty() {
            return Err(invalid("mirror", "git", "must name a git executable"));
        }
        if self.mirror.root.as_os_str().is_empty() {
            return Err(invalid("mirror", "root", "must not be empty"));
        }
        if self.global.max_log_files == 0 {
            return Err(invalid("global", "max_log_files", "must be at least 1"));
        }
        if self.discover.request_timeout_secs == 0 {
            return Err(invalid(
                "discover",
                "request_timeout_secs",
                "must be at least 1",
            ));
        }
        if url::Url::parse(&self.discover.github_api).is_err() {
            return Err(invalid("discover", "github_api", "must be an absolute URL"));
        }
        Ok(())
    }
}

fn invalid(section: &str, key: &str, message: &str) -> ConfigError {
    ConfigError::InvalidValue {
        section: section.to_string(),
        key: key.to_string(),
        message: message.to_string(),
    }
}
