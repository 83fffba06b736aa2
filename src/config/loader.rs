// git-mirror: Bare Repository Mirror Synchronizer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Layered configuration loading.
//!
//! ```text
//! ConfigLoader::new()
//!   .add_toml_file_optional("git-mirror.toml")   layer, skipped when absent
//!   .add_toml_file(--config FILE)                layer, must exist
//!   .with_env_prefix("GIT_MIRROR")               applied last, at build()
//!   .set("global.dry", true)                     CLI override, wins over all
//!        |
//!   build() --> deserialize --> Config::validate --> Config
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use config::builder::DefaultState;
use config::{ConfigBuilder, Environment, File, FileFormat};

use super::Config;
use crate::error::{ConfigError, Result};

/// Top-level tables of [`Config`]; override keys must start with one of them.
pub const SECTIONS: [&str; 3] = ["global", "mirror", "discover"];

/// Origin of one configuration layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// A TOML file that existed when it was added.
    File(PathBuf),
    /// TOML given as a string.
    Inline,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Inline => f.write_str("<inline>"),
        }
    }
}

/// Collects configuration layers and produces a validated [`Config`].
pub struct ConfigLoader {
    layers: ConfigBuilder<DefaultState>,
    env_prefix: Option<String>,
    sources: Vec<ConfigSource>,
}

impl ConfigLoader {
    #[must_use]
    pub fn new() -> Self {
        Self {
            layers: config::Config::builder(),
            env_prefix: None,
            sources: Vec::new(),
        }
    }

    /// Layer a TOML file that must exist; `build()` fails otherwise.
    #[must_use]
    pub fn add_toml_file<P: AsRef<Path>>(self, path: P) -> Self {
        self.add_file(path.as_ref(), true)
    }

    /// Layer a TOML file if it exists.
    #[must_use]
    pub fn add_toml_file_optional<P: AsRef<Path>>(self, path: P) -> Self {
        self.add_file(path.as_ref(), false)
    }

    #[must_use]
    pub fn add_toml_str(mut self, content: &str) -> Self {
        self.layers = self
            .layers
            .add_source(File::from_str(content, FileFormat::Toml));
        self.sources.push(ConfigSource::Inline);
        self
    }

    /// Read `<PREFIX>_<SECTION>__<KEY>` variables,
    /// e.g. `GIT_MIRROR_MIRROR__ROOT=/srv/git`.
    #[must_use]
    pub fn with_env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = Some(prefix.to_string());
        self
    }

    /// Override `key` (`section.field`) regardless of files and environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if `key` is not inside one of
    /// [`SECTIONS`], or an error from the `config` crate if it cannot be set.
    pub fn set<T: Into<config::Value>>(mut self, key: &str, value: T) -> Result<Self> {
        let section = key.split('.').next().unwrap_or(key);
        if !SECTIONS.contains(&section) || !key.contains('.') {
            return Err(ConfigError::InvalidValue {
                section: section.to_string(),
                key: key.to_string(),
                message: format!("override keys must be one of {SECTIONS:?} plus a field"),
            }
            .into());
        }
        self.layers = self.layers.set_override(key, value)?;
        Ok(self)
    }

    /// Layers actually read, in order. Optional files that were missing are
    /// not listed.
    #[must_use]
    pub fn sources(&self) -> &[ConfigSource] {
        &self.sources
    }

    /// Merge all layers and validate the result.
    ///
    /// # Errors
    ///
    /// Returns an error if a required file is missing, a layer is not valid
    /// TOML, an environment variable does not parse, a key is unknown, or
    /// [`Config::validate`] rejects a value.
    pub fn build(self) -> Result<Config> {
        let mut layers = self.layers;
        if let Some(prefix) = &self.env_prefix {
            layers = layers.add_source(
                Environment::with_prefix(prefix)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );
        }

        let config: Config = layers.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn add_file(mut self, path: &Path, required: bool) -> Self {
        self.layers = self
            .layers
            .add_source(File::from(path).format(FileFormat::Toml).required(required));
        if required || path.exists() {
            self.sources.push(ConfigSource::File(path.to_path_buf()));
        }
        self
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
