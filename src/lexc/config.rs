//! Configuration loading.
//!
//! `defaults/lexc-check.default.toml` is embedded into every binary so that the
//! built-in exclusion table has exactly one home. Applications layer
//! user-specific files on top of those defaults via [`Loader`] before
//! deserializing into [`CheckConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../../defaults/lexc-check.default.toml");

/// Top-level configuration consumed by lexc-check.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckConfig {
    pub exclusions: ExclusionConfig,
}

/// Patterns that keep lines out of the lemma scraper.
#[derive(Debug, Clone, Deserialize)]
pub struct ExclusionConfig {
    /// Linguistic conventions shared by all lexicons, in match order.
    pub builtin: Vec<String>,
    /// Site-specific additions, matched after the built-ins.
    #[serde(default)]
    pub extra: Vec<String>,
}

impl ExclusionConfig {
    /// Built-in patterns followed by the extras.
    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.builtin
            .iter()
            .chain(self.extra.iter())
            .map(String::as_str)
    }
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<CheckConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<CheckConfig, ConfigError> {
    Loader::new().build()
}
