//! Shared configuration loader for the mowen toolchain.
//!
//! `defaults/mowen.default.toml` is embedded into every binary so that docs
//! and runtime behavior stay in sync. Applications layer user-specific files
//! on top of those defaults via [`Loader`] before deserializing into
//! [`MowenConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use mowen_notes::{MowenClient, NoteSettings};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/mowen.default.toml");

/// Top-level configuration consumed by mowen applications.
#[derive(Debug, Clone, Deserialize)]
pub struct MowenConfig {
    pub api: ApiConfig,
    pub publish: PublishConfig,
}

/// Endpoint and credentials for the Mowen OpenAPI.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub key: String,
}

/// Mirrors the platform-side publication settings.
#[derive(Debug, Clone, Deserialize)]
pub struct PublishConfig {
    pub auto_publish: bool,
}

impl From<PublishConfig> for NoteSettings {
    fn from(config: PublishConfig) -> Self {
        NoteSettings {
            auto_publish: config.auto_publish,
        }
    }
}

impl From<&PublishConfig> for NoteSettings {
    fn from(config: &PublishConfig) -> Self {
        NoteSettings {
            auto_publish: config.auto_publish,
        }
    }
}

impl From<ApiConfig> for MowenClient {
    fn from(config: ApiConfig) -> Self {
        MowenClient::with_base_url(config.key, config.base_url)
    }
}

impl From<&ApiConfig> for MowenClient {
    fn from(config: &ApiConfig) -> Self {
        MowenClient::with_base_url(config.key.clone(), config.base_url.clone())
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

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<MowenConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<MowenConfig, ConfigError> {
    Loader::new().build()
}
