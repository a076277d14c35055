//! Shared configuration loader for notion-md.
//!
//! `defaults/notion.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`NotionConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, File, FileFormat, ValueKind};
use notion_babel::common::fetch::FetchOptions;
use notion_babel::formats::markdown::{MarkdownRules, ToggleStyle};
use notion_babel::source::http::ClientOptions;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

pub use config::ConfigError;

const DEFAULT_TOML: &str = include_str!("../defaults/notion.default.toml");

/// File picked up from the working directory when present.
pub const LOCAL_CONFIG_FILE: &str = "notion.toml";

/// Top-level configuration consumed by notion-md.
#[derive(Debug, Clone, Deserialize)]
pub struct NotionConfig {
    pub api: ApiConfig,
    pub fetch: FetchConfig,
    pub render: RenderConfig,
}

impl NotionConfig {
    /// Fetch options combine the traversal bound with the API batch size.
    pub fn fetch_options(&self) -> FetchOptions {
        FetchOptions {
            page_size: self.api.page_size,
            max_depth: self.fetch.max_depth,
        }
    }
}

/// Connection settings for the REST API.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub version: String,
    /// Name of the environment variable holding the token.
    pub token_env: String,
    pub page_size: u32,
    pub timeout_secs: u64,
}

impl From<&ApiConfig> for ClientOptions {
    fn from(config: &ApiConfig) -> Self {
        ClientOptions {
            base_url: config.base_url.clone(),
            version: config.version.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct FetchConfig {
    pub max_depth: usize,
}

/// Mirrors the knobs exposed by the Markdown serializer.
#[derive(Debug, Clone, Deserialize)]
pub struct RenderConfig {
    pub indent_unit: String,
    pub toggle_style: ToggleStyle,
    pub include_properties: bool,
    pub page_url_base: String,
    pub timestamp_format: String,
    pub date_format: String,
}

impl From<RenderConfig> for MarkdownRules {
    fn from(config: RenderConfig) -> Self {
        MarkdownRules {
            indent_unit: config.indent_unit,
            toggle_style: config.toggle_style,
            include_properties: config.include_properties,
            page_url_base: config.page_url_base,
            timestamp_format: config.timestamp_format,
            date_format: config.date_format,
        }
    }
}

impl From<&RenderConfig> for MarkdownRules {
    fn from(config: &RenderConfig) -> Self {
        config.clone().into()
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
    pub fn build(self) -> Result<NotionConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<NotionConfig, ConfigError> {
    Loader::new().build()
}
