//! Configuration file support for godocs CLI
//!
//! Loads settings from `_godocs.toml` configuration file.

use anyhow::{Context, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default configuration file name
pub const CONFIG_FILE_NAME: &str = "_godocs.toml";

/// Schema URL for the configuration file
pub const SCHEMA_URL: &str =
    "https://raw.githubusercontent.com/godocs-godot/godocs/main/crates/godocs-cli/schema/godocs.schema.json";

/// Root configuration structure
#[derive(Debug, Default, Clone, Deserialize, Serialize, JsonSchema)]
#[serde(default)]
pub struct Config {
    /// Markup translation configuration
    #[serde(skip_serializing_if = "TranslationConfig::is_empty")]
    pub translation: TranslationConfig,
    /// Output configuration
    #[serde(skip_serializing_if = "OutputConfig::is_empty")]
    pub output: OutputConfig,
}

/// Markup translation configuration
#[derive(Debug, Default, Clone, Deserialize, Serialize, JsonSchema)]
#[serde(default)]
pub struct TranslationConfig {
    /// Target syntax: "rst" (reStructuredText) or "markdown" (default: "rst")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub syntax: Option<String>,
    /// Fail on tags the target syntax cannot render instead of dropping them (default: false)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strict: Option<bool>,
    /// Maximum nesting depth of interpreted markup; deeper content is kept as text
    /// (default: unbounded)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<usize>,
}

impl TranslationConfig {
    fn is_empty(&self) -> bool {
        self.syntax.is_none() && self.strict.is_none() && self.max_depth.is_none()
    }
}

/// Output configuration
#[derive(Debug, Default, Clone, Deserialize, Serialize, JsonSchema)]
#[serde(default)]
pub struct OutputConfig {
    /// Pretty-print JSON written by the `classes` command (default: true)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pretty: Option<bool>,
}

impl OutputConfig {
    fn is_empty(&self) -> bool {
        self.pretty.is_none()
    }
}

impl Config {
    /// Load configuration from a specific file path
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Try to load configuration from a directory (looks for `_godocs.toml`)
    ///
    /// Returns `Ok(None)` if the config file doesn't exist.
    pub fn load_from_dir(dir: &Path) -> Result<Option<Self>> {
        let config_path = dir.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            Ok(Some(Self::load(&config_path)?))
        } else {
            Ok(None)
        }
    }

    /// Generate JSON schema for the configuration
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }

    /// Generate JSON schema as a string
    pub fn json_schema_string() -> Result<String> {
        let schema = Self::json_schema();
        serde_json::to_string_pretty(&schema).context("Failed to serialize JSON schema")
    }

    /// Serialize configuration to TOML string with schema directive
    pub fn to_toml_with_schema(&self) -> Result<String> {
        let toml_content =
            toml::to_string_pretty(self).context("Failed to serialize config to TOML")?;

        Ok(format!("#:schema {}\n\n{}", SCHEMA_URL, toml_content))
    }

    /// Create a sample configuration with common defaults for init command
    pub fn sample() -> Self {
        Config {
            translation: TranslationConfig {
                syntax: Some("rst".to_string()),
                strict: Some(false),
                max_depth: None, // unbounded
            },
            output: OutputConfig { pretty: Some(true) },
        }
    }
}
