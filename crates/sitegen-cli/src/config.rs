//! Configuration file support for sitegen CLI
//!
//! Loads settings from `_sitegen.toml` configuration file.

use anyhow::{Context, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default configuration file name
pub const CONFIG_FILE_NAME: &str = "_sitegen.toml";

/// Root configuration structure
#[derive(Debug, Default, Clone, Deserialize, Serialize, JsonSchema)]
#[serde(default)]
pub struct Config {
    /// Input and output locations
    #[serde(skip_serializing_if = "PathsConfig::is_empty")]
    pub paths: PathsConfig,
    /// Build behaviour
    #[serde(skip_serializing_if = "BuildConfig::is_empty")]
    pub build: BuildConfig,
}

/// Input and output locations, relative to the working directory
#[derive(Debug, Default, Clone, Deserialize, Serialize, JsonSchema)]
#[serde(default)]
pub struct PathsConfig {
    /// Directory of markdown sources (default: "content")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<PathBuf>,
    /// Directory of static assets copied verbatim (default: "static")
    #[serde(rename = "static", skip_serializing_if = "Option::is_none")]
    pub static_dir: Option<PathBuf>,
    /// HTML template containing {{ Title }} and {{ Content }} (default: "template.html")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<PathBuf>,
    /// Output directory, replaced on every build (default: "public")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
}

impl PathsConfig {
    fn is_empty(&self) -> bool {
        self.content.is_none()
            && self.static_dir.is_none()
            && self.template.is_none()
            && self.output.is_none()
    }
}

/// Build behaviour
#[derive(Debug, Default, Clone, Deserialize, Serialize, JsonSchema)]
#[serde(default)]
pub struct BuildConfig {
    /// Number of parallel jobs (default: number of CPUs)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jobs: Option<usize>,
}

impl BuildConfig {
    fn is_empty(&self) -> bool {
        self.jobs.is_none()
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

    /// Try to load configuration from a directory (looks for `_sitegen.toml`)
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

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config to TOML")
    }

    /// Create a sample configuration with the defaults spelled out, for `init`
    pub fn sample() -> Self {
        Config {
            paths: PathsConfig {
                content: Some(PathBuf::from("content")),
                static_dir: Some(PathBuf::from("static")),
                template: Some(PathBuf::from("template.html")),
                output: Some(PathBuf::from("public")),
            },
            build: BuildConfig {
                jobs: None, // all CPUs
            },
        }
    }
}
