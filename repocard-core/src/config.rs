//! Service configuration
//!
//! A single explicit configuration struct passed to the resolver and the
//! renderer at construction; nothing here is global or mutable.

use crate::error::{CardError, CardResult, ErrorContext};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level configuration for the repocard service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardConfig {
    pub storage: StorageConfig,
    pub stats: StatsConfig,
    pub render: RenderConfig,
}

/// On-disk locations for working copies and cache entries
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding cloned working copies, one per repository
    pub repos_dir: PathBuf,
    /// Directory holding cached stats, one JSON file per repository URL
    pub cache_dir: PathBuf,
}

/// Statistics computation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsConfig {
    /// File extensions (without the dot) counted as code
    pub code_extensions: Vec<String>,
    /// Timeout for the remote commit lookup, in seconds
    pub api_timeout_secs: u64,
    /// Clone depth for new working copies
    pub clone_depth: u32,
}

/// Card rendering settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Preferred font family; a sans-serif fallback is tried when unavailable
    pub font_family: String,
    /// Font size in points
    pub font_size: u32,
}

impl Default for CardConfig {
    fn default() -> Self {
        Self {
            storage: StorageConfig {
                repos_dir: PathBuf::from(".repocard/repos"),
                cache_dir: PathBuf::from(".repocard/cache"),
            },
            stats: StatsConfig {
                code_extensions: [
                    "py", "js", "ts", "go", "rs", "java", "c", "cpp", "h", "hpp", "md", "html",
                    "css", "rb", "php",
                ]
                .iter()
                .map(|s| s.to_string())
                .collect(),
                api_timeout_secs: 10,
                clone_depth: 1,
            },
            render: RenderConfig {
                font_family: "sans-serif".to_string(),
                font_size: 20,
            },
        }
    }
}

impl CardConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> CardResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| CardError::Config {
            message: format!("Failed to read config file: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("config")
                .with_operation("read_file")
                .with_suggestion("Check if the config file exists and is readable"),
        })?;

        let config: CardConfig = toml::from_str(&content).map_err(|e| CardError::Config {
            message: format!("Failed to parse config: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("config")
                .with_operation("parse_toml")
                .with_suggestion("Check TOML syntax in config file"),
        })?;

        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> CardResult<()> {
        let content = toml::to_string_pretty(self).map_err(|e| CardError::Config {
            message: format!("Failed to serialize config: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("config").with_operation("serialize_toml"),
        })?;

        std::fs::write(path, content).map_err(|e| CardError::Config {
            message: format!("Failed to write config file: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("config")
                .with_operation("write_file")
                .with_suggestion("Check if the directory exists and is writable"),
        })?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> CardResult<()> {
        if self.stats.code_extensions.is_empty() {
            return Err(CardError::Config {
                message: "stats.code_extensions must not be empty".to_string(),
                source: None,
                context: ErrorContext::new("config")
                    .with_operation("validate")
                    .with_suggestion("List at least one extension, e.g. [\"rs\", \"py\"]"),
            });
        }

        if self.stats.api_timeout_secs == 0 {
            return Err(CardError::Config {
                message: "stats.api_timeout_secs must be greater than 0".to_string(),
                source: None,
                context: ErrorContext::new("config")
                    .with_operation("validate")
                    .with_suggestion("Set stats.api_timeout_secs to a positive value"),
            });
        }

        if self.stats.clone_depth == 0 {
            return Err(CardError::Config {
                message: "stats.clone_depth must be greater than 0".to_string(),
                source: None,
                context: ErrorContext::new("config")
                    .with_operation("validate")
                    .with_suggestion("Set stats.clone_depth to a positive value"),
            });
        }

        if self.render.font_size == 0 {
            return Err(CardError::Config {
                message: "render.font_size must be greater than 0".to_string(),
                source: None,
                context: ErrorContext::new("config")
                    .with_operation("validate")
                    .with_suggestion("Set render.font_size to a positive value"),
            });
        }

        Ok(())
    }
}
