//! Configuration management for memsift
//!
//! Loading, validation, env overrides, and defaults for the scanner. Every
//! matcher family can be toggled off individually; absent values enable
//! everything.

use crate::error::{MemsiftError, Result};
use crate::patterns::MatcherKind;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

mod validator;

pub use validator::ConfigValidator;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(rename = "_meta")]
    pub meta: MetaConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub extraction: ExtractionConfig,
    #[serde(default)]
    pub matchers: MatcherToggles,
}

/// Metadata about the configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetaConfig {
    pub schema_version: String,
    #[serde(default = "current_timestamp")]
    pub created_at: String,
    #[serde(default = "current_timestamp")]
    pub last_modified: String,
}

fn current_timestamp() -> String {
    chrono::Utc::now().to_rfc3339()
}

/// Storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("~/.memsift"),
        }
    }
}

/// Extraction gates applied at the caller boundary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Master switch for the whole capability
    pub enabled: bool,
    /// Messages shorter than this are skipped before extraction
    pub min_length: usize,
    /// Source channel tag used when the transport supplies none
    pub default_source: String,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            min_length: 5,
            default_source: "telegram".to_string(),
        }
    }
}

/// Per-family matcher switches, all on by default
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatcherToggles {
    #[serde(default = "default_true")]
    pub email: bool,
    #[serde(default = "default_true")]
    pub repo_link: bool,
    #[serde(default = "default_true")]
    pub commit_sha: bool,
    #[serde(default = "default_true")]
    pub url: bool,
    #[serde(default = "default_true")]
    pub money: bool,
    #[serde(default = "default_true")]
    pub phone: bool,
    #[serde(default = "default_true")]
    pub date: bool,
    #[serde(default = "default_true")]
    pub config_path: bool,
    #[serde(default = "default_true")]
    pub stack_trace: bool,
    #[serde(default = "default_true")]
    pub credential: bool,
}

fn default_true() -> bool {
    true
}

impl Default for MatcherToggles {
    fn default() -> Self {
        Self {
            email: true,
            repo_link: true,
            commit_sha: true,
            url: true,
            money: true,
            phone: true,
            date: true,
            config_path: true,
            stack_trace: true,
            credential: true,
        }
    }
}

impl MatcherToggles {
    /// Matcher families left enabled by this configuration
    pub fn enabled_kinds(&self) -> Vec<MatcherKind> {
        let pairs = [
            (self.email, MatcherKind::Email),
            (self.repo_link, MatcherKind::RepoLink),
            (self.commit_sha, MatcherKind::CommitSha),
            (self.url, MatcherKind::Url),
            (self.money, MatcherKind::Money),
            (self.phone, MatcherKind::Phone),
            (self.date, MatcherKind::Date),
            (self.config_path, MatcherKind::ConfigPath),
            (self.stack_trace, MatcherKind::StackTrace),
            (self.credential, MatcherKind::Credential),
        ];
        pairs
            .into_iter()
            .filter_map(|(on, kind)| on.then_some(kind))
            .collect()
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(MemsiftError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| MemsiftError::Io {
            source: e,
            context: format!("Failed to read config file: {:?}", path),
        })?;
        let mut config: Config = toml::from_str(&content)?;

        // Apply environment variable overrides
        config.apply_env_overrides();

        // Validate configuration
        ConfigValidator::validate(&config)?;

        Ok(config)
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| MemsiftError::Io {
                source: e,
                context: format!("Failed to create config directory: {:?}", parent),
            })?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|e| MemsiftError::Io {
            source: e,
            context: format!("Failed to write config file: {:?}", path),
        })?;
        Ok(())
    }

    /// Apply environment variable overrides
    /// Environment variables in format: MEMSIFT_SECTION__KEY=value
    pub fn apply_env_overrides(&mut self) {
        for (key, value) in std::env::vars() {
            if let Some(config_key) = key.strip_prefix("MEMSIFT_") {
                if let Err(e) = self.set_value_from_env(config_key, &value) {
                    tracing::warn!("Failed to apply env override {}: {}", key, e);
                }
            }
        }
    }

    fn set_value_from_env(&mut self, path: &str, value: &str) -> Result<()> {
        match path {
            "EXTRACTION__ENABLED" => {
                self.extraction.enabled =
                    value.parse().map_err(|_| MemsiftError::InvalidConfigValue {
                        path: path.to_string(),
                        message: format!("Cannot parse '{}' as boolean", value),
                    })?;
            }
            "EXTRACTION__MIN_LENGTH" => {
                self.extraction.min_length =
                    value.parse().map_err(|_| MemsiftError::InvalidConfigValue {
                        path: path.to_string(),
                        message: format!("Cannot parse '{}' as integer", value),
                    })?;
            }
            "EXTRACTION__DEFAULT_SOURCE" => {
                self.extraction.default_source = value.to_string();
            }
            "STORAGE__DATA_DIR" => {
                self.storage.data_dir = PathBuf::from(value);
            }
            _ => {
                tracing::debug!("Unknown env config key: {}", path);
            }
        }
        Ok(())
    }

    /// Get the default configuration file path
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| MemsiftError::Config("Cannot determine config directory".to_string()))?;

        Ok(config_dir.join("memsift").join("config.toml"))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            meta: MetaConfig {
                schema_version: "1.0.0".to_string(),
                created_at: current_timestamp(),
                last_modified: current_timestamp(),
            },
            storage: StorageConfig::default(),
            extraction: ExtractionConfig::default(),
            matchers: MatcherToggles::default(),
        }
    }
}
