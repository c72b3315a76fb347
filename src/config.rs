//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/hntree/hntree.toml`
//! 3. Explicit config file (`--config`)
//! 4. Environment variables: `HNTREE_*` prefix

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::{ApplicationError, DEFAULT_HISTORY_CAPACITY};
use crate::domain::DEFAULT_KEYS;

/// Which direction alphabet the input device offers.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DirectionSet {
    #[default]
    Four,
    Eight,
}

impl FromStr for DirectionSet {
    type Err = ApplicationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "four" | "4" => Ok(DirectionSet::Four),
            "eight" | "8" => Ok(DirectionSet::Eight),
            other => Err(ApplicationError::Config {
                message: format!("unknown direction set: {}", other),
            }),
        }
    }
}

impl fmt::Display for DirectionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DirectionSet::Four => write!(f, "four"),
            DirectionSet::Eight => write!(f, "eight"),
        }
    }
}

/// Raw settings for intermediate parsing (Option to detect "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub directions: Option<DirectionSet>,
    pub history_capacity: Option<usize>,
    pub layout: Option<PathBuf>,
    pub keys: Option<Vec<String>>,
}

/// Unified configuration for hntree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Direction alphabet (default: four)
    pub directions: DirectionSet,
    /// Completed lines kept by the writer (default: 32)
    pub history_capacity: usize,
    /// Path layout file; the tree is generated from `keys` when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<PathBuf>,
    /// Keys by descending frequency for the generated tree
    pub keys: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            directions: DirectionSet::default(),
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            layout: None,
            keys: DEFAULT_KEYS.iter().map(|k| k.to_string()).collect(),
        }
    }
}

/// Get the XDG config directory for hntree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "hntree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("hntree.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Overlay wins where it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            directions: overlay.directions.unwrap_or(self.directions),
            history_capacity: overlay.history_capacity.unwrap_or(self.history_capacity),
            layout: overlay.layout.clone().or_else(|| self.layout.clone()),
            keys: overlay.keys.clone().unwrap_or_else(|| self.keys.clone()),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `config_file` - Optional explicit config file; it must exist
    pub fn load(config_file: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                debug!("global config: {}", global_path.display());
                current = current.merge_with(&load_raw_settings(&global_path)?);
            }
        }

        current = current.with_file(config_file)?;
        current = Self::apply_env_overrides(current)?;
        current.validate()?;
        Ok(current)
    }

    /// Load defaults plus an optional explicit file, ignoring global config
    /// and environment.
    pub fn load_file_only(config_file: Option<&Path>) -> Result<Self, ApplicationError> {
        let settings = Self::default().with_file(config_file)?;
        settings.validate()?;
        Ok(settings)
    }

    fn with_file(self, config_file: Option<&Path>) -> Result<Self, ApplicationError> {
        match config_file {
            Some(path) if !path.exists() => Err(ApplicationError::Config {
                message: format!("config file not found: {}", path.display()),
            }),
            Some(path) => {
                debug!("config file: {}", path.display());
                Ok(self.merge_with(&load_raw_settings(path)?))
            }
            None => Ok(self),
        }
    }

    /// Apply HNTREE_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("HNTREE")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("directions") {
            settings.directions = val.parse()?;
        }
        if let Ok(val) = config.get::<usize>("history_capacity") {
            settings.history_capacity = val;
        }
        if let Ok(val) = config.get_string("layout") {
            settings.layout = Some(PathBuf::from(val));
        }

        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ApplicationError> {
        if self.history_capacity == 0 {
            return Err(ApplicationError::Config {
                message: "history_capacity must be at least 1".to_string(),
            });
        }
        if self.layout.is_none() && self.keys.is_empty() {
            return Err(ApplicationError::Config {
                message: "keys must not be empty when no layout is set".to_string(),
            });
        }
        Ok(())
    }

    /// Serialize to TOML (for `config show`).
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize settings: {}", e),
        })
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
