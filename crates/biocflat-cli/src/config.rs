//! Configuration loading from TOML files

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use biocflat_bioc::config::{DEFAULT_REFERENCES_PATH, DEFAULT_TITLE_ABSTRACT_PATH};
use serde::Deserialize;

/// Global configuration for biocflat
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub title_abstract_path: PathBuf,
    pub references_path: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            title_abstract_path: PathBuf::from(DEFAULT_TITLE_ABSTRACT_PATH),
            references_path: PathBuf::from(DEFAULT_REFERENCES_PATH),
        }
    }
}

impl Config {
    /// Load configuration from default locations
    ///
    /// Search order:
    /// 1. ./biocflat.toml (current directory)
    /// 2. ~/.config/biocflat/config.toml
    ///
    /// If no config file found, returns default config.
    pub fn load() -> Result<Self> {
        let local_config = PathBuf::from("biocflat.toml");
        if local_config.exists() {
            return Self::from_file(&local_config);
        }

        if let Some(dirs) = directories::ProjectDirs::from("", "", "biocflat") {
            let user_config = dirs.config_dir().join("config.toml");
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        log::debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Load configuration from a specific file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }
}
