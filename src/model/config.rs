//! On-disk configuration file structures

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Contents of `config.toml`
#[derive(Debug, Deserialize, Clone, Default)]
pub struct ConfigFile {
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub tools: ToolsConfig,
}

/// Path overrides; environment variables still take precedence
#[derive(Debug, Deserialize, Clone, Default)]
pub struct PathsConfig {
    pub rc_file: Option<String>,
    pub sudoers: Option<String>,
    pub backup_dir: Option<String>,
}

/// External programs used by the sudoers pipeline
#[derive(Debug, Deserialize, Clone)]
pub struct ToolsConfig {
    #[serde(default = "default_validator")]
    pub validator: String,
    #[serde(default = "default_privileged_helper")]
    pub privileged_helper: String,
}

fn default_validator() -> String {
    "visudo".to_string()
}

fn default_privileged_helper() -> String {
    "sudo".to_string()
}

impl Default for ToolsConfig {
    fn default() -> Self {
        ToolsConfig {
            validator: default_validator(),
            privileged_helper: default_privileged_helper(),
        }
    }
}

impl ConfigFile {
    /// Get the basm configuration directory path
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| {
                dirs::home_dir()
                    .unwrap_or_else(|| PathBuf::from("~"))
                    .join(".config")
            })
            .join("basm")
    }

    /// Get the default configuration file path
    pub fn default_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// Load configuration from file, or return default if file doesn't exist
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(ConfigFile::default());
        }
        let content = std::fs::read_to_string(path).map_err(|e| Error::path(path, e))?;
        toml::from_str(&content).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            message: e.message().to_string(),
        })
    }
}
