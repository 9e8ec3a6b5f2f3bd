//! Settings from `fortdoc.toml`, overridable on the command line.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Looked up in the working directory when `--config` is not given.
pub const CONFIG_FILE: &str = "fortdoc.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {}", config_path.display())]
    NotFound { config_path: PathBuf },

    #[error("failed to read config file at {}: {source}", config_path.display())]
    Read {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file at {}: {source}", config_path.display())]
    Parse {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// File extensions scanned in directories, without the dot.
    pub extensions: Vec<String>,
    /// Documentation engine name: `dummy` or `command`.
    pub engine: String,
    /// Replace existing documentation blocks too.
    pub overwrite: bool,
    /// Text written by the dummy engine.
    pub dummy_text: String,
    /// Program and arguments run by the command engine.
    pub command: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            extensions: ["f90", "f95", "f03", "f08", "f"]
                .map(String::from)
                .to_vec(),
            engine: "dummy".to_string(),
            overwrite: false,
            dummy_text: "This is a dummy document.".to_string(),
            command: Vec::new(),
        }
    }
}

impl Config {
    /// Load from `config_path`, or `None` if the file does not exist.
    pub fn load_from_path(config_path: &Path) -> Result<Option<Self>, ConfigError> {
        if !config_path.exists() {
            return Ok(None);
        }

        let content =
            std::fs::read_to_string(config_path).map_err(|source| ConfigError::Read {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        let config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            config_path: config_path.to_path_buf(),
            source,
        })?;

        Ok(Some(config))
    }

    /// Load the explicitly given file, which must exist, or else
    /// [`CONFIG_FILE`] from the working directory if present, or else defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::load_from_path(path)?.ok_or_else(|| ConfigError::NotFound {
                config_path: path.to_path_buf(),
            }),
            None => Ok(Self::load_from_path(Path::new(CONFIG_FILE))?.unwrap_or_default()),
        }
    }
}
