use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Looked up in the working directory when `--config` is not given.
pub const CONFIG_FILE_NAME: &str = "fountain2html.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file at {}: {source}", .config_path.display())]
    Read {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file at {}: {source}", .config_path.display())]
    Parse {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

/// Defaults for the `render` subcommand; command-line flags win over these.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub theme: Option<String>,
    pub output: Option<PathBuf>,
}

impl Config {
    /// Reads a config file, `Ok(None)` when it does not exist.
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }
        Self::read(config_path).map(Some)
    }

    /// An explicit path has to exist; the implicit one is optional.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::read(path),
            None => Ok(Self::load_from_path(CONFIG_FILE_NAME)?.unwrap_or_default()),
        }
    }

    fn read(config_path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(config_path).map_err(|source| ConfigError::Read {
            config_path: config_path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            config_path: config_path.to_path_buf(),
            source,
        })
    }
}
