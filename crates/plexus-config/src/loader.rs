//! Locating and reading `config.toml`.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use tracing::debug;

use crate::{Config, ConfigError, ConfigResult};

/// Environment variable that turns logging on and sets its filter.
pub const LOG_ENV: &str = "PLEXUS_LOG";

const FILE_NAME: &str = "config.toml";

/// Default location: `config.toml` in the platform config directory.
pub fn config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "plexus").map(|dirs| dirs.config_dir().join(FILE_NAME))
}

impl Config {
    /// Load from `explicit` if given, otherwise from [`config_path`].
    ///
    /// An explicit path must exist. The default location may be missing, in
    /// which case the built-in defaults are used.
    pub fn load(explicit: Option<&Path>) -> ConfigResult<Self> {
        let mut config = match explicit {
            Some(path) => Self::read(path)?.ok_or_else(|| ConfigError::NotFound(path.into()))?,
            None => match config_path() {
                Some(path) => Self::load_from(&path)?,
                None => {
                    debug!("no config directory on this platform, using defaults");
                    Self::default()
                }
            },
        };
        config.apply_log_override(std::env::var(LOG_ENV).ok());
        Ok(config)
    }

    /// Load a single file, falling back to defaults when it does not exist.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        Ok(Self::read(path)?.unwrap_or_default())
    }

    fn read(path: &Path) -> ConfigResult<Option<Self>> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "config file missing");
                return Ok(None);
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.into(),
                    source,
                });
            }
        };
        let config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.into(),
            source,
        })?;
        debug!(path = %path.display(), "config loaded");
        Ok(Some(config))
    }
}
