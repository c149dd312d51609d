use std::error::Error as StdError;
use std::fmt;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use tempfile::NamedTempFile;

use crate::core::config::data::{path_display, Config};

const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug)]
pub enum ConfigError {
    /// The platform reported no home directory to put `config.toml` under.
    NoConfigDir,
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NoConfigDir => {
                f.write_str("no configuration directory is available for this user")
            }
            ConfigError::Read { path, source } => {
                write!(f, "config file {} could not be read: {source}", path_display(path))
            }
            ConfigError::Parse { path, source } => {
                write!(f, "config file {} is not valid TOML: {source}", path_display(path))
            }
        }
    }
}

impl StdError for ConfigError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            ConfigError::NoConfigDir => None,
            ConfigError::Read { source, .. } => Some(source),
            ConfigError::Parse { source, .. } => Some(source),
        }
    }
}

impl Config {
    /// Loads the user's config file; a missing file yields the defaults.
    pub fn load() -> Result<Config, Box<dyn StdError>> {
        Self::load_from_path(&Self::get_config_path()?)
    }

    pub fn save(&self) -> Result<(), Box<dyn StdError>> {
        self.save_to_path(&Self::get_config_path()?)
    }

    pub fn load_from_path(config_path: &Path) -> Result<Config, Box<dyn StdError>> {
        let contents = match fs::read_to_string(config_path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Config::default()),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: config_path.to_path_buf(),
                    source,
                }
                .into())
            }
        };

        toml::from_str(&contents).map_err(|source| {
            ConfigError::Parse {
                path: config_path.to_path_buf(),
                source,
            }
            .into()
        })
    }

    /// Writes through a sibling temp file and renames it over `config_path`,
    /// so readers never observe a half-written file.
    pub(crate) fn save_to_path(&self, config_path: &Path) -> Result<(), Box<dyn StdError>> {
        let dir = config_path
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .unwrap_or(Path::new("."));
        fs::create_dir_all(dir)?;

        let mut staged = NamedTempFile::new_in(dir)?;
        staged.write_all(toml::to_string_pretty(self)?.as_bytes())?;
        staged.as_file().sync_all()?;
        staged.persist(config_path).map_err(|err| err.error)?;
        Ok(())
    }

    pub(crate) fn get_config_path() -> Result<PathBuf, ConfigError> {
        ProjectDirs::from("ai", "khet", "khet-chat")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
            .ok_or(ConfigError::NoConfigDir)
    }
}
