//! Configuration of the testbed and of the credential rules, loaded from JSON

use crate::consts::{
    CONFIG_ENV_VAR, CONFIG_FILE, LOG_FILE, MAX_USERNAME_LENGTH, MIN_PASSWORD_LENGTH,
    MIN_USERNAME_LENGTH, PASSWORD_SPECIAL_CHARS, USERNAME_SEPARATORS,
};
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    io::{self, ErrorKind::NotFound},
    path::{Path, PathBuf},
};
use thiserror::Error;

/// Rules enforced by the password evaluator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PasswordRules {
    pub min_length: usize,
    pub special_chars: String,
}

impl Default for PasswordRules {
    fn default() -> Self {
        Self {
            min_length: MIN_PASSWORD_LENGTH,
            special_chars: PASSWORD_SPECIAL_CHARS.to_owned(),
        }
    }
}

impl PasswordRules {
    pub fn is_special(&self, c: char) -> bool {
        self.special_chars.contains(c)
    }
}

/// Rules enforced by the username recognizer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UsernameRules {
    pub min_length: usize,
    pub max_length: usize,
    pub separators: String,
}

impl Default for UsernameRules {
    fn default() -> Self {
        Self {
            min_length: MIN_USERNAME_LENGTH,
            max_length: MAX_USERNAME_LENGTH,
            separators: USERNAME_SEPARATORS.to_owned(),
        }
    }
}

impl UsernameRules {
    pub fn is_separator(&self, c: char) -> bool {
        self.separators.contains(c)
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read configuration: {0}")]
    Io(#[from] io::Error),
    #[error("Malformed configuration: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Unknown log level: {0}")]
    LogLevel(String),
    #[error("Username length bounds are inverted: {min} > {max}")]
    UsernameBounds { min: usize, max: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub log_file: PathBuf,
    pub log_level: String,
    pub password: PasswordRules,
    pub username: UsernameRules,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_file: LOG_FILE.into(),
            log_level: "info".to_owned(),
            password: PasswordRules::default(),
            username: UsernameRules::default(),
        }
    }
}

impl Config {
    /// Path of the configuration file, taken from the environment if set
    pub fn default_path() -> PathBuf {
        std::env::var_os(CONFIG_ENV_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| CONFIG_FILE.into())
    }

    /// Reads the configuration file. `None` when the file does not exist.
    pub fn read(path: &Path) -> Result<Option<Self>, ConfigError> {
        match fs::read_to_string(path) {
            Ok(json) => Self::from_json(&json).map(Some),
            Err(not_found) if not_found.kind() == NotFound => Ok(None),
            Err(other) => Err(other.into()),
        }
    }

    /// Loads the configuration. A missing file gives the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        Ok(Self::read(path)?.unwrap_or_default())
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.check()?;
        Ok(config)
    }

    pub fn level_filter(&self) -> Result<LevelFilter, ConfigError> {
        self.log_level
            .parse()
            .map_err(|_| ConfigError::LogLevel(self.log_level.clone()))
    }

    fn check(&self) -> Result<(), ConfigError> {
        self.level_filter()?;
        let UsernameRules {
            min_length,
            max_length,
            ..
        } = self.username;
        if min_length > max_length {
            return Err(ConfigError::UsernameBounds {
                min: min_length,
                max: max_length,
            });
        }
        Ok(())
    }
}
