//! Runtime configuration for hosts embedding the agenda core.
//!
//! Values come from `AGENDA_*` environment variables with defaults for
//! anything unset. Parsing is separated from the environment so it can be
//! exercised with plain key/value lookups.

use crate::logging::default_log_level;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const ENV_DB_PATH: &str = "AGENDA_DB_PATH";
pub const ENV_LOG_LEVEL: &str = "AGENDA_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "AGENDA_LOG_DIR";
pub const ENV_UPCOMING_DAYS: &str = "AGENDA_UPCOMING_DAYS";

pub const DEFAULT_DB_FILE_NAME: &str = "agenda.sqlite3";
pub const DEFAULT_UPCOMING_DAYS: u32 = 7;

/// Invalid configuration value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidValue { key: &'static str, value: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidValue { key, value } => write!(f, "invalid value `{value}` for {key}"),
        }
    }
}

impl Error for ConfigError {}

/// Settings a host needs to open storage and start logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgendaConfig {
    /// SQLite database file.
    pub db_path: PathBuf,
    pub log_level: String,
    /// Rolling log directory; logging stays off when `None`.
    pub log_dir: Option<PathBuf>,
    /// Look-ahead window for the upcoming-task list.
    pub upcoming_days: u32,
}

impl Default for AgendaConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_FILE_NAME),
            log_level: default_log_level().to_string(),
            log_dir: None,
            upcoming_days: DEFAULT_UPCOMING_DAYS,
        }
    }
}

impl AgendaConfig {
    /// Reads configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        if let Some(path) = read(ENV_DB_PATH) {
            config.db_path = PathBuf::from(path);
        }
        if let Some(level) = read(ENV_LOG_LEVEL) {
            config.log_level = level;
        }
        config.log_dir = read(ENV_LOG_DIR).map(PathBuf::from);
        if let Some(days) = read(ENV_UPCOMING_DAYS) {
            config.upcoming_days = days.parse().map_err(|_| ConfigError::InvalidValue {
                key: ENV_UPCOMING_DAYS,
                value: days,
            })?;
        }

        Ok(config)
    }
}
