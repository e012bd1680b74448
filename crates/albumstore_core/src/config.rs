//! Environment-driven configuration for the cluster handle and logging.
//!
//! # Responsibility
//! - Resolve the cluster address and query timeout once at startup.
//! - Resolve logging level/directory for the process logger.
//!
//! # Invariants
//! - Configuration is parsed once; the resulting values are immutable.
//! - A missing or blank `DB_HOST` is a startup error, never defaulted.

use crate::logging::default_log_level;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::time::Duration;

pub const DB_HOST_VAR: &str = "DB_HOST";
pub const DB_TIMEOUT_VAR: &str = "DB_TIMEOUT_SECS";
pub const LOG_LEVEL_VAR: &str = "ALBUMSTORE_LOG_LEVEL";
pub const LOG_DIR_VAR: &str = "ALBUMSTORE_LOG_DIR";

/// Upper bound for a single query, matching the cluster driver default.
pub const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_secs(20);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    MissingVar(&'static str),
    InvalidVar {
        name: &'static str,
        value: String,
        reason: &'static str,
    },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingVar(name) => write!(f, "required environment variable `{name}` is not set"),
            Self::InvalidVar {
                name,
                value,
                reason,
            } => write!(f, "invalid value `{value}` for `{name}`: {reason}"),
        }
    }
}

impl Error for ConfigError {}

/// Location and limits of the backing album cluster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterConfig {
    /// Cluster address: directory hosting the keyspace files.
    pub host: PathBuf,
    /// Bounded wait applied to every query before it fails.
    pub query_timeout: Duration,
}

impl ClusterConfig {
    pub fn new(host: impl Into<PathBuf>) -> Self {
        Self {
            host: host.into(),
            query_timeout: DEFAULT_QUERY_TIMEOUT,
        }
    }

    pub fn with_query_timeout(mut self, timeout: Duration) -> Self {
        self.query_timeout = timeout;
        self
    }

    /// Reads configuration from the process environment.
    ///
    /// A `.env` file in the working directory is loaded first when present.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup(DB_HOST_VAR)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .ok_or(ConfigError::MissingVar(DB_HOST_VAR))?;

        let query_timeout = match lookup(DB_TIMEOUT_VAR) {
            Some(raw) => parse_timeout_secs(&raw)?,
            None => DEFAULT_QUERY_TIMEOUT,
        };

        Ok(Self {
            host: PathBuf::from(host),
            query_timeout,
        })
    }
}

fn parse_timeout_secs(raw: &str) -> Result<Duration, ConfigError> {
    let invalid = |reason| ConfigError::InvalidVar {
        name: DB_TIMEOUT_VAR,
        value: raw.to_string(),
        reason,
    };
    let secs = raw
        .trim()
        .parse::<u64>()
        .map_err(|_| invalid("expected a whole number of seconds"))?;
    if secs == 0 {
        return Err(invalid("timeout must be positive"));
    }
    Ok(Duration::from_secs(secs))
}

/// Logger settings resolved from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    pub level: String,
    /// File logging is disabled when unset.
    pub dir: Option<String>,
}

impl LogSettings {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let level = lookup(LOG_LEVEL_VAR)
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| default_log_level().to_string());
        let dir = lookup(LOG_DIR_VAR).filter(|value| !value.trim().is_empty());
        Self { level, dir }
    }
}
