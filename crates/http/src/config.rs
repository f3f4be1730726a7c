//! Server configuration loaded from the environment.
//!
//! | variable | meaning | default |
//! |---|---|---|
//! | `BUMP_PORT` | TCP port to listen on | `5959` |
//! | `BUMP_ARENA_CAPACITY` | bytes in the connection arena | `0x1000000` (16 MiB) |
//! | `BUMP_SCRATCH_CAPACITY` | bytes in the scratch arena | `0x400000` (4 MiB) |
//! | `BUMP_LOG` | max log level: `trace`, `debug`, `info`, `warn` or `error` | `info` |
//!
//! Sizes accept decimal (`16777216`) or hexadecimal with a `0x` prefix (`0x1000000`).
//!
//! Variables can also come from an env file of `KEY=VALUE` lines, see
//! [`ServerConfig::from_env_file`]. The file never modifies the process environment,
//! and variables already set in the process take precedence over the file.
//!
//! ```bash
//! export BUMP_PORT=8080
//! export BUMP_ARENA_CAPACITY=0x100000
//! cargo run --bin bump-web
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::{env, fs, io};

use thiserror::Error;
use tracing::Level;

pub const PORT_VAR: &str = "BUMP_PORT";
pub const ARENA_CAPACITY_VAR: &str = "BUMP_ARENA_CAPACITY";
pub const SCRATCH_CAPACITY_VAR: &str = "BUMP_SCRATCH_CAPACITY";
pub const LOG_VAR: &str = "BUMP_LOG";

pub const DEFAULT_PORT: u16 = 5959;
pub const DEFAULT_ARENA_CAPACITY: usize = 16 * 1024 * 1024;
pub const DEFAULT_SCRATCH_CAPACITY: usize = 4 * 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    /// Capacity of the arena every connection is received into and answered from.
    pub arena_capacity: usize,
    pub scratch_capacity: usize,
    pub log_level: Level,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value `{value}` for {key}: {reason}")]
    InvalidValue { key: &'static str, value: String, reason: &'static str },

    #[error("can't read env file {}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error("malformed line {line} in env file {}, expected KEY=VALUE", path.display())]
    MalformedLine { path: PathBuf, line: usize },
}

impl ConfigError {
    fn invalid_value(key: &'static str, value: &str, reason: &'static str) -> Self {
        Self::InvalidValue { key, value: value.to_owned(), reason }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            arena_capacity: DEFAULT_ARENA_CAPACITY,
            scratch_capacity: DEFAULT_SCRATCH_CAPACITY,
            log_level: Level::INFO,
        }
    }
}

impl ServerConfig {
    /// Loads the configuration from process environment variables, falling back to the
    /// defaults for anything unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Like [`ServerConfig::from_env`], with the variables of the env file at `path` as a
    /// lower-priority layer.
    ///
    /// Blank lines and lines starting with `#` are skipped. Keys and values are trimmed.
    pub fn from_env_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io { path: path.to_owned(), source })?;
        let file = parse_env_file(&contents)
            .map_err(|line| ConfigError::MalformedLine { path: path.to_owned(), line })?;

        Self::from_lookup(|key| env::var(key).ok().or_else(|| file.get(key).cloned()))
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let port = match lookup(PORT_VAR) {
            Some(value) => value
                .trim()
                .parse::<u16>()
                .map_err(|_e| ConfigError::invalid_value(PORT_VAR, &value, "not a port"))?,
            None => defaults.port,
        };

        let arena_capacity = match lookup(ARENA_CAPACITY_VAR) {
            Some(value) => parse_capacity(ARENA_CAPACITY_VAR, &value)?,
            None => defaults.arena_capacity,
        };

        let scratch_capacity = match lookup(SCRATCH_CAPACITY_VAR) {
            Some(value) => parse_capacity(SCRATCH_CAPACITY_VAR, &value)?,
            None => defaults.scratch_capacity,
        };

        let log_level = match lookup(LOG_VAR) {
            Some(value) => Level::from_str(value.trim())
                .map_err(|_e| ConfigError::invalid_value(LOG_VAR, &value, "not a log level"))?,
            None => defaults.log_level,
        };

        Ok(Self { port, arena_capacity, scratch_capacity, log_level })
    }
}

/// Parses `KEY=VALUE` lines; on failure returns the 1-based number of the offending line.
pub fn parse_env_file(contents: &str) -> Result<HashMap<String, String>, usize> {
    let mut vars = HashMap::new();

    for (index, line) in contents.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let (key, value) = line.split_once('=').ok_or(index + 1)?;
        let key = key.trim();
        if key.is_empty() {
            return Err(index + 1);
        }
        vars.insert(key.to_owned(), value.trim().to_owned());
    }

    Ok(vars)
}

fn parse_capacity(key: &'static str, value: &str) -> Result<usize, ConfigError> {
    let trimmed = value.trim();
    let parsed = match trimmed.strip_prefix("0x").or_else(|| trimmed.strip_prefix("0X")) {
        Some(hex) => usize::from_str_radix(hex, 16),
        None => trimmed.parse(),
    };

    match parsed {
        Ok(0) => Err(ConfigError::invalid_value(key, value, "capacity must be positive")),
        Ok(capacity) => Ok(capacity),
        Err(_) => Err(ConfigError::invalid_value(key, value, "not a decimal or 0x-prefixed hex size")),
    }
}
