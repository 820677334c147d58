//! Environment-driven server configuration.
//!
//! | variable | default |
//! |---|---|
//! | `PALLADIO_DATABASE_URL` | unset: in-memory repositories |
//! | `PALLADIO_BIND_ADDR` | `0.0.0.0:8080` |
//! | `PALLADIO_DB_POOL_SIZE` | `10` |
//! | `PALLADIO_RUN_MIGRATIONS` | `true` |

use std::net::SocketAddr;
use thiserror::Error;

/// Variable holding the `PostgreSQL` connection string.
pub const DATABASE_URL_VAR: &str = "PALLADIO_DATABASE_URL";
/// Variable holding the listen address.
pub const BIND_ADDR_VAR: &str = "PALLADIO_BIND_ADDR";
/// Variable holding the connection pool size.
pub const POOL_SIZE_VAR: &str = "PALLADIO_DB_POOL_SIZE";
/// Variable toggling embedded migrations at startup.
pub const RUN_MIGRATIONS_VAR: &str = "PALLADIO_RUN_MIGRATIONS";

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_POOL_SIZE: u32 = 10;

/// Errors raised while reading configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable is set to a value that cannot be parsed.
    #[error("{variable} has invalid value '{value}': expected {expected}")]
    InvalidValue {
        /// Offending variable name.
        variable: &'static str,
        /// Raw value found.
        value: String,
        /// Description of accepted values.
        expected: &'static str,
    },
}

/// Persistence backend selected by configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageConfig {
    /// Process-local repositories; data is lost on exit.
    InMemory,
    /// `PostgreSQL` repositories.
    Postgres {
        /// Connection string.
        database_url: String,
        /// Maximum pooled connections.
        pool_size: u32,
        /// Whether to apply embedded migrations at startup.
        run_migrations: bool,
    },
}

/// Server configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Listen address.
    pub bind_addr: SocketAddr,
    /// Persistence backend.
    pub storage: StorageConfig,
}

impl ServerConfig {
    /// Reads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable holds an unparsable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads configuration through an arbitrary variable lookup.
    ///
    /// Blank values are treated as unset.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable holds an unparsable value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let bind_addr = match read(BIND_ADDR_VAR) {
            None => parse_bind_addr(DEFAULT_BIND_ADDR)?,
            Some(raw) => parse_bind_addr(&raw)?,
        };

        let storage = match read(DATABASE_URL_VAR) {
            None => StorageConfig::InMemory,
            Some(database_url) => StorageConfig::Postgres {
                database_url,
                pool_size: read(POOL_SIZE_VAR)
                    .map_or(Ok(DEFAULT_POOL_SIZE), |raw| parse_pool_size(&raw))?,
                run_migrations: read(RUN_MIGRATIONS_VAR)
                    .map_or(Ok(true), |raw| parse_flag(RUN_MIGRATIONS_VAR, &raw))?,
            },
        };

        Ok(Self { bind_addr, storage })
    }
}

fn parse_bind_addr(raw: &str) -> Result<SocketAddr, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
        variable: BIND_ADDR_VAR,
        value: raw.to_owned(),
        expected: "a socket address such as 0.0.0.0:8080",
    })
}

fn parse_pool_size(raw: &str) -> Result<u32, ConfigError> {
    match raw.trim().parse::<u32>() {
        Ok(size) if size > 0 => Ok(size),
        _ => Err(ConfigError::InvalidValue {
            variable: POOL_SIZE_VAR,
            value: raw.to_owned(),
            expected: "a positive integer",
        }),
    }
}

fn parse_flag(variable: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            variable,
            value: raw.to_owned(),
            expected: "true or false",
        }),
    }
}
