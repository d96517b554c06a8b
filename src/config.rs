//! Process configuration read from environment variables.

use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_HTTP_ADDR: SocketAddr = SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 8080);
pub const DEFAULT_CART_MAX_AGE_SECS: u64 = 30 * 60;
pub const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 60;
pub const DEFAULT_TOKEN_TTL_SECS: u64 = 15 * 60;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key} has an invalid value {value:?}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub http_addr: SocketAddr,
    /// PostgreSQL URL. `None` runs against the in memory store.
    pub dsn: Option<String>,
    pub cart_max_age: Duration,
    pub sweep_interval: Duration,
    /// Lifetime of a token handed out on sign-in.
    pub token_ttl: Duration,
    /// Bearer token registered for a bootstrap admin user.
    pub admin_token: Option<String>,
}

impl Config {
    /// Load configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set to a value that cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from any key lookup. Blank values count as unset.
    ///
    /// # Errors
    ///
    /// Returns an error if a value cannot be parsed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let http_addr = match get("HTTP_ADDR") {
            Some(value) => value
                .parse()
                .map_err(|e: std::net::AddrParseError| ConfigError::Invalid {
                    key: "HTTP_ADDR",
                    value: value.clone(),
                    reason: e.to_string(),
                })?,
            None => DEFAULT_HTTP_ADDR,
        };

        Ok(Self {
            http_addr,
            dsn: get("DSN"),
            cart_max_age: seconds(
                "CART_MAX_AGE_SECS",
                get("CART_MAX_AGE_SECS"),
                DEFAULT_CART_MAX_AGE_SECS,
            )?,
            sweep_interval: seconds(
                "SWEEP_INTERVAL_SECS",
                get("SWEEP_INTERVAL_SECS"),
                DEFAULT_SWEEP_INTERVAL_SECS,
            )?,
            token_ttl: seconds(
                "TOKEN_TTL_SECS",
                get("TOKEN_TTL_SECS"),
                DEFAULT_TOKEN_TTL_SECS,
            )?,
            admin_token: get("ADMIN_TOKEN"),
        })
    }
}

fn seconds(key: &'static str, value: Option<String>, default: u64) -> Result<Duration, ConfigError> {
    let Some(value) = value else {
        return Ok(Duration::from_secs(default));
    };
    match value.trim().parse::<u64>() {
        Ok(0) => Err(ConfigError::Invalid {
            key,
            value,
            reason: "must be at least one second".into(),
        }),
        Ok(secs) => Ok(Duration::from_secs(secs)),
        Err(e) => Err(ConfigError::Invalid {
            key,
            value,
            reason: e.to_string(),
        }),
    }
}
