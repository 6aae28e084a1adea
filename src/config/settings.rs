//! Runtime settings from environment variables (a `.env` file is loaded by the binary).
//!
//! Database credentials are required; everything else has a default.

use crate::error::ConfigError;
use crate::session::Timeouts;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

#[derive(Clone, Debug)]
pub struct DatabaseSettings {
    pub user: String,
    pub password: String,
    pub host: String,
    pub port: u16,
    pub schema: String,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
    pub execute_timeout: Duration,
}

impl DatabaseSettings {
    pub fn timeouts(&self) -> Timeouts {
        Timeouts {
            acquire: self.acquire_timeout,
            execute: self.execute_timeout,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Settings {
    pub http_addr: SocketAddr,
    pub body_limit: usize,
    pub database: DatabaseSettings,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup. Empty values count as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let required = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));

        let database = DatabaseSettings {
            user: required("DB_USER")?,
            password: required("DB_PASSWORD")?,
            host: required("DB_HOST")?,
            port: parse("DB_PORT", &required("DB_PORT")?)?,
            schema: required("DB_SCHEMA")?,
            max_connections: optional(get("DB_MAX_CONNECTIONS"), "DB_MAX_CONNECTIONS", 5)?,
            acquire_timeout: Duration::from_millis(optional(
                get("DB_ACQUIRE_TIMEOUT_MS"),
                "DB_ACQUIRE_TIMEOUT_MS",
                5_000,
            )?),
            execute_timeout: Duration::from_millis(optional(
                get("DB_EXECUTE_TIMEOUT_MS"),
                "DB_EXECUTE_TIMEOUT_MS",
                10_000,
            )?),
        };
        if database.max_connections == 0 {
            return Err(ConfigError::Invalid {
                var: "DB_MAX_CONNECTIONS",
                reason: "must be at least 1".into(),
            });
        }

        Ok(Settings {
            http_addr: optional(get("HTTP_ADDR"), "HTTP_ADDR", SocketAddr::from(([0, 0, 0, 0], 3000)))?,
            body_limit: optional(get("HTTP_BODY_LIMIT_BYTES"), "HTTP_BODY_LIMIT_BYTES", 64 * 1024)?,
            database,
        })
    }
}

fn parse<T>(var: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
        var,
        reason: e.to_string(),
    })
}

fn optional<T>(raw: Option<String>, var: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        Some(raw) => parse(var, &raw),
        None => Ok(default),
    }
}
