//! Application configuration
//!
//! Read from environment variables; `main` loads a `.env` file first when one
//! exists.
//!
//! - `HOST` (default `0.0.0.0`), `PORT` (default `3000`)
//! - `DATABASE_URL`: enables the Postgres-backed lookup and catalog
//! - `DATABASE_MAX_CONNECTIONS` (default 5)
//! - `PRICING_CACHE_TTL_SECS` (default 300, `0` disables the cache)
//! - `REQUEST_TIMEOUT_SECS` (default 30)
//! - `LOG_FORMAT`: `pretty` (default) or `json`

use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value {value:?} for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format '{}'", other)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: Option<String>,
    pub database_max_connections: u32,
    pub pricing_cache_ttl: Duration,
    pub request_timeout: Duration,
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            database_url: None,
            database_max_connections: 5,
            pricing_cache_ttl: Duration::from_secs(300),
            request_timeout: Duration::from_secs(30),
            log_format: LogFormat::Pretty,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key/value source. Unset and blank values
    /// fall back to the defaults.
    pub fn from_lookup<F>(get: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();
        let var = |key: &str| get(key).filter(|v| !v.trim().is_empty());

        Ok(Self {
            host: var("HOST").unwrap_or(defaults.host),
            port: parse("PORT", var("PORT"), defaults.port)?,
            database_url: var("DATABASE_URL"),
            database_max_connections: parse(
                "DATABASE_MAX_CONNECTIONS",
                var("DATABASE_MAX_CONNECTIONS"),
                defaults.database_max_connections,
            )?,
            pricing_cache_ttl: Duration::from_secs(parse(
                "PRICING_CACHE_TTL_SECS",
                var("PRICING_CACHE_TTL_SECS"),
                defaults.pricing_cache_ttl.as_secs(),
            )?),
            request_timeout: Duration::from_secs(parse(
                "REQUEST_TIMEOUT_SECS",
                var("REQUEST_TIMEOUT_SECS"),
                defaults.request_timeout.as_secs(),
            )?),
            log_format: parse("LOG_FORMAT", var("LOG_FORMAT"), defaults.log_format)?,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse<T>(key: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    let Some(value) = raw else {
        return Ok(default);
    };

    match value.trim().parse::<T>() {
        Ok(parsed) => Ok(parsed),
        Err(e) => Err(ConfigError::Invalid {
            key,
            reason: e.to_string(),
            value,
        }),
    }
}
