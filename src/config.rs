use std::{env, fmt::Display, str::FromStr};

use log::info;
use thiserror::Error;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: &str = "3000";
const DEFAULT_POOL_SIZE: &str = "10";

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("Invalid {key} value: {message}")]
    Invalid { key: &'static str, message: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub pool_size: u32,
}

impl Config {
    /// Reads the process environment. Call `dotenv::dotenv()` first to pick
    /// up a `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_url = lookup("DATABASE_URL")
            .filter(|url| !url.is_empty())
            .ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let pool_size: u32 = try_load(&lookup, "DATABASE_POOL_SIZE", DEFAULT_POOL_SIZE)?;
        if pool_size == 0 {
            return Err(ConfigError::Invalid {
                key: "DATABASE_POOL_SIZE",
                message: "must be at least 1".to_string(),
            });
        }

        Ok(Self {
            database_url,
            host: lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: try_load(&lookup, "PORT", DEFAULT_PORT)?,
            pool_size,
        })
    }
}

fn try_load<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: &str,
) -> Result<T, ConfigError>
where
    T::Err: Display,
{
    lookup(key)
        .unwrap_or_else(|| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e: T::Err| ConfigError::Invalid {
            key,
            message: e.to_string(),
        })
}
