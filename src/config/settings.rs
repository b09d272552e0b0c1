//! Process settings read from the environment (after `.env` is loaded by the binary).

use crate::error::ConfigError;
use std::str::FromStr;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://sqlite.db";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_TOKEN_TTL_SECS: i64 = 86_400;
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
/// Longest accepted token lifetime: one year.
pub const MAX_TOKEN_TTL_SECS: i64 = 365 * 86_400;

#[derive(Clone, Debug)]
pub struct Settings {
    pub database_url: String,
    pub bind_addr: String,
    pub jwt_secret: String,
    pub token_ttl_secs: i64,
    pub max_connections: u32,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup. `JWT_SECRET` is required; everything else has a default.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let jwt_secret = get("JWT_SECRET").ok_or(ConfigError::Missing("JWT_SECRET"))?;
        let token_ttl_secs: i64 = parse_or("TOKEN_TTL_SECS", get("TOKEN_TTL_SECS"), DEFAULT_TOKEN_TTL_SECS)?;
        if !(1..=MAX_TOKEN_TTL_SECS).contains(&token_ttl_secs) {
            return Err(ConfigError::Invalid {
                key: "TOKEN_TTL_SECS",
                value: token_ttl_secs.to_string(),
            });
        }

        Ok(Settings {
            database_url: get("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.into()),
            bind_addr: get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.into()),
            jwt_secret,
            token_ttl_secs,
            max_connections: parse_or("MAX_CONNECTIONS", get("MAX_CONNECTIONS"), DEFAULT_MAX_CONNECTIONS)?,
        })
    }
}

fn parse_or<T: FromStr>(key: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => value.parse().map_err(|_| ConfigError::Invalid { key, value }),
    }
}
