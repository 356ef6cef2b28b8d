//! Process settings from environment variables (optionally loaded from `.env`).

use crate::error::ConfigError;
use std::collections::HashMap;
use std::net::SocketAddr;

const DEFAULT_PORT: u16 = 5000;
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_DATABASE_URL: &str = "postgres://localhost/reservations";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
/// 10 MiB, enough for a handful of restaurant photos per request.
const DEFAULT_UPLOAD_LIMIT: usize = 10 * 1024 * 1024;

#[derive(Clone, Debug)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub max_connections: u32,
    /// Request body limit applied to the whole router; multipart uploads are buffered in memory.
    pub upload_limit_bytes: usize,
}

impl Settings {
    /// Load `.env` if present, then read the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        let vars: HashMap<String, String> = std::env::vars().collect();
        Self::from_map(&vars)
    }

    pub fn from_map(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let get = |k: &str| vars.get(k).map(|s| s.trim()).filter(|s| !s.is_empty());
        Ok(Settings {
            host: get("HOST").unwrap_or(DEFAULT_HOST).to_string(),
            port: parse_or(get("PORT"), "PORT", DEFAULT_PORT)?,
            database_url: get("DATABASE_URL").unwrap_or(DEFAULT_DATABASE_URL).to_string(),
            max_connections: parse_or(get("DATABASE_MAX_CONNECTIONS"), "DATABASE_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?,
            upload_limit_bytes: parse_or(get("UPLOAD_LIMIT_BYTES"), "UPLOAD_LIMIT_BYTES", DEFAULT_UPLOAD_LIMIT)?,
        })
    }

    pub fn listen_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|_| ConfigError::InvalidValue {
                key: "HOST",
                value: self.host.clone(),
            })
    }
}

fn parse_or<T: std::str::FromStr>(raw: Option<&str>, key: &'static str, default: T) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(s) => s.parse().map_err(|_| ConfigError::InvalidValue {
            key,
            value: s.to_string(),
        }),
    }
}
