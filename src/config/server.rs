//! HTTP server settings read from the environment

use std::net::SocketAddr;
use std::time::Duration;

use thiserror::Error;

const DEFAULT_PORT: u16 = 1010;
const DEFAULT_SCRAPE_TIMEOUT_SECS: u64 = 90;
const DEFAULT_MAX_CONCURRENT_SCRAPES: usize = 1;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub http_addr: SocketAddr,
    /// Outer bound on one scrape request
    pub scrape_timeout: Duration,
    /// Scrapes allowed in flight before answering 429
    pub max_concurrent_scrapes: usize,
    pub headless: bool,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid socket address: {0}")]
    InvalidSocket(String),
    #[error("invalid integer for {0}: {1}")]
    InvalidNumber(&'static str, String),
    #[error("invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}

impl ServerConfig {
    /// Load `.env` (if present) and read the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        // A missing .env is the normal case
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let http_addr = match read("SUBSPY_HTTP_ADDR") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidSocket(raw))?,
            None => {
                let port = match read("PORT") {
                    Some(raw) => raw
                        .parse::<u16>()
                        .map_err(|_| ConfigError::InvalidNumber("PORT", raw))?,
                    None => DEFAULT_PORT,
                };
                SocketAddr::from(([0, 0, 0, 0], port))
            }
        };

        let scrape_timeout_secs = match read("SUBSPY_SCRAPE_TIMEOUT_SECS") {
            Some(raw) => raw
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidNumber("SUBSPY_SCRAPE_TIMEOUT_SECS", raw))?,
            None => DEFAULT_SCRAPE_TIMEOUT_SECS,
        };
        if scrape_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue(
                "SUBSPY_SCRAPE_TIMEOUT_SECS",
                "0".to_string(),
            ));
        }

        let max_concurrent_scrapes = match read("SUBSPY_MAX_CONCURRENT_SCRAPES") {
            Some(raw) => raw
                .parse::<usize>()
                .map_err(|_| ConfigError::InvalidNumber("SUBSPY_MAX_CONCURRENT_SCRAPES", raw))?,
            None => DEFAULT_MAX_CONCURRENT_SCRAPES,
        };
        if max_concurrent_scrapes == 0 {
            return Err(ConfigError::InvalidValue(
                "SUBSPY_MAX_CONCURRENT_SCRAPES",
                "0".to_string(),
            ));
        }

        let headless = match read("SUBSPY_HEADLESS") {
            Some(raw) => parse_bool(&raw).ok_or(ConfigError::InvalidValue("SUBSPY_HEADLESS", raw))?,
            None => true,
        };

        Ok(Self {
            http_addr,
            scrape_timeout: Duration::from_secs(scrape_timeout_secs),
            max_concurrent_scrapes,
            headless,
        })
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
