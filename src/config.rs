/*
 * Responsibility
 * - Environment/config loading (base URL, timeout, page size, user id)
 * - Validation of values at startup (boot fails on bad config, not mid-run)
 */
use std::fmt;
use std::time::Duration;

use url::Url;

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone)]
pub struct Config {
    /// API root the gateway is constructed with, e.g.
    /// `http://localhost:3000/api`. There is deliberately no default: the
    /// target host is explicit configuration, not a baked-in constant.
    pub base_url: Url,
    /// Per-request timeout.
    pub timeout: Duration,
    pub page_size: u32,
    /// Author id stamped onto created posts. Single-user client.
    pub user_id: i64,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let base_url = std::env::var("POSTS_API_BASE_URL")
            .map_err(|_| ConfigError::Missing("POSTS_API_BASE_URL"))?;
        let base_url = parse_base_url(&base_url)?;

        let timeout_ms = match std::env::var("POSTS_API_TIMEOUT_MS") {
            Ok(raw) => raw
                .parse::<u64>()
                .map_err(|_| ConfigError::Invalid("POSTS_API_TIMEOUT_MS"))?,
            Err(_) => 10_000,
        };

        let page_size = match std::env::var("POSTS_PAGE_SIZE") {
            Ok(raw) => {
                let parsed = raw
                    .parse::<u32>()
                    .map_err(|_| ConfigError::Invalid("POSTS_PAGE_SIZE"))?;
                if parsed == 0 {
                    return Err(ConfigError::Invalid("POSTS_PAGE_SIZE"));
                }
                parsed
            }
            Err(_) => 10,
        };

        let user_id = match std::env::var("POSTS_USER_ID") {
            Ok(raw) => raw
                .parse::<i64>()
                .map_err(|_| ConfigError::Invalid("POSTS_USER_ID"))?,
            Err(_) => 1,
        };

        Ok(Self {
            base_url,
            timeout: Duration::from_millis(timeout_ms),
            page_size,
            user_id,
        })
    }
}

fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw).map_err(|_| ConfigError::Invalid("POSTS_API_BASE_URL"))?;

    // The gateway joins relative paths onto this; anything that cannot be a
    // base (mailto:, data:, ...) would fail there in a less obvious way.
    if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::Invalid("POSTS_API_BASE_URL"));
    }

    Ok(url)
}
