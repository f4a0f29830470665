use std::{env, time::Duration};

const DEFAULT_CACHE_TTL_SECONDS: u64 = 30;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Listing cache TTL in seconds, also the sweep interval (default: 30)
    pub cache_ttl_seconds: u64,
    /// Maximum number of cached listings (default: 10,000)
    pub cache_max_entries: usize,
    /// Sustained API requests per second (default: 100)
    pub rate_limit_per_second: u32,
    /// Requests allowed in a burst above the sustained rate (default: 50)
    pub rate_limit_burst: u32,
    /// Per-request timeout in seconds (default: 10)
    pub request_timeout_seconds: u64,
}

fn parse_env<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `CACHE_TTL_SECONDS` - Cache TTL in seconds (default: 30, zero is ignored)
    /// - `CACHE_MAX_ENTRIES` - Maximum cache entries (default: 10,000, zero is ignored)
    /// - `RATE_LIMIT_PER_SECOND` - Sustained request rate (default: 100)
    /// - `RATE_LIMIT_BURST` - Burst size (default: 50)
    /// - `REQUEST_TIMEOUT_SECONDS` - Request timeout (default: 10)
    pub fn from_env() -> Self {
        Self {
            cache_ttl_seconds: parse_env("CACHE_TTL_SECONDS")
                .filter(|&ttl| ttl > 0)
                .unwrap_or(DEFAULT_CACHE_TTL_SECONDS),
            cache_max_entries: parse_env("CACHE_MAX_ENTRIES")
                .filter(|&max| max > 0)
                .unwrap_or(10_000),
            rate_limit_per_second: parse_env("RATE_LIMIT_PER_SECOND").unwrap_or(100),
            rate_limit_burst: parse_env("RATE_LIMIT_BURST").unwrap_or(50),
            request_timeout_seconds: parse_env("REQUEST_TIMEOUT_SECONDS").unwrap_or(10),
        }
    }

    /// Get cache TTL as a Duration.
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_seconds)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}
