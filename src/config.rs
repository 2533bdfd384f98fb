use std::time::Duration;

use crate::cache::CacheConfig;
use crate::pagination::DEFAULT_SIBLING_COUNT;
use crate::render::DEFAULT_UTC_OFFSET_HOURS;

pub const DEFAULT_API_URL: &str = "https://suitmedia-backend.suitdev.com/api/ideas";
pub const DEFAULT_START_LOCATION: &str = "/ideas";

/// Runtime settings, read from the environment (and `.env`, if present).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_url: String,
    pub http_timeout: Duration,
    pub sibling_count: u32,
    pub start_location: String,
    pub utc_offset_hours: i32,
    pub cache: CacheConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            http_timeout: Duration::from_secs(10),
            sibling_count: DEFAULT_SIBLING_COUNT,
            start_location: DEFAULT_START_LOCATION.to_string(),
            utc_offset_hours: DEFAULT_UTC_OFFSET_HOURS,
            cache: CacheConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_url: std::env::var("IDEAS_API_URL").unwrap_or(defaults.api_url),
            http_timeout: parse_env("IDEAS_HTTP_TIMEOUT_SECS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.http_timeout),
            sibling_count: parse_env("IDEAS_SIBLING_COUNT").unwrap_or(defaults.sibling_count),
            start_location: std::env::var("IDEAS_START_LOCATION")
                .unwrap_or(defaults.start_location),
            utc_offset_hours: parse_env("IDEAS_UTC_OFFSET_HOURS")
                .unwrap_or(defaults.utc_offset_hours),
            cache: CacheConfig::from_env(),
        }
    }
}

fn parse_env<T: std::str::FromStr>(env_var: &str) -> Option<T> {
    std::env::var(env_var).ok().and_then(|v| v.trim().parse().ok())
}
