//! Runtime settings from environment (`.env` honored via dotenvy).

use std::time::Duration;

pub const BASE_URL_ENV: &str = "API_BUILDER_BASE_URL";
pub const TIMEOUT_ENV: &str = "API_BUILDER_TIMEOUT_SECS";
pub const BIND_ENV: &str = "API_BUILDER_BIND";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    /// Endpoint registry root, e.g. `http://localhost:8000/api`. No trailing slash.
    pub base_url: String,
    pub request_timeout: Duration,
    pub bind_addr: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            base_url: "http://localhost:8000/api".into(),
            request_timeout: Duration::from_secs(30),
            bind_addr: "127.0.0.1:3000".into(),
        }
    }
}

impl Settings {
    /// Load `.env` if present, then read the process environment.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset or unparsable values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Settings::default();
        let base_url = lookup(BASE_URL_ENV)
            .map(|s| s.trim_end_matches('/').to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.base_url);
        let request_timeout = lookup(TIMEOUT_ENV)
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.request_timeout);
        let bind_addr = lookup(BIND_ENV).unwrap_or(defaults.bind_addr);
        Settings {
            base_url,
            request_timeout,
            bind_addr,
        }
    }
}
