use log::warn;
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://192.168.1.3:8000";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(10_000);
pub const HEALTH_PATH: &str = "/health";

pub const ENV_BASE_URL: &str = "CLUTCH_API_URL";
pub const ENV_TIMEOUT_MS: &str = "CLUTCH_API_TIMEOUT_MS";

/// Where the analytics backend lives and how to talk to it.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Origin without a trailing slash, e.g. `http://192.168.1.3:8000`.
    pub base_url: String,
    pub timeout: Duration,
    pub default_headers: HeaderMap,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        default_headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        Self {
            base_url: normalize_base_url(base_url.into()),
            timeout: DEFAULT_TIMEOUT,
            default_headers,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Defaults, overridden by `CLUTCH_API_URL` and `CLUTCH_API_TIMEOUT_MS`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = match lookup(ENV_BASE_URL) {
            Some(url) if is_http_origin(&url) => Self::new(url),
            Some(url) => {
                warn!("ignoring {ENV_BASE_URL}={url:?}: expected an http(s) origin");
                Self::default()
            }
            None => Self::default(),
        };

        if let Some(raw) = lookup(ENV_TIMEOUT_MS) {
            match raw.trim().parse::<u64>() {
                Ok(ms) if ms > 0 => config.timeout = Duration::from_millis(ms),
                _ => warn!("ignoring {ENV_TIMEOUT_MS}={raw:?}: expected a positive integer"),
            }
        }

        config
    }

    /// Join the origin with an endpoint path. The path is used as given; any
    /// escaping is the caller's job.
    pub fn api_url(&self, endpoint: &str) -> String {
        format!("{}{endpoint}", self.base_url)
    }
}

fn normalize_base_url(url: String) -> String {
    url.trim().trim_end_matches('/').to_owned()
}

fn is_http_origin(url: &str) -> bool {
    let url = url.trim();
    url.starts_with("http://") || url.starts_with("https://")
}
