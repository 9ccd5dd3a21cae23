//! Client configuration.
//!
//! Values come from the environment with builder-style overrides on top:
//!
//! | Variable             | Default                  |
//! |----------------------|--------------------------|
//! | `PLAZA_API_URL`      | `http://localhost:8000`  |
//! | `PLAZA_TIMEOUT_SECS` | `10`                     |
//! | `PLAZA_SESSION_FILE` | `~/.plaza/session.json`  |

use std::path::PathBuf;
use std::time::Duration;

use crate::adapters::default_session_path;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_FEED_PAGE_SIZE: usize = 20;

pub const ENV_API_URL: &str = "PLAZA_API_URL";
pub const ENV_TIMEOUT_SECS: &str = "PLAZA_TIMEOUT_SECS";
pub const ENV_SESSION_FILE: &str = "PLAZA_SESSION_FILE";

/// Configuration for the gateway and the session store.
///
/// # Example
///
/// ```ignore
/// use plaza::config::ClientConfig;
///
/// let config = ClientConfig::from_env()
///     .with_api_url("http://api.internal:8000")
///     .with_timeout(Duration::from_secs(3));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Base URL of the REST API, without a trailing slash
    pub api_url: String,
    /// Fixed timeout applied to every request
    pub timeout: Duration,
    /// Where the signed-in user is persisted (None if no home directory)
    pub session_file: Option<PathBuf>,
    /// Page size for feed requests
    pub feed_page_size: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            session_file: default_session_path(),
            feed_page_size: DEFAULT_FEED_PAGE_SIZE,
        }
    }
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the API base URL. Trailing slashes are dropped.
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = normalize_url(&url.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_session_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.session_file = Some(path.into());
        self
    }

    pub fn with_feed_page_size(mut self, size: usize) -> Self {
        self.feed_page_size = size.max(1);
        self
    }

    /// Build the configuration from `PLAZA_*` environment variables.
    ///
    /// Empty or unparseable values fall back to the defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(url) = env_non_empty(ENV_API_URL) {
            config = config.with_api_url(url);
        }

        if let Some(raw) = env_non_empty(ENV_TIMEOUT_SECS) {
            match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => config.timeout = Duration::from_secs(secs),
                _ => tracing::warn!("Ignoring invalid {}={:?}", ENV_TIMEOUT_SECS, raw),
            }
        }

        if let Some(path) = env_non_empty(ENV_SESSION_FILE) {
            config.session_file = Some(PathBuf::from(path));
        }

        config
    }
}

fn env_non_empty(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn normalize_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}
