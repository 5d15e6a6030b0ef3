//! Client configuration.
//!
//! `ClientConfig` is assembled with consuming `with_*` setters (or from the
//! environment) and then handed to `XonClient`, which owns it immutably for
//! its whole lifetime. The router and executor only ever borrow it.
//!
//! Environment overlay (`from_env`):
//! - `XON_API_KEY` (empty means absent)
//! - `XON_BASE_URL`, `XON_PLUS_BASE_URL`, `XON_PASSWORD_BASE_URL`
//! - `XON_TIMEOUT_SECS`, `XON_MAX_RETRIES`
//! - `XON_RATE_LIMIT` (`true|false|1|0`)

use std::time::Duration;

use crate::error::ApiError;
use crate::secret::Credential;

pub const DEFAULT_BASE_URL: &str = "https://api.xposedornot.com";
pub const DEFAULT_PLUS_BASE_URL: &str = "https://plus-api.xposedornot.com";
pub const DEFAULT_PASSWORD_BASE_URL: &str = "https://passwords.xposedornot.com/api";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_MAX_RETRIES: u32 = 3;
/// Upper bound on a server-supplied `Retry-After` wait.
pub const MAX_RETRY_AFTER: Duration = Duration::from_secs(60);

/// Delay schedule between rate-limited attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backoff {
    Fixed(Duration),
    /// `initial * 2^retry`, capped at `max`.
    Exponential { initial: Duration, max: Duration },
}

impl Backoff {
    /// Delay before retry number `retry` (0 for the first retry).
    pub fn delay(&self, retry: u32) -> Duration {
        match *self {
            Backoff::Fixed(delay) => delay,
            Backoff::Exponential { initial, max } => {
                let factor = 1u32.checked_shl(retry).unwrap_or(u32::MAX);
                initial.saturating_mul(factor).min(max)
            }
        }
    }
}

impl Default for Backoff {
    fn default() -> Self {
        Backoff::Exponential {
            initial: Duration::from_secs(1),
            max: Duration::from_secs(16),
        }
    }
}

/// How the executor reacts to HTTP 429.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt; total attempts are `max_retries + 1`.
    pub max_retries: u32,
    /// When false a 429 fails immediately.
    pub rate_limit: bool,
    pub backoff: Backoff,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            rate_limit: true,
            backoff: Backoff::default(),
        }
    }
}

/// Base URLs of the three upstream backends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    /// Public API: breach list, free email check, analytics.
    pub free: String,
    /// Keyed API serving detailed email checks.
    pub premium: String,
    /// k-anonymity password lookups.
    pub password: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            free: DEFAULT_BASE_URL.to_string(),
            premium: DEFAULT_PLUS_BASE_URL.to_string(),
            password: DEFAULT_PASSWORD_BASE_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    endpoints: Endpoints,
    api_key: Option<Credential>,
    timeout: Duration,
    retry: RetryPolicy,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoints: Endpoints::default(),
            api_key: None,
            timeout: DEFAULT_TIMEOUT,
            retry: RetryPolicy::default(),
        }
    }
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults overlaid with the `XON_*` environment variables.
    pub fn from_env() -> Result<Self, ApiError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ApiError> {
        let mut config = Self::default();

        if let Some(key) = lookup("XON_API_KEY").filter(|k| !k.trim().is_empty()) {
            config = config.with_api_key(key.trim());
        }
        if let Some(url) = lookup("XON_BASE_URL") {
            config = config.with_base_url(&url);
        }
        if let Some(url) = lookup("XON_PLUS_BASE_URL") {
            config = config.with_plus_base_url(&url);
        }
        if let Some(url) = lookup("XON_PASSWORD_BASE_URL") {
            config = config.with_password_base_url(&url);
        }
        if let Some(raw) = lookup("XON_TIMEOUT_SECS") {
            let secs: u64 = raw
                .trim()
                .parse()
                .map_err(|e| ApiError::Config(format!("XON_TIMEOUT_SECS={raw:?}: {e}")))?;
            config = config.with_timeout(Duration::from_secs(secs));
        }
        if let Some(raw) = lookup("XON_MAX_RETRIES") {
            let retries: u32 = raw
                .trim()
                .parse()
                .map_err(|e| ApiError::Config(format!("XON_MAX_RETRIES={raw:?}: {e}")))?;
            config = config.with_max_retries(retries);
        }
        if let Some(raw) = lookup("XON_RATE_LIMIT") {
            let enabled = match raw.trim().to_ascii_lowercase().as_str() {
                "true" | "1" => true,
                "false" | "0" => false,
                _ => {
                    return Err(ApiError::Config(format!(
                        "XON_RATE_LIMIT must be true/false/1/0, got {raw:?}"
                    )))
                }
            };
            config = config.with_rate_limit(enabled);
        }

        Ok(config)
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(Credential::new(key));
        self
    }

    pub fn with_base_url(mut self, url: &str) -> Self {
        self.endpoints.free = normalize(url);
        self
    }

    pub fn with_plus_base_url(mut self, url: &str) -> Self {
        self.endpoints.premium = normalize(url);
        self
    }

    pub fn with_password_base_url(mut self, url: &str) -> Self {
        self.endpoints.password = normalize(url);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.retry.max_retries = max_retries;
        self
    }

    pub fn with_rate_limit(mut self, enabled: bool) -> Self {
        self.retry.rate_limit = enabled;
        self
    }

    pub fn with_backoff(mut self, backoff: Backoff) -> Self {
        self.retry.backoff = backoff;
        self
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    pub fn api_key(&self) -> Option<&Credential> {
        self.api_key.as_ref()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn retry(&self) -> &RetryPolicy {
        &self.retry
    }
}

fn normalize(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}
