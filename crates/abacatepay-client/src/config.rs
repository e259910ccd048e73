//! Client configuration.

use std::time::Duration;

/// SDK version, sent in the `User-Agent` header.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Production API host.
pub const DEFAULT_API_URL: &str = "https://api.abacatepay.com";

/// Timeout applied when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(500);

/// Environment variable overriding the API host.
pub const API_URL_ENV: &str = "ABACATEPAY_API_URL";

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "ABACATEPAY_API_KEY";

/// Environment variable holding the default timeout in milliseconds.
pub const TIMEOUT_MS_ENV: &str = "ABACATEPAY_TIMEOUT_MS";

/// Configuration for [`AbacatePay`](crate::AbacatePay).
#[derive(Debug, Clone, Default)]
pub struct ClientConfig {
    /// API key (required).
    pub api_key: String,

    /// API host. Falls back to `ABACATEPAY_API_URL`, then [`DEFAULT_API_URL`].
    pub base_url: Option<String>,

    /// Default request timeout. Falls back to [`DEFAULT_TIMEOUT`].
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    /// Create a configuration with the given API key.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Reads `ABACATEPAY_API_KEY`, `ABACATEPAY_API_URL` and
    /// `ABACATEPAY_TIMEOUT_MS`. Missing or unparseable values are left unset.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            api_key: std::env::var(API_KEY_ENV).unwrap_or_default(),
            base_url: std::env::var(API_URL_ENV).ok().filter(|s| !s.is_empty()),
            timeout: std::env::var(TIMEOUT_MS_ENV)
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_millis),
        }
    }

    /// Set the API host.
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the default request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// The effective API host, consulting the environment when unset.
    #[must_use]
    pub fn resolved_base_url(&self) -> String {
        resolve_base_url(self.base_url.as_deref(), std::env::var(API_URL_ENV).ok())
    }

    /// The effective default timeout.
    #[must_use]
    pub fn resolved_timeout(&self) -> Duration {
        self.timeout
            .filter(|t| !t.is_zero())
            .unwrap_or(DEFAULT_TIMEOUT)
    }
}

/// Pick the API host: explicit value, then environment, then production.
///
/// Empty values are treated as unset.
#[must_use]
pub fn resolve_base_url(explicit: Option<&str>, env: Option<String>) -> String {
    explicit
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .or_else(|| env.filter(|s| !s.is_empty()))
        .unwrap_or_else(|| DEFAULT_API_URL.to_string())
}
