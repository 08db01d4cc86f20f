//! Configuration for the remote adapter.

use std::time::Duration;

/// Environment variable holding the remote service base URL.
pub const ENV_REMOTE_URL: &str = "MILEPOST_REMOTE_URL";
/// Environment variable holding the remote service API key.
pub const ENV_REMOTE_KEY: &str = "MILEPOST_REMOTE_KEY";

/// Configuration for the remote store.
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    /// Base URL of the hosted service (no trailing slash).
    pub base_url: String,
    /// Static API key, sent as both `apikey` and bearer token.
    pub api_key: String,
    /// Per-request timeout. Expiry surfaces as a retryable transport
    /// error and feeds the coordinator's fallback path.
    pub timeout: Duration,
}

impl RemoteConfig {
    /// Creates a new configuration.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            api_key: api_key.into(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Reads the configuration from the environment.
    ///
    /// Returns `None` when either credential is missing or empty - the
    /// caller is expected to install [`crate::DisabledRemote`] so the
    /// process degrades instead of crashing at startup.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let base_url = std::env::var(ENV_REMOTE_URL).ok().filter(|v| !v.is_empty())?;
        let api_key = std::env::var(ENV_REMOTE_KEY).ok().filter(|v| !v.is_empty())?;
        Some(Self::new(base_url, api_key))
    }
}
