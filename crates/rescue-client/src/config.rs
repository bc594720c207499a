//! Client configuration

use std::time::Duration;

/// Configuration for the signature/deadline source client
#[derive(Debug, Clone)]
pub struct StoreClientConfig {
    /// Base URL of the source, without trailing path
    pub base_url: String,
    /// Per-request timeout; keep well under the polling cadence so a hung
    /// request never stacks onto the next tick
    pub request_timeout: Duration,
}

impl Default for StoreClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            request_timeout: Duration::from_secs(2),
        }
    }
}

impl StoreClientConfig {
    /// Config for a source at `base_url` with default timeout
    pub fn for_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}
