//! Connectivity tester settings.

use std::time::Duration;

#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};

/// Connection test timeout used when none (or zero) is configured.
pub const DEFAULT_TEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Settings of the [`ReqwestTester`](super::ReqwestTester).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
#[serde(rename_all = "camelCase")]
pub struct ReqwestConfig {
    /// Seconds to wait for the endpoint to answer (0 uses the default of 10)
    #[cfg_attr(
        feature = "config",
        arg(long = "http-timeout", env = "HTTP_TIMEOUT", default_value_t = 0)
    )]
    #[serde(default)]
    pub http_timeout: u64,

    /// User-Agent sent with connection test requests
    #[cfg_attr(
        feature = "config",
        arg(long = "http-user-agent", env = "HTTP_USER_AGENT")
    )]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,

    /// Accept self-signed or otherwise invalid TLS certificates
    #[cfg_attr(
        feature = "config",
        arg(long = "http-insecure", env = "HTTP_INSECURE", default_value_t = false)
    )]
    #[serde(default)]
    pub accept_invalid_certs: bool,
}

impl ReqwestConfig {
    /// Connection test timeout, falling back to [`DEFAULT_TEST_TIMEOUT`].
    pub fn timeout(&self) -> Duration {
        match self.http_timeout {
            0 => DEFAULT_TEST_TIMEOUT,
            secs => Duration::from_secs(secs),
        }
    }

    /// User agent, falling back to `s3profile/<version>`.
    pub fn user_agent(&self) -> String {
        match &self.user_agent {
            Some(user_agent) => user_agent.clone(),
            None => concat!("s3profile/", env!("CARGO_PKG_VERSION")).to_owned(),
        }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.http_timeout = timeout.as_secs();
        self
    }

    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Trusts any certificate, for self-hosted endpoints.
    #[must_use]
    pub fn with_invalid_certs_accepted(mut self) -> Self {
        self.accept_invalid_certs = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_values_use_defaults() {
        let config = ReqwestConfig::default();
        assert_eq!(config.timeout(), DEFAULT_TEST_TIMEOUT);
        assert!(config.user_agent().starts_with("s3profile/"));
        assert!(!config.accept_invalid_certs);
    }

    #[test]
    fn test_overrides() {
        let config = ReqwestConfig::default()
            .with_timeout(Duration::from_secs(3))
            .with_user_agent("tester/1.0")
            .with_invalid_certs_accepted();

        assert_eq!(config.timeout(), Duration::from_secs(3));
        assert_eq!(config.user_agent(), "tester/1.0");
        assert!(config.accept_invalid_certs);
    }

    #[test]
    fn test_deserializes_from_partial_json() {
        let config: ReqwestConfig = serde_json::from_str(r#"{"httpTimeout": 5}"#).unwrap();
        assert_eq!(config.timeout(), Duration::from_secs(5));
        assert!(config.user_agent.is_none());
    }
}
