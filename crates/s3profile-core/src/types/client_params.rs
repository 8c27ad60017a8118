//! Connectivity-test parameters and outcome.

use serde::{Deserialize, Serialize};

use super::{Credentials, S3Config};

/// The subset of a profile needed to build an S3 client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientParams {
    /// Endpoint URL, always with a scheme.
    pub url: String,
    /// Whether path-style addressing is used.
    pub path_style_access: bool,
    /// S3 region.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    /// Credentials; `None` for anonymous access.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credentials: Option<Credentials>,
}

impl From<&S3Config> for ClientParams {
    fn from(config: &S3Config) -> Self {
        Self {
            url: config.url.clone(),
            path_style_access: config.path_style_access,
            region: config.region.clone(),
            credentials: config.credentials.clone(),
        }
    }
}

/// Result reported by a connectivity test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum ConnectionTestOutcome {
    /// The endpoint was reached.
    Success,
    /// The endpoint could not be reached.
    #[serde(rename_all = "camelCase")]
    Failure {
        /// Human-readable reason.
        error_message: String,
    },
}

impl ConnectionTestOutcome {
    /// Creates a failure outcome.
    pub fn failure(error_message: impl Into<String>) -> Self {
        Self::Failure {
            error_message: error_message.into(),
        }
    }

    /// Returns `true` if the test succeeded.
    #[inline]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}
