//! Deployment-region S3 defaults.

use serde::{Deserialize, Serialize};

/// Default S3 connection values suggested by the deployment region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionDefaults {
    /// Endpoint URL.
    pub url: String,
    /// S3 region, if the deployment pins one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    /// Whether the endpoint expects path-style addressing.
    #[serde(default)]
    pub path_style_access: bool,
}

impl RegionDefaults {
    /// Creates region defaults for the given endpoint.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            region: None,
            path_style_access: false,
        }
    }

    /// Sets the region.
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Sets whether path-style addressing is used.
    pub fn with_path_style_access(mut self, path_style_access: bool) -> Self {
        self.path_style_access = path_style_access;
        self
    }
}
