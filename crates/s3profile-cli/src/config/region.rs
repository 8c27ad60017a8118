//! Region defaults configuration.

use anyhow::anyhow;
use clap::Args;
use s3profile_core::RegionDefaults;
use serde::{Deserialize, Serialize};

use crate::TRACING_TARGET_CONFIG;

/// Default S3 settings of the deployment region.
///
/// # Environment Variables
///
/// - `S3_DEFAULT_URL` - Endpoint pre-filled in new profiles
/// - `S3_DEFAULT_REGION` - Region pre-filled in new profiles
/// - `S3_DEFAULT_PATH_STYLE` - Whether new profiles use path-style addressing
///
/// Without a URL the region defines no defaults and new profiles start blank.
#[derive(Debug, Clone, Default, Args, Serialize, Deserialize)]
#[must_use = "config does nothing unless you use it"]
pub struct RegionDefaultsConfig {
    /// Endpoint URL pre-filled in new profiles.
    #[arg(long, env = "S3_DEFAULT_URL")]
    pub default_s3_url: Option<String>,

    /// Region pre-filled in new profiles.
    #[arg(long, env = "S3_DEFAULT_REGION", requires = "default_s3_url")]
    pub default_s3_region: Option<String>,

    /// Use path-style addressing for new profiles.
    #[arg(long, env = "S3_DEFAULT_PATH_STYLE", default_value_t = false)]
    #[serde(default)]
    pub default_s3_path_style: bool,
}

impl RegionDefaultsConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        if let Some(url) = &self.default_s3_url
            && url.trim().is_empty()
        {
            return Err(anyhow!("Default S3 URL must not be blank when set"));
        }
        Ok(())
    }

    /// Returns the region defaults, if a default URL is configured.
    pub fn region_defaults(&self) -> Option<RegionDefaults> {
        let url = self.default_s3_url.as_deref()?;
        let defaults = RegionDefaults::new(url).with_path_style_access(self.default_s3_path_style);

        Some(match &self.default_s3_region {
            Some(region) => defaults.with_region(region.clone()),
            None => defaults,
        })
    }

    pub fn log(&self) {
        tracing::debug!(
            target: TRACING_TARGET_CONFIG,
            default_s3_url = ?self.default_s3_url,
            default_s3_region = ?self.default_s3_region,
            default_s3_path_style = self.default_s3_path_style,
            "Region defaults configuration"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_url_means_no_defaults() {
        assert!(RegionDefaultsConfig::default().region_defaults().is_none());
    }

    #[test]
    fn test_defaults_from_flags() {
        let config = RegionDefaultsConfig {
            default_s3_url: Some("https://minio.region".into()),
            default_s3_region: Some("fr-par".into()),
            default_s3_path_style: true,
        };

        let defaults = config.region_defaults().unwrap();
        assert_eq!(defaults.url, "https://minio.region");
        assert_eq!(defaults.region.as_deref(), Some("fr-par"));
        assert!(defaults.path_style_access);
    }

    #[test]
    fn test_blank_url_is_rejected() {
        let config = RegionDefaultsConfig {
            default_s3_url: Some("  ".into()),
            ..RegionDefaultsConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
