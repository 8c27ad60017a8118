//! Profile store configuration.

use std::path::PathBuf;

use anyhow::anyhow;
use clap::Args;
use serde::{Deserialize, Serialize};

use crate::TRACING_TARGET_CONFIG;

/// Location of the JSON file holding user-created profiles.
#[derive(Debug, Clone, Args, Serialize, Deserialize)]
#[must_use = "config does nothing unless you use it"]
pub struct StoreConfig {
    /// Path to the JSON file backing the profile store.
    ///
    /// The file is created on the first save.
    #[arg(
        long,
        env = "S3PROFILE_PROFILES_FILE",
        default_value = "./s3-profiles.json"
    )]
    pub profiles_file: PathBuf,
}

impl StoreConfig {
    /// Rejects paths that cannot name a file.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.profiles_file.as_os_str().is_empty() {
            return Err(anyhow!("Profiles file path must not be empty"));
        }

        if self.profiles_file.is_dir() {
            return Err(anyhow!(
                "Profiles file {} is a directory",
                self.profiles_file.display()
            ));
        }

        Ok(())
    }

    pub fn log(&self) {
        tracing::debug!(
            target: TRACING_TARGET_CONFIG,
            profiles_file = %self.profiles_file.display(),
            "Profile store configuration"
        );
    }
}
