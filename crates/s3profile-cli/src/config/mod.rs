//! CLI configuration management.
//!
//! This module defines the complete CLI configuration hierarchy:
//!
//! ```text
//! Cli
//! ├── command: Command               # list, create, edit, test
//! ├── store: StoreConfig             # Profiles file
//! ├── region: RegionDefaultsConfig   # Defaults for new profiles
//! └── http: ReqwestConfig            # Connectivity tester
//! ```
//!
//! All configuration can be provided via CLI arguments or environment variables.
//! Use `--help` to see all available options.

mod command;
mod region;
mod store;

use std::process;

use anyhow::Context;
use clap::Parser;
pub use command::{Command, FieldArgs};
pub use region::RegionDefaultsConfig;
use s3profile_core::reqwest::ReqwestConfig;
pub use store::StoreConfig;

use crate::{TRACING_TARGET_CONFIG, TRACING_TARGET_STARTUP};

/// Complete CLI configuration.
#[derive(Debug, Clone, Parser)]
#[command(name = "s3profile")]
#[command(about = "Create, edit and test S3 connection profiles")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Profile store configuration.
    #[clap(flatten)]
    pub store: StoreConfig,

    /// Defaults for new profiles.
    #[clap(flatten)]
    pub region: RegionDefaultsConfig,

    /// Connectivity tester configuration.
    #[clap(flatten)]
    pub http: ReqwestConfig,

    /// Write logs as JSON lines.
    #[arg(long, env = "S3PROFILE_LOG_JSON", global = true)]
    pub log_json: bool,
}

impl Cli {
    /// Loads environment variables from .env file (if enabled) and parses CLI arguments.
    pub fn init() -> Self {
        Self::load_dotenv();
        Self::parse()
    }

    /// Loads environment variables from .env file if the dotenv feature is enabled.
    #[cfg(feature = "dotenv")]
    fn load_dotenv() {
        if let Err(err) = dotenvy::dotenv()
            && !err.not_found()
        {
            eprintln!("Warning: failed to load .env file: {err}");
        }
    }

    /// No-op when dotenv feature is disabled.
    #[cfg(not(feature = "dotenv"))]
    fn load_dotenv() {}

    /// Validates all configuration values.
    pub fn validate(&self) -> anyhow::Result<()> {
        self.store
            .validate()
            .context("invalid profile store configuration")?;
        self.region
            .validate()
            .context("invalid region defaults configuration")?;
        if self.http.http_timeout > 300 {
            anyhow::bail!(
                "HTTP timeout {} seconds is invalid. Must be at most 300 seconds.",
                self.http.http_timeout
            );
        }
        Ok(())
    }

    /// Logs configuration at debug level (no sensitive information).
    pub fn log(&self) {
        tracing::debug!(
            target: TRACING_TARGET_STARTUP,
            version = env!("CARGO_PKG_VERSION"),
            pid = process::id(),
            arch = std::env::consts::ARCH,
            os = std::env::consts::OS,
            features = ?Self::enabled_features(),
            "Build information"
        );

        self.store.log();
        self.region.log();

        tracing::debug!(
            target: TRACING_TARGET_CONFIG,
            http_timeout_secs = self.http.timeout().as_secs(),
            user_agent = %self.http.user_agent(),
            "Connectivity tester configuration"
        );
    }

    /// Returns a list of enabled compile-time features.
    fn enabled_features() -> Vec<&'static str> {
        [cfg!(feature = "dotenv").then_some("dotenv")]
        .into_iter()
        .flatten()
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_before_subcommand() {
        let cli = Cli::try_parse_from([
            "s3profile",
            "--profiles-file",
            "/tmp/profiles.json",
            "--default-s3-url",
            "https://minio.region",
            "list",
        ])
        .unwrap();

        assert_eq!(cli.store.profiles_file.to_str(), Some("/tmp/profiles.json"));
        assert!(cli.region.region_defaults().is_some());
        assert!(matches!(cli.command, Command::List));
        cli.validate().unwrap();
    }

    #[test]
    fn test_excessive_http_timeout_is_rejected() {
        let cli = Cli::try_parse_from(["s3profile", "--http-timeout", "900", "list"]).unwrap();
        assert!(cli.validate().is_err());
    }
}
