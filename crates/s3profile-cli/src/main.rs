#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod command;
mod config;
mod store;
mod telemetry;

use std::process;
use std::sync::Arc;

use anyhow::Context;
use s3profile_core::ProfileStore;
use s3profile_core::reqwest::ReqwestTester;
use s3profile_engine::ProfileEditor;

use crate::config::{Cli, Command};
use crate::store::FileProfileStore;

// Tracing target constants
pub const TRACING_TARGET_STARTUP: &str = "s3profile_cli::startup";
pub const TRACING_TARGET_SHUTDOWN: &str = "s3profile_cli::shutdown";
pub const TRACING_TARGET_CONFIG: &str = "s3profile_cli::config";
pub const TRACING_TARGET_STORE: &str = "s3profile_cli::store";
pub const TRACING_TARGET_COMMAND: &str = "s3profile_cli::command";

#[tokio::main]
async fn main() {
    let Err(error) = run().await else {
        process::exit(0);
    };

    if tracing::enabled!(tracing::Level::ERROR) {
        tracing::error!(
            target: TRACING_TARGET_SHUTDOWN,
            error = %format!("{error:#}"),
            "s3profile terminated with error"
        );
    } else {
        eprintln!("Error: {error:#}");
    }

    process::exit(1);
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::init();
    telemetry::init_tracing(cli.log_json)?;

    cli.log();
    cli.validate()?;

    let store = Arc::new(
        FileProfileStore::open(&cli.store.profiles_file)
            .await
            .context("failed to open the profile store")?,
    );

    if let Command::List = cli.command {
        command::list(store.as_ref());
        return Ok(());
    }

    let tester =
        ReqwestTester::new(cli.http.clone()).context("failed to create connectivity tester")?;
    let editor = ProfileEditor::new(
        store.clone(),
        Arc::new(cli.region.region_defaults()),
        Arc::new(tester),
    );

    tracing::debug!(
        target: TRACING_TARGET_STARTUP,
        profiles_file = %store.path().display(),
        profiles = store.profiles().len(),
        "Profile editor ready"
    );

    command::run(&editor, &cli.command).await
}
