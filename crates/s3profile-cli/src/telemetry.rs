//! Tracing subscriber setup.

use anyhow::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Directives used when `RUST_LOG` is unset or empty.
const DEFAULT_DIRECTIVES: &str = "info";

/// Installs the global subscriber: an `EnvFilter` from `RUST_LOG` and a
/// `fmt` layer writing to stderr, as JSON lines when `json` is set.
///
/// ```bash
/// RUST_LOG=debug s3profile list
/// RUST_LOG=s3profile_engine=trace s3profile create --url minio.lab
/// ```
///
/// # Errors
///
/// Returns an error if `RUST_LOG` cannot be parsed or a subscriber is
/// already installed.
pub(crate) fn init_tracing(json: bool) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(DEFAULT_DIRECTIVES))
        .context("invalid log filter directives")?;

    let fmt_layer = fmt::layer().with_writer(std::io::stderr).with_target(true);
    let registry = tracing_subscriber::registry().with(filter);

    let installed = if json {
        registry.with(fmt_layer.json()).try_init()
    } else {
        registry.with(fmt_layer).try_init()
    };

    installed.context("failed to install the tracing subscriber")
}
