//! Reqwest-based [`ConnectionTester`].
//!
//! ```rust,ignore
//! use s3profile_core::reqwest::{ReqwestConfig, ReqwestTester};
//!
//! let tester = ReqwestTester::new(ReqwestConfig::default())?;
//! let outcome = tester.test_connection(&params).await?;
//! ```
//!
//! [`ConnectionTester`]: crate::ConnectionTester

mod client;
mod config;
mod signing;

pub use client::ReqwestTester;
pub use config::{DEFAULT_TEST_TIMEOUT, ReqwestConfig};

/// Tracing target for reqwest tester operations.
pub const TRACING_TARGET: &str = "s3profile_core::reqwest";
