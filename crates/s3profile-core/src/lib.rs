#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod error;
mod provider;

pub mod types;

#[cfg(feature = "test-utils")]
#[cfg_attr(docsrs, doc(cfg(feature = "test-utils")))]
pub mod mock;

#[cfg(feature = "reqwest")]
#[cfg_attr(docsrs, doc(cfg(feature = "reqwest")))]
pub mod reqwest;

#[doc(hidden)]
pub mod prelude;

pub use error::{BoxedError, Error, ErrorKind, Result};
pub use provider::{
    BoxedConnectionTester, BoxedProfileStore, BoxedRegionDefaultsSource, ConnectionTester,
    ProfileStore, RegionDefaultsSource,
};
pub use types::{
    Bookmark, ClientParams, ConnectionTestOutcome, Credentials, ProfileId, ProfileOrigin,
    RegionDefaults, S3Config, S3Profile,
};

/// Tracing target for mock collaborators.
pub const TRACING_TARGET_MOCK: &str = "s3profile_core::mock";
