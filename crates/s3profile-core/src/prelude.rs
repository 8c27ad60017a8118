//! Convenient re-exports for common use.

pub use crate::error::{BoxedError, Error, ErrorKind, Result};
pub use crate::provider::{ConnectionTester, ProfileStore, RegionDefaultsSource};
pub use crate::types::{
    Bookmark, ClientParams, ConnectionTestOutcome, Credentials, ProfileId, ProfileOrigin,
    RegionDefaults, S3Config, S3Profile,
};
