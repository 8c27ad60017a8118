//! Collaborator traits consumed by the profile editing engine.

use std::sync::Arc;

use crate::Result;
use crate::types::{ClientParams, ConnectionTestOutcome, RegionDefaults, S3Config, S3Profile};

/// Type alias for a shared profile store.
pub type BoxedProfileStore = Arc<dyn ProfileStore>;

/// Type alias for a shared region defaults source.
pub type BoxedRegionDefaultsSource = Arc<dyn RegionDefaultsSource>;

/// Type alias for a shared connectivity tester.
pub type BoxedConnectionTester = Arc<dyn ConnectionTester>;

/// Persistent store of S3 profiles.
///
/// Implement this trait to back the editor with a concrete storage.
#[async_trait::async_trait]
pub trait ProfileStore: Send + Sync {
    /// Returns a snapshot of all known profiles.
    ///
    /// Implementations must return the same `Arc` until the list changes:
    /// derived computations key their caches on its identity.
    fn profiles(&self) -> Arc<[S3Profile]>;

    /// Creates the profile, or replaces the one with the same `creation_time`.
    async fn create_or_update_profile(&self, config: S3Config) -> Result<()>;
}

/// Source of per-region S3 defaults used to pre-fill new profiles.
pub trait RegionDefaultsSource: Send + Sync {
    /// Returns the defaults, if the deployment region defines any.
    fn region_defaults(&self) -> Option<RegionDefaults>;
}

impl RegionDefaultsSource for Option<RegionDefaults> {
    fn region_defaults(&self) -> Option<RegionDefaults> {
        self.clone()
    }
}

/// Checks whether an S3 endpoint can be reached with the given parameters.
#[async_trait::async_trait]
pub trait ConnectionTester: Send + Sync {
    /// Attempts to reach the endpoint and reports the outcome.
    ///
    /// An `Err` means the test itself could not run; an unreachable endpoint
    /// is an `Ok(ConnectionTestOutcome::Failure { .. })`.
    async fn test_connection(&self, params: &ClientParams) -> Result<ConnectionTestOutcome>;
}
