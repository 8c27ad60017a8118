//! In-memory collaborators for testing.
//!
//! This module provides mock implementations of [`ProfileStore`] and
//! [`ConnectionTester`] that record every call and can be told to fail.
//! They are useful for unit and integration testing of the editing engine.
//!
//! # Feature Flag
//!
//! This module is only available when the `test-utils` feature is enabled:
//!
//! ```toml
//! [dev-dependencies]
//! s3profile-core = { version = "...", features = ["test-utils"] }
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use s3profile_core::mock::{MockConnectionTester, MockProfileStore};
//!
//! let store = MockProfileStore::new([profile]);
//! let tester = MockConnectionTester::failing_with("connection refused");
//! ```

use std::sync::Arc;

use parking_lot::{Mutex, RwLock};

use crate::types::{ClientParams, ConnectionTestOutcome, S3Config, S3Profile};
use crate::{ConnectionTester, Error, ProfileStore, Result, TRACING_TARGET_MOCK};

/// Profile store that keeps its snapshot in memory and records submissions.
#[derive(Debug, Default)]
pub struct MockProfileStore {
    profiles: RwLock<Arc<[S3Profile]>>,
    submissions: Mutex<Vec<S3Config>>,
    failure: Option<String>,
}

impl MockProfileStore {
    /// Creates a store pre-populated with the given profiles.
    pub fn new(profiles: impl IntoIterator<Item = S3Profile>) -> Self {
        Self {
            profiles: RwLock::new(profiles.into_iter().collect()),
            submissions: Mutex::new(Vec::new()),
            failure: None,
        }
    }

    /// Makes every write fail with an external error carrying `message`.
    pub fn with_failure(mut self, message: impl Into<String>) -> Self {
        self.failure = Some(message.into());
        self
    }

    /// Returns every configuration handed to the store, in order.
    pub fn submissions(&self) -> Vec<S3Config> {
        self.submissions.lock().clone()
    }
}

#[async_trait::async_trait]
impl ProfileStore for MockProfileStore {
    fn profiles(&self) -> Arc<[S3Profile]> {
        self.profiles.read().clone()
    }

    async fn create_or_update_profile(&self, config: S3Config) -> Result<()> {
        if let Some(message) = &self.failure {
            tracing::debug!(
                target: TRACING_TARGET_MOCK,
                creation_time = %config.creation_time,
                "Rejecting profile write"
            );
            return Err(Error::external_error().with_message(message.clone()));
        }

        self.submissions.lock().push(config.clone());

        let mut profiles = self.profiles.write();
        let mut next: Vec<S3Profile> = profiles.iter().cloned().collect();
        match next
            .iter_mut()
            .find(|p| p.id() == config.creation_time)
        {
            Some(existing) => existing.config = config,
            None => next.push(S3Profile::created_by_user(config)),
        }
        *profiles = next.into();

        Ok(())
    }
}

/// Connectivity tester returning a fixed outcome and recording its inputs.
#[derive(Debug)]
pub struct MockConnectionTester {
    outcome: std::result::Result<ConnectionTestOutcome, String>,
    calls: Mutex<Vec<ClientParams>>,
}

impl Default for MockConnectionTester {
    fn default() -> Self {
        Self::new(ConnectionTestOutcome::Success)
    }
}

impl MockConnectionTester {
    /// Creates a tester that always reports `outcome`.
    pub fn new(outcome: ConnectionTestOutcome) -> Self {
        Self {
            outcome: Ok(outcome),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Creates a tester that reports an unreachable endpoint.
    pub fn failing_with(error_message: impl Into<String>) -> Self {
        Self::new(ConnectionTestOutcome::failure(error_message))
    }

    /// Creates a tester whose test itself errors out.
    pub fn erroring_with(message: impl Into<String>) -> Self {
        Self {
            outcome: Err(message.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Returns every parameter set the tester was called with.
    pub fn calls(&self) -> Vec<ClientParams> {
        self.calls.lock().clone()
    }
}

#[async_trait::async_trait]
impl ConnectionTester for MockConnectionTester {
    async fn test_connection(&self, params: &ClientParams) -> Result<ConnectionTestOutcome> {
        self.calls.lock().push(params.clone());

        tracing::debug!(
            target: TRACING_TARGET_MOCK,
            url = %params.url,
            "Mock connectivity test"
        );

        self.outcome
            .clone()
            .map_err(|message| Error::network_error().with_message(message))
    }
}
