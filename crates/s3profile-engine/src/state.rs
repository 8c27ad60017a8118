//! Session state and its three transitions.
//!
//! The state is either `NotInitialized` or `Ready` with the form being
//! edited. It only changes through [`SessionStore::initialized`],
//! [`SessionStore::form_value_changed`] and
//! [`SessionStore::state_reset_to_not_initialized`], each applied atomically
//! under a write lock.

use std::sync::Arc;

use parking_lot::RwLock;
use s3profile_core::{Error, ProfileId, Result};
use strum::{AsRefStr, Display};

use crate::TRACING_TARGET_STATE;
use crate::form::{FormValueChange, FormValues};

/// Whether the session edits an existing profile or creates a new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, Display)]
#[strum(serialize_all = "snake_case")]
pub(crate) enum Action {
    Create,
    Update,
}

/// Payload of the `initialized` transition.
#[derive(Debug, Clone)]
pub(crate) struct InitializedPayload {
    /// Identity of the profile being edited; `None` when creating.
    pub profile_identity: Option<ProfileId>,
    pub initial_form_values: FormValues,
}

/// Contents of the `Ready` state.
#[derive(Debug)]
pub(crate) struct ReadyState {
    pub form_values: Arc<FormValues>,
    /// Identity of the edited profile, or a fresh one when creating.
    pub profile_identity: ProfileId,
    pub action: Action,
}

impl ReadyState {
    /// Identity of the stored profile being edited, if any.
    pub fn edited_profile_identity(&self) -> Option<ProfileId> {
        (self.action == Action::Update).then_some(self.profile_identity)
    }
}

#[derive(Debug, Clone)]
pub(crate) enum SessionState {
    NotInitialized,
    Ready(Arc<ReadyState>),
}

impl SessionState {
    /// Returns the ready state, if any.
    pub fn ready(&self) -> Option<&Arc<ReadyState>> {
        match self {
            Self::NotInitialized => None,
            Self::Ready(ready) => Some(ready),
        }
    }
}

#[derive(Debug)]
struct Versioned {
    state: SessionState,
    revision: u64,
}

/// Owner of the session state.
#[derive(Debug)]
pub(crate) struct SessionStore {
    inner: RwLock<Versioned>,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self {
            inner: RwLock::new(Versioned {
                state: SessionState::NotInitialized,
                revision: 0,
            }),
        }
    }
}

impl SessionStore {
    /// Returns a cheap snapshot of the current state.
    pub fn snapshot(&self) -> SessionState {
        self.inner.read().state.clone()
    }

    /// Returns the number of effective transitions applied so far.
    pub fn revision(&self) -> u64 {
        self.inner.read().revision
    }

    /// Replaces the state with a new `Ready` record and returns its identity.
    pub fn initialized(&self, payload: InitializedPayload) -> ProfileId {
        let (profile_identity, action) = match payload.profile_identity {
            Some(id) => (id, Action::Update),
            None => (ProfileId::now(), Action::Create),
        };

        let ready = ReadyState {
            form_values: Arc::new(payload.initial_form_values),
            profile_identity,
            action,
        };

        let mut inner = self.inner.write();
        inner.state = SessionState::Ready(Arc::new(ready));
        inner.revision += 1;

        tracing::debug!(
            target: TRACING_TARGET_STATE,
            revision = inner.revision,
            action = %action,
            profile_identity = %profile_identity,
            "Session initialized"
        );

        profile_identity
    }

    /// Replaces exactly one form field.
    ///
    /// Returns `Ok(false)` when the field already holds the value.
    ///
    /// # Errors
    ///
    /// Returns an invariant violation if the state is not `Ready`.
    pub fn form_value_changed(&self, change: FormValueChange) -> Result<bool> {
        let key = change.key();
        let mut inner = self.inner.write();

        let SessionState::Ready(ready) = &inner.state else {
            tracing::error!(
                target: TRACING_TARGET_STATE,
                key = %key,
                "Form value changed while not initialized"
            );
            return Err(Error::invariant_violation(format!(
                "cannot change `{key}`: no profile is being edited"
            )));
        };

        let Some(form_values) = ready.form_values.with_change(change) else {
            return Ok(false);
        };

        let next = ReadyState {
            form_values: Arc::new(form_values),
            profile_identity: ready.profile_identity,
            action: ready.action,
        };
        inner.state = SessionState::Ready(Arc::new(next));
        inner.revision += 1;

        tracing::debug!(
            target: TRACING_TARGET_STATE,
            revision = inner.revision,
            key = %key,
            "Form value changed"
        );

        Ok(true)
    }

    /// Discards the form. Idempotent.
    pub fn state_reset_to_not_initialized(&self) {
        let mut inner = self.inner.write();
        if matches!(inner.state, SessionState::NotInitialized) {
            return;
        }

        inner.state = SessionState::NotInitialized;
        inner.revision += 1;

        tracing::debug!(
            target: TRACING_TARGET_STATE,
            revision = inner.revision,
            "Session reset"
        );
    }
}
