//! Workflow coordinator: the public surface of the engine.

use std::fmt;

use s3profile_core::{
    BoxedConnectionTester, BoxedProfileStore, BoxedRegionDefaultsSource, ConnectionTestOutcome,
    Error, ProfileId, Result, S3Config,
};

use crate::TRACING_TARGET_WORKFLOW;
use crate::form::{FieldKey, FormValueChange, FormValues};
use crate::state::{InitializedPayload, SessionStore};
use crate::views::{MainView, ViewInputs, Views, infer_path_style_access};

/// Coordinates edits of one S3 connection profile.
///
/// Owns the session state and its derived views, and talks to the profile
/// store, region defaults and connectivity tester it was built with.
/// Operations are not serialized against each other: a `change_value`
/// issued while `submit` awaits the store is applied to the still-ready
/// session.
pub struct ProfileEditor {
    session: SessionStore,
    views: Views,
    profile_store: BoxedProfileStore,
    region_defaults: BoxedRegionDefaultsSource,
    connection_tester: BoxedConnectionTester,
}

impl fmt::Debug for ProfileEditor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProfileEditor")
            .field("ready", &self.session.snapshot().ready().is_some())
            .field("revision", &self.session.revision())
            .finish_non_exhaustive()
    }
}

impl ProfileEditor {
    /// Creates an editor with no profile being edited.
    pub fn new(
        profile_store: BoxedProfileStore,
        region_defaults: BoxedRegionDefaultsSource,
        connection_tester: BoxedConnectionTester,
    ) -> Self {
        Self {
            session: SessionStore::default(),
            views: Views::default(),
            profile_store,
            region_defaults,
            connection_tester,
        }
    }

    fn inputs(&self) -> ViewInputs {
        ViewInputs {
            state: self.session.snapshot(),
            profiles: self.profile_store.profiles(),
        }
    }

    /// Returns the aggregate view for the presentation layer.
    pub fn main(&self) -> MainView {
        self.views.main(&self.inputs())
    }

    /// Starts editing the profile `profile_identity`, or a new one.
    ///
    /// A new profile is pre-filled from the region defaults when there are
    /// any, and blank and anonymous otherwise.
    ///
    /// # Errors
    ///
    /// Returns an invariant violation if no user-created profile has the
    /// given identity.
    pub fn initialize(&self, profile_identity: Option<ProfileId>) -> Result<()> {
        let initial_form_values = match profile_identity {
            Some(id) => {
                let profiles = self.profile_store.profiles();
                let Some(profile) = profiles.iter().find(|p| p.is_editable() && p.id() == id)
                else {
                    tracing::error!(
                        target: TRACING_TARGET_WORKFLOW,
                        profile_identity = %id,
                        "Cannot edit unknown profile"
                    );
                    return Err(Error::invariant_violation(format!(
                        "no user-created profile with identity {id}"
                    )));
                };
                FormValues::from_s3_config(&profile.config)
            }
            None => match self.region_defaults.region_defaults() {
                Some(defaults) => FormValues::from_region_defaults(defaults),
                None => FormValues::blank(),
            },
        };

        let profile_identity = self.session.initialized(InitializedPayload {
            profile_identity,
            initial_form_values,
        });

        tracing::info!(
            target: TRACING_TARGET_WORKFLOW,
            profile_identity = %profile_identity,
            "Profile editing started"
        );

        Ok(())
    }

    /// Discards the form.
    pub fn reset(&self) {
        self.session.state_reset_to_not_initialized();
    }

    /// Sets one form field.
    ///
    /// Setting the URL also infers the addressing style from it when the
    /// URL names AWS or MinIO.
    ///
    /// # Errors
    ///
    /// Returns an invariant violation if no profile is being edited.
    pub fn change_value(&self, change: FormValueChange) -> Result<()> {
        let key = change.key();
        self.session.form_value_changed(change)?;

        if key != FieldKey::Url {
            return Ok(());
        }

        let Some(formatted_url) = self.views.formatted_form_values_url(&self.inputs()) else {
            return Ok(());
        };

        if let Some(path_style_access) = infer_path_style_access(&formatted_url) {
            tracing::debug!(
                target: TRACING_TARGET_WORKFLOW,
                url = %formatted_url,
                path_style_access,
                "Addressing style inferred from url"
            );
            self.session
                .form_value_changed(FormValueChange::PathStyleAccess(path_style_access))?;
        }

        Ok(())
    }

    fn not_submittable(operation: &str) -> Error {
        tracing::error!(
            target: TRACING_TARGET_WORKFLOW,
            operation,
            "Form is not submittable"
        );
        Error::invariant_violation(format!("cannot {operation}: the form is not submittable"))
    }

    /// Persists the form and ends the session.
    ///
    /// # Errors
    ///
    /// Returns an invariant violation if the form is not submittable, and
    /// the store's error if persisting fails. The session is left untouched
    /// on error.
    pub async fn submit(&self) -> Result<()> {
        let Some(config) = self.views.submittable_s3_config(&self.inputs())? else {
            return Err(Self::not_submittable("submit"));
        };
        let creation_time = config.creation_time;

        tracing::debug!(
            target: TRACING_TARGET_WORKFLOW,
            creation_time = %creation_time,
            name = %config.friendly_name,
            "Submitting profile"
        );

        self.profile_store
            .create_or_update_profile(S3Config::clone(&config))
            .await?;

        self.session.state_reset_to_not_initialized();

        tracing::info!(
            target: TRACING_TARGET_WORKFLOW,
            creation_time = %creation_time,
            "Profile saved"
        );

        Ok(())
    }

    /// Checks that the endpoint described by the form is reachable.
    ///
    /// # Errors
    ///
    /// Returns an invariant violation if the form is not submittable, and
    /// the tester's error if the test could not run.
    pub async fn test_connection(&self) -> Result<ConnectionTestOutcome> {
        let Some(params) = self.views.params_of_create_client(&self.inputs())? else {
            return Err(Self::not_submittable("test the connection"));
        };

        tracing::debug!(
            target: TRACING_TARGET_WORKFLOW,
            url = %params.url,
            access_key_id = ?params.credentials.as_ref().map(|c| c.access_key_id_masked()),
            "Testing connection"
        );

        let outcome = self.connection_tester.test_connection(&params).await?;

        tracing::info!(
            target: TRACING_TARGET_WORKFLOW,
            url = %params.url,
            success = outcome.is_success(),
            "Connection tested"
        );

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use s3profile_core::mock::{MockConnectionTester, MockProfileStore};
    use s3profile_core::{Bookmark, Credentials, ProfileStore, RegionDefaults, S3Profile};

    use super::*;
    use crate::form::FieldError;

    fn lab_profile() -> S3Profile {
        S3Profile::created_by_user(
            S3Config::new(ProfileId::new(100), "lab", "https://minio.lab", "a/b/")
                .with_path_style_access(true)
                .with_credentials(Credentials::new("key", "secret"))
                .with_bookmark(Bookmark::new("a/b/x", "x")),
        )
    }

    fn editor_with(
        store: Arc<MockProfileStore>,
        defaults: Option<RegionDefaults>,
        tester: Arc<MockConnectionTester>,
    ) -> ProfileEditor {
        ProfileEditor::new(store, Arc::new(defaults), tester)
    }

    fn editor() -> ProfileEditor {
        editor_with(
            Arc::new(MockProfileStore::default()),
            None,
            Arc::new(MockConnectionTester::default()),
        )
    }

    fn form(editor: &ProfileEditor) -> Arc<FormValues> {
        editor.main().ready().unwrap().form_values.clone()
    }

    #[test]
    fn test_initialize_blank_without_defaults() {
        let editor = editor();
        editor.initialize(None).unwrap();

        assert_eq!(*form(&editor), FormValues::blank());
        assert!(!editor.main().ready().unwrap().is_editing_existing_config);
    }

    #[test]
    fn test_initialize_from_region_defaults() {
        let defaults = RegionDefaults::new("https://minio.region").with_region("fr-par");
        let editor = editor_with(
            Arc::new(MockProfileStore::default()),
            Some(defaults),
            Arc::new(MockConnectionTester::default()),
        );
        editor.initialize(None).unwrap();

        let form = form(&editor);
        assert_eq!(form.url, "https://minio.region");
        assert_eq!(form.region.as_deref(), Some("fr-par"));
        assert!(!form.is_anonymous);
    }

    #[test]
    fn test_initialize_unknown_profile_is_invariant_violation() {
        let editor = editor();
        let error = editor.initialize(Some(ProfileId::new(1))).unwrap_err();

        assert!(error.is_invariant_violation());
        assert!(matches!(editor.main(), MainView::NotReady));
    }

    #[test]
    fn test_initialize_rejects_region_profiles() {
        let region = S3Profile::defined_in_region(S3Config::new(
            ProfileId::new(1),
            "region",
            "https://s3.region",
            "",
        ));
        let editor = editor_with(
            Arc::new(MockProfileStore::new([region])),
            None,
            Arc::new(MockConnectionTester::default()),
        );

        assert!(editor.initialize(Some(ProfileId::new(1))).is_err());
    }

    #[test]
    fn test_change_value_requires_initialization() {
        let error = editor()
            .change_value(FormValueChange::FriendlyName("lab".into()))
            .unwrap_err();
        assert!(error.is_invariant_violation());
    }

    #[test]
    fn test_url_change_infers_addressing_style() {
        let editor = editor();
        editor.initialize(None).unwrap();

        editor
            .change_value(FormValueChange::Url("play.MinIO.io".into()))
            .unwrap();
        assert!(form(&editor).path_style_access);

        editor
            .change_value(FormValueChange::Url("s3.amazonaws.com".into()))
            .unwrap();
        assert!(!form(&editor).path_style_access);
        assert_eq!(
            editor.views.formatted_form_values_url(&editor.inputs()).as_deref(),
            Some("https://s3.amazonaws.com")
        );
    }

    #[test]
    fn test_url_change_without_hint_keeps_addressing_style() {
        let editor = editor();
        editor.initialize(None).unwrap();
        editor
            .change_value(FormValueChange::PathStyleAccess(true))
            .unwrap();

        editor
            .change_value(FormValueChange::Url("storage.example.com".into()))
            .unwrap();
        assert!(form(&editor).path_style_access);
    }

    #[test]
    fn test_invalid_url_skips_inference() {
        let editor = editor();
        editor.initialize(None).unwrap();

        editor
            .change_value(FormValueChange::Url("minio host".into()))
            .unwrap();
        assert!(!form(&editor).path_style_access);
    }

    #[test]
    fn test_explicit_addressing_style_after_url_wins() {
        let editor = editor();
        editor.initialize(None).unwrap();

        editor
            .change_value(FormValueChange::Url("minio.lab".into()))
            .unwrap();
        editor
            .change_value(FormValueChange::PathStyleAccess(false))
            .unwrap();
        assert!(!form(&editor).path_style_access);
    }

    #[tokio::test]
    async fn test_submit_new_profile_and_reset() {
        let store = Arc::new(MockProfileStore::default());
        let editor = editor_with(store.clone(), None, Arc::new(MockConnectionTester::default()));
        editor.initialize(None).unwrap();
        editor
            .change_value(FormValueChange::FriendlyName("public".into()))
            .unwrap();
        editor
            .change_value(FormValueChange::Url("s3.amazonaws.com".into()))
            .unwrap();

        editor.submit().await.unwrap();

        let submissions = store.submissions();
        assert_eq!(submissions.len(), 1);
        assert_eq!(submissions[0].url, "https://s3.amazonaws.com");
        assert!(submissions[0].credentials.is_none());
        assert!(matches!(editor.main(), MainView::NotReady));
        assert_eq!(store.profiles().len(), 1);
    }

    #[tokio::test]
    async fn test_submit_blank_form_is_invariant_violation() {
        let store = Arc::new(MockProfileStore::default());
        let editor = editor_with(store.clone(), None, Arc::new(MockConnectionTester::default()));
        editor.initialize(None).unwrap();

        let ready = editor.main();
        assert_eq!(
            ready.ready().unwrap().form_values_errors.profile_name,
            Some(FieldError::IsRequired)
        );

        let error = editor.submit().await.unwrap_err();
        assert!(error.is_invariant_violation());
        assert!(store.submissions().is_empty());
    }

    #[tokio::test]
    async fn test_submit_store_failure_keeps_session() {
        let store = Arc::new(MockProfileStore::new([lab_profile()]).with_failure("disk full"));
        let editor = editor_with(store, None, Arc::new(MockConnectionTester::default()));
        editor.initialize(Some(ProfileId::new(100))).unwrap();

        let error = editor.submit().await.unwrap_err();
        assert_eq!(error.kind(), s3profile_core::ErrorKind::ExternalError);
        assert!(editor.main().ready().is_some());
    }

    #[tokio::test]
    async fn test_connection_relays_outcome() {
        let tester = Arc::new(MockConnectionTester::failing_with("connection refused"));
        let editor = editor_with(
            Arc::new(MockProfileStore::new([lab_profile()])),
            None,
            tester.clone(),
        );
        editor.initialize(Some(ProfileId::new(100))).unwrap();

        let outcome = editor.test_connection().await.unwrap();
        assert_eq!(outcome, ConnectionTestOutcome::failure("connection refused"));

        let calls = tester.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].url, "https://minio.lab");
        assert!(calls[0].path_style_access);
        assert_eq!(calls[0].credentials, Some(Credentials::new("key", "secret")));
        assert!(editor.main().ready().is_some());
    }

    #[tokio::test]
    async fn test_connection_requires_initialization() {
        let error = editor().test_connection().await.unwrap_err();
        assert!(error.is_invariant_violation());
    }
}
