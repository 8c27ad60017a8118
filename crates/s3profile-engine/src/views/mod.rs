//! Derived views over the session state.
//!
//! Every view is a pure function of the session state and the profile list
//! snapshot, cached by a [`Memo`] keyed on exactly the inputs it reads:
//!
//! ```text
//! state ──► form_values ──┬──► url_error ─────────┬──► form_values_errors ──► is_form_submittable
//!                         ├──► profile_name_error ┤            │
//!                         ├──► access_key_id_error┤            ▼
//!                         └──► secret_key_error ──┘   formatted_url ──► url_styles_examples
//! profiles ─┬─► existing_profile_names ─► profile_name_error   │
//!           └─► edited_profile ─────────────────────► submittable_s3_config ──► client_params
//! ```
//!
//! Views that are not applicable before initialization return `None`.

mod submission;
mod url_styles;
mod validation;

use std::sync::Arc;

use s3profile_core::{ClientParams, Error, ProfileId, Result, S3Config, S3Profile};
pub use submission::DEFAULT_WORKING_DIRECTORY_PATH;
pub use url_styles::{EXAMPLE_BUCKET_NAME, EXAMPLE_OBJECT_NAME_PREFIX, UrlStylesExamples};
pub(crate) use url_styles::infer_path_style_access;

use crate::TRACING_TARGET_VIEWS;
use crate::form::{FieldError, FormValues, FormValuesErrors};
use crate::memo::Memo;
use crate::state::{ReadyState, SessionState};

/// Inputs every view is computed from.
#[derive(Debug, Clone)]
pub(crate) struct ViewInputs {
    pub state: SessionState,
    pub profiles: Arc<[S3Profile]>,
}

impl ViewInputs {
    fn ready(&self) -> Option<&Arc<ReadyState>> {
        self.state.ready()
    }
}

/// The aggregate the presentation layer renders.
#[derive(Debug, Clone)]
pub enum MainView {
    /// No profile is being edited.
    NotReady,
    /// A profile is being edited.
    Ready(ReadyView),
}

impl MainView {
    /// Returns the ready view, if any.
    pub fn ready(&self) -> Option<&ReadyView> {
        match self {
            Self::NotReady => None,
            Self::Ready(view) => Some(view),
        }
    }
}

/// Everything the form needs while a profile is being edited.
#[derive(Debug, Clone)]
pub struct ReadyView {
    pub form_values: Arc<FormValues>,
    pub form_values_errors: Arc<FormValuesErrors>,
    pub is_form_submittable: bool,
    pub url_styles_examples: Option<Arc<UrlStylesExamples>>,
    /// `true` when an existing profile is being edited.
    pub is_editing_existing_config: bool,
}

type ErrorsKey = (
    Option<FieldError>,
    Option<FieldError>,
    Option<FieldError>,
    Option<FieldError>,
);

type SubmissionKey = (
    Arc<FormValues>,
    Arc<str>,
    ProfileId,
    Option<Arc<S3Config>>,
);

/// Memoized view graph.
pub(crate) struct Views {
    existing_profile_names: Memo<(Arc<[S3Profile]>, Option<ProfileId>), Arc<[String]>>,
    url_error: Memo<String, Option<FieldError>>,
    profile_name_error: Memo<(String, Arc<[String]>), Option<FieldError>>,
    access_key_id_error: Memo<(bool, Option<String>), Option<FieldError>>,
    secret_access_key_error: Memo<(bool, Option<String>), Option<FieldError>>,
    form_values_errors: Memo<ErrorsKey, Arc<FormValuesErrors>>,
    formatted_url: Memo<(String, Option<FieldError>), Option<Arc<str>>>,
    edited_profile: Memo<(Arc<[S3Profile]>, ProfileId), Arc<S3Config>>,
    submittable_s3_config: Memo<SubmissionKey, Arc<S3Config>>,
    client_params: Memo<Arc<S3Config>, Arc<ClientParams>>,
    url_styles_examples: Memo<Option<Arc<str>>, Option<Arc<UrlStylesExamples>>>,
}

impl Default for Views {
    fn default() -> Self {
        Self {
            existing_profile_names: Memo::new("existing_profile_names"),
            url_error: Memo::new("url_error"),
            profile_name_error: Memo::new("profile_name_error"),
            access_key_id_error: Memo::new("access_key_id_error"),
            secret_access_key_error: Memo::new("secret_access_key_error"),
            form_values_errors: Memo::new("form_values_errors"),
            formatted_url: Memo::new("formatted_url"),
            edited_profile: Memo::new("edited_profile"),
            submittable_s3_config: Memo::new("submittable_s3_config"),
            client_params: Memo::new("client_params"),
            url_styles_examples: Memo::new("url_styles_examples"),
        }
    }
}

impl Views {
    pub fn is_ready(&self, inputs: &ViewInputs) -> bool {
        inputs.ready().is_some()
    }

    pub fn form_values(&self, inputs: &ViewInputs) -> Option<Arc<FormValues>> {
        inputs.ready().map(|ready| ready.form_values.clone())
    }

    /// Names of all profiles except the one being edited.
    pub fn existing_profile_names(&self, inputs: &ViewInputs) -> Option<Arc<[String]>> {
        let ready = inputs.ready()?;
        let key = (inputs.profiles.clone(), ready.edited_profile_identity());

        Some(
            self.existing_profile_names
                .get_or_compute(key, |(profiles, edited)| {
                    profiles
                        .iter()
                        .filter(|profile| Some(profile.id()) != *edited)
                        .map(|profile| profile.name().to_owned())
                        .collect()
                }),
        )
    }

    pub fn form_values_errors(&self, inputs: &ViewInputs) -> Option<Arc<FormValuesErrors>> {
        let form_values = self.form_values(inputs)?;
        let existing_names = self.existing_profile_names(inputs)?;

        let url = self
            .url_error
            .get_or_compute(form_values.url.clone(), |url| validation::url_error(url));

        let profile_name = self.profile_name_error.get_or_compute(
            (form_values.friendly_name.clone(), existing_names),
            |(name, names)| validation::profile_name_error(name, names),
        );

        let access_key_id = self.access_key_id_error.get_or_compute(
            (form_values.is_anonymous, form_values.access_key_id.clone()),
            |(is_anonymous, value)| validation::credential_error(*is_anonymous, value.as_deref()),
        );

        let secret_access_key = self.secret_access_key_error.get_or_compute(
            (form_values.is_anonymous, form_values.secret_access_key.clone()),
            |(is_anonymous, value)| validation::credential_error(*is_anonymous, value.as_deref()),
        );

        Some(self.form_values_errors.get_or_compute(
            (url, profile_name, access_key_id, secret_access_key),
            |&(url, profile_name, access_key_id, secret_access_key)| {
                Arc::new(FormValuesErrors {
                    url,
                    profile_name,
                    access_key_id,
                    secret_access_key,
                })
            },
        ))
    }

    pub fn is_form_submittable(&self, inputs: &ViewInputs) -> Option<bool> {
        self.form_values_errors(inputs)
            .map(|errors| errors.is_empty())
    }

    /// The trimmed URL with a scheme, or `None` while the URL is invalid.
    pub fn formatted_form_values_url(&self, inputs: &ViewInputs) -> Option<Arc<str>> {
        let form_values = self.form_values(inputs)?;
        let errors = self.form_values_errors(inputs)?;

        self.formatted_url
            .get_or_compute((form_values.url.clone(), errors.url), |(url, error)| {
                error
                    .is_none()
                    .then(|| Arc::from(validation::format_url(url)))
            })
    }

    /// The stored record being edited, or `None` when creating.
    ///
    /// # Errors
    ///
    /// Returns an invariant violation if the edited profile is no longer in
    /// the profile list.
    fn edited_profile(&self, inputs: &ViewInputs) -> Result<Option<Arc<S3Config>>> {
        let Some(edited_id) = inputs.ready().and_then(|r| r.edited_profile_identity()) else {
            return Ok(None);
        };

        self.edited_profile
            .try_get_or_compute((inputs.profiles.clone(), edited_id), |(profiles, id)| {
                profiles
                    .iter()
                    .find(|profile| profile.is_editable() && profile.id() == *id)
                    .map(|profile| Arc::new(profile.config.clone()))
                    .ok_or_else(|| {
                        tracing::error!(
                            target: TRACING_TARGET_VIEWS,
                            profile_identity = %id,
                            "Edited profile missing from the profile list"
                        );
                        Error::invariant_violation(format!(
                            "edited profile {id} is not in the profile list"
                        ))
                    })
            })
            .map(Some)
    }

    /// The record to persist, or `None` while the form has errors.
    ///
    /// # Errors
    ///
    /// Returns an invariant violation if the edited profile vanished.
    pub fn submittable_s3_config(&self, inputs: &ViewInputs) -> Result<Option<Arc<S3Config>>> {
        let Some(ready) = inputs.ready() else {
            return Ok(None);
        };
        if self.is_form_submittable(inputs) != Some(true) {
            return Ok(None);
        }
        let Some(formatted_url) = self.formatted_form_values_url(inputs) else {
            return Ok(None);
        };
        let edited = self.edited_profile(inputs)?;

        let key = (
            ready.form_values.clone(),
            formatted_url,
            ready.profile_identity,
            edited,
        );

        let config = self.submittable_s3_config.get_or_compute(
            key,
            |(form_values, formatted_url, profile_identity, edited)| {
                Arc::new(submission::build_s3_config(
                    form_values,
                    formatted_url,
                    *profile_identity,
                    edited.as_deref(),
                ))
            },
        );

        Ok(Some(config))
    }

    /// Parameters for the connectivity tester, derived from the submittable record.
    pub fn params_of_create_client(&self, inputs: &ViewInputs) -> Result<Option<Arc<ClientParams>>> {
        let Some(config) = self.submittable_s3_config(inputs)? else {
            return Ok(None);
        };

        Ok(Some(self.client_params.get_or_compute(config, |config| {
            Arc::new(ClientParams::from(&**config))
        })))
    }

    pub fn url_styles_examples(&self, inputs: &ViewInputs) -> Option<Arc<UrlStylesExamples>> {
        let formatted_url = self.formatted_form_values_url(inputs);

        self.url_styles_examples
            .get_or_compute(formatted_url, |formatted_url| {
                formatted_url
                    .as_deref()
                    .and_then(UrlStylesExamples::from_formatted_url)
                    .map(Arc::new)
            })
    }

    pub fn main(&self, inputs: &ViewInputs) -> MainView {
        if !self.is_ready(inputs) {
            return MainView::NotReady;
        }
        let (Some(form_values), Some(form_values_errors)) =
            (self.form_values(inputs), self.form_values_errors(inputs))
        else {
            return MainView::NotReady;
        };

        MainView::Ready(ReadyView {
            form_values,
            is_form_submittable: form_values_errors.is_empty(),
            form_values_errors,
            url_styles_examples: self.url_styles_examples(inputs),
            is_editing_existing_config: inputs
                .ready()
                .is_some_and(|ready| ready.edited_profile_identity().is_some()),
        })
    }
}
