//! Form values, field identifiers and field-level validation errors.

use s3profile_core::{RegionDefaults, S3Config};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, IntoStaticStr};

/// Values of the profile editing form.
///
/// When `is_anonymous` is set the three credential fields keep whatever was
/// typed but are ignored on submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormValues {
    pub friendly_name: String,
    pub url: String,
    pub region: Option<String>,
    pub path_style_access: bool,
    pub is_anonymous: bool,
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
    pub session_token: Option<String>,
}

impl FormValues {
    /// An empty, anonymous form without region.
    pub fn blank() -> Self {
        Self {
            friendly_name: String::new(),
            url: String::new(),
            region: None,
            path_style_access: false,
            is_anonymous: true,
            access_key_id: None,
            secret_access_key: None,
            session_token: None,
        }
    }

    /// A form pre-filled from region defaults, expecting credentials.
    pub fn from_region_defaults(defaults: RegionDefaults) -> Self {
        Self {
            url: defaults.url,
            region: defaults.region,
            path_style_access: defaults.path_style_access,
            is_anonymous: false,
            ..Self::blank()
        }
    }

    /// A form mirroring a stored profile.
    pub fn from_s3_config(config: &S3Config) -> Self {
        let credentials = config.credentials.as_ref();

        Self {
            friendly_name: config.friendly_name.clone(),
            url: config.url.clone(),
            region: config.region.clone(),
            path_style_access: config.path_style_access,
            is_anonymous: credentials.is_none(),
            access_key_id: credentials.map(|c| c.access_key_id.clone()),
            secret_access_key: credentials.map(|c| c.secret_access_key.clone()),
            session_token: credentials.and_then(|c| c.session_token.clone()),
        }
    }

    /// Returns the form with `change` applied, or `None` if the field
    /// already holds that value.
    pub fn with_change(&self, change: FormValueChange) -> Option<Self> {
        fn set<T: PartialEq>(slot: &mut T, value: T) -> bool {
            if *slot == value {
                return false;
            }
            *slot = value;
            true
        }

        let mut next = self.clone();
        let changed = match change {
            FormValueChange::FriendlyName(v) => set(&mut next.friendly_name, v),
            FormValueChange::Url(v) => set(&mut next.url, v),
            FormValueChange::Region(v) => set(&mut next.region, v),
            FormValueChange::PathStyleAccess(v) => set(&mut next.path_style_access, v),
            FormValueChange::IsAnonymous(v) => set(&mut next.is_anonymous, v),
            FormValueChange::AccessKeyId(v) => set(&mut next.access_key_id, v),
            FormValueChange::SecretAccessKey(v) => set(&mut next.secret_access_key, v),
            FormValueChange::SessionToken(v) => set(&mut next.session_token, v),
        };

        changed.then_some(next)
    }
}

/// Identifies one field of [`FormValues`].
///
/// Keys are named after the form values. The validation map names the
/// profile name field `profileName`; see [`FieldKey::error_name`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(AsRefStr, Display, EnumIter, IntoStaticStr, Serialize, Deserialize)]
#[strum(serialize_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub enum FieldKey {
    /// Reported as `profileName` in [`FormValuesErrors`].
    FriendlyName,
    Url,
    Region,
    PathStyleAccess,
    IsAnonymous,
    AccessKeyId,
    SecretAccessKey,
    SessionToken,
}

impl FieldKey {
    /// Name of the field in [`FormValuesErrors`].
    pub fn error_name(self) -> &'static str {
        match self {
            Self::FriendlyName => "profileName",
            key => key.into(),
        }
    }
}

/// A new value for exactly one form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormValueChange {
    FriendlyName(String),
    Url(String),
    Region(Option<String>),
    PathStyleAccess(bool),
    IsAnonymous(bool),
    AccessKeyId(Option<String>),
    SecretAccessKey(Option<String>),
    SessionToken(Option<String>),
}

impl FormValueChange {
    /// Returns the field this change targets.
    pub fn key(&self) -> FieldKey {
        match self {
            Self::FriendlyName(_) => FieldKey::FriendlyName,
            Self::Url(_) => FieldKey::Url,
            Self::Region(_) => FieldKey::Region,
            Self::PathStyleAccess(_) => FieldKey::PathStyleAccess,
            Self::IsAnonymous(_) => FieldKey::IsAnonymous,
            Self::AccessKeyId(_) => FieldKey::AccessKeyId,
            Self::SecretAccessKey(_) => FieldKey::SecretAccessKey,
            Self::SessionToken(_) => FieldKey::SessionToken,
        }
    }
}

/// A user-facing validation error on one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(AsRefStr, Display, IntoStaticStr, Serialize, Deserialize)]
pub enum FieldError {
    #[strum(serialize = "is required")]
    #[serde(rename = "is required")]
    IsRequired,
    #[strum(serialize = "must be an url")]
    #[serde(rename = "must be an url")]
    MustBeAnUrl,
    #[strum(serialize = "profile name already used")]
    #[serde(rename = "profile name already used")]
    ProfileNameAlreadyUsed,
    /// Reserved; no rule currently produces it.
    #[strum(serialize = "not a valid access key id")]
    #[serde(rename = "not a valid access key id")]
    NotAValidAccessKeyId,
}

/// Validation result for every field of the form.
///
/// Fields not listed here (region, addressing style, anonymity, session
/// token) never carry an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormValuesErrors {
    pub url: Option<FieldError>,
    pub profile_name: Option<FieldError>,
    pub access_key_id: Option<FieldError>,
    pub secret_access_key: Option<FieldError>,
}

impl FormValuesErrors {
    /// Returns the error attached to `key`, if any.
    ///
    /// [`FieldKey::FriendlyName`] reads the `profile_name` entry.
    pub fn get(&self, key: FieldKey) -> Option<FieldError> {
        match key {
            FieldKey::Url => self.url,
            FieldKey::FriendlyName => self.profile_name,
            FieldKey::AccessKeyId => self.access_key_id,
            FieldKey::SecretAccessKey => self.secret_access_key,
            FieldKey::Region
            | FieldKey::PathStyleAccess
            | FieldKey::IsAnonymous
            | FieldKey::SessionToken => None,
        }
    }

    /// Iterates over every field and its error.
    pub fn iter(&self) -> impl Iterator<Item = (FieldKey, Option<FieldError>)> + '_ {
        use strum::IntoEnumIterator;

        FieldKey::iter().map(|key| (key, self.get(key)))
    }

    /// Iterates over the fields that carry an error.
    pub fn errors(&self) -> impl Iterator<Item = (FieldKey, FieldError)> + '_ {
        self.iter()
            .filter_map(|(key, error)| error.map(|error| (key, error)))
    }

    /// Returns `true` if no field carries an error.
    pub fn is_empty(&self) -> bool {
        self.errors().next().is_none()
    }
}

#[cfg(test)]
mod tests {
    use s3profile_core::{Credentials, ProfileId};

    use super::*;

    #[test]
    fn test_blank_form_is_anonymous() {
        let form = FormValues::blank();
        assert!(form.is_anonymous);
        assert!(form.region.is_none());
        assert!(!form.path_style_access);
    }

    #[test]
    fn test_from_region_defaults_expects_credentials() {
        let defaults = RegionDefaults::new("https://minio.lab")
            .with_region("us-east-1")
            .with_path_style_access(true);
        let form = FormValues::from_region_defaults(defaults);

        assert_eq!(form.url, "https://minio.lab");
        assert_eq!(form.region.as_deref(), Some("us-east-1"));
        assert!(form.path_style_access);
        assert!(!form.is_anonymous);
        assert!(form.friendly_name.is_empty());
        assert!(form.access_key_id.is_none());
    }

    #[test]
    fn test_from_s3_config_maps_credentials() {
        let config = S3Config::new(ProfileId::new(7), "lab", "https://s3.lab", "a/b/")
            .with_credentials(Credentials::new("key", "secret").with_session_token("tok"));
        let form = FormValues::from_s3_config(&config);

        assert!(!form.is_anonymous);
        assert_eq!(form.access_key_id.as_deref(), Some("key"));
        assert_eq!(form.secret_access_key.as_deref(), Some("secret"));
        assert_eq!(form.session_token.as_deref(), Some("tok"));

        let anonymous = S3Config::new(ProfileId::new(8), "pub", "https://s3.lab", "a/b/");
        assert!(FormValues::from_s3_config(&anonymous).is_anonymous);
    }

    #[test]
    fn test_with_change_is_none_when_unchanged() {
        let form = FormValues::blank();
        assert!(form.with_change(FormValueChange::Url(String::new())).is_none());
        assert!(form.with_change(FormValueChange::IsAnonymous(true)).is_none());

        let next = form
            .with_change(FormValueChange::Region(Some("eu".into())))
            .unwrap();
        assert_eq!(next.region.as_deref(), Some("eu"));
        assert_eq!(next.url, form.url);
    }

    #[test]
    fn test_field_error_strings() {
        assert_eq!(FieldError::IsRequired.to_string(), "is required");
        assert_eq!(FieldError::MustBeAnUrl.to_string(), "must be an url");
        assert_eq!(
            FieldError::ProfileNameAlreadyUsed.to_string(),
            "profile name already used"
        );
        assert_eq!(
            serde_json::to_string(&FieldError::NotAValidAccessKeyId).unwrap(),
            "\"not a valid access key id\""
        );
    }

    #[test]
    fn test_errors_cover_every_field() {
        let errors = FormValuesErrors {
            profile_name: Some(FieldError::IsRequired),
            ..FormValuesErrors::default()
        };

        assert_eq!(errors.iter().count(), 8);
        assert_eq!(
            errors.errors().collect::<Vec<_>>(),
            vec![(FieldKey::FriendlyName, FieldError::IsRequired)]
        );
        assert!(!errors.is_empty());
        assert!(FormValuesErrors::default().is_empty());
    }

    #[test]
    fn test_error_names_match_serialized_errors() {
        let errors = FormValuesErrors {
            url: Some(FieldError::MustBeAnUrl),
            profile_name: Some(FieldError::IsRequired),
            ..FormValuesErrors::default()
        };
        let json = serde_json::to_value(&errors).unwrap();

        for (key, error) in errors.errors() {
            assert_eq!(json[key.error_name()], error.to_string());
        }
        assert_eq!(FieldKey::FriendlyName.error_name(), "profileName");
        assert_eq!(FieldKey::SecretAccessKey.error_name(), "secretAccessKey");
    }
}
