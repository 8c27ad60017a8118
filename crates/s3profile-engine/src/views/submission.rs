//! Assembly of the submission-ready profile record.

use s3profile_core::{Credentials, ProfileId, S3Config};

use crate::form::FormValues;

/// Working directory given to newly created profiles.
pub const DEFAULT_WORKING_DIRECTORY_PATH: &str = "mybucket/my/prefix/";

fn trimmed(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_owned)
}

/// Combines validated form values into an [`S3Config`].
///
/// The profile name and region are trimmed; credentials are kept as typed.
///
/// `edited` is the stored record being edited: its creation time, working
/// directory and bookmarks are carried over unchanged.
pub(crate) fn build_s3_config(
    form_values: &FormValues,
    formatted_url: &str,
    profile_identity: ProfileId,
    edited: Option<&S3Config>,
) -> S3Config {
    let credentials = (!form_values.is_anonymous).then(|| Credentials {
        access_key_id: form_values.access_key_id.clone().unwrap_or_default(),
        secret_access_key: form_values.secret_access_key.clone().unwrap_or_default(),
        session_token: form_values.session_token.clone(),
    });

    let (creation_time, working_directory_path, bookmarks) = match edited {
        Some(edited) => (
            edited.creation_time,
            edited.working_directory_path.clone(),
            edited.bookmarks.clone(),
        ),
        None => (
            profile_identity,
            DEFAULT_WORKING_DIRECTORY_PATH.to_owned(),
            Vec::new(),
        ),
    };

    S3Config {
        creation_time,
        friendly_name: form_values.friendly_name.trim().to_owned(),
        url: formatted_url.to_owned(),
        region: trimmed(form_values.region.as_deref()),
        path_style_access: form_values.path_style_access,
        credentials,
        working_directory_path,
        bookmarks,
    }
}

#[cfg(test)]
mod tests {
    use s3profile_core::Bookmark;

    use super::*;

    fn form() -> FormValues {
        FormValues {
            friendly_name: "  lab ".into(),
            url: "s3.lab".into(),
            region: Some(" ".into()),
            path_style_access: true,
            is_anonymous: false,
            access_key_id: Some("key".into()),
            secret_access_key: Some("secret ".into()),
            session_token: Some(String::new()),
        }
    }

    #[test]
    fn test_new_profile_gets_defaults() {
        let config = build_s3_config(&form(), "https://s3.lab", ProfileId::new(9), None);

        assert_eq!(config.creation_time, ProfileId::new(9));
        assert_eq!(config.friendly_name, "lab");
        assert_eq!(config.url, "https://s3.lab");
        assert_eq!(config.region, None);
        assert_eq!(config.working_directory_path, DEFAULT_WORKING_DIRECTORY_PATH);
        assert!(config.bookmarks.is_empty());

        let credentials = config.credentials.unwrap();
        assert_eq!(credentials.access_key_id, "key");
        assert_eq!(credentials.secret_access_key, "secret ");
        assert_eq!(credentials.session_token.as_deref(), Some(""));
    }

    #[test]
    fn test_edited_profile_keeps_hidden_fields() {
        let edited = S3Config::new(ProfileId::new(3), "old", "https://old", "a/b/")
            .with_bookmark(Bookmark::new("a/b/c", "c"));

        let config = build_s3_config(&form(), "https://s3.lab", ProfileId::new(3), Some(&edited));

        assert_eq!(config.creation_time, ProfileId::new(3));
        assert_eq!(config.working_directory_path, "a/b/");
        assert_eq!(config.bookmarks, edited.bookmarks);
        assert_eq!(config.friendly_name, "lab");
    }

    #[test]
    fn test_anonymous_drops_credentials() {
        let form = FormValues {
            is_anonymous: true,
            ..form()
        };
        let config = build_s3_config(&form, "https://s3.lab", ProfileId::new(1), None);
        assert!(config.credentials.is_none());
    }
}
