//! S3 connection profile records.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display};

use super::{Credentials, ProfileId};

/// A persisted S3 connection profile.
///
/// This is the record handed to the profile store on submission. Fields the
/// editing form does not expose (`creation_time`, `working_directory_path`,
/// `bookmarks`) are carried over unchanged when an existing profile is edited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct S3Config {
    /// Identity of the profile.
    pub creation_time: ProfileId,
    /// User-visible, unique profile name.
    pub friendly_name: String,
    /// Endpoint URL, always with a scheme.
    pub url: String,
    /// S3 region.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    /// Whether path-style addressing is used.
    #[serde(default)]
    pub path_style_access: bool,
    /// Credentials; `None` for anonymous access.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credentials: Option<Credentials>,
    /// Bucket-relative directory the file explorer opens by default.
    pub working_directory_path: String,
    /// Saved locations within the storage.
    #[serde(default)]
    pub bookmarks: Vec<Bookmark>,
}

impl S3Config {
    /// Creates a new anonymous S3 configuration.
    pub fn new(
        creation_time: ProfileId,
        friendly_name: impl Into<String>,
        url: impl Into<String>,
        working_directory_path: impl Into<String>,
    ) -> Self {
        Self {
            creation_time,
            friendly_name: friendly_name.into(),
            url: url.into(),
            region: None,
            path_style_access: false,
            credentials: None,
            working_directory_path: working_directory_path.into(),
            bookmarks: Vec::new(),
        }
    }

    /// Sets the region.
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Sets whether path-style addressing is used.
    pub fn with_path_style_access(mut self, path_style_access: bool) -> Self {
        self.path_style_access = path_style_access;
        self
    }

    /// Sets the access credentials.
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Appends a bookmark.
    pub fn with_bookmark(mut self, bookmark: Bookmark) -> Self {
        self.bookmarks.push(bookmark);
        self
    }

    /// Returns `true` if the profile connects without credentials.
    #[inline]
    pub fn is_anonymous(&self) -> bool {
        self.credentials.is_none()
    }
}

/// Who owns a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[derive(AsRefStr, Display, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ProfileOrigin {
    /// Created by the user; editable.
    #[default]
    CreatedByUser,
    /// Supplied by the deployment region; read-only.
    DefinedInRegion,
}

/// An entry of the profile list: a configuration plus its owner scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct S3Profile {
    /// Owner scope.
    pub origin: ProfileOrigin,
    /// Stored configuration.
    #[serde(flatten)]
    pub config: S3Config,
}

impl S3Profile {
    /// Wraps a configuration created by the user.
    pub fn created_by_user(config: S3Config) -> Self {
        Self {
            origin: ProfileOrigin::CreatedByUser,
            config,
        }
    }

    /// Wraps a configuration supplied by the deployment region.
    pub fn defined_in_region(config: S3Config) -> Self {
        Self {
            origin: ProfileOrigin::DefinedInRegion,
            config,
        }
    }

    /// Returns the profile identity.
    #[inline]
    pub fn id(&self) -> ProfileId {
        self.config.creation_time
    }

    /// Returns the profile name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.config.friendly_name
    }

    /// Returns `true` if this profile can be edited.
    #[inline]
    pub fn is_editable(&self) -> bool {
        self.origin == ProfileOrigin::CreatedByUser
    }
}

/// A saved location within the storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bookmark {
    /// Bucket-relative path.
    pub full_path: String,
    /// Display title.
    pub title: String,
    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Bookmark {
    /// Creates a bookmark without description.
    pub fn new(full_path: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            full_path: full_path.into(),
            title: title.into(),
            description: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_methods() {
        let config = S3Config::new(ProfileId::new(1), "minio", "https://minio.lab", "a/b/")
            .with_region("us-east-1")
            .with_path_style_access(true)
            .with_credentials(Credentials::new("key", "secret"))
            .with_bookmark(Bookmark::new("a/b/c", "C"));

        assert_eq!(config.region.as_deref(), Some("us-east-1"));
        assert!(config.path_style_access);
        assert!(!config.is_anonymous());
        assert_eq!(config.bookmarks.len(), 1);
    }

    #[test]
    fn test_profile_serializes_flat_in_camel_case() {
        let profile = S3Profile::created_by_user(S3Config::new(
            ProfileId::new(42),
            "lab",
            "https://s3.lab",
            "mybucket/my/prefix/",
        ));

        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["origin"], "created_by_user");
        assert_eq!(json["creationTime"], 42);
        assert_eq!(json["friendlyName"], "lab");
        assert_eq!(json["workingDirectoryPath"], "mybucket/my/prefix/");
        assert!(json.get("credentials").is_none());

        let back: S3Profile = serde_json::from_value(json).unwrap();
        assert_eq!(back, profile);
    }

    #[test]
    fn test_only_user_profiles_are_editable() {
        let config = S3Config::new(ProfileId::new(1), "x", "https://x", "");
        assert!(S3Profile::created_by_user(config.clone()).is_editable());
        assert!(!S3Profile::defined_in_region(config).is_editable());
    }
}
