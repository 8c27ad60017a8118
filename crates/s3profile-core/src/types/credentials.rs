//! S3 authentication credentials.

use serde::{Deserialize, Serialize};

/// Static S3 credentials: access key, secret key and an optional session
/// token for temporary (STS) credentials.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    /// Access key identifier.
    pub access_key_id: String,

    /// Secret access key. Masked in debug output.
    pub secret_access_key: String,

    /// Optional session token for temporary credentials.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_token: Option<String>,
}

impl Credentials {
    /// Creates new credentials with access key and secret key.
    pub fn new(access_key_id: impl Into<String>, secret_access_key: impl Into<String>) -> Self {
        Self {
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
            session_token: None,
        }
    }

    /// Sets the session token.
    pub fn with_session_token(mut self, session_token: impl Into<String>) -> Self {
        self.session_token = Some(session_token.into());
        self
    }

    /// Returns the access key identifier.
    #[inline]
    pub fn access_key_id(&self) -> &str {
        &self.access_key_id
    }

    /// Returns the secret access key.
    #[inline]
    pub fn secret_access_key(&self) -> &str {
        &self.secret_access_key
    }

    /// Returns the session token if available.
    #[inline]
    pub fn session_token(&self) -> Option<&str> {
        self.session_token.as_deref()
    }

    /// Returns a masked version of the access key for logging.
    ///
    /// This shows only the first 4 characters followed by asterisks.
    pub fn access_key_id_masked(&self) -> String {
        match self.access_key_id.char_indices().nth(4) {
            Some((end, _)) => format!("{}***", &self.access_key_id[..end]),
            None => "*".repeat(self.access_key_id.chars().count()),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key_id", &self.access_key_id_masked())
            .field("secret_access_key", &"***")
            .field("session_token", &self.session_token.as_ref().map(|_| "***"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_new() {
        let creds = Credentials::new("access", "secret");
        assert_eq!(creds.access_key_id(), "access");
        assert_eq!(creds.secret_access_key(), "secret");
        assert!(creds.session_token().is_none());
    }

    #[test]
    fn test_credentials_with_session_token() {
        let creds = Credentials::new("access", "secret").with_session_token("token");
        assert_eq!(creds.session_token(), Some("token"));
    }

    #[test]
    fn test_credentials_masking() {
        let creds = Credentials::new("AKIATEST12345", "secret");
        assert_eq!(creds.access_key_id_masked(), "AKIA***");

        let short_creds = Credentials::new("ABC", "secret");
        assert_eq!(short_creds.access_key_id_masked(), "***");
    }

    #[test]
    fn test_debug_hides_secrets() {
        let creds = Credentials::new("AKIATEST12345", "wJalrXUtnFEMI").with_session_token("tok");
        let debug = format!("{creds:?}");
        assert!(!debug.contains("wJalrXUtnFEMI"));
        assert!(!debug.contains("tok\""));
        assert!(!debug.contains("AKIATEST12345"));
    }
}
