//! Addressing-style examples and inference.

use serde::{Deserialize, Serialize};
use url::Url;

/// Bucket name used in addressing-style examples.
pub const EXAMPLE_BUCKET_NAME: &str = "mybucket";

/// Object-name prefix used in addressing-style examples.
pub const EXAMPLE_OBJECT_NAME_PREFIX: &str = "my/object/name/prefix/";

/// How an object URL looks under each addressing style for the current endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlStylesExamples {
    /// `domain/bucket/prefix`
    pub path_style: String,
    /// `bucket.domain/prefix`
    pub virtual_hosted_style: String,
}

impl UrlStylesExamples {
    /// Builds the examples from a formatted endpoint URL.
    ///
    /// Returns `None` if the URL has no host.
    pub(crate) fn from_formatted_url(formatted_url: &str) -> Option<Self> {
        let url = Url::parse(formatted_url).ok()?;
        let host = url.host_str()?;
        let domain = match url.port() {
            Some(port) => format!("{host}:{port}"),
            None => host.to_owned(),
        };

        Some(Self {
            path_style: format!("{domain}/{EXAMPLE_BUCKET_NAME}/{EXAMPLE_OBJECT_NAME_PREFIX}"),
            virtual_hosted_style: format!(
                "{EXAMPLE_BUCKET_NAME}.{domain}/{EXAMPLE_OBJECT_NAME_PREFIX}"
            ),
        })
    }
}

/// Guesses the addressing style from a formatted endpoint URL.
///
/// AWS endpoints use virtual-hosted style, MinIO deployments path style.
/// Returns `None` when the URL gives no hint.
pub(crate) fn infer_path_style_access(formatted_url: &str) -> Option<bool> {
    let url = formatted_url.to_lowercase();

    if url.contains("amazonaws.com") {
        Some(false)
    } else if url.contains("minio") {
        Some(true)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_examples_for_plain_host() {
        let examples = UrlStylesExamples::from_formatted_url("https://s3.example.com").unwrap();
        assert_eq!(
            examples.path_style,
            "s3.example.com/mybucket/my/object/name/prefix/"
        );
        assert_eq!(
            examples.virtual_hosted_style,
            "mybucket.s3.example.com/my/object/name/prefix/"
        );
    }

    #[test]
    fn test_examples_keep_explicit_port() {
        let examples = UrlStylesExamples::from_formatted_url("http://minio.lab:9000/").unwrap();
        assert_eq!(examples.path_style, "minio.lab:9000/mybucket/my/object/name/prefix/");
    }

    #[test]
    fn test_examples_need_a_host() {
        assert!(UrlStylesExamples::from_formatted_url("https://").is_none());
    }

    #[test]
    fn test_inference_is_case_insensitive() {
        assert_eq!(infer_path_style_access("https://S3.AmazonAWS.com"), Some(false));
        assert_eq!(infer_path_style_access("https://MinIO.lab"), Some(true));
        assert_eq!(infer_path_style_access("https://storage.lab"), None);
    }

    #[test]
    fn test_aws_takes_precedence_over_minio() {
        assert_eq!(
            infer_path_style_access("https://minio-mirror.s3.amazonaws.com"),
            Some(false)
        );
    }
}
