//! Signed S3 connectivity check.

use std::sync::Arc;

use jiff::Timestamp;
use reqwest::{Client, StatusCode};
use url::Url;

use super::signing::{self, DEFAULT_REGION};
use super::{ReqwestConfig, TRACING_TARGET};
use crate::types::{ClientParams, ConnectionTestOutcome};
use crate::{ConnectionTester, Error, ErrorKind};

/// Connectivity tester that lists buckets on the endpoint.
///
/// With credentials the `GET /` request is signed with AWS Signature
/// Version 4 for the profile region (`us-east-1` when none is set), and only
/// a `2xx` answer is a success: rejected keys surface as a failure. Anonymous
/// profiles cannot list buckets, so for them any answer below 500 proves the
/// endpoint is reachable.
///
/// The bucket listing is addressed at the service endpoint, so the addressing
/// style does not change the request.
#[derive(Clone)]
pub struct ReqwestTester {
    http: Client,
    config: Arc<ReqwestConfig>,
}

impl std::fmt::Debug for ReqwestTester {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReqwestTester")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl ReqwestTester {
    /// Builds the underlying HTTP client.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the client cannot be built.
    pub fn new(config: ReqwestConfig) -> crate::Result<Self> {
        let http = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent())
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()
            .map_err(|e| {
                Error::from_source(ErrorKind::Configuration, e)
                    .with_message("cannot build the HTTP client")
            })?;

        tracing::debug!(
            target: TRACING_TARGET,
            timeout_secs = config.timeout().as_secs(),
            accept_invalid_certs = config.accept_invalid_certs,
            "Reqwest tester created"
        );

        Ok(Self {
            http,
            config: Arc::new(config),
        })
    }

    pub fn config(&self) -> &ReqwestConfig {
        &self.config
    }
}

/// The endpoint root, with exactly one trailing slash and no query.
fn listing_url(params: &ClientParams) -> Result<Url, url::ParseError> {
    let mut url = Url::parse(&format!("{}/", params.url.trim_end_matches('/')))?;
    url.set_query(None);
    url.set_fragment(None);
    Ok(url)
}

/// Short, user-facing reason for a failed request.
fn describe(error: &reqwest::Error) -> String {
    let reason = if error.is_timeout() {
        "timed out"
    } else if error.is_connect() {
        "connection failed"
    } else if error.is_builder() {
        "invalid endpoint url"
    } else {
        "request failed"
    };

    match std::error::Error::source(error) {
        Some(source) => format!("{reason}: {source}"),
        None => reason.to_owned(),
    }
}

/// Extracts the `<Code>` element of an S3 error document.
fn s3_error_code(body: &str) -> Option<&str> {
    let start = body.find("<Code>")? + "<Code>".len();
    let end = start + body[start..].find("</Code>")?;
    Some(body[start..end].trim()).filter(|code| !code.is_empty())
}

fn judge(status: StatusCode, signed: bool, error_code: Option<&str>) -> ConnectionTestOutcome {
    let answered = match error_code {
        Some(code) => format!("endpoint answered with status {status} ({code})"),
        None => format!("endpoint answered with status {status}"),
    };

    if status.is_server_error() {
        ConnectionTestOutcome::failure(answered)
    } else if !signed || status.is_success() {
        ConnectionTestOutcome::Success
    } else if matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) {
        ConnectionTestOutcome::failure(format!("access denied: {answered}"))
    } else {
        ConnectionTestOutcome::failure(answered)
    }
}

#[async_trait::async_trait]
impl ConnectionTester for ReqwestTester {
    async fn test_connection(&self, params: &ClientParams) -> crate::Result<ConnectionTestOutcome> {
        let url = match listing_url(params) {
            Ok(url) => url,
            Err(error) => {
                return Ok(ConnectionTestOutcome::failure(format!(
                    "invalid endpoint url: {error}"
                )));
            }
        };

        let mut request = self.http.get(url.clone());
        if let Some(credentials) = &params.credentials {
            let region = params
                .region
                .as_deref()
                .filter(|region| !region.trim().is_empty())
                .unwrap_or(DEFAULT_REGION);
            for (name, value) in signing::sign_get(&url, region, credentials, Timestamp::now()) {
                request = request.header(name, value);
            }
        }
        let signed = params.credentials.is_some();

        let outcome = match request.send().await {
            Ok(response) => {
                let status = response.status();
                tracing::debug!(
                    target: TRACING_TARGET,
                    url = %url,
                    signed,
                    status_code = status.as_u16(),
                    "S3 endpoint answered"
                );

                let body = if status.is_success() {
                    String::new()
                } else {
                    response.text().await.unwrap_or_default()
                };
                judge(status, signed, s3_error_code(&body))
            }
            Err(error) => {
                tracing::debug!(
                    target: TRACING_TARGET,
                    url = %url,
                    error = %error,
                    "S3 endpoint unreachable"
                );
                ConnectionTestOutcome::failure(describe(&error))
            }
        };

        Ok(outcome)
    }
}
