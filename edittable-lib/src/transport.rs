//! Form POST transport

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::error::ApiError;

/// Response header carrying the next validation key.
pub const VALIDATION_HEADER: &str = "X-Foswiki-Validation";

/// What came back from a form POST, before any interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
    /// Next validation key, when the server rotated it.
    pub validation_key: Option<String>,
}

impl RawResponse {
    /// A 200 response with the given body.
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
            validation_key: None,
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Posts form-encoded bodies to the wiki.
///
/// The client talks to the server only through this trait, so a page host
/// can route requests through its own stack and tests can record them.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Posts `fields` form-encoded to `url`.
    ///
    /// Non-success statuses are returned as responses, not errors; only a
    /// failure to complete the exchange is an error.
    async fn post_form(
        &self,
        url: &str,
        fields: &[(String, String)],
        timeout: Option<Duration>,
    ) -> Result<RawResponse, ApiError>;
}

/// [`Transport`] over `reqwest`.
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post_form(
        &self,
        url: &str,
        fields: &[(String, String)],
        timeout: Option<Duration>,
    ) -> Result<RawResponse, ApiError> {
        let mut request = self.client.post(url).form(fields);
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await.map_err(|e| match timeout {
            Some(timeout) if e.is_timeout() => ApiError::Timeout(timeout),
            _ => ApiError::from(e),
        })?;

        let status = response.status().as_u16();
        let validation_key = response
            .headers()
            .get(VALIDATION_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::parse(format!("Failed to read response body: {e}")))?;

        Ok(RawResponse {
            status,
            body,
            validation_key,
        })
    }
}
