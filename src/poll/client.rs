//! Polling service client.
//!
//! One authenticated POST per invocation; the only response field consumed
//! is the shareable `url`.

use reqwest::Client;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use serde_json::Value;
use tracing::{error, info};

use crate::core::models::{PollRequest, PollResult};
use crate::errors::{PollError, Stage};

pub struct PollClient {
    http: Client,
    api_url: String,
    api_key: String,
}

impl PollClient {
    #[must_use]
    pub fn new(http: Client, api_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http,
            api_url: api_url.into(),
            api_key: api_key.into(),
        }
    }

    /// # Errors
    ///
    /// Returns `UpstreamFailure` when the request cannot be sent or the service
    /// answers with a non-2xx status, and `MalformedResponse` when the body is
    /// not JSON or lacks a `url`.
    pub async fn create_poll(&self, request: &PollRequest) -> Result<PollResult, PollError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let api_key = HeaderValue::from_str(&self.api_key)
            .map_err(|e| PollError::invalid("STRAWPOLL_API_KEY", e.to_string()))?;
        headers.insert(HeaderName::from_static("x-api-key"), api_key);

        info!(options = request.poll_options.len(), "Sending request to polling service");
        let resp = self
            .http
            .post(&self.api_url)
            .headers(headers)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                error!("Poll creation request failed: {}", e);
                PollError::upstream(Stage::PollSubmission, e.to_string())
            })?;

        let status = resp.status();
        let body_text = resp.text().await.map_err(|e| {
            PollError::upstream(
                Stage::PollSubmission,
                format!("Failed to read poll response: {e}"),
            )
        })?;

        if !status.is_success() {
            error!(
                "Poll creation failed: status={} body={}",
                status, body_text
            );
            return Err(PollError::upstream(
                Stage::PollSubmission,
                format!("polling service returned {status}"),
            ));
        }

        parse_poll_response(&body_text)
    }
}

/// # Errors
///
/// Returns `MalformedResponse` when the body is not JSON or has no string `url`.
pub fn parse_poll_response(body: &str) -> Result<PollResult, PollError> {
    let raw: Value = serde_json::from_str(body).map_err(|e| {
        error!("Poll response is not JSON: {}", e);
        PollError::malformed(Stage::PollSubmission, e.to_string())
    })?;

    let Some(url) = raw.get("url").and_then(Value::as_str) else {
        error!("Poll response missing url field: {}", raw);
        return Err(PollError::malformed(
            Stage::PollSubmission,
            "response has no url field",
        ));
    };

    info!(poll_url = %url, "Poll created successfully");
    Ok(PollResult {
        url: url.to_string(),
        raw,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_extracts_url_and_keeps_body() {
        let body = json!({"id": "abc", "url": "https://strawpoll.com/abc"}).to_string();
        let result = parse_poll_response(&body).unwrap();
        assert_eq!(result.url, "https://strawpoll.com/abc");
        assert_eq!(result.raw["id"], "abc");
    }

    #[test]
    fn parse_rejects_missing_url() {
        let err = parse_poll_response(r#"{"id":"abc"}"#).unwrap_err();
        assert!(matches!(err, PollError::MalformedResponse { stage: Stage::PollSubmission, .. }));
    }

    #[test]
    fn parse_rejects_non_json() {
        let err = parse_poll_response("<html>").unwrap_err();
        assert!(matches!(err, PollError::MalformedResponse { .. }));
    }
}
