//! GitHub REST client for recording a poll link as a pull request.

use base64::{Engine as _, engine::general_purpose};
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, error, info};

use crate::core::config::GitHubConfig;
use crate::core::models::PublishRecord;
use crate::errors::{PollError, Stage};

const GITHUB_ACCEPT: &str = "application/vnd.github+json";
const CLIENT_USER_AGENT: &str = "weekly-poll";

#[derive(Debug, Deserialize)]
struct RefResponse {
    object: RefObject,
}

#[derive(Debug, Deserialize)]
struct RefObject {
    sha: String,
}

#[derive(Debug, Deserialize)]
struct ContentResponse {
    sha: String,
}

#[derive(Debug, Deserialize)]
struct PullRequestResponse {
    html_url: String,
}

pub struct GitHubPublisher {
    http: Client,
    config: GitHubConfig,
}

impl GitHubPublisher {
    #[must_use]
    pub fn new(http: Client, config: GitHubConfig) -> Self {
        Self { http, config }
    }

    fn repo_url(&self, suffix: &str) -> String {
        format!(
            "{}/repos/{}/{}/{}",
            self.config.api_url, self.config.owner, self.config.repo, suffix
        )
    }

    fn authed(&self, builder: RequestBuilder) -> RequestBuilder {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_ACCEPT));
        headers.insert(USER_AGENT, HeaderValue::from_static(CLIENT_USER_AGENT));
        builder.headers(headers).bearer_auth(&self.config.token)
    }

    async fn send(&self, builder: RequestBuilder, step: &str) -> Result<Response, PollError> {
        let resp = self
            .authed(builder)
            .send()
            .await
            .map_err(|e| PollError::upstream(Stage::Publish, format!("{step}: {e}")))?;
        Ok(resp)
    }

    /// Creates the record branch, writes the record file, and opens a pull
    /// request. Returns the pull request URL.
    ///
    /// # Errors
    ///
    /// Returns a `Publish` stage error for the first sub-step that fails.
    pub async fn publish(&self, record: &PublishRecord) -> Result<String, PollError> {
        self.create_branch(&record.branch).await?;
        self.write_file(record).await?;
        self.open_pull_request(record).await
    }

    async fn create_branch(&self, branch: &str) -> Result<(), PollError> {
        let base_url = self.repo_url(&format!("git/ref/heads/{}", self.config.base_branch));
        let resp = self.send(self.http.get(base_url), "base ref lookup").await?;
        let base: RefResponse = expect_json(resp, "base ref lookup").await?;

        let payload = json!({
            "ref": format!("refs/heads/{branch}"),
            "sha": base.object.sha,
        });
        let resp = self
            .send(self.http.post(self.repo_url("git/refs")).json(&payload), "create ref")
            .await?;
        ensure_success(resp, "create ref").await?;

        info!(branch = %branch, base = %self.config.base_branch, "Created record branch");
        Ok(())
    }

    async fn existing_file_sha(&self, record: &PublishRecord) -> Result<Option<String>, PollError> {
        let url = self.repo_url(&format!("contents/{}", record.path));
        let resp = self
            .send(
                self.http.get(url).query(&[("ref", record.branch.as_str())]),
                "file lookup",
            )
            .await?;

        if resp.status() == StatusCode::NOT_FOUND {
            debug!(path = %record.path, "Record file does not exist yet");
            return Ok(None);
        }
        let existing: ContentResponse = expect_json(resp, "file lookup").await?;
        Ok(Some(existing.sha))
    }

    async fn write_file(&self, record: &PublishRecord) -> Result<(), PollError> {
        let sha = self.existing_file_sha(record).await?;

        let mut payload = json!({
            "message": record.commit_message,
            "content": encode_content(&record.content),
            "branch": record.branch,
        });
        if let Some(sha) = sha {
            payload["sha"] = json!(sha);
        }

        let url = self.repo_url(&format!("contents/{}", record.path));
        let resp = self.send(self.http.put(url).json(&payload), "write file").await?;
        ensure_success(resp, "write file").await?;

        info!(path = %record.path, branch = %record.branch, "Committed record file");
        Ok(())
    }

    async fn open_pull_request(&self, record: &PublishRecord) -> Result<String, PollError> {
        let payload = json!({
            "title": record.pr_title,
            "head": record.branch,
            "base": self.config.base_branch,
            "body": record.pr_body,
        });
        let resp = self
            .send(self.http.post(self.repo_url("pulls")).json(&payload), "open pull request")
            .await?;
        let pr: PullRequestResponse = expect_json(resp, "open pull request").await?;

        info!(pr_url = %pr.html_url, "Opened pull request");
        Ok(pr.html_url)
    }
}

/// File content as the contents API expects it.
#[must_use]
pub fn encode_content(content: &str) -> String {
    general_purpose::STANDARD.encode(content.as_bytes())
}

async fn ensure_success(resp: Response, step: &str) -> Result<Response, PollError> {
    if resp.status().is_success() {
        return Ok(resp);
    }
    let status = resp.status();
    let body_text = resp
        .text()
        .await
        .unwrap_or_else(|_| "<failed to read body>".to_string());
    error!("GitHub {} failed: status={} body={}", step, status, body_text);
    Err(PollError::upstream(
        Stage::Publish,
        format!("{step} returned {status}"),
    ))
}

async fn expect_json<T>(resp: Response, step: &str) -> Result<T, PollError>
where
    T: for<'de> Deserialize<'de>,
{
    let resp = ensure_success(resp, step).await?;
    resp.json::<T>()
        .await
        .map_err(|e| PollError::malformed(Stage::Publish, format!("{step}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_is_standard_base64() {
        assert_eq!(
            encode_content("Poll Link: https://strawpoll.com/abc\n"),
            "UG9sbCBMaW5rOiBodHRwczovL3N0cmF3cG9sbC5jb20vYWJjCg=="
        );
    }
}
