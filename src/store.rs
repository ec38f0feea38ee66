use crate::config::Config;
use crate::error::NotifyError;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

/// One file read from the store: decoded content plus the version tag (SHA)
/// required for a conflict-checked update. Both are absent when the file
/// does not exist yet.
#[derive(Debug, Clone)]
pub struct RemoteFile {
    pub content: Option<String>,
    pub sha: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ContentsResponse {
    content: String,
    sha: String,
}

#[derive(Debug, Serialize)]
struct PutContentsRequest {
    message: String,
    content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    sha: Option<String>,
}

/// GitHub contents-API client for the translation store file.
///
/// Covers exactly the three operations the cache session needs: read a file
/// with its SHA, create a file, and update a file against an expected SHA.
/// Every call is a single attempt; conflicts and transport failures surface
/// as [`NotifyError::Store`].
#[derive(Debug, Clone)]
pub struct StoreClient {
    http: reqwest::Client,
    api_url: String,
    repo: String,
    path: String,
    token: String,
    commit_message: String,
}

impl StoreClient {
    pub fn new(config: &Config, http: reqwest::Client) -> Self {
        Self {
            http,
            api_url: config.github_api_url.clone(),
            repo: config.github_repo.clone(),
            path: config.github_file.clone(),
            token: config.github_token.clone(),
            commit_message: config.commit_message.clone(),
        }
    }

    fn contents_url(&self) -> String {
        format!("{}/repos/{}/contents/{}", self.api_url, self.repo, self.path)
    }

    /// Fetch the store file. A 404 means the file does not exist and yields
    /// an empty [`RemoteFile`] rather than an error.
    pub async fn get_file(&self) -> Result<RemoteFile, NotifyError> {
        let response = self
            .http
            .get(self.contents_url())
            .header("Authorization", format!("token {}", self.token))
            .header("Accept", "application/vnd.github.v3+json")
            .header("User-Agent", "monitor-notify")
            .send()
            .await
            .map_err(|e| {
                NotifyError::Store(anyhow::Error::new(e).context("Failed to fetch store file"))
            })?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(RemoteFile {
                content: None,
                sha: None,
            });
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(NotifyError::Store(anyhow::anyhow!(
                "GitHub API error fetching store file ({}): {}",
                status,
                body
            )));
        }

        let contents: ContentsResponse = response.json().await.map_err(|e| {
            NotifyError::Store(
                anyhow::Error::new(e).context("Failed to parse GitHub contents response"),
            )
        })?;

        let decoded = decode_content(&contents.content)
            .map_err(|e| NotifyError::Store(e.context("Failed to decode store file content")))?;

        Ok(RemoteFile {
            content: Some(decoded),
            sha: Some(contents.sha),
        })
    }

    /// Create the store file. Used when no version tag was observed at read
    /// time (the file did not exist).
    pub async fn create_file(&self, content: &str) -> Result<(), NotifyError> {
        self.put_file(content, None).await
    }

    /// Update the store file against the version tag observed at read time.
    /// A concurrent writer invalidates the SHA and GitHub rejects the PUT;
    /// that conflict surfaces as a store error, never a silent merge.
    pub async fn update_file(&self, content: &str, sha: &str) -> Result<(), NotifyError> {
        self.put_file(content, Some(sha.to_string())).await
    }

    async fn put_file(&self, content: &str, sha: Option<String>) -> Result<(), NotifyError> {
        let request = PutContentsRequest {
            message: self.commit_message.clone(),
            content: STANDARD.encode(content.as_bytes()),
            sha,
        };

        let response = self
            .http
            .put(self.contents_url())
            .header("Authorization", format!("token {}", self.token))
            .header("Accept", "application/vnd.github.v3+json")
            .header("User-Agent", "monitor-notify")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                NotifyError::Store(anyhow::Error::new(e).context("Failed to write store file"))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(NotifyError::Store(anyhow::anyhow!(
                "GitHub API error writing store file ({}): {}",
                status,
                body
            )));
        }

        Ok(())
    }
}

/// GitHub serves file content as base64 broken across lines; strip the
/// whitespace before decoding.
fn decode_content(encoded: &str) -> anyhow::Result<String> {
    let compact: String = encoded.split_whitespace().collect();
    let bytes = STANDARD.decode(compact.as_bytes())?;
    Ok(String::from_utf8(bytes)?)
}
