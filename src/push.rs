use crate::config::Config;
use crate::error::NotifyError;
use serde::{Deserialize, Serialize};

/// WxPusher renders contentType 3 as Markdown.
const CONTENT_TYPE_MARKDOWN: u8 = 3;

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    #[serde(rename = "appToken")]
    app_token: &'a str,
    content: &'a str,
    summary: &'a str,
    #[serde(rename = "contentType")]
    content_type: u8,
    uids: Vec<&'a str>,
}

#[derive(Debug, Deserialize)]
struct SendMessageResponse {
    code: i64,
    msg: Option<String>,
}

/// WxPusher delivery client. The recipient set is fixed at construction
/// time from config.
#[derive(Debug, Clone)]
pub struct PushClient {
    http: reqwest::Client,
    api_url: String,
    app_token: String,
    uid: String,
}

impl PushClient {
    pub fn new(config: &Config, http: reqwest::Client) -> Self {
        Self {
            http,
            api_url: config.wxpusher_api_url.clone(),
            app_token: config.wxpusher_app_token.clone(),
            uid: config.wxpusher_uid.clone(),
        }
    }

    /// Deliver a Markdown message body with a short summary line.
    /// WxPusher signals application-level failure with `code != 1000` even
    /// on an HTTP 200, so both layers are checked.
    pub async fn send(&self, body: &str, summary: &str) -> Result<(), NotifyError> {
        let request = SendMessageRequest {
            app_token: &self.app_token,
            content: body,
            summary,
            content_type: CONTENT_TYPE_MARKDOWN,
            uids: vec![&self.uid],
        };

        let response = self
            .http
            .post(&self.api_url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                NotifyError::Push(anyhow::Error::new(e).context("Failed to send push request"))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(NotifyError::Push(anyhow::anyhow!(
                "WxPusher API error ({}): {}",
                status,
                body
            )));
        }

        let result: SendMessageResponse = response.json().await.map_err(|e| {
            NotifyError::Push(anyhow::Error::new(e).context("Failed to parse push response"))
        })?;

        if result.code != 1000 {
            return Err(NotifyError::Push(anyhow::anyhow!(
                "WxPusher rejected the message (code {}): {}",
                result.code,
                result.msg.unwrap_or_default()
            )));
        }

        Ok(())
    }
}
