use crate::config::Config;
use crate::error::NotifyError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
struct TranslateRequest<'a> {
    #[serde(rename = "SourceLanguage")]
    source_language: &'a str,
    #[serde(rename = "TargetLanguage")]
    target_language: &'a str,
    #[serde(rename = "SourceText")]
    source_text: &'a str,
    #[serde(rename = "FormatType")]
    format_type: &'a str,
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    #[serde(rename = "Data")]
    data: Option<TranslateData>,
    #[serde(rename = "Code")]
    code: Option<String>,
    #[serde(rename = "Message")]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TranslateData {
    #[serde(rename = "Translated")]
    translated: Option<String>,
}

/// Aliyun machine-translation client. Single-attempt: a failed call is
/// reported to the caller, never retried here.
#[derive(Debug, Clone)]
pub struct TranslationClient {
    http: reqwest::Client,
    api_url: String,
    access_key_id: String,
    access_key_secret: String,
}

impl TranslationClient {
    pub fn new(config: &Config, http: reqwest::Client) -> Self {
        Self {
            http,
            api_url: config.translate_api_url.clone(),
            access_key_id: config.aliyun_access_key_id.clone(),
            access_key_secret: config.aliyun_access_key_secret.clone(),
        }
    }

    /// Translate `text` between the given language pair, returning the
    /// translated text.
    pub async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<String, NotifyError> {
        let request = TranslateRequest {
            source_language,
            target_language,
            source_text: text,
            format_type: "text",
        };

        let response = self
            .http
            .post(&self.api_url)
            .header("x-acs-access-key-id", &self.access_key_id)
            .header("x-acs-access-key-secret", &self.access_key_secret)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                NotifyError::Translation(
                    anyhow::Error::new(e).context("Failed to send translation request"),
                )
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(NotifyError::Translation(anyhow::anyhow!(
                "translation API error ({}): {}",
                status,
                body
            )));
        }

        let parsed: TranslateResponse = response.json().await.map_err(|e| {
            NotifyError::Translation(
                anyhow::Error::new(e).context("Failed to parse translation response"),
            )
        })?;

        match parsed.data.and_then(|d| d.translated) {
            Some(translated) => Ok(translated),
            None => Err(NotifyError::Translation(anyhow::anyhow!(
                "translation response contained no result (code: {:?}, message: {:?})",
                parsed.code,
                parsed.message
            ))),
        }
    }
}
