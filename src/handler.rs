use crate::config::Config;
use crate::error::NotifyError;
use crate::fields::{self, WebhookBody};
use crate::message;
use crate::push::PushClient;
use crate::store::StoreClient;
use crate::translation::TranslationClient;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::Deserialize;
use tracing::{error, info};

/// Clients for one deployment, constructed once at startup from config.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Config,
    pub store: StoreClient,
    pub translator: TranslationClient,
    pub pusher: PushClient,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let http = reqwest::Client::new();
        Self {
            store: StoreClient::new(&config, http.clone()),
            translator: TranslationClient::new(&config, http.clone()),
            pusher: PushClient::new(&config, http),
            config,
        }
    }
}

/// Cloud-function style event envelope carrying the webhook body.
#[derive(Debug, Deserialize)]
struct EventEnvelope {
    body: Option<String>,
    #[serde(rename = "isBase64Encoded", default)]
    is_base64_encoded: bool,
}

/// What the webhook caller gets back: a status code plus a JSON body of
/// either `{"message": ...}` or `{"error": ...}`.
#[derive(Debug, Clone, PartialEq)]
pub struct WebhookResponse {
    pub status_code: u16,
    pub body: String,
}

impl WebhookResponse {
    fn ok(message: &str) -> Self {
        Self {
            status_code: 200,
            body: serde_json::json!({ "message": message }).to_string(),
        }
    }

    fn from_error(err: &NotifyError) -> Self {
        Self {
            status_code: err.status_code(),
            body: serde_json::json!({ "error": err.to_string() }).to_string(),
        }
    }
}

/// Decode the event envelope down to the webhook payload.
pub fn parse_event(event: &str) -> Result<WebhookBody, NotifyError> {
    let envelope: EventEnvelope = serde_json::from_str(event)
        .map_err(|e| NotifyError::parse(format!("event is not valid JSON: {}", e)))?;

    let body = match envelope.body {
        Some(body) if !body.is_empty() => body,
        _ => return Err(NotifyError::parse("event body is missing or empty")),
    };

    let body = if envelope.is_base64_encoded {
        let bytes = STANDARD
            .decode(body.as_bytes())
            .map_err(|e| NotifyError::parse(format!("base64 decoding failed: {}", e)))?;
        String::from_utf8(bytes)
            .map_err(|e| NotifyError::parse(format!("body is not valid UTF-8: {}", e)))?
    } else {
        body
    };

    serde_json::from_str(&body)
        .map_err(|e| NotifyError::parse(format!("body is not a valid webhook payload: {}", e)))
}

/// Process one webhook event end to end:
/// parse -> translate -> format -> push. The first failing stage
/// short-circuits into a categorized error response; no stage retries.
pub async fn handle_event(state: &AppState, event: &str) -> WebhookResponse {
    match process_event(state, event).await {
        Ok(()) => {
            info!("notification delivered");
            WebhookResponse::ok("消息发送成功")
        }
        Err(err) => {
            error!("webhook processing failed: {}", err);
            WebhookResponse::from_error(&err)
        }
    }
}

async fn process_event(state: &AppState, event: &str) -> Result<(), NotifyError> {
    let body = parse_event(event)?;

    let record =
        fields::translate_fields(&state.store, &state.translator, &state.config, &body).await?;

    let full_message = message::build_message(&record)?;
    let summary = record.monitor_name.as_deref().unwrap_or_default();

    state.pusher.send(&full_message, summary).await
}
