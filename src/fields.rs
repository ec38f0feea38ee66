use crate::cache::CacheSession;
use crate::config::Config;
use crate::error::NotifyError;
use crate::store::StoreClient;
use crate::translation::TranslationClient;
use serde::Deserialize;
use serde_json::Value;
use tracing::info;

/// Parsed webhook payload. Every field is optional; HetrixTools omits
/// fields depending on monitor type.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookBody {
    pub monitor_id: Option<Value>,
    pub monitor_name: Option<String>,
    pub monitor_target: Option<String>,
    pub monitor_type: Option<String>,
    pub monitor_category: Option<String>,
    pub monitor_status: Option<String>,
    pub timestamp: Option<i64>,
    pub monitor_errors: Option<Value>,
}

/// Webhook payload after translation: the four recognized fields carry
/// target-language values, everything else passes through untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct TranslatedRecord {
    pub monitor_name: Option<String>,
    pub monitor_type: Option<String>,
    pub monitor_category: Option<String>,
    pub monitor_status: Option<String>,
    pub monitor_id: Option<Value>,
    pub monitor_target: Option<String>,
    pub timestamp: Option<i64>,
    pub monitor_errors: Option<Value>,
}

/// Translate the recognized fields of one webhook payload.
///
/// Runs one cache cycle: load the store document, resolve each present
/// field against cache-or-provider (entries learned early in the loop are
/// hits for repeats later in the same loop), then commit once iff anything
/// new was learned. The first failure aborts the cycle with nothing
/// partial escaping; learned-but-uncommitted entries are simply dropped.
pub async fn translate_fields(
    store: &StoreClient,
    translator: &TranslationClient,
    config: &Config,
    body: &WebhookBody,
) -> Result<TranslatedRecord, NotifyError> {
    let mut session = CacheSession::load(store).await?;

    let monitor_name = resolve_field(&mut session, translator, config, &body.monitor_name).await?;
    let monitor_type = resolve_field(&mut session, translator, config, &body.monitor_type).await?;
    let monitor_category =
        resolve_field(&mut session, translator, config, &body.monitor_category).await?;
    let monitor_status =
        resolve_field(&mut session, translator, config, &body.monitor_status).await?;

    // One write per invocation, no matter how many entries were learned
    if session.is_dirty() {
        session.commit(store).await?;
    } else {
        info!("no new translations learned, skipping store write");
    }

    Ok(TranslatedRecord {
        monitor_name,
        monitor_type,
        monitor_category,
        monitor_status,
        monitor_id: body.monitor_id.clone(),
        monitor_target: body.monitor_target.clone(),
        timestamp: body.timestamp,
        monitor_errors: body.monitor_errors.clone(),
    })
}

async fn resolve_field(
    session: &mut CacheSession,
    translator: &TranslationClient,
    config: &Config,
    value: &Option<String>,
) -> Result<Option<String>, NotifyError> {
    match value {
        None => Ok(None),
        Some(text) => {
            let translated = session
                .resolve(
                    translator,
                    text,
                    &config.source_language,
                    &config.target_language,
                )
                .await?;
            Ok(Some(translated))
        }
    }
}
