use thiserror::Error;

/// Failure kinds for one webhook cycle. Every component returns this enum
/// directly so the handler can map a kind to an HTTP status without parsing
/// message text. Causes are chained via `source()`.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// The inbound webhook event could not be parsed.
    #[error("invalid webhook event: {reason}")]
    Parse { reason: String },

    /// The translation provider rejected or failed a request.
    #[error("translation failed: {0}")]
    Translation(#[source] anyhow::Error),

    /// The remote translation store could not be read or written.
    #[error("translation store operation failed: {0}")]
    Store(#[source] anyhow::Error),

    /// The notification could not be delivered.
    #[error("message push failed: {0}")]
    Push(#[source] anyhow::Error),

    /// Anything outside the known failure kinds.
    #[error("unexpected error: {0}")]
    Unexpected(#[from] anyhow::Error),
}

impl NotifyError {
    pub fn parse(reason: impl Into<String>) -> Self {
        Self::Parse {
            reason: reason.into(),
        }
    }

    /// HTTP status the webhook caller receives for this kind.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Parse { .. } => 400,
            Self::Translation(_) | Self::Store(_) | Self::Push(_) | Self::Unexpected(_) => 500,
        }
    }
}
