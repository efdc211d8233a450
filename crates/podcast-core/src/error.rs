// ── Core error types ──
//
// User-facing errors from podcast-core. Consumers never match on reqwest
// errors or JSON failures directly; `From<&podcast_api::Error>` translates
// transport-layer errors into domain-appropriate variants.

use std::sync::Arc;

use thiserror::Error;

use crate::store::Collection;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot reach backend at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Request to backend timed out")]
    Timeout,

    // ── Data errors ──────────────────────────────────────────────────
    #[error("Resource not found: {path}")]
    NotFound { path: String },

    #[error("Backend returned malformed data: {message}")]
    MalformedResponse { message: String },

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("API error: {message}")]
    Api {
        message: String,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    // ── Store errors ─────────────────────────────────────────────────
    #[error(transparent)]
    Refresh(#[from] RefreshFailure),

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {message}")]
    Internal { message: String },
}

/// Why a store refresh did not complete.
#[derive(Debug, Error)]
pub enum RefreshError {
    /// The source returned an error.
    #[error(transparent)]
    Fetch(#[from] podcast_api::Error),

    /// The source panicked before producing a result.
    #[error("refresh aborted: {message}")]
    Aborted { message: String },
}

impl RefreshError {
    /// HTTP status code carried by the underlying fetch error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Fetch(e) => e.status(),
            Self::Aborted { .. } => None,
        }
    }
}

/// A store refresh that did not complete.
///
/// Cloneable so that every caller joined onto a coalesced refresh, and every
/// event subscriber, receives the same failure.
#[derive(Debug, Clone, Error)]
#[error("Refreshing {collection} failed: {error}")]
pub struct RefreshFailure {
    pub collection: Collection,
    #[source]
    pub error: Arc<RefreshError>,
}

impl RefreshFailure {
    pub fn new(collection: Collection, error: impl Into<RefreshError>) -> Self {
        Self {
            collection,
            error: Arc::new(error.into()),
        }
    }

    /// The underlying failure translated into a [`CoreError`].
    pub fn cause(&self) -> CoreError {
        match &*self.error {
            RefreshError::Fetch(e) => CoreError::from(e),
            RefreshError::Aborted { message } => CoreError::Internal {
                message: message.clone(),
            },
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<&podcast_api::Error> for CoreError {
    fn from(err: &podcast_api::Error) -> Self {
        match err {
            podcast_api::Error::Transport(e) => {
                if e.is_timeout() {
                    CoreError::Timeout
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map_or_else(|| "<unknown>".into(), ToString::to_string),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            podcast_api::Error::Status { status: 404, url } => {
                CoreError::NotFound { path: url.clone() }
            }
            podcast_api::Error::Status { status, url } => CoreError::Api {
                message: format!("HTTP {status} from {url}"),
                status: Some(*status),
            },
            podcast_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            podcast_api::Error::Deserialization { message, body: _ } => {
                CoreError::MalformedResponse {
                    message: message.clone(),
                }
            }
        }
    }
}

impl From<podcast_api::Error> for CoreError {
    fn from(err: podcast_api::Error) -> Self {
        CoreError::from(&err)
    }
}
