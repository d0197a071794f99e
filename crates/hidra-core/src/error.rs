// ── Core error types ──
//
// Errors from hidra-core. Store operations never return these to their
// callers (they surface through the error flag and the notification
// queue); they travel between the conversion layer, the stores and the
// `Gateway` constructor. The `From<hidra_api::Error>` impl translates
// transport-layer errors into domain-appropriate variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot reach gateway at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Gateway request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    // ── Gateway answers ──────────────────────────────────────────────
    #[error("Gateway rejected the request (HTTP {status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Gateway sent a malformed response: {message}")]
    MalformedResponse { message: String },

    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: String,
        identifier: String,
    },

    // ── Local errors ─────────────────────────────────────────────────
    #[error("Validation failed: {message}")]
    Validation { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<hidra_api::Error> for CoreError {
    fn from(err: hidra_api::Error) -> Self {
        match err {
            hidra_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout { timeout_secs: 0 }
                } else {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map_or_else(|| "<unknown>".into(), ToString::to_string),
                        reason: e.to_string(),
                    }
                }
            }
            hidra_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            hidra_api::Error::Timeout { timeout_secs } => CoreError::Timeout { timeout_secs },
            hidra_api::Error::Status { status: 404, body } => CoreError::NotFound {
                entity_type: "resource".into(),
                identifier: body,
            },
            hidra_api::Error::Status { status, body } => CoreError::Rejected {
                status,
                message: body,
            },
            hidra_api::Error::MalformedResponse { message, body: _ } => {
                CoreError::MalformedResponse { message }
            }
        }
    }
}
