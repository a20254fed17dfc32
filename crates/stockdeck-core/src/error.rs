// ── Core error types ──
//
// User-facing errors from stockdeck-core. These are NOT API-specific --
// consumers never see raw HTTP status codes or JSON parse failures.
// The `From<stockdeck_api::Error>` impl translates transport-layer errors
// into domain-appropriate variants.
//
// `CoreError` is `Clone`: coalesced fetches hand the same resolved error
// to every waiter, so the error must be duplicable.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Clone, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot reach the service at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Request timed out: {reason}")]
    Timeout { reason: String },

    /// The request could not be sent or the response never arrived.
    #[error("Service unavailable: {message}")]
    Unavailable { message: String },

    // ── Data errors ──────────────────────────────────────────────────
    #[error("Not found: {message}")]
    NotFound { message: String },

    // ── Operation errors ─────────────────────────────────────────────
    #[error("Validation failed: {message}")]
    ValidationFailed { message: String },

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("Service error: {message}")]
    Api {
        message: String,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Credential store errors ──────────────────────────────────────
    #[error("Credential store error: {message}")]
    CredentialStore { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Returns `true` if the stored credential is no longer valid and the
    /// user needs to sign in again.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, Self::AuthenticationFailed { .. })
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<stockdeck_api::Error> for CoreError {
    fn from(err: stockdeck_api::Error) -> Self {
        match err {
            stockdeck_api::Error::AuthenticationRequired { message } => {
                CoreError::AuthenticationFailed { message }
            }
            stockdeck_api::Error::ValidationFailed { message } => {
                CoreError::ValidationFailed { message }
            }
            stockdeck_api::Error::NotFound { message } => CoreError::NotFound { message },
            stockdeck_api::Error::Server { status, message } => CoreError::Api {
                message,
                status: Some(status),
            },
            stockdeck_api::Error::Network(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout {
                        reason: e.to_string(),
                    }
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map(ToString::to_string)
                            .unwrap_or_else(|| "<unknown>".into()),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Unavailable {
                        message: e.to_string(),
                    }
                }
            }
            stockdeck_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            stockdeck_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            stockdeck_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Deserialization error: {message}"))
            }
        }
    }
}
