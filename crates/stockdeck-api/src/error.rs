use thiserror::Error;

/// Top-level error type for the `stockdeck-api` crate.
///
/// Every remote call resolves to either its decoded payload or one of these
/// variants. The category mirrors what the service reported; the message is
/// taken from the response envelope when one could be parsed, otherwise a
/// generic category-derived string. `stockdeck-core` maps these into
/// user-facing diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// Missing, invalid, or expired bearer credential (401/403).
    #[error("Authentication required: {message}")]
    AuthenticationRequired { message: String },

    // ── Request rejection ───────────────────────────────────────────
    /// The service rejected the input (400/422, or a `success: false`
    /// envelope on an otherwise successful status).
    #[error("Validation failed: {message}")]
    ValidationFailed { message: String },

    /// The referenced entity does not exist on the service (404).
    #[error("Not found: {message}")]
    NotFound { message: String },

    /// Unexpected status from the service (5xx and anything unmapped).
    #[error("Server error (HTTP {status}): {message}")]
    Server { status: u16, message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// The request could not be sent or the response never arrived.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS setup or client construction error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Map an HTTP error status plus an optional envelope message into the
    /// matching category. Falls back to a category-derived message when the
    /// service gave none.
    pub(crate) fn from_status(status: reqwest::StatusCode, message: Option<String>) -> Self {
        let code = status.as_u16();
        match code {
            401 | 403 => Self::AuthenticationRequired {
                message: message.unwrap_or_else(|| "bearer credential missing or expired".into()),
            },
            400 | 422 => Self::ValidationFailed {
                message: message.unwrap_or_else(|| "request rejected by the service".into()),
            },
            404 => Self::NotFound {
                message: message.unwrap_or_else(|| "resource not found".into()),
            },
            _ => Self::Server {
                status: code,
                message: message.unwrap_or_else(|| "unexpected response from the service".into()),
            },
        }
    }

    /// Returns `true` if this error means the session credential is no
    /// longer valid and re-authentication might resolve it.
    pub fn is_auth_required(&self) -> bool {
        matches!(self, Self::AuthenticationRequired { .. })
    }

    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns `true` if the service rejected the submitted input.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::ValidationFailed { .. })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping_covers_taxonomy() {
        let auth = Error::from_status(reqwest::StatusCode::UNAUTHORIZED, None);
        assert!(auth.is_auth_required());

        let validation = Error::from_status(reqwest::StatusCode::UNPROCESSABLE_ENTITY, None);
        assert!(validation.is_validation());

        let missing = Error::from_status(reqwest::StatusCode::NOT_FOUND, None);
        assert!(missing.is_not_found());

        match Error::from_status(reqwest::StatusCode::INTERNAL_SERVER_ERROR, None) {
            Error::Server { status, .. } => assert_eq!(status, 500),
            other => panic!("expected Server, got {other:?}"),
        }
    }

    #[test]
    fn remote_message_wins_over_default() {
        let err = Error::from_status(
            reqwest::StatusCode::UNPROCESSABLE_ENTITY,
            Some("quantity must be non-negative".into()),
        );
        assert_eq!(
            err.to_string(),
            "Validation failed: quantity must be non-negative"
        );
    }
}
