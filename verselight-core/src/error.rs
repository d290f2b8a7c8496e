//! Error types for VerseLight.
//!
//! One `thiserror` enum covers every failure a request can hit. Variants are
//! grouped by who is at fault, since that decides the HTTP status.

use thiserror::Error;

/// Result type alias using `VerseError`.
pub type Result<T> = std::result::Result<T, VerseError>;

/// Main error type for all VerseLight operations.
#[derive(Debug, Error)]
pub enum VerseError {
    // ═══════════════════════════════════════════════════════════════════════════
    // CLIENT INPUT ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// A required request field is missing, empty, or malformed.
    #[error("{0}")]
    InvalidInput(String),

    /// The scripture service has no passage for the reference.
    #[error("Verse not found. Check the reference and try again.")]
    VerseNotFound(String),

    /// The scripture service resolved the input to a different passage.
    #[error("Verse not found. \"{requested}\" does not exist. Did you mean \"{canonical}\"?")]
    ReferenceMismatch {
        /// Reference as typed by the user (trimmed)
        requested: String,
        /// Canonical reference returned by the service
        canonical: String,
    },

    // ═══════════════════════════════════════════════════════════════════════════
    // UPSTREAM ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// An external service answered with a non-success status or an error body.
    #[error("{service} request failed: {reason}")]
    Upstream {
        /// Service name ("openai", "esv", "youtube")
        service: &'static str,
        /// Upstream message, kept for diagnostics
        reason: String,
    },

    /// The HTTP transport itself failed (DNS, TLS, timeout, ...).
    #[error("HTTP request failed: {0}")]
    Http(String),

    // ═══════════════════════════════════════════════════════════════════════════
    // SHAPE ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Upstream payload could not be parsed at all.
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// Upstream payload parsed but lacks required fields.
    #[error("Missing required fields: {0}")]
    MissingFields(String),

    // ═══════════════════════════════════════════════════════════════════════════
    // CONFIGURATION ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// A required API credential is not configured.
    #[error("{0} not configured")]
    MissingCredential(&'static str),

    /// Any other configuration problem.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    // ═══════════════════════════════════════════════════════════════════════════
    // SERIALIZATION / INTERNAL
    // ═══════════════════════════════════════════════════════════════════════════

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Internal invariant violation.
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl VerseError {
    /// Builds an upstream error for the given service.
    pub fn upstream(service: &'static str, reason: impl Into<String>) -> Self {
        VerseError::Upstream {
            service,
            reason: reason.into(),
        }
    }

    /// Returns true if the caller sent something we cannot serve (400).
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            VerseError::InvalidInput(_)
                | VerseError::VerseNotFound(_)
                | VerseError::ReferenceMismatch { .. }
        )
    }

    /// Returns true if an external service failed.
    pub fn is_upstream_error(&self) -> bool {
        matches!(self, VerseError::Upstream { .. } | VerseError::Http(_))
    }

    /// Returns true if an upstream response failed shape validation.
    pub fn is_shape_error(&self) -> bool {
        matches!(
            self,
            VerseError::InvalidFormat(_) | VerseError::MissingFields(_)
        )
    }

    /// Returns true if the server is missing configuration.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            VerseError::MissingCredential(_) | VerseError::ConfigError(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mismatch_display_suggests_canonical() {
        let err = VerseError::ReferenceMismatch {
            requested: "John 99:99".into(),
            canonical: "John 1:1".into(),
        };
        let msg = err.to_string();
        assert!(msg.starts_with("Verse not found."));
        assert!(msg.contains("\"John 99:99\""));
        assert!(msg.contains("Did you mean \"John 1:1\"?"));
    }

    #[test]
    fn test_error_classification() {
        assert!(VerseError::InvalidInput("x".into()).is_client_error());
        assert!(VerseError::VerseNotFound("x".into()).is_client_error());
        assert!(!VerseError::Http("x".into()).is_client_error());

        assert!(VerseError::upstream("openai", "boom").is_upstream_error());
        assert!(VerseError::Http("timeout".into()).is_upstream_error());

        assert!(VerseError::InvalidFormat("x".into()).is_shape_error());
        assert!(VerseError::MissingFields("strongs".into()).is_shape_error());
        assert!(!VerseError::JsonError(serde_json::from_str::<u8>("x").unwrap_err()).is_shape_error());

        assert!(VerseError::MissingCredential("OPENAI_API_KEY").is_config_error());
    }

    #[test]
    fn test_missing_credential_display() {
        let err = VerseError::MissingCredential("YOUTUBE_API_KEY");
        assert_eq!(err.to_string(), "YOUTUBE_API_KEY not configured");
    }

    #[test]
    fn test_json_error_conversion() {
        let json_result: std::result::Result<serde_json::Value, _> = serde_json::from_str("invalid");
        let result: Result<serde_json::Value> = json_result.map_err(VerseError::from);
        assert!(matches!(result, Err(VerseError::JsonError(_))));
    }
}
