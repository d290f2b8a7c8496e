//! DTOs for API requests and responses.
//!
//! Request fields are all optional so that a missing field reaches the
//! handler and is reported with the feature's own message.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Request to validate a verse reference.
#[derive(Debug, Default, Deserialize)]
pub struct ValidateVerseRequest {
    /// Free-text reference ("john 3:16")
    pub input: Option<String>,
}

/// Request for explain, context, and cross-reference features.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerseRequest {
    /// Passage text
    pub verse_text: Option<String>,
    /// Canonical reference
    pub reference: Option<String>,
}

/// Request for the word-by-word translation.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslateRequest {
    /// Passage text
    pub verse_text: Option<String>,
    /// Canonical reference
    pub reference: Option<String>,
    /// "NT" or "OT"
    pub testament: Option<String>,
}

/// Request for video search.
#[derive(Debug, Default, Deserialize)]
pub struct VideoRequest {
    /// Reference to search for
    pub reference: Option<String>,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Status
    pub status: &'static str,
    /// Server time
    pub timestamp: DateTime<Utc>,
}

/// Empty string for a missing field.
pub(crate) fn field(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or_default()
}
