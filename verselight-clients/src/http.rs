//! Shared HTTP plumbing.

use std::time::Duration;

use url::Url;

use verselight_core::error::{Result, VerseError};

/// Builds a reqwest client with the given timeout.
pub(crate) fn build_client(timeout_seconds: u64) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_seconds))
        .build()
        .map_err(|e| VerseError::ConfigError(format!("Failed to create HTTP client: {}", e)))
}

/// Joins `path` onto a configured base URL.
///
/// Accepts bases with or without a trailing slash.
pub(crate) fn endpoint(base_url: &str, path: &str) -> Result<Url> {
    let base = format!("{}/", base_url.trim_end_matches('/'));
    Url::parse(&base)
        .and_then(|base| base.join(path.trim_start_matches('/')))
        .map_err(|e| VerseError::ConfigError(format!("Invalid base URL '{}': {}", base_url, e)))
}

/// Returns the credential or a configuration error naming it.
pub(crate) fn require_key<'a>(key: &'a Option<String>, name: &'static str) -> Result<&'a str> {
    key.as_deref()
        .filter(|k| !k.trim().is_empty())
        .ok_or(VerseError::MissingCredential(name))
}
