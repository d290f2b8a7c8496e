//! ESV passage-text client.
//!
//! Resolves free-text references through `/v3/passage/text/` with headings,
//! footnotes, verse numbers, and inline references switched off, so the
//! returned text is the bare passage.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use verselight_core::constants::{DEFAULT_ESV_BASE_URL, DEFAULT_HTTP_TIMEOUT_SECS, ESV_COPYRIGHT};
use verselight_core::error::{Result, VerseError};
use verselight_core::traits::ScriptureClient;
use verselight_core::types::ScripturePassage;

use crate::http::{build_client, endpoint, require_key};

const SERVICE: &str = "esv";

/// ESV client configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EsvConfig {
    /// API base URL
    pub base_url: String,
    /// API token; checked on first call
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for EsvConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_ESV_BASE_URL.into(),
            api_key: None,
            timeout_seconds: DEFAULT_HTTP_TIMEOUT_SECS,
        }
    }
}

impl EsvConfig {
    /// Default config with the given token.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            ..Default::default()
        }
    }

    /// Overrides the base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

/// ESV API client.
pub struct EsvClient {
    config: EsvConfig,
    http_client: reqwest::Client,
}

impl EsvClient {
    /// Creates a client with the given config.
    pub fn with_config(config: EsvConfig) -> Result<Self> {
        Ok(Self {
            http_client: build_client(config.timeout_seconds)?,
            config,
        })
    }
}

#[derive(Debug, Deserialize)]
struct PassageResponse {
    #[serde(default)]
    canonical: String,
    #[serde(default)]
    passages: Vec<String>,
}

#[async_trait]
impl ScriptureClient for EsvClient {
    #[instrument(skip(self))]
    async fn passage(&self, reference: &str) -> Result<Option<ScripturePassage>> {
        let api_key = require_key(&self.config.api_key, "ESV_API_KEY")?;
        let url = endpoint(&self.config.base_url, "v3/passage/text/")?;

        let response = self
            .http_client
            .get(url)
            .header("Authorization", format!("Token {}", api_key))
            .query(&[
                ("q", reference),
                ("include-headings", "false"),
                ("include-footnotes", "false"),
                ("include-verse-numbers", "false"),
                ("include-short-copyright", "false"),
                ("include-passage-references", "false"),
            ])
            .send()
            .await
            .map_err(|e| VerseError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, "ESV API error");
            return Err(VerseError::upstream(SERVICE, format!("ESV API error: {}", status.as_u16())));
        }

        let parsed: PassageResponse = response
            .json()
            .await
            .map_err(|e| VerseError::InvalidFormat(format!("ESV response: {}", e)))?;

        let Some(text) = parsed.passages.into_iter().next() else {
            debug!("No passage returned");
            return Ok(None);
        };

        debug!(canonical = %parsed.canonical, "Passage resolved");
        Ok(Some(ScripturePassage {
            canonical: parsed.canonical,
            text: text.trim().to_string(),
            copyright: ESV_COPYRIGHT.to_string(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> EsvClient {
        EsvClient::with_config(EsvConfig::new("esv-token").with_base_url(server.uri())).unwrap()
    }

    #[tokio::test]
    async fn test_passage_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v3/passage/text/"))
            .and(header("authorization", "Token esv-token"))
            .and(query_param("q", "john 3:16"))
            .and(query_param("include-verse-numbers", "false"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "query": "john 3:16",
                "canonical": "John 3:16",
                "passages": ["\n  For God so loved the world...\n\n"]
            })))
            .mount(&server)
            .await;

        let passage = client_for(&server).passage("john 3:16").await.unwrap().unwrap();
        assert_eq!(passage.canonical, "John 3:16");
        assert_eq!(passage.text, "For God so loved the world...");
        assert_eq!(passage.copyright, ESV_COPYRIGHT);
    }

    #[tokio::test]
    async fn test_passage_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "query": "Hezekiah 1:1",
                "canonical": "",
                "passages": []
            })))
            .mount(&server)
            .await;

        assert!(client_for(&server).passage("Hezekiah 1:1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_non_success_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let err = client_for(&server).passage("John 3:16").await.unwrap_err();
        assert!(err.is_upstream_error());
        assert!(err.to_string().contains("401"));
    }

    #[tokio::test]
    async fn test_missing_key() {
        let client = EsvClient::with_config(EsvConfig::default()).unwrap();
        let err = client.passage("John 3:16").await.unwrap_err();
        assert!(matches!(err, VerseError::MissingCredential("ESV_API_KEY")));
    }
}
