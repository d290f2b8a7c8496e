//! OpenAI chat-completions client.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use verselight_core::constants::{
    DEFAULT_HTTP_TIMEOUT_SECS, DEFAULT_OPENAI_BASE_URL, DEFAULT_OPENAI_MODEL,
};
use verselight_core::error::{Result, VerseError};
use verselight_core::traits::CompletionClient;
use verselight_core::types::{ChatMessage, ChatOptions, Completion, Usage};

use crate::http::{build_client, endpoint, require_key};

const SERVICE: &str = "openai";

/// OpenAI client configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OpenAiConfig {
    /// API base URL (no trailing path)
    pub base_url: String,
    /// Secret key; checked on first call
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    /// Model used when a call does not override it
    pub model: String,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_OPENAI_BASE_URL.into(),
            api_key: None,
            model: DEFAULT_OPENAI_MODEL.into(),
            timeout_seconds: DEFAULT_HTTP_TIMEOUT_SECS,
        }
    }
}

impl OpenAiConfig {
    /// Default config with the given key.
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

    /// Overrides the default model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

/// Chat completions over HTTP.
pub struct OpenAiClient {
    config: OpenAiConfig,
    http_client: reqwest::Client,
}

impl OpenAiClient {
    /// Creates a client with the given config.
    pub fn with_config(config: OpenAiConfig) -> Result<Self> {
        Ok(Self {
            http_client: build_client(config.timeout_seconds)?,
            config,
        })
    }

    /// Default model for this client.
    pub fn model(&self) -> &str {
        &self.config.model
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    usage: Option<Usage>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: String,
}

#[async_trait]
impl CompletionClient for OpenAiClient {
    #[instrument(skip(self, messages), fields(model = tracing::field::Empty))]
    async fn complete(&self, messages: &[ChatMessage], options: &ChatOptions) -> Result<Completion> {
        let api_key = require_key(&self.config.api_key, "OPENAI_API_KEY")?;
        let url = endpoint(&self.config.base_url, "v1/chat/completions")?;
        let model = options.model.as_deref().unwrap_or(&self.config.model);
        tracing::Span::current().record("model", model);

        let body = ChatRequest {
            model,
            messages,
            temperature: options.temperature,
            max_tokens: options.max_tokens,
        };

        let response = self
            .http_client
            .post(url)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| VerseError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let reason = serde_json::from_str::<ErrorEnvelope>(&text)
                .map(|env| env.error.message)
                .unwrap_or_else(|_| format!("status {}: {}", status, text));
            warn!(%status, reason = %reason, "Completion request rejected");
            return Err(VerseError::upstream(SERVICE, reason));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| VerseError::InvalidFormat(format!("completion response: {}", e)))?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| VerseError::upstream(SERVICE, "response contained no choices"))?;

        debug!(
            chars = content.len(),
            total_tokens = parsed.usage.as_ref().map(|u| u.total_tokens),
            "Completion received"
        );

        Ok(Completion {
            content,
            usage: parsed.usage,
        })
    }
}
