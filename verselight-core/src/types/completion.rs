//! Text-completion exchange types.

use serde::{Deserialize, Serialize};

/// Author of a chat message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Instructions framing the assistant's behavior
    System,
    /// The request itself
    User,
    /// A previous model reply
    Assistant,
}

/// A role-tagged message sent to the completion service.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Message author
    pub role: Role,
    /// Message text
    pub content: String,
}

impl ChatMessage {
    /// Creates a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    /// Creates a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Sampling options for one completion call.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChatOptions {
    /// Model override; the client's configured model is used when `None`
    pub model: Option<String>,
    /// Sampling temperature
    pub temperature: f32,
    /// Upper bound on generated tokens
    pub max_tokens: u32,
}

impl Default for ChatOptions {
    fn default() -> Self {
        Self {
            model: None,
            temperature: 0.7,
            max_tokens: 1000,
        }
    }
}

impl ChatOptions {
    /// Options with the given temperature and token limit.
    pub fn new(temperature: f32, max_tokens: u32) -> Self {
        Self {
            model: None,
            temperature,
            max_tokens,
        }
    }
}

/// Token accounting reported by the completion service.
///
/// Field names follow the upstream wire format and are passed through to the UI.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    /// Tokens in the prompt
    #[serde(default)]
    pub prompt_tokens: u32,
    /// Tokens generated
    #[serde(default)]
    pub completion_tokens: u32,
    /// Sum of both
    #[serde(default)]
    pub total_tokens: u32,
}

/// Generated text plus usage.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Completion {
    /// Raw generated text
    pub content: String,
    /// Token accounting, when the service reports it
    pub usage: Option<Usage>,
}
