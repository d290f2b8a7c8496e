//! Common traits for VerseLight.
//!
//! Each external service sits behind a trait so the enrichment layer can be
//! driven by real HTTP clients in production and by fakes in tests.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{ChatMessage, ChatOptions, Completion, ScripturePassage, Video};

// ═══════════════════════════════════════════════════════════════════════════════
// TEXT COMPLETION
// ═══════════════════════════════════════════════════════════════════════════════

/// Interface for a chat-style text-completion service.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Sends the messages and returns the generated text.
    ///
    /// Transport failures and non-success statuses are upstream errors; a
    /// missing credential is a configuration error.
    async fn complete(&self, messages: &[ChatMessage], options: &ChatOptions) -> Result<Completion>;
}

// ═══════════════════════════════════════════════════════════════════════════════
// SCRIPTURE TEXT
// ═══════════════════════════════════════════════════════════════════════════════

/// Interface for a scripture-text lookup service.
#[async_trait]
pub trait ScriptureClient: Send + Sync {
    /// Resolves a free-text reference.
    ///
    /// Returns `Ok(None)` when the service has no passage for it.
    async fn passage(&self, reference: &str) -> Result<Option<ScripturePassage>>;
}

// ═══════════════════════════════════════════════════════════════════════════════
// VIDEO SEARCH
// ═══════════════════════════════════════════════════════════════════════════════

/// Interface for a video-search service.
#[async_trait]
pub trait VideoSearchClient: Send + Sync {
    /// Returns ranked video summaries for one query.
    async fn search(&self, query: &str, max_results: u32) -> Result<Vec<Video>>;

    /// Whether the client has the credential it needs.
    ///
    /// Checked once before issuing any query so that a missing key is
    /// reported as a configuration error instead of per-query failures.
    fn is_configured(&self) -> bool;
}
