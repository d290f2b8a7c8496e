use tracing::{info, instrument};

use verselight_cache::generate_key;
use verselight_core::constants::FEATURE_CONTEXT;
use verselight_core::error::Result;
use verselight_core::types::ContextResponse;

use super::MISSING_TEXT_OR_REFERENCE;
use crate::enricher::require_fields;
use crate::{prompts, shape, Enricher};

impl Enricher {
    /// Historical and literary background in seven sections.
    #[instrument(skip(self, verse_text))]
    pub async fn context(&self, reference: &str, verse_text: &str) -> Result<ContextResponse> {
        let [reference, verse_text] =
            require_fields([reference, verse_text], MISSING_TEXT_OR_REFERENCE)?;
        let key = generate_key(FEATURE_CONTEXT, reference, &[]);

        self.cached(key, || self.generate_context(reference, verse_text))
            .await
    }

    async fn generate_context(&self, reference: &str, verse_text: &str) -> Result<ContextResponse> {
        let prompt = prompts::context(reference, verse_text);
        let completion = self
            .completion
            .complete(&prompt.messages, &prompt.options)
            .await?;

        let context = shape::validate_context(&completion.content)?;
        info!(reference, "Generated context");

        Ok(ContextResponse {
            reference: reference.to_string(),
            context,
            usage: completion.usage,
        })
    }
}
