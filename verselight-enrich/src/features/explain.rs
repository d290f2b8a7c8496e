use tracing::{info, instrument};

use verselight_cache::generate_key;
use verselight_core::constants::FEATURE_EXPLAIN;
use verselight_core::error::Result;
use verselight_core::types::ExplainResponse;

use super::MISSING_TEXT_OR_REFERENCE;
use crate::enricher::require_fields;
use crate::{prompts, shape, Enricher};

impl Enricher {
    /// Explains a verse in up to five bullet points.
    #[instrument(skip(self, verse_text))]
    pub async fn explain(&self, reference: &str, verse_text: &str) -> Result<ExplainResponse> {
        let [reference, verse_text] =
            require_fields([reference, verse_text], MISSING_TEXT_OR_REFERENCE)?;
        let key = generate_key(FEATURE_EXPLAIN, reference, &[]);

        self.cached(key, || self.generate_explanation(reference, verse_text))
            .await
    }

    async fn generate_explanation(
        &self,
        reference: &str,
        verse_text: &str,
    ) -> Result<ExplainResponse> {
        let prompt = prompts::explain(reference, verse_text);
        let completion = self
            .completion
            .complete(&prompt.messages, &prompt.options)
            .await?;

        let bullet_points = shape::extract_bullet_points(&completion.content);
        info!(reference, count = bullet_points.len(), "Generated explanation");

        Ok(ExplainResponse {
            reference: reference.to_string(),
            bullet_points,
            usage: completion.usage,
        })
    }
}
