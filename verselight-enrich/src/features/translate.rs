use tracing::{info, instrument};

use verselight_cache::generate_key;
use verselight_core::constants::FEATURE_TRANSLATE;
use verselight_core::error::Result;
use verselight_core::types::{Testament, TranslateResponse};

use super::MISSING_TRANSLATE_FIELDS;
use crate::enricher::require_fields;
use crate::{prompts, shape, Enricher};

impl Enricher {
    /// Word-by-word Greek (NT) or Hebrew (OT) breakdown.
    ///
    /// `testament` must be "NT" or "OT"; it selects the language, the
    /// expected Strong's prefix, and part of the cache key.
    #[instrument(skip(self, verse_text))]
    pub async fn translate(
        &self,
        reference: &str,
        verse_text: &str,
        testament: &str,
    ) -> Result<TranslateResponse> {
        let [reference, verse_text, testament] =
            require_fields([reference, verse_text, testament], MISSING_TRANSLATE_FIELDS)?;
        let testament: Testament = testament.parse()?;
        let key = generate_key(
            FEATURE_TRANSLATE,
            reference,
            &[("testament", testament.code())],
        );

        self.cached(key, || {
            self.generate_translation(reference, verse_text, testament)
        })
        .await
    }

    async fn generate_translation(
        &self,
        reference: &str,
        verse_text: &str,
        testament: Testament,
    ) -> Result<TranslateResponse> {
        let prompt = prompts::translate(reference, verse_text, testament);
        let completion = self
            .completion
            .complete(&prompt.messages, &prompt.options)
            .await?;

        let translation = shape::validate_translation(&completion.content, testament)?;
        info!(
            reference,
            language = testament.language(),
            words = translation.words.len(),
            "Generated translation"
        );

        Ok(TranslateResponse {
            reference: reference.to_string(),
            testament,
            language: testament.language().to_string(),
            translation,
            usage: completion.usage,
        })
    }
}
