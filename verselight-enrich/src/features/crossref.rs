use tracing::{info, instrument};

use verselight_cache::generate_key;
use verselight_core::constants::FEATURE_CROSSREF;
use verselight_core::error::Result;
use verselight_core::types::CrossRefResponse;

use super::MISSING_TEXT_OR_REFERENCE;
use crate::enricher::require_fields;
use crate::{prompts, shape, Enricher};

impl Enricher {
    /// Primary theme plus up to five typed cross-references.
    #[instrument(skip(self, verse_text))]
    pub async fn crossref(&self, reference: &str, verse_text: &str) -> Result<CrossRefResponse> {
        let [reference, verse_text] =
            require_fields([reference, verse_text], MISSING_TEXT_OR_REFERENCE)?;
        let key = generate_key(FEATURE_CROSSREF, reference, &[]);

        self.cached(key, || self.generate_crossref(reference, verse_text))
            .await
    }

    async fn generate_crossref(&self, reference: &str, verse_text: &str) -> Result<CrossRefResponse> {
        let prompt = prompts::crossref(reference, verse_text);
        let completion = self
            .completion
            .complete(&prompt.messages, &prompt.options)
            .await?;

        let crossref = shape::validate_crossref(&completion.content)?;
        info!(
            reference,
            count = crossref.cross_references.len(),
            "Generated cross-references"
        );

        Ok(CrossRefResponse {
            reference: reference.to_string(),
            crossref,
            usage: completion.usage,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::fakes::enricher_with;
    use serde_json::json;
    use verselight_core::types::CrossRefKind;

    #[tokio::test]
    async fn test_crossref_canonical_kind_on_the_wire() {
        let reply = json!({
            "primaryTheme": "God's love displayed in the gift of his Son.",
            "crossReferences": [
                {"reference": "Romans 5:8", "type": "thematic DEVELOPMENT", "explanation": "Love shown in Christ's death."},
                {"reference": "Genesis 22:2", "type": "typology", "explanation": "The beloved son offered."}
            ]
        })
        .to_string();
        let (enricher, fakes) = enricher_with(vec![Ok(reply)]);

        let response = enricher.crossref("John 3:16", "For God...").await.unwrap();
        assert_eq!(response.crossref.cross_references.len(), 2);
        assert_eq!(
            response.crossref.cross_references[1].kind,
            CrossRefKind::Typology
        );
        assert_eq!(fakes.completion.last_options().unwrap().max_tokens, 800);

        let wire = serde_json::to_value(&response).unwrap();
        assert_eq!(
            wire["crossref"]["crossReferences"][0]["type"],
            "Thematic development"
        );
    }

    #[tokio::test]
    async fn test_crossref_failed_shape_not_cached() {
        let reply = json!({"crossReferences": []}).to_string();
        let (enricher, _) = enricher_with(vec![Ok(reply)]);

        let err = enricher.crossref("John 3:16", "For God...").await.unwrap_err();
        assert!(err.is_shape_error());
        assert!(enricher.cache().is_empty());
    }
}
