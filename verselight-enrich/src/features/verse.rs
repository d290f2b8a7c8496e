use tracing::{info, instrument};

use verselight_core::error::{Result, VerseError};
use verselight_core::reference::{normalize_reference, split_reference};
use verselight_core::types::{Testament, ValidatedVerse};

use crate::Enricher;

impl Enricher {
    /// Resolves free-text input to a canonical verse with its text.
    ///
    /// The scripture service tends to "correct" references that do not exist
    /// (e.g. "John 3:99" comes back as another passage), so the canonical
    /// reference must match the input after normalization. Results are not
    /// cached.
    #[instrument(skip(self))]
    pub async fn validate_verse(&self, input: &str) -> Result<ValidatedVerse> {
        let input = input.trim();
        if input.is_empty() {
            return Err(VerseError::InvalidInput(
                "Please enter a verse reference".into(),
            ));
        }

        let passage = self
            .scripture
            .passage(input)
            .await?
            .ok_or_else(|| VerseError::VerseNotFound(input.to_string()))?;

        if normalize_reference(input) != normalize_reference(&passage.canonical) {
            return Err(VerseError::ReferenceMismatch {
                requested: input.to_string(),
                canonical: passage.canonical,
            });
        }

        let parts = split_reference(&passage.canonical);
        let testament = Testament::for_book(&parts.book);
        info!(reference = %passage.canonical, %testament, "Verse validated");

        Ok(ValidatedVerse {
            valid: true,
            reference: passage.canonical,
            verse_text: passage.text,
            book: parts.book,
            chapter: parts.chapter,
            verse: parts.verse,
            testament,
            copyright: passage.copyright,
        })
    }
}
