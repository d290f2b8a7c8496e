//! One module per feature, each adding its entry point to [`crate::Enricher`].

mod context;
mod crossref;
mod explain;
mod translate;
mod verse;
pub(crate) mod videos;

pub(crate) const MISSING_TEXT_OR_REFERENCE: &str = "Missing verseText or reference";
pub(crate) const MISSING_TRANSLATE_FIELDS: &str = "Missing verseText, reference, or testament";
pub(crate) const MISSING_REFERENCE: &str = "Missing reference";
