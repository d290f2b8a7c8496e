//! Response contracts for the enrichment features.
//!
//! These are the exact JSON shapes the browser client renders. Field names
//! are camelCase on the wire.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::completion::Usage;
use super::verse::Testament;

// ═══════════════════════════════════════════════════════════════════════════════
// EXPLAIN
// ═══════════════════════════════════════════════════════════════════════════════

/// Short bullet-point explanation of a verse.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExplainResponse {
    /// Reference explained
    pub reference: String,
    /// At most five bullet statements, markers stripped
    pub bullet_points: Vec<String>,
    /// Token accounting
    pub usage: Option<Usage>,
}

// ═══════════════════════════════════════════════════════════════════════════════
// CONTEXT
// ═══════════════════════════════════════════════════════════════════════════════

/// Seven fixed sections of historical and literary background.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoricalContext {
    /// Author and brief background
    pub author: String,
    /// Original audience and purpose
    pub audience: String,
    /// Approximate date and period
    pub date_written: String,
    /// Geography
    pub geographical_context: String,
    /// Political situation
    pub political_context: String,
    /// Cultural practices and norms
    pub cultural_context: String,
    /// Placement within the book's structure
    pub literary_context: String,
}

impl HistoricalContext {
    /// Wire names of every section, in display order.
    pub const FIELDS: [&'static str; 7] = [
        "author",
        "audience",
        "dateWritten",
        "geographicalContext",
        "politicalContext",
        "culturalContext",
        "literaryContext",
    ];
}

/// Context feature response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextResponse {
    /// Reference described
    pub reference: String,
    /// The seven sections
    pub context: HistoricalContext,
    /// Token accounting
    pub usage: Option<Usage>,
}

// ═══════════════════════════════════════════════════════════════════════════════
// CROSS-REFERENCES
// ═══════════════════════════════════════════════════════════════════════════════

/// Kind of link between a verse and a cross-reference.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CrossRefKind {
    /// Repeated wording
    #[serde(rename = "Direct verbal echo")]
    DirectVerbalEcho,
    /// Same theme developed further
    #[serde(rename = "Thematic development")]
    ThematicDevelopment,
    /// Type and antitype
    #[serde(rename = "Typology")]
    Typology,
    /// Parallel wisdom saying
    #[serde(rename = "Parallel wisdom")]
    ParallelWisdom,
    /// New Testament fulfillment
    #[serde(rename = "NT fulfillment")]
    NtFulfillment,
}

impl CrossRefKind {
    /// Every kind, in the order the prompt lists them.
    pub const ALL: [CrossRefKind; 5] = [
        CrossRefKind::DirectVerbalEcho,
        CrossRefKind::ThematicDevelopment,
        CrossRefKind::Typology,
        CrossRefKind::ParallelWisdom,
        CrossRefKind::NtFulfillment,
    ];

    /// Canonical label.
    pub fn label(self) -> &'static str {
        match self {
            CrossRefKind::DirectVerbalEcho => "Direct verbal echo",
            CrossRefKind::ThematicDevelopment => "Thematic development",
            CrossRefKind::Typology => "Typology",
            CrossRefKind::ParallelWisdom => "Parallel wisdom",
            CrossRefKind::NtFulfillment => "NT fulfillment",
        }
    }

    /// Matches a label ignoring case and surrounding whitespace.
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.label().eq_ignore_ascii_case(label))
    }
}

impl fmt::Display for CrossRefKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One related passage.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrossReference {
    /// "Book Chapter:Verse(s)"
    pub reference: String,
    /// How the passage relates
    #[serde(rename = "type")]
    pub kind: CrossRefKind,
    /// Why the link is strong
    pub explanation: String,
}

/// Theme plus ordered cross-references.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrossRefSet {
    /// Central theme of the verse
    pub primary_theme: String,
    /// At most five references, strongest first
    pub cross_references: Vec<CrossReference>,
}

/// Cross-reference feature response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrossRefResponse {
    /// Reference analysed
    pub reference: String,
    /// Theme and references
    pub crossref: CrossRefSet,
    /// Token accounting
    pub usage: Option<Usage>,
}

// ═══════════════════════════════════════════════════════════════════════════════
// TRANSLATE
// ═══════════════════════════════════════════════════════════════════════════════

/// One word of the original-language text.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordAnnotation {
    /// Word in original script
    pub original: String,
    /// Romanized form
    pub transliteration: String,
    /// Strong's lexicon number (G#### / H####)
    pub strongs: String,
    /// Short English gloss
    pub meaning: String,
    /// Grammatical tag
    pub grammar: String,
}

impl WordAnnotation {
    /// Wire names of the required fields.
    pub const FIELDS: [&'static str; 5] =
        ["original", "transliteration", "strongs", "meaning", "grammar"];
}

/// Full original text with per-word annotations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Translation {
    /// Whole verse in original script
    pub original_text: String,
    /// Words in textual order
    pub words: Vec<WordAnnotation>,
}

/// Translate feature response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslateResponse {
    /// Reference translated
    pub reference: String,
    /// Testament the words were drawn from
    pub testament: Testament,
    /// "Greek" or "Hebrew"
    pub language: String,
    /// Original text and words
    pub translation: Translation,
    /// Token accounting
    pub usage: Option<Usage>,
}

// ═══════════════════════════════════════════════════════════════════════════════
// VIDEOS
// ═══════════════════════════════════════════════════════════════════════════════

/// Summary of one video search hit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    /// Service-assigned video id, used for deduplication
    pub video_id: String,
    /// Title
    pub title: String,
    /// Channel name
    pub channel: String,
    /// Medium thumbnail URL
    pub thumbnail: String,
    /// Publication timestamp as reported upstream
    pub published_at: String,
}

/// Video feature response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoResponse {
    /// Reference searched
    pub reference: String,
    /// Up to nine unique videos, first-seen order
    pub videos: Vec<Video>,
}
