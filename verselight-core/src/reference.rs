//! Verse reference helpers.
//!
//! References come from free-text user input ("john 3:16", "Romans 8:28–30")
//! and from the scripture service's canonical form ("John 3:16").

use serde::{Deserialize, Serialize};

/// Normalizes a reference for comparison.
///
/// Trims, lowercases, maps en/em dashes to `-`, and collapses whitespace runs
/// to a single space. Range formatting is otherwise left untouched, so
/// "8:28-30" and "8:28 - 30" remain different.
pub fn normalize_reference(reference: &str) -> String {
    let lowered = reference.trim().to_lowercase().replace(['\u{2013}', '\u{2014}'], "-");
    lowered.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Book / chapter / verse split of a canonical reference.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceParts {
    /// Everything before the last space ("1 Corinthians")
    pub book: String,
    /// Leading integer of the chapter part
    pub chapter: Option<u32>,
    /// Text after the colon, if any
    pub verse: Option<String>,
}

/// Splits a canonical reference at its last space and first colon.
///
/// "Psalm 23" has no verse; "Romans 8:28–30" keeps the range as the verse.
pub fn split_reference(reference: &str) -> ReferenceParts {
    let reference = reference.trim();
    let (book, chapter_verse) = match reference.rfind(' ') {
        Some(idx) => (&reference[..idx], &reference[idx + 1..]),
        None => ("", reference),
    };

    let (chapter_part, verse) = match chapter_verse.split_once(':') {
        Some((c, v)) => (c, Some(v.to_string())),
        None => (chapter_verse, None),
    };

    let digits: String = chapter_part.chars().take_while(|c| c.is_ascii_digit()).collect();

    ReferenceParts {
        book: book.to_string(),
        chapter: digits.parse().ok(),
        verse,
    }
}
