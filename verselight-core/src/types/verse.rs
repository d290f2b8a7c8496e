//! Verse and testament types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::VerseError;

/// Books of the New Testament, in canonical order.
const NEW_TESTAMENT_BOOKS: [&str; 27] = [
    "Matthew",
    "Mark",
    "Luke",
    "John",
    "Acts",
    "Romans",
    "1 Corinthians",
    "2 Corinthians",
    "Galatians",
    "Ephesians",
    "Philippians",
    "Colossians",
    "1 Thessalonians",
    "2 Thessalonians",
    "1 Timothy",
    "2 Timothy",
    "Titus",
    "Philemon",
    "Hebrews",
    "James",
    "1 Peter",
    "2 Peter",
    "1 John",
    "2 John",
    "3 John",
    "Jude",
    "Revelation",
];

/// Coarse Old/New classification of a reference.
///
/// Decides the source language assumed for word-level translation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Testament {
    /// Hebrew scriptures
    #[serde(rename = "OT")]
    Old,
    /// Greek scriptures
    #[serde(rename = "NT")]
    New,
}

impl Testament {
    /// Classifies a canonical book name. Anything not in the NT list is OT.
    pub fn for_book(book: &str) -> Self {
        if NEW_TESTAMENT_BOOKS.contains(&book) {
            Testament::New
        } else {
            Testament::Old
        }
    }

    /// Short code used on the wire ("OT" / "NT").
    pub fn code(self) -> &'static str {
        match self {
            Testament::Old => "OT",
            Testament::New => "NT",
        }
    }

    /// Original language of the testament.
    pub fn language(self) -> &'static str {
        match self {
            Testament::Old => "Hebrew",
            Testament::New => "Greek",
        }
    }

    /// Critical text edition the translation prompt refers to.
    pub fn text_edition(self) -> &'static str {
        match self {
            Testament::Old => "Biblia Hebraica Stuttgartensia",
            Testament::New => "NA28",
        }
    }

    /// Leading letter of Strong's numbers for this testament.
    pub fn strongs_prefix(self) -> char {
        match self {
            Testament::Old => 'H',
            Testament::New => 'G',
        }
    }

    /// Example Strong's number shown in prompts.
    pub fn strongs_example(self) -> &'static str {
        match self {
            Testament::Old => "H430",
            Testament::New => "G3754",
        }
    }
}

impl fmt::Display for Testament {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Testament {
    type Err = VerseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "OT" => Ok(Testament::Old),
            "NT" => Ok(Testament::New),
            other => Err(VerseError::InvalidInput(format!(
                "Invalid testament '{}': expected OT or NT",
                other
            ))),
        }
    }
}

/// A passage as returned by the scripture-text service.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScripturePassage {
    /// Canonical reference chosen by the service (e.g. "John 3:16")
    pub canonical: String,
    /// Plain passage text
    pub text: String,
    /// Attribution line required by the text's license
    pub copyright: String,
}

/// A verse reference that has been resolved and checked.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidatedVerse {
    /// Always true; failures are reported through the error body
    pub valid: bool,
    /// Canonical reference
    pub reference: String,
    /// Passage text
    pub verse_text: String,
    /// Book name ("1 Corinthians")
    pub book: String,
    /// Chapter number, if the reference names one
    pub chapter: Option<u32>,
    /// Verse or verse range after the colon ("16", "28-30")
    pub verse: Option<String>,
    /// Old or New Testament
    pub testament: Testament,
    /// Attribution line
    pub copyright: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("John", Testament::New)]
    #[test_case("1 Corinthians", Testament::New)]
    #[test_case("Revelation", Testament::New)]
    #[test_case("Genesis", Testament::Old)]
    #[test_case("Psalm", Testament::Old)]
    #[test_case("john", Testament::Old ; "lookup is case sensitive")]
    fn test_testament_for_book(book: &str, expected: Testament) {
        assert_eq!(Testament::for_book(book), expected);
    }

    #[test]
    fn test_testament_serde_codes() {
        assert_eq!(serde_json::to_string(&Testament::New).unwrap(), "\"NT\"");
        let t: Testament = serde_json::from_str("\"OT\"").unwrap();
        assert_eq!(t, Testament::Old);
    }

    #[test]
    fn test_testament_from_str() {
        assert_eq!("nt".parse::<Testament>().unwrap(), Testament::New);
        assert_eq!(" OT ".parse::<Testament>().unwrap(), Testament::Old);
        assert!("Greek".parse::<Testament>().is_err());
    }

    #[test]
    fn test_testament_language_and_prefix() {
        assert_eq!(Testament::New.language(), "Greek");
        assert_eq!(Testament::Old.language(), "Hebrew");
        assert_eq!(Testament::New.strongs_prefix(), 'G');
        assert_eq!(Testament::Old.strongs_prefix(), 'H');
    }

    #[test]
    fn test_validated_verse_wire_names() {
        let verse = ValidatedVerse {
            valid: true,
            reference: "John 3:16".into(),
            verse_text: "For God so loved the world".into(),
            book: "John".into(),
            chapter: Some(3),
            verse: Some("16".into()),
            testament: Testament::New,
            copyright: "c".into(),
        };
        let json = serde_json::to_value(&verse).unwrap();
        assert_eq!(json["verseText"], "For God so loved the world");
        assert_eq!(json["testament"], "NT");
        assert_eq!(json["chapter"], 3);
    }
}
