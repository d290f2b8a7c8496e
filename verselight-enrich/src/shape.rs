//! Shape validators for upstream responses.
//!
//! Every completion reply goes through exactly one of these before it is
//! trusted. A reply that is not JSON fails with [`VerseError::InvalidFormat`];
//! JSON that lacks a required field fails with [`VerseError::MissingFields`].
//! Nothing is patched up, except that markdown code fences around the JSON
//! are removed first.

use serde_json::{Map, Value};

use verselight_core::constants::{MAX_BULLET_POINTS, MAX_CROSS_REFERENCES};
use verselight_core::error::{Result, VerseError};
use verselight_core::types::{
    CrossRefKind, CrossRefSet, CrossReference, HistoricalContext, Testament, Translation,
    WordAnnotation,
};

/// Removes markdown code fences (```` ```json ```` and ```` ``` ````).
pub fn strip_code_fences(text: &str) -> String {
    text.replace("```json", "").replace("```", "").trim().to_string()
}

/// Parses a completion reply as a JSON object.
pub fn parse_object(text: &str) -> Result<Map<String, Value>> {
    match serde_json::from_str(&strip_code_fences(text)) {
        Ok(Value::Object(obj)) => Ok(obj),
        Ok(_) => Err(VerseError::InvalidFormat("expected a JSON object".into())),
        Err(e) => Err(VerseError::InvalidFormat(format!("Invalid JSON format: {}", e))),
    }
}

/// Reads a required non-empty string field.
fn required_str(obj: &Map<String, Value>, field: &str, path: &str) -> Result<String> {
    match obj.get(field).and_then(Value::as_str).map(str::trim) {
        Some(s) if !s.is_empty() => Ok(s.to_string()),
        _ => Err(VerseError::MissingFields(format!("{}{}", path, field))),
    }
}

/// Reads a required array field.
fn required_array<'a>(obj: &'a Map<String, Value>, field: &str) -> Result<&'a Vec<Value>> {
    obj.get(field)
        .and_then(Value::as_array)
        .ok_or_else(|| VerseError::MissingFields(field.to_string()))
}

fn as_object<'a>(value: &'a Value, path: &str) -> Result<&'a Map<String, Value>> {
    value
        .as_object()
        .ok_or_else(|| VerseError::MissingFields(format!("{} is not an object", path)))
}

// ═══════════════════════════════════════════════════════════════════════════════
// EXPLAIN
// ═══════════════════════════════════════════════════════════════════════════════

/// Strips a leading `-` or `<digits>.` marker, or returns `None` if the line has neither.
fn strip_list_marker(line: &str) -> Option<&str> {
    if let Some(rest) = line.strip_prefix('-') {
        return Some(rest);
    }
    let digits = line.len() - line.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits == 0 {
        return None;
    }
    line[digits..].strip_prefix('.')
}

/// Extracts bullet statements from free-form text.
///
/// Keeps lines that start with a dash or a numbered marker, strips the marker,
/// drops empty results, and keeps at most five. Fewer lines in, fewer out.
pub fn extract_bullet_points(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter_map(strip_list_marker)
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .take(MAX_BULLET_POINTS)
        .map(String::from)
        .collect()
}

// ═══════════════════════════════════════════════════════════════════════════════
// CONTEXT
// ═══════════════════════════════════════════════════════════════════════════════

/// Validates the seven-section context object.
pub fn validate_context(text: &str) -> Result<HistoricalContext> {
    let obj = parse_object(text)?;

    let missing: Vec<&str> = HistoricalContext::FIELDS
        .into_iter()
        .filter(|field| required_str(&obj, field, "").is_err())
        .collect();
    if !missing.is_empty() {
        return Err(VerseError::MissingFields(missing.join(", ")));
    }

    Ok(HistoricalContext {
        author: required_str(&obj, "author", "")?,
        audience: required_str(&obj, "audience", "")?,
        date_written: required_str(&obj, "dateWritten", "")?,
        geographical_context: required_str(&obj, "geographicalContext", "")?,
        political_context: required_str(&obj, "politicalContext", "")?,
        cultural_context: required_str(&obj, "culturalContext", "")?,
        literary_context: required_str(&obj, "literaryContext", "")?,
    })
}

// ═══════════════════════════════════════════════════════════════════════════════
// CROSS-REFERENCES
// ═══════════════════════════════════════════════════════════════════════════════

/// Validates a theme plus cross-reference list, keeping the first five.
pub fn validate_crossref(text: &str) -> Result<CrossRefSet> {
    let obj = parse_object(text)?;
    let primary_theme = required_str(&obj, "primaryTheme", "")?;

    let cross_references = required_array(&obj, "crossReferences")?
        .iter()
        .take(MAX_CROSS_REFERENCES)
        .enumerate()
        .map(|(i, item)| -> Result<CrossReference> {
            let path = format!("crossReferences[{}].", i);
            let entry = as_object(item, &path)?;
            let label = required_str(entry, "type", &path)?;
            let kind = CrossRefKind::from_label(&label).ok_or_else(|| {
                VerseError::MissingFields(format!("{}type has unknown value '{}'", path, label))
            })?;
            Ok(CrossReference {
                reference: required_str(entry, "reference", &path)?,
                kind,
                explanation: required_str(entry, "explanation", &path)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(CrossRefSet {
        primary_theme,
        cross_references,
    })
}

// ═══════════════════════════════════════════════════════════════════════════════
// TRANSLATE
// ═══════════════════════════════════════════════════════════════════════════════

/// Checks `G####` / `H####` against the testament.
fn check_strongs(strongs: &str, testament: Testament, path: &str) -> Result<()> {
    let mut chars = strongs.chars();
    let prefix_ok = chars
        .next()
        .is_some_and(|c| c.to_ascii_uppercase() == testament.strongs_prefix());
    let digit_ok = chars.next().is_some_and(|c| c.is_ascii_digit());
    if prefix_ok && digit_ok {
        Ok(())
    } else {
        Err(VerseError::MissingFields(format!(
            "{}strongs '{}' is not a {} Strong's number",
            path,
            strongs,
            testament.language()
        )))
    }
}

/// Validates a word-by-word breakdown. One bad word fails the whole reply.
pub fn validate_translation(text: &str, testament: Testament) -> Result<Translation> {
    let obj = parse_object(text)?;
    let original_text = required_str(&obj, "originalText", "")?;

    let words = required_array(&obj, "words")?
        .iter()
        .enumerate()
        .map(|(i, item)| -> Result<WordAnnotation> {
            let path = format!("words[{}].", i);
            let word = as_object(item, &path)?;

            let missing: Vec<&str> = WordAnnotation::FIELDS
                .into_iter()
                .filter(|field| required_str(word, field, "").is_err())
                .collect();
            if !missing.is_empty() {
                return Err(VerseError::MissingFields(format!(
                    "word at index {} missing {}",
                    i,
                    missing.join(", ")
                )));
            }

            let strongs = required_str(word, "strongs", &path)?;
            check_strongs(&strongs, testament, &path)?;

            Ok(WordAnnotation {
                original: required_str(word, "original", &path)?,
                transliteration: required_str(word, "transliteration", &path)?,
                strongs,
                meaning: required_str(word, "meaning", &path)?,
                grammar: required_str(word, "grammar", &path)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Translation {
        original_text,
        words,
    })
}
