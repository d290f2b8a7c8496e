//! Prompt templates and request options for each completion feature.

use verselight_core::types::{ChatMessage, ChatOptions, CrossRefKind, Testament};

/// A ready-to-send completion request.
#[derive(Clone, Debug)]
pub struct Prompt {
    /// System then user message
    pub messages: Vec<ChatMessage>,
    /// Sampling options
    pub options: ChatOptions,
}

const JSON_HISTORIAN: &str = "You are a Biblical historian expert. \
Always return valid JSON exactly matching the requested structure.";

/// Five-bullet explanation.
pub fn explain(reference: &str, verse_text: &str) -> Prompt {
    let user = format!(
        "You are a biblical scholar. Explain {reference} in exactly 5 concise bullet points. \
Keep each bullet to 1-2 sentences maximum. Focus on practical application and theological significance.

Verse: \"{verse_text}\"

Respond with ONLY 5 bullet points, each starting with a dash (-). \
No introduction, no conclusion, just the 5 points."
    );

    Prompt {
        messages: vec![
            ChatMessage::system("You are a biblical scholar who answers in short bullet points."),
            ChatMessage::user(user),
        ],
        options: ChatOptions::new(0.7, 500),
    }
}

/// Seven-section historical context.
pub fn context(reference: &str, verse_text: &str) -> Prompt {
    let user = format!(
        r#"You are a biblical historian and scholar. Provide detailed historical and literary context for {reference} in this exact JSON format:

{{
  "author": "Author name and brief background (2-3 sentences)",
  "audience": "Who they're writing to and why (2-3 sentences)",
  "dateWritten": "Approximate date and historical period (1-2 sentences)",
  "geographicalContext": "Relevant geographical details and significance (2-3 sentences)",
  "politicalContext": "Political situation and relevance (2-3 sentences)",
  "culturalContext": "Cultural practices, customs, or societal norms relevant to understanding this verse (2-3 sentences)",
  "literaryContext": "Where this fits in the book's structure and argument (2-3 sentences)"
}}

Verse: "{verse_text}"

Be specific and scholarly but accessible. Include dates, names, and concrete details. Return ONLY valid JSON with no additional commentary."#
    );

    Prompt {
        messages: vec![ChatMessage::system(JSON_HISTORIAN), ChatMessage::user(user)],
        options: ChatOptions::new(0.6, 1000),
    }
}

/// Up to five cross-references with a primary theme.
pub fn crossref(reference: &str, verse_text: &str) -> Prompt {
    let kinds = CrossRefKind::ALL
        .iter()
        .map(|kind| kind.label())
        .collect::<Vec<_>>()
        .join(" | ");

    let user = format!(
        r#"You are a biblical historian and scholar. Provide the strongest Scripture cross-references for {reference} in this exact JSON format:

{{
  "primaryTheme": "The central theological or literary theme of the verse/passage (1 sentence)",
  "crossReferences": [
    {{
      "reference": "Book Chapter:Verse(s)",
      "type": "{kinds}",
      "explanation": "Why this passage is strongly connected (1-2 sentences)"
    }}
  ]
}}

Rules:
- List the top 5 strongest cross-references only.
- If fewer than 5 genuinely strong cross-references exist, include fewer.
- Prioritize clear textual echoes, shared imagery, or repeated covenant language.
- Avoid weak or generic thematic connections.
- Scripture must interpret Scripture (no speculative allegory).
- Explanations should be scholarly but concise.

Verse: "{verse_text}"

Return ONLY valid JSON with no additional commentary."#
    );

    Prompt {
        messages: vec![ChatMessage::system(JSON_HISTORIAN), ChatMessage::user(user)],
        options: ChatOptions::new(0.6, 800),
    }
}

/// Word-by-word original-language breakdown.
pub fn translate(reference: &str, verse_text: &str, testament: Testament) -> Prompt {
    let language = testament.language();
    let edition = testament.text_edition();
    let example = testament.strongs_example();
    let prefix = testament.strongs_prefix();

    let system = format!(
        "You are a Biblical {language} expert. You MUST return valid JSON exactly matching the \
requested structure. Do not include markdown code blocks or any text outside the JSON object."
    );

    let user = format!(
        r#"You are an expert in Biblical {language} with access to {edition}. Provide a word-by-word breakdown for {reference} in this EXACT JSON format:

{{
  "originalText": "Full verse in {language} characters",
  "words": [
    {{
      "original": "{language} word in original script",
      "transliteration": "Romanized transliteration",
      "strongs": "Strong's number (e.g., {example})",
      "meaning": "Primary English meaning (1-3 words)",
      "grammar": "Grammatical form (e.g., 'conjunction' or 'verb, aorist, active, indicative, 3rd person singular')"
    }}
  ]
}}

CRITICAL REQUIREMENTS:
1. Include EVERY word in the original {language} text, in order
2. Strong's numbers MUST follow this format: {prefix}#### ({language})
3. Use standard transliteration conventions
4. "meaning" should be concise (1-3 words maximum)
5. "grammar" should be detailed for verbs (tense/mood/voice/person/number) and basic for other parts of speech
6. Return ONLY valid JSON with no markdown formatting, no code blocks, no additional text

Verse for reference: "{verse_text}"

Return ONLY the JSON object, nothing else."#
    );

    Prompt {
        messages: vec![ChatMessage::system(system), ChatMessage::user(user)],
        options: ChatOptions::new(0.3, 2500),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use verselight_core::types::Role;

    #[test]
    fn test_feature_options() {
        let cases = [
            (explain("John 3:16", "v").options, 0.7, 500),
            (context("John 3:16", "v").options, 0.6, 1000),
            (crossref("John 3:16", "v").options, 0.6, 800),
            (translate("John 3:16", "v", Testament::New).options, 0.3, 2500),
        ];
        for (options, temperature, max_tokens) in cases {
            assert!(options.model.is_none());
            assert!((options.temperature - temperature).abs() < f32::EPSILON);
            assert_eq!(options.max_tokens, max_tokens);
        }
    }

    #[test]
    fn test_messages_are_system_then_user() {
        let prompt = context("Romans 8:28", "And we know...");
        assert_eq!(prompt.messages.len(), 2);
        assert_eq!(prompt.messages[0].role, Role::System);
        assert_eq!(prompt.messages[1].role, Role::User);
        assert!(prompt.messages[1].content.contains("Romans 8:28"));
        assert!(prompt.messages[1].content.contains("\"And we know...\""));
        assert!(prompt.messages[1].content.contains("\"literaryContext\""));
    }

    #[test]
    fn test_crossref_lists_every_kind() {
        let prompt = crossref("Genesis 1:1", "In the beginning");
        for kind in CrossRefKind::ALL {
            assert!(prompt.messages[1].content.contains(kind.label()));
        }
    }

    #[test]
    fn test_translate_follows_testament() {
        let ot = translate("Genesis 1:1", "In the beginning", Testament::Old);
        assert!(ot.messages[0].content.contains("Hebrew"));
        assert!(ot.messages[1].content.contains("Biblia Hebraica Stuttgartensia"));
        assert!(ot.messages[1].content.contains("H430"));

        let nt = translate("John 3:16", "For God so loved", Testament::New);
        assert!(nt.messages[1].content.contains("NA28"));
        assert!(nt.messages[1].content.contains("G####"));
    }
}
