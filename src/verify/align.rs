//! Aligning a quote against a single source.
//!
//! Existence is decided on normalized text. The context excerpt is then
//! recovered from the original text, primarily by aligning normalized words
//! (so the excerpt is made of whole, untouched source words). If the match
//! does not line up with word boundaries the excerpt falls back to a
//! character window around the matched region.

use serde::{Deserialize, Serialize};

use crate::domain::ContextPrecision;

use super::normalize::{normalize, normalize_mapped, NormalizedText};
use super::search;

/// Words of context on each side of a word-aligned match
pub const CONTEXT_WORDS: usize = 30;

/// Characters of context on each side of a character-window match
pub const CONTEXT_CHARS: usize = 30;

/// Context sizes used when building excerpts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlignOptions {
    #[serde(default = "default_context_words")]
    pub context_words: usize,

    #[serde(default = "default_context_chars")]
    pub context_chars: usize,
}

fn default_context_words() -> usize {
    CONTEXT_WORDS
}

fn default_context_chars() -> usize {
    CONTEXT_CHARS
}

impl Default for AlignOptions {
    fn default() -> Self {
        Self {
            context_words: CONTEXT_WORDS,
            context_chars: CONTEXT_CHARS,
        }
    }
}

/// Result of aligning one quote against one source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alignment {
    /// Whether the normalized quote occurs in the normalized source
    pub found: bool,
    /// Original source text around the match (empty when not found)
    pub context: String,
    /// How `context` was produced (absent when not found)
    pub precision: Option<ContextPrecision>,
}

impl Alignment {
    fn not_found() -> Self {
        Self {
            found: false,
            context: String::new(),
            precision: None,
        }
    }

    fn found(context: String, precision: ContextPrecision) -> Self {
        Self {
            found: true,
            context,
            precision: Some(precision),
        }
    }
}

/// Align `quote` against `source` with default context sizes
pub fn align(quote: &str, source: &str) -> Alignment {
    align_with(quote, source, &AlignOptions::default())
}

/// Align `quote` against `source`
pub fn align_with(quote: &str, source: &str, options: &AlignOptions) -> Alignment {
    let quote_norm = normalize(quote);
    if quote_norm.is_empty() {
        return Alignment::not_found();
    }

    let source_norm = normalize_mapped(source);
    let Some(match_start) = search::find_str(&source_norm.text, &quote_norm) else {
        return Alignment::not_found();
    };

    if let Some(context) = word_aligned_context(&quote_norm, source, options.context_words) {
        return Alignment::found(context, ContextPrecision::WordAligned);
    }

    let context = character_window(
        source,
        &source_norm,
        match_start,
        match_start + quote_norm.len(),
        options.context_chars,
    );
    Alignment::found(context, ContextPrecision::CharacterWindow)
}

/// Excerpt of whole source words around the first word-level match.
///
/// Source words that normalize to nothing (stray punctuation) are skipped
/// while matching but kept in the excerpt.
fn word_aligned_context(quote_norm: &str, source: &str, context_words: usize) -> Option<String> {
    let words: Vec<&str> = source.split_whitespace().collect();
    let tokens: Vec<(usize, String)> = words
        .iter()
        .enumerate()
        .filter_map(|(i, word)| {
            let token = normalize(word);
            (!token.is_empty()).then_some((i, token))
        })
        .collect();

    let quote_tokens: Vec<&str> = quote_norm.split(' ').collect();
    let k = quote_tokens.len();
    if k > tokens.len() {
        return None;
    }

    let start = tokens.windows(k).position(|window| {
        window
            .iter()
            .map(|(_, token)| token.as_str())
            .eq(quote_tokens.iter().copied())
    })?;

    let first_word = tokens[start].0;
    let last_word = tokens[start + k - 1].0;
    let from = first_word.saturating_sub(context_words);
    let to = (last_word + 1 + context_words).min(words.len());

    Some(words[from..to].join(" "))
}

/// Window of `context_chars` characters either side of the matched region,
/// clamped to the source
fn character_window(
    source: &str,
    source_norm: &NormalizedText,
    norm_start: usize,
    norm_end: usize,
    context_chars: usize,
) -> String {
    let (start, end) = source_norm
        .original_range(source, norm_start, norm_end)
        .unwrap_or((0, 0));

    let match_chars = source[start..end].chars().count();
    let from = source[..start].chars().count().saturating_sub(context_chars);
    let width = match_chars + 2 * context_chars;

    let window: String = source.chars().skip(from).take(width).collect();
    window.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_copy_is_found() {
        let source = "Before. We achieved 85% satisfaction rates in our initial testing phase. After.";
        let result = align("We achieved 85% satisfaction rates in our initial testing phase", source);
        assert!(result.found);
        assert_eq!(result.precision, Some(ContextPrecision::WordAligned));
        assert_eq!(result.context, source);
    }

    #[test]
    fn test_repunctuated_and_recased_quote_is_found() {
        let source = "So, honestly: we KNEW we were tackling something ambitious! Then we shipped.";
        let result = align("We knew we were tackling something ambitious.", source);
        assert!(result.found);
        assert!(result.context.contains("KNEW"));
    }

    #[test]
    fn test_word_wrapped_quote_is_found() {
        let source = "It positions the company\nas a leader in\npersonalized technology.";
        let result = align("positions the company as a leader in personalized technology", source);
        assert!(result.found);
        assert_eq!(result.precision, Some(ContextPrecision::WordAligned));
    }

    #[test]
    fn test_missing_quote_is_not_found() {
        let result = align("This is definitely not in any source at all", "Something else entirely.");
        assert_eq!(result, Alignment::not_found());
    }

    #[test]
    fn test_empty_inputs() {
        assert!(!align("", "anything").found);
        assert!(!align(" ?! ", "anything ?!").found);
        assert!(!align("a real quote here", "").found);
    }

    #[test]
    fn test_word_context_is_bounded() {
        let before: Vec<String> = (0..50).map(|i| format!("b{}", i)).collect();
        let after: Vec<String> = (0..50).map(|i| format!("a{}", i)).collect();
        let source = format!("{} the quoted words {}", before.join(" "), after.join(" "));

        let result = align("the quoted words", &source);
        let words: Vec<&str> = result.context.split(' ').collect();
        assert_eq!(words.len(), 30 + 3 + 30);
        assert_eq!(words[0], "b20");
        assert_eq!(words[words.len() - 1], "a29");
    }

    #[test]
    fn test_custom_context_words() {
        let source = "one two three four five six seven";
        let options = AlignOptions {
            context_words: 1,
            ..Default::default()
        };
        let result = align_with("four", source, &options);
        assert_eq!(result.context, "three four five");
    }

    #[test]
    fn test_stray_punctuation_words_are_skipped() {
        let source = "He paused . . . then said it was worth every minute of the wait.";
        let result = align("then said it was worth every minute", source);
        assert!(result.found);
        assert_eq!(result.precision, Some(ContextPrecision::WordAligned));

        let result = align("paused then said", source);
        assert!(result.found);
        assert_eq!(result.precision, Some(ContextPrecision::WordAligned));
        assert!(result.context.contains(". . ."));
    }

    #[test]
    fn test_partial_word_match_falls_back_to_character_window() {
        let source = "Our initial testing phase went well beyond expectations for everyone.";
        let result = align("ing phase went", source);
        assert!(result.found);
        assert_eq!(result.precision, Some(ContextPrecision::CharacterWindow));
        assert!(result.context.contains("testing phase went"));
    }

    #[test]
    fn test_character_window_is_clamped() {
        let source = "xtesting phase";
        let options = AlignOptions {
            context_words: 30,
            context_chars: 5,
        };
        let result = align_with("testing phase", source, &options);
        assert_eq!(result.precision, Some(ContextPrecision::CharacterWindow));
        assert_eq!(result.context, "xtesting phase");
    }

    #[test]
    fn test_character_window_width() {
        let source = format!("{}needle{}", "a".repeat(100), "b".repeat(100));
        let options = AlignOptions {
            context_words: 30,
            context_chars: 4,
        };
        let result = align_with("needle", &source, &options);
        assert_eq!(result.context, "aaaaneedlebbbb");
    }
}
