//! Verification records produced for each extracted quote.

use serde::{Deserialize, Serialize};

use super::quote::ExtractedQuote;
use super::source::CandidateSource;

/// How the context excerpt of a verified quote was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContextPrecision {
    /// Whole source words around an exact word-level alignment
    WordAligned,
    /// Best-effort character window; the match is real, the framing is approximate
    CharacterWindow,
}

impl ContextPrecision {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContextPrecision::WordAligned => "word_aligned",
            ContextPrecision::CharacterWindow => "character_window",
        }
    }
}

/// Outcome of checking one quote against the candidate list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationResult {
    /// Trimmed quote text
    pub quote_text: String,

    /// Ordinal of the quote in the draft
    pub ordinal_position: usize,

    /// Whether any candidate contained the quote
    pub matched: bool,

    /// Id of the first matching candidate, empty when unmatched
    pub source_id: String,

    /// Display name of the first matching candidate, empty when unmatched
    pub source_name: String,

    /// Original source text around the match, empty when unmatched
    pub context_excerpt: String,

    /// How the excerpt was produced (absent when unmatched)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_precision: Option<ContextPrecision>,
}

impl VerificationResult {
    /// Create a result for a quote found in `source`
    pub fn matched(
        quote: &ExtractedQuote,
        source: &CandidateSource,
        context_excerpt: String,
        precision: ContextPrecision,
    ) -> Self {
        Self {
            quote_text: quote.trimmed().to_string(),
            ordinal_position: quote.ordinal_position,
            matched: true,
            source_id: source.id.clone(),
            source_name: source.display_name.clone(),
            context_excerpt,
            context_precision: Some(precision),
        }
    }

    /// Create a result for a quote no candidate contained
    pub fn unmatched(quote: &ExtractedQuote) -> Self {
        Self {
            quote_text: quote.trimmed().to_string(),
            ordinal_position: quote.ordinal_position,
            matched: false,
            source_id: String::new(),
            source_name: String::new(),
            context_excerpt: String::new(),
            context_precision: None,
        }
    }

    /// Whether the excerpt is only an approximate character window
    pub fn is_approximate(&self) -> bool {
        self.context_precision == Some(ContextPrecision::CharacterWindow)
    }
}
