//! Verification orchestrator.
//!
//! Builds the candidate list (transcript first, then caller sources in
//! order), extracts quotes from the draft and attributes each quote to the
//! first candidate that contains it.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::domain::{CandidateSource, ExtractedQuote, VerificationResult};

use super::align::{align_with, AlignOptions, CONTEXT_CHARS, CONTEXT_WORDS};
use super::extract::{extract_quotes_with, MIN_QUOTE_CHARS};

/// Tunables for a verification run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifierSettings {
    /// Minimum trimmed length of a quoted span (default: 10)
    #[serde(default = "default_min_quote_chars")]
    pub min_quote_chars: usize,

    /// Words of context around a word-aligned match (default: 30)
    #[serde(default = "default_context_words")]
    pub context_words: usize,

    /// Characters of context around a fallback match (default: 30)
    #[serde(default = "default_context_chars")]
    pub context_chars: usize,
}

fn default_min_quote_chars() -> usize {
    MIN_QUOTE_CHARS
}
fn default_context_words() -> usize {
    CONTEXT_WORDS
}
fn default_context_chars() -> usize {
    CONTEXT_CHARS
}

impl Default for VerifierSettings {
    fn default() -> Self {
        Self {
            min_quote_chars: default_min_quote_chars(),
            context_words: default_context_words(),
            context_chars: default_context_chars(),
        }
    }
}

impl VerifierSettings {
    fn align_options(&self) -> AlignOptions {
        AlignOptions {
            context_words: self.context_words,
            context_chars: self.context_chars,
        }
    }
}

/// Quote verification engine
#[derive(Debug, Clone, Default)]
pub struct Verifier {
    settings: VerifierSettings,
}

impl Verifier {
    /// Create a verifier with the given settings
    pub fn new(settings: VerifierSettings) -> Self {
        Self { settings }
    }

    /// Verify every quote in `draft` against the transcript and `sources`.
    ///
    /// Returns exactly one result per extracted quote, in draft order.
    #[instrument(skip_all, fields(sources = sources.len()))]
    pub fn verify(
        &self,
        draft: &str,
        transcript: &str,
        sources: &[CandidateSource],
    ) -> Vec<VerificationResult> {
        let transcript = CandidateSource::transcript(transcript);
        let mut candidates = vec![&transcript];

        for source in sources {
            if source.is_transcript() {
                warn!(name = %source.display_name, "Ignoring source that reuses the reserved transcript id");
                continue;
            }
            if source.id.trim().is_empty() || source.display_name.trim().is_empty() {
                warn!(id = %source.id, name = %source.display_name, "Ignoring source without an id or display name");
                continue;
            }
            candidates.push(source);
        }

        let quotes = extract_quotes_with(draft, self.settings.min_quote_chars);
        let results: Vec<VerificationResult> = quotes
            .iter()
            .map(|quote| self.verify_quote(quote, &candidates))
            .collect();

        let matched = results.iter().filter(|r| r.matched).count();
        let approximate = results.iter().filter(|r| r.is_approximate()).count();
        info!(
            quotes = results.len(),
            matched,
            unmatched = results.len() - matched,
            approximate,
            "Quote verification finished"
        );

        results
    }

    /// Check one quote against the candidates in order, first match wins
    fn verify_quote(
        &self,
        quote: &ExtractedQuote,
        candidates: &[&CandidateSource],
    ) -> VerificationResult {
        let options = self.settings.align_options();

        for source in candidates {
            let alignment = align_with(&quote.text, &source.content, &options);
            if let (true, Some(precision)) = (alignment.found, alignment.precision) {
                debug!(
                    ordinal = quote.ordinal_position,
                    source = %source.id,
                    precision = precision.as_str(),
                    "Quote verified"
                );
                return VerificationResult::matched(quote, source, alignment.context, precision);
            }
        }

        debug!(ordinal = quote.ordinal_position, "Quote not found in any source");
        VerificationResult::unmatched(quote)
    }
}

/// Verify `draft` with default settings
pub fn verify(draft: &str, transcript: &str, sources: &[CandidateSource]) -> Vec<VerificationResult> {
    Verifier::default().verify(draft, transcript, sources)
}
