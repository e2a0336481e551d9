//! Verification Engine Integration Tests
//!
//! End-to-end checks of quote extraction, candidate ordering and context
//! recovery through the public `verify` entry point.

use quotecheck::verify::{align, extract_quotes, normalize, verify};
use quotecheck::{CandidateSource, ContextPrecision, SourceKind};

const TRANSCRIPT: &str = "Interviewer: How did testing go?\n\
    Researcher: The results were remarkable - we achieved 85% satisfaction rates in our \
    initial testing phase. That strong user response gave us the confidence to roll it out.\n\
    Interviewer: Any surprises?\n\
    Researcher: We knew we were tackling something ambitious.";

fn source(id: &str, name: &str, content: &str) -> CandidateSource {
    CandidateSource::new(id, name, content, SourceKind::Text)
}

#[test]
fn test_satisfaction_quote_is_attributed_to_transcript() {
    let draft = "Before the rollout, testing revealed promising results. \
        \"We achieved 85% satisfaction rates in our initial testing phase,\" noted the research team.";

    let results = verify(draft, TRANSCRIPT, &[]);

    assert_eq!(results.len(), 1);
    let result = &results[0];
    assert!(result.matched);
    assert_eq!(result.source_id, "transcript");
    assert_eq!(result.source_name, "Interview Transcript");
    assert!(result.context_excerpt.contains("remarkable"));
    assert!(result.context_excerpt.contains("That strong user response"));
}

#[test]
fn test_unrelated_quote_is_unmatched() {
    let draft = "\"This is definitely not in any source at all here\" said nobody.";
    let sources = [source("s1", "Press kit", "Completely different words about a product launch.")];

    let results = verify(draft, TRANSCRIPT, &sources);

    assert_eq!(results.len(), 1);
    assert!(!results[0].matched);
    assert_eq!(results[0].source_id, "");
    assert_eq!(results[0].source_name, "");
    assert_eq!(results[0].context_excerpt, "");
    assert!(results[0].context_precision.is_none());
}

#[test]
fn test_first_match_wins_transcript_before_sources() {
    let quote = "positions the company as a leader in personalized technology";
    let draft = format!("The CEO said this \"{}\" and moved on.", quote);
    let transcript = format!("CEO: Honestly, this {}.", quote);
    let sources = [
        source("s1", "Press release", &format!("Today, the product {} worldwide.", quote)),
        source("s2", "Blog", &format!("It {}", quote)),
    ];

    let results = verify(&draft, &transcript, &sources);

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].source_id, "transcript");
}

#[test]
fn test_first_match_wins_in_caller_source_order() {
    let quote = "processing millions of user interactions in real time";
    let draft = format!("They talked about \"{}\" at length.", quote);
    let sources = [
        source("s1", "Unrelated", "Nothing to see here."),
        source("s2", "Engineering blog", &format!("We are {}.", quote)),
        source("s3", "Whitepaper", &format!("Systems {}!", quote)),
    ];

    let results = verify(&draft, "", &sources);

    assert!(results[0].matched);
    assert_eq!(results[0].source_id, "s2");
    assert_eq!(results[0].source_name, "Engineering blog");
}

#[test]
fn test_results_preserve_extraction_order() {
    let draft = "First: \"we knew we were tackling something ambitious\". \
        Second: \"this quote will not be found anywhere\". \
        Third: 'the results were remarkable' as well.";

    let quotes = extract_quotes(draft);
    let results = verify(draft, TRANSCRIPT, &[]);

    assert_eq!(quotes.len(), 3);
    assert_eq!(results.len(), quotes.len());
    for (quote, result) in quotes.iter().zip(&results) {
        assert_eq!(result.quote_text, quote.trimmed());
        assert_eq!(result.ordinal_position, quote.ordinal_position);
    }
    assert!(results[0].matched);
    assert!(!results[1].matched);
    assert!(results[2].matched);
}

#[test]
fn test_exact_copy_always_aligns() {
    let sentences = [
        "We knew we were tackling something ambitious.",
        "Researcher: The results were remarkable",
        "85% satisfaction rates in our",
    ];
    for sentence in sentences {
        assert!(align(sentence, TRANSCRIPT).found, "{:?}", sentence);
    }
}

#[test]
fn test_recased_and_repunctuated_quote_matches() {
    let draft = "\u{201C}We Knew, we were tackling SOMETHING ambitious!\u{201D} she recalled.";

    let results = verify(draft, TRANSCRIPT, &[]);

    assert!(results[0].matched);
    assert_eq!(results[0].context_precision, Some(ContextPrecision::WordAligned));
}

#[test]
fn test_word_wrapped_quote_matches() {
    let draft = "\"we achieved 85%\nsatisfaction rates in\nour initial testing phase\"";
    let results = verify(draft, TRANSCRIPT, &[]);
    assert!(results[0].matched);
}

#[test]
fn test_empty_draft_yields_no_results() {
    assert!(verify("", TRANSCRIPT, &[]).is_empty());
    assert!(verify("   \n\n  ", TRANSCRIPT, &[]).is_empty());
}

#[test]
fn test_no_candidates_yields_all_unmatched() {
    let draft = "\"one quote that is long enough\" and \"another one that is long enough\"";
    let results = verify(draft, "", &[]);

    assert_eq!(results.len(), 2);
    assert!(results.iter().all(|r| !r.matched));
}

#[test]
fn test_empty_source_falls_through_to_next() {
    let draft = "\"the numbers spoke for themselves\"";
    let sources = [
        source("empty", "Empty upload", ""),
        source("full", "Notes", "In the end the numbers spoke for themselves."),
    ];

    let results = verify(draft, "", &sources);

    assert!(results[0].matched);
    assert_eq!(results[0].source_id, "full");
}

#[test]
fn test_unterminated_quote_is_ignored() {
    let draft = "He started \"we knew we were tackling something ambitious and never stopped";
    assert!(verify(draft, TRANSCRIPT, &[]).is_empty());
}

#[test]
fn test_matched_results_satisfy_invariants() {
    let draft = "\"we knew we were tackling something ambitious\" and \"never said this at all, really\"";
    for result in verify(draft, TRANSCRIPT, &[]) {
        if result.matched {
            assert!(!result.source_id.is_empty());
            assert!(!result.source_name.is_empty());
            assert!(!result.context_excerpt.is_empty());
            assert!(result.context_precision.is_some());
        } else {
            assert!(result.source_id.is_empty());
            assert!(result.source_name.is_empty());
            assert!(result.context_excerpt.is_empty());
        }
    }
}

#[test]
fn test_partial_word_quote_uses_character_window() {
    let transcript = "The rollout was company-wide within a quarter.";
    let draft = "\"rollout was company\"";

    let results = verify(draft, transcript, &[]);

    assert!(results[0].matched);
    assert_eq!(results[0].context_precision, Some(ContextPrecision::CharacterWindow));
    assert!(results[0].is_approximate());
    assert!(results[0].context_excerpt.contains("rollout was company-wide"));
}

#[test]
fn test_normalize_is_idempotent_on_samples() {
    for text in [TRANSCRIPT, "“Curly” ‘quotes’", "  spaced   out  ", "", "?!.,;:"] {
        let once = normalize(text);
        assert_eq!(normalize(&once), once);
    }
}
