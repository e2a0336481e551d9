//! Quote verification engine.
//!
//! Given a draft containing quoted spans, decides for each span whether the
//! quoted text appears (ignoring case, punctuation and whitespace noise) in
//! the interview transcript or one of the supporting sources, and returns an
//! excerpt of the surrounding source text.
//!
//! # Pipeline
//!
//! ```text
//! draft ──extract──▶ quotes ──┐
//!                             ├─ per quote, per candidate in order ──align──▶ first hit wins
//! transcript + sources ───────┘
//! ```
//!
//! - `extract`: single-pass scanner for quoted spans
//! - `normalize`: comparison form shared by quotes, sources and words
//! - `search`: substring search over normalized text
//! - `align`: match decision and context excerpt for one source
//! - `engine`: candidate ordering and result assembly
//!
//! # Example
//!
//! ```
//! use quotecheck::verify::verify;
//!
//! let draft = r#"She told us "the launch exceeded every forecast we made" last week."#;
//! let transcript = "Honestly, the launch exceeded every forecast we made. Nobody expected it.";
//!
//! let results = verify(draft, transcript, &[]);
//! assert!(results[0].matched);
//! assert_eq!(results[0].source_id, "transcript");
//! ```

pub mod align;
pub mod engine;
pub mod extract;
pub mod normalize;
pub mod search;

pub use align::{align, align_with, AlignOptions, Alignment, CONTEXT_CHARS, CONTEXT_WORDS};
pub use engine::{verify, Verifier, VerifierSettings};
pub use extract::{extract_quotes, extract_quotes_with, MIN_QUOTE_CHARS};
pub use normalize::{normalize, normalize_mapped, NormalizedText};
