//! quotecheck - Quote verification for interview-based drafts
//!
//! Checks every quotation in a draft against the interview transcript and
//! supporting sources, tolerating the re-punctuation, re-casing and
//! re-wrapping that happens when a quote is lifted into prose.
//!
//! # Architecture
//!
//! The engine is a pure, synchronous pipeline:
//! - Quotes are extracted from the draft by a single-pass scanner
//! - Quotes and sources are compared in a shared normalized form
//! - Each quote is attributed to the first source that contains it
//! - Context is recovered from the original source text
//!
//! # Modules
//!
//! - `verify`: The verification engine (extract, normalize, align, verify)
//! - `domain`: Data structures (CandidateSource, VerificationResult, Project)
//! - `core`: Project store, audit log, input limits
//! - `report`: Export payloads
//! - `cli`: Command-line interface
//!
//! # Usage
//!
//! ```bash
//! # Check a draft against a transcript and two sources
//! quotecheck check --draft draft.md --transcript interview.txt -s report.txt -s blog.txt
//!
//! # Work with a stored project
//! quotecheck project new --title "Launch story" --transcript interview.txt
//! quotecheck project check <project-id>
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod report;
pub mod verify;

// Re-export main types at crate root for convenience
pub use core::{ProjectError, ProjectStore};
pub use domain::{CandidateSource, ContextPrecision, ExtractedQuote, Project, SourceKind, VerificationResult};
pub use verify::{verify, Verifier, VerifierSettings};
