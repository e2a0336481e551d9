//! Domain types for quotecheck.
//!
//! This module contains the core data structures:
//! - Source: Candidate texts quotes are checked against
//! - Quote: Quoted spans extracted from a draft
//! - Verification: Per-quote verification records
//! - Project: Editorial projects persisted by the project store

pub mod project;
pub mod quote;
pub mod source;
pub mod verification;

// Re-export commonly used types
pub use project::{
    DirectionPreset, DraftVersion, KeyPoint, KeyPointMove, Project, StoryDirection, StoryLength,
    Tone,
};
pub use quote::{Delimiter, ExtractedQuote};
pub use source::{CandidateSource, SourceKind, TRANSCRIPT_SOURCE_ID, TRANSCRIPT_SOURCE_NAME};
pub use verification::{ContextPrecision, VerificationResult};
