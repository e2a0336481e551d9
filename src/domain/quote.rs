//! Quoted spans extracted from a draft.

use serde::{Deserialize, Serialize};

/// Quotation mark family that enclosed a span
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Delimiter {
    /// `"..."` or `“...”`
    Double,
    /// `'...'` or `‘...’`
    Single,
}

/// A quoted span found in a draft
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedQuote {
    /// Enclosed text exactly as it appeared between the delimiters
    pub text: String,

    /// 0-based index in emission order
    pub ordinal_position: usize,

    /// UTF-8 byte offset range [start, end] of the enclosed text in the draft
    pub utf8_byte_offset: [usize; 2],

    /// Delimiter family that produced the span
    pub delimiter: Delimiter,
}

impl ExtractedQuote {
    /// Enclosed text without surrounding whitespace
    pub fn trimmed(&self) -> &str {
        self.text.trim()
    }
}
