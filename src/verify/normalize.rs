//! Text normalization for quote comparison.
//!
//! Normalized text is lowercase, has quotation marks and sentence punctuation
//! removed, and has every whitespace run collapsed to a single ASCII space.
//! It is used only for comparison, never for display.
//!
//! Quotes, sources and individual source words all go through the same
//! routine. [`normalize_mapped`] additionally remembers where each output
//! character came from so a match can be located in the original text.

/// Characters removed during normalization
pub const STRIPPED_PUNCTUATION: [char; 12] = [
    '.', ',', ';', ':', '!', '?', '"', '\'', '\u{201C}', '\u{201D}', '\u{2018}', '\u{2019}',
];

fn is_stripped(ch: char) -> bool {
    STRIPPED_PUNCTUATION.contains(&ch)
}

/// Normalized text with a map back into the original
#[derive(Debug, Clone)]
pub struct NormalizedText {
    /// The normalized text
    pub text: String,
    /// (normalized byte offset, original byte offset) for every output char
    origins: Vec<(usize, usize)>,
}

impl NormalizedText {
    /// Map a byte range of the normalized text back to a byte range of the
    /// original text. Returns `None` for empty or out-of-range input.
    pub fn original_range(&self, original: &str, start: usize, end: usize) -> Option<(usize, usize)> {
        if start >= end {
            return None;
        }

        let first = self.origins.binary_search_by_key(&start, |&(n, _)| n).ok()?;
        let last = self.origins.partition_point(|&(n, _)| n < end).checked_sub(1)?;
        if last < first {
            return None;
        }

        let from = self.origins[first].1;
        let last_char_at = self.origins[last].1;
        let last_char_len = original[last_char_at..].chars().next()?.len_utf8();

        Some((from, last_char_at + last_char_len))
    }
}

/// Normalize text for comparison
pub fn normalize(text: &str) -> String {
    normalize_mapped(text).text
}

/// Normalize text, keeping the origin of every output character
pub fn normalize_mapped(text: &str) -> NormalizedText {
    let mut out = String::with_capacity(text.len());
    let mut origins = Vec::with_capacity(text.len());
    let mut pending_space: Option<usize> = None;

    for (offset, ch) in text.char_indices() {
        if ch.is_whitespace() {
            // Leading whitespace never produces a space
            if !out.is_empty() && pending_space.is_none() {
                pending_space = Some(offset);
            }
            continue;
        }

        if is_stripped(ch) {
            continue;
        }

        if let Some(space_at) = pending_space.take() {
            origins.push((out.len(), space_at));
            out.push(' ');
        }

        for lower in ch.to_lowercase() {
            origins.push((out.len(), offset));
            out.push(lower);
        }
    }

    NormalizedText { text: out, origins }
}
