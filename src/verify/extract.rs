//! Quote extraction from drafts.
//!
//! A single left-to-right scanner pairs quotation delimiters. Rules:
//!
//! - Double quotes (`"`, `“ ”`) pair with the next double closer.
//! - Single quotes (`'`, `‘ ’`) only open when not preceded by a letter or
//!   digit, and only close when not followed by one, so apostrophes in
//!   `don't` or `team's` never delimit a span.
//! - A single-quoted run is abandoned when a double-quoted span opens inside
//!   it and closes before the single closer, which lets the double-quoted
//!   span win. Unpaired double marks (`6"`) are ordinary content.
//! - After a pair closes, scanning resumes after the closer, so spans never
//!   overlap.
//! - An opener with no closer produces nothing.
//! - Spans whose trimmed text is shorter than the minimum are dropped.

use tracing::debug;

use crate::domain::{Delimiter, ExtractedQuote};

/// Minimum trimmed length, in characters, of an extracted quote
pub const MIN_QUOTE_CHARS: usize = 10;

fn opens(ch: char) -> Option<Delimiter> {
    match ch {
        '"' | '\u{201C}' => Some(Delimiter::Double),
        '\'' | '\u{2018}' => Some(Delimiter::Single),
        _ => None,
    }
}

fn closes_double(ch: char) -> bool {
    matches!(ch, '"' | '\u{201D}')
}

fn closes_single(ch: char) -> bool {
    matches!(ch, '\'' | '\u{2019}')
}

fn opens_double(ch: char) -> bool {
    matches!(ch, '"' | '\u{201C}')
}

fn is_word_char(ch: Option<char>) -> bool {
    ch.map(char::is_alphanumeric).unwrap_or(false)
}

/// Index of the closer matching a double opener at `open`
fn find_double_close(chars: &[(usize, char)], open: usize) -> Option<usize> {
    chars[open + 1..]
        .iter()
        .position(|&(_, ch)| closes_double(ch))
        .map(|i| open + 1 + i)
}

/// Index of the closer matching a single opener at `open`
fn find_single_close(chars: &[(usize, char)], open: usize) -> Option<usize> {
    let close = (open + 1..chars.len()).find(|&j| {
        closes_single(chars[j].1) && !is_word_char(chars.get(j + 1).map(|&(_, c)| c))
    })?;

    // Only the first double opener can pair inside the run: if its closer
    // lies beyond `close`, no double mark exists between them.
    let overlapped = (open + 1..close)
        .find(|&j| opens_double(chars[j].1))
        .and_then(|j| find_double_close(chars, j))
        .is_some_and(|k| k < close);

    (!overlapped).then_some(close)
}

/// Extract quoted spans using the default minimum length
pub fn extract_quotes(document: &str) -> Vec<ExtractedQuote> {
    extract_quotes_with(document, MIN_QUOTE_CHARS)
}

/// Extract quoted spans of at least `min_chars` trimmed characters
pub fn extract_quotes_with(document: &str, min_chars: usize) -> Vec<ExtractedQuote> {
    let chars: Vec<(usize, char)> = document.char_indices().collect();
    let mut quotes = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let (open_at, ch) = chars[i];

        let close = match opens(ch) {
            Some(Delimiter::Double) => {
                find_double_close(&chars, i).map(|j| (j, Delimiter::Double))
            }
            Some(Delimiter::Single) if i == 0 || !is_word_char(Some(chars[i - 1].1)) => {
                find_single_close(&chars, i).map(|j| (j, Delimiter::Single))
            }
            _ => None,
        };

        let Some((j, delimiter)) = close else {
            i += 1;
            continue;
        };

        let start = open_at + ch.len_utf8();
        let end = chars[j].0;
        let text = &document[start..end];

        if text.trim().chars().count() >= min_chars {
            quotes.push(ExtractedQuote {
                text: text.to_string(),
                ordinal_position: quotes.len(),
                utf8_byte_offset: [start, end],
                delimiter,
            });
        } else {
            debug!(start, end, "Skipping short quoted span");
        }

        i = j + 1;
    }

    quotes
}
