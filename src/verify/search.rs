//! Substring search over normalized text.
//!
//! Boyer-Moore-Horspool over raw bytes. Matching a whole valid UTF-8 needle
//! can only start on a char boundary, so byte offsets returned here are safe
//! to slice the haystack with.

/// Find the first occurrence of `needle` in `haystack`, as a byte offset
pub fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() {
        return Some(0);
    }
    if needle.len() > haystack.len() {
        return None;
    }

    let last = needle.len() - 1;

    // Bad-character shift table
    let mut shift = [needle.len(); 256];
    for (i, &b) in needle[..last].iter().enumerate() {
        shift[b as usize] = last - i;
    }

    let mut pos = 0;
    while pos + needle.len() <= haystack.len() {
        let window = &haystack[pos..pos + needle.len()];
        if window[last] == needle[last] && window == needle {
            return Some(pos);
        }
        pos += shift[haystack[pos + last] as usize];
    }

    None
}

/// Find the first occurrence of `needle` in `haystack` (byte offset)
pub fn find_str(haystack: &str, needle: &str) -> Option<usize> {
    find(haystack.as_bytes(), needle.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_single() {
        assert_eq!(find(b"Hello world, this is a test.", b"this is"), Some(13));
    }

    #[test]
    fn test_find_returns_first_of_many() {
        assert_eq!(find(b"foo bar foo baz foo", b"foo"), Some(0));
        assert_eq!(find(b"xfoo bar foo", b"foo"), Some(1));
    }

    #[test]
    fn test_find_none() {
        assert_eq!(find(b"Hello world", b"xyz"), None);
        assert_eq!(find(b"ab", b"abc"), None);
    }

    #[test]
    fn test_find_at_end_and_repeated_prefix() {
        assert_eq!(find(b"aaaaab", b"aab"), Some(3));
        assert_eq!(find(b"abcabcabd", b"abcabd"), Some(3));
        assert_eq!(find(b"needle", b"needle"), Some(0));
    }

    #[test]
    fn test_find_empty_needle() {
        assert_eq!(find(b"abc", b""), Some(0));
        assert_eq!(find(b"", b""), Some(0));
    }

    #[test]
    fn test_find_str_multibyte() {
        let haystack = "señor olé señor";
        let at = find_str(haystack, "olé").unwrap();
        assert!(haystack.is_char_boundary(at));
        assert_eq!(&haystack[at..at + "olé".len()], "olé");
    }

    #[test]
    fn test_agrees_with_std_find() {
        let haystack = "the quick brown fox jumps over the lazy dog then the fox sleeps";
        for needle in ["the", "fox", "the fox", "dog then", "sleeps", "cat", "o", "lazy dog"] {
            assert_eq!(find_str(haystack, needle), haystack.find(needle), "needle {:?}", needle);
        }
    }
}
