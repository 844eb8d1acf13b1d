//! Fixed-capacity text helpers.
//!
//! Labels, shutter names and URLs are `heapless::String`s. Text that does
//! not fit is cut at the last whole character that does; it never spills.

use heapless::String;

/// Copy `text` into a `String<N>`, truncating to the capacity.
pub fn truncated<const N: usize>(text: &str) -> String<N> {
    let mut out = String::new();
    push_truncated(&mut out, text, N);
    out
}

/// Append at most `limit` bytes of `text` to `out`.
///
/// Stops at the first character that would cross `limit` or the remaining
/// capacity of `out`. Returns the number of bytes appended.
pub fn push_truncated<const N: usize>(out: &mut String<N>, text: &str, limit: usize) -> usize {
    let mut written = 0;
    for c in text.chars() {
        let len = c.len_utf8();
        if written + len > limit || out.push(c).is_err() {
            break;
        }
        written += len;
    }
    written
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_copied_verbatim() {
        let s: String<8> = truncated("up");
        assert_eq!(s.as_str(), "up");
    }

    #[test]
    fn long_text_is_cut_at_capacity() {
        let s: String<5> = truncated("living-room");
        assert_eq!(s.as_str(), "livin");
    }

    #[test]
    fn multibyte_char_is_never_split() {
        // 'é' is two bytes; only one byte of room is left after "abcd".
        let s: String<5> = truncated("abcdé");
        assert_eq!(s.as_str(), "abcd");
    }

    #[test]
    fn push_respects_explicit_limit() {
        let mut s: String<32> = String::new();
        let _ = s.push_str("x=");
        let n = push_truncated(&mut s, "bedroom-guest-suite", 7);
        assert_eq!(n, 7);
        assert_eq!(s.as_str(), "x=bedroom");
    }

    #[test]
    fn push_respects_remaining_capacity() {
        let mut s: String<4> = String::new();
        let _ = s.push_str("ab");
        assert_eq!(push_truncated(&mut s, "cdef", 10), 2);
        assert_eq!(s.as_str(), "abcd");
    }
}
