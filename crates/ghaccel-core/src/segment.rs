//! Percent-encoding of individual path segments.
//!
//! Requests hold decoded segments (axum decodes route parameters). Every URL
//! or path built from them goes through [`encode`], and every segment read
//! back out of a URL goes through [`decode`].

use std::borrow::Cow;

use percent_encoding::{AsciiSet, CONTROLS, percent_decode_str, utf8_percent_encode};

/// Characters escaped inside one path segment: the WHATWG path-segment set
/// plus backslash, which special schemes treat as a separator.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'/')
    .add(b'%')
    .add(b'\\');

/// Encode a single segment.
pub fn encode(segment: &str) -> Cow<'_, str> {
    utf8_percent_encode(segment, SEGMENT).into()
}

/// Encode each segment and join them with `/`.
pub fn encode_all<S: AsRef<str>>(segments: &[S]) -> String {
    segments
        .iter()
        .map(|s| encode(s.as_ref()))
        .collect::<Vec<_>>()
        .join("/")
}

/// Decode a single segment.
///
/// Returns `None` for invalid UTF-8 and for segments that decode to something
/// containing `/`, which could not be represented as one segment again.
pub fn decode(segment: &str) -> Option<String> {
    let decoded = percent_decode_str(segment).decode_utf8().ok()?;
    if decoded.contains('/') {
        return None;
    }
    Some(decoded.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reserved_characters_are_escaped() {
        assert_eq!(encode("c#d.txt"), "c%23d.txt");
        assert_eq!(encode("a?b.md"), "a%3Fb.md");
        assert_eq!(encode("100%.txt"), "100%25.txt");
        assert_eq!(encode("my file.md"), "my%20file.md");
    }

    #[test]
    fn plain_names_are_borrowed() {
        assert!(matches!(encode("app-v1.2_x86~64.tar.gz"), Cow::Borrowed(_)));
    }

    #[test]
    fn non_ascii_is_utf8_encoded() {
        assert_eq!(encode("说明.md"), "%E8%AF%B4%E6%98%8E.md");
        assert_eq!(encode("é.md"), "%C3%A9.md");
    }

    #[test]
    fn encode_all_keeps_separators() {
        assert_eq!(encode_all(&["docs", "my file.md"]), "docs/my%20file.md");
    }

    #[test]
    fn decode_reverses_encode() {
        for name in ["c#d.txt", "a?b.md", "100%.txt", "my file.md", "文档", "é.md"] {
            assert_eq!(decode(&encode(name)).as_deref(), Some(name));
        }
    }

    #[test]
    fn decode_rejects_bad_utf8_and_embedded_slash() {
        assert_eq!(decode("%FF.txt"), None);
        assert_eq!(decode("a%2Fb"), None);
    }
}
