//! Leaf tokens: the binary-safe text stored inside every leaf element.
//!
//! Tokens use the standard base64 alphabet with padding, so any byte sequence
//! (markup characters, control bytes, the empty string) can sit inside element
//! text without escaping. Decoding is strict: a character outside the alphabet
//! or non-canonical padding is an error, never silently dropped.

use crate::error::{CodecError, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use std::borrow::Cow;

/// Encode a scalar's text form as a leaf token.
pub fn encode_leaf(text: &str) -> String {
    encode_leaf_bytes(text.as_bytes())
}

/// Encode raw bytes as a leaf token.
pub fn encode_leaf_bytes(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Decode a leaf token back into text.
///
/// The result is always a string; whether it stands for a boolean or a number
/// is for the caller to know.
pub fn decode_leaf(token: &str) -> Result<String> {
    decode_named(token, "")
}

/// Decode a leaf token back into raw bytes.
pub fn decode_leaf_bytes(token: &str) -> Result<Vec<u8>> {
    decode_bytes_named(token, "")
}

/// Same as [`decode_leaf`], tagging errors with the owning element's name.
pub(crate) fn decode_named(token: &str, element: &str) -> Result<String> {
    let bytes = decode_bytes_named(token, element)?;
    String::from_utf8(bytes).map_err(|_| CodecError::LeafNotUtf8 {
        element: element.to_string(),
    })
}

fn decode_bytes_named(token: &str, element: &str) -> Result<Vec<u8>> {
    STANDARD
        .decode(strip_whitespace(token).as_bytes())
        .map_err(|source| CodecError::Leaf {
            element: element.to_string(),
            source,
        })
}

fn strip_whitespace(token: &str) -> Cow<'_, str> {
    if token.bytes().any(|b| b.is_ascii_whitespace()) {
        Cow::Owned(token.chars().filter(|c| !c.is_ascii_whitespace()).collect())
    } else {
        Cow::Borrowed(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_tokens() {
        assert_eq!(encode_leaf(""), "");
        assert_eq!(encode_leaf("1"), "MQ==");
        assert_eq!(encode_leaf("0"), "MA==");
        assert_eq!(encode_leaf("x"), "eA==");
        assert_eq!(encode_leaf("<a&b>"), "PGEmYj4=");
    }

    #[test]
    fn control_bytes_survive() {
        let text = "nul\0tab\tbell\u{7}";
        assert_eq!(decode_leaf(&encode_leaf(text)).unwrap(), text);
    }

    #[test]
    fn rejects_characters_outside_alphabet() {
        assert!(matches!(decode_leaf("eA=*"), Err(CodecError::Leaf { .. })));
        assert!(matches!(decode_leaf("not base64!"), Err(CodecError::Leaf { .. })));
    }

    #[test]
    fn skips_embedded_whitespace() {
        assert_eq!(decode_leaf("eA\n==").unwrap(), "x");
        assert_eq!(decode_leaf(" PGEm\r\n\tYj4= ").unwrap(), "<a&b>");
        assert!(matches!(decode_leaf("eA\u{a0}=="), Err(CodecError::Leaf { .. })));
    }

    #[test]
    fn rejects_non_utf8_text() {
        let token = encode_leaf_bytes(&[0xff, 0xfe]);
        assert_eq!(decode_leaf_bytes(&token).unwrap(), vec![0xff, 0xfe]);
        assert!(matches!(
            decode_leaf(&token),
            Err(CodecError::LeafNotUtf8 { .. })
        ));
    }
}
