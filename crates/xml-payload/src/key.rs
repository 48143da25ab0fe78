//! Element naming for map and list keys.
//!
//! XML names cannot start with a digit, so a purely numeric key (a list index
//! or a numeric map key) is written as `<prefix>-<key>`, where the prefix is the
//! kind of the value stored under it. Any other key is used verbatim.
//!
//! There is no inverse: decoding takes every element name as the literal key,
//! so `string-0` stays `string-0`.

use crate::value::ValueKind;
use std::borrow::Cow;

/// Turn a key into an element name for a value of the given kind.
pub fn encode_key(key: &str, kind: ValueKind) -> Cow<'_, str> {
    if is_numeric_key(key) {
        Cow::Owned(format!("{}-{}", kind.prefix(), key))
    } else {
        Cow::Borrowed(key)
    }
}

/// `true` when `key` is non-empty and made only of ASCII digits.
pub fn is_numeric_key(key: &str) -> bool {
    !key.is_empty() && key.bytes().all(|b| b.is_ascii_digit())
}

/// Check `name` against the XML `Name` production.
///
/// Non-ASCII characters are accepted wholesale; the ASCII subset is checked
/// exactly (letters, `_` and `:` may start a name; digits, `-` and `.` may
/// follow).
pub fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if is_name_start(first) => chars.all(is_name_char),
        _ => false,
    }
}

fn is_name_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || c == ':' || !c.is_ascii()
}

fn is_name_char(c: char) -> bool {
    is_name_start(c) || c.is_ascii_digit() || c == '-' || c == '.'
}
