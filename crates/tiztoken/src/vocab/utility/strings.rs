//! # String Utilities

use unicode_general_category::{GeneralCategory, get_general_category};

/// Convert bytes to a `String`, replacing invalid sequences with U+FFFD.
///
/// Valid input is moved without copying.
pub fn string_from_utf8_lossy(v: Vec<u8>) -> String {
    match String::from_utf8(v) {
        Ok(s) => s,
        Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
    }
}

/// Is this char in one of the Unicode "Other" (`C*`) categories?
fn is_other_category(ch: char) -> bool {
    matches!(
        get_general_category(ch),
        GeneralCategory::Control
            | GeneralCategory::Format
            | GeneralCategory::Surrogate
            | GeneralCategory::PrivateUse
            | GeneralCategory::Unassigned
    )
}

/// Escape control and other invisible characters as `\uXXXX`.
///
/// Everything outside the Unicode `C*` categories passes through.
pub fn replace_control_characters(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        if is_other_category(ch) {
            out.push_str(&format!("\\u{:04x}", ch as u32));
        } else {
            out.push(ch);
        }
    }
    out
}

/// Render a token's bytes for human inspection.
///
/// Partial UTF-8 sequences become U+FFFD; control characters are escaped.
pub fn render_token(bytes: &[u8]) -> String {
    replace_control_characters(&String::from_utf8_lossy(bytes))
}
