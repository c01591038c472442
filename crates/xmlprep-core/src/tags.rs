//! XML element and attribute name sanitizing.

/// Characters removed from tag names wherever they appear.
pub const INVALID_TAG_CHARS: [char; 30] = [
    '(', ')', '<', '>', '/', '\\', '?', '!', '"', '\'', '@', '#', '$', '%', '^', '&', '*', '+',
    '=', '~', '`', '|', '[', ']', '{', '}', ';', ':', ',', '.',
];

/// Replacement for each space left after stripping.
pub const SPACE_ESCAPE: &str = "_x0020_";

/// Returns true if `ch` is stripped by [`sanitize_tag`].
pub fn is_invalid_tag_char(ch: char) -> bool {
    INVALID_TAG_CHARS.contains(&ch)
}

/// Strips invalid characters from `tag` and encodes the remaining spaces.
///
/// Only U+0020 is encoded; tabs and other whitespace pass through.
///
/// ```
/// use xmlprep_core::sanitize_tag;
///
/// assert_eq!(sanitize_tag("<Hello World!>"), "Hello_x0020_World");
/// ```
pub fn sanitize_tag(tag: &str) -> String {
    let mut clean = String::with_capacity(tag.len());
    for ch in tag.chars().filter(|ch| !is_invalid_tag_char(*ch)) {
        if ch == ' ' {
            clean.push_str(SPACE_ESCAPE);
        } else {
            clean.push(ch);
        }
    }
    clean
}
