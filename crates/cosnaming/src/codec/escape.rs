//! Escape handling for the stringified name grammar
//!
//! The escape character is `\`. Only `.` and `/` are escaped when writing.
//! A separator counts as escaped when it is preceded by an odd number of
//! backslashes.

/// Escape character
pub const ESCAPE: u8 = b'\\';
/// Separates components
pub const COMPONENT_SEPARATOR: u8 = b'/';
/// Separates id from kind
pub const KIND_SEPARATOR: u8 = b'.';

/// Prefix every `.` and `/` with a backslash
pub fn add_escape(value: &str) -> String {
    if !value.contains(|c: char| c == '.' || c == '/') {
        return value.to_string();
    }
    let mut escaped = String::with_capacity(value.len() + 4);
    for c in value.chars() {
        if c == '.' || c == '/' {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// True when the byte at `index` is preceded by an odd run of backslashes
pub fn is_escaped(bytes: &[u8], index: usize) -> bool {
    let run = bytes[..index]
        .iter()
        .rev()
        .take_while(|&&b| b == ESCAPE)
        .count();
    run % 2 == 1
}

/// Byte offset of the first unescaped `sep`
pub fn find_unescaped(value: &str, sep: u8) -> Option<usize> {
    let bytes = value.as_bytes();
    (0..bytes.len()).find(|&i| bytes[i] == sep && !is_escaped(bytes, i))
}

/// Split on every unescaped `sep`
///
/// `sep` is ASCII, so each split point is a char boundary.
pub fn split_unescaped(value: &str, sep: u8) -> Vec<&str> {
    let bytes = value.as_bytes();
    let mut parts = Vec::new();
    let mut start = 0;
    for i in 0..bytes.len() {
        if bytes[i] == sep && !is_escaped(bytes, i) {
            parts.push(&value[start..i]);
            start = i + 1;
        }
    }
    parts.push(&value[start..]);
    parts
}

/// True when `value` ends with an unescaped `sep`
pub fn ends_with_unescaped(value: &str, sep: u8) -> bool {
    let bytes = value.as_bytes();
    match bytes.last() {
        Some(&last) if last == sep => !is_escaped(bytes, bytes.len() - 1),
        _ => false,
    }
}

/// Remove escape characters
///
/// A backslash followed by a letter or digit is kept as a literal
/// backslash. Any other backslash is consumed and the character after it is
/// taken literally. A trailing lone backslash is dropped.
pub fn remove_escape(value: &str) -> String {
    if !value.contains('\\') {
        return value.to_string();
    }
    let mut clean = String::with_capacity(value.len());
    let mut chars = value.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            clean.push(c);
            continue;
        }
        match chars.peek() {
            Some(next) if next.is_alphanumeric() => clean.push('\\'),
            Some(&next) => {
                clean.push(next);
                chars.next();
            }
            None => {}
        }
    }
    clean
}
