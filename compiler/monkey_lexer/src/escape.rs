//! String literal escape processing.

/// Unescape the content between a string literal's quotes.
///
/// Recognised escapes are `\"` `\\` `\n` `\t` `\r`. Any other escape is kept
/// as written, backslash included.
pub(crate) fn unescape_string(content: &str) -> String {
    if !content.contains('\\') {
        return content.to_string();
    }

    let mut result = String::with_capacity(content.len());
    let mut chars = content.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        match chars.next() {
            Some('"') => result.push('"'),
            Some('\\') => result.push('\\'),
            Some('n') => result.push('\n'),
            Some('t') => result.push('\t'),
            Some('r') => result.push('\r'),
            Some(other) => {
                result.push('\\');
                result.push(other);
            }
            None => result.push('\\'),
        }
    }
    result
}
