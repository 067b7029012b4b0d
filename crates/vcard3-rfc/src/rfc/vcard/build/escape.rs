//! vCard text escaping.

/// Escapes a text value for vCard serialization.
///
/// Escapes backslash, newline, comma, and semicolon. CR is dropped; line
/// breaks are written as `\n`.
#[must_use]
pub fn escape_text(s: &str) -> String {
    let mut result = String::with_capacity(s.len());

    for c in s.chars() {
        match c {
            '\\' => result.push_str("\\\\"),
            '\n' => result.push_str("\\n"),
            ',' => result.push_str("\\,"),
            ';' => result.push_str("\\;"),
            '\r' => {}
            _ => result.push(c),
        }
    }

    result
}

/// Prepares a parameter value for serialization.
///
/// vCard 3.0 has no escape for `"` inside a parameter value, so double
/// quotes and control characters are dropped. Returns `(value, needs_quotes)`;
/// values containing `:`, `;` or `,` must be quoted.
#[must_use]
pub fn escape_param_value(s: &str) -> (String, bool) {
    let mut result = String::with_capacity(s.len());
    let mut needs_quotes = false;

    for c in s.chars() {
        match c {
            '"' => {}
            ':' | ';' | ',' => {
                result.push(c);
                needs_quotes = true;
            }
            _ if c.is_control() && c != '\t' => {}
            _ => result.push(c),
        }
    }

    (result, needs_quotes)
}
