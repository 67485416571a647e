//! Label quoting helpers shared by the passes
//!
//! Mermaid accepts any text inside a double-quoted label, so the passes
//! rewrite risky labels into `"..."` form. Inner double quotes cannot be
//! escaped in Mermaid and are turned into single quotes instead.

/// Characters that change meaning when they appear unquoted in a label
pub const RISKY_CHARS: [char; 8] = ['(', ')', '[', ']', '{', '}', '"', '\''];

/// Returns true for the two quote characters the scanner tracks
pub fn is_quote(c: char) -> bool {
    c == '"' || c == '\''
}

/// Returns true if `text` starts and ends with the same quote character
///
/// A single quote character on its own is not wrapped.
///
/// # Example
/// ```
/// use codewalker::core::is_wrapped_in_quotes;
///
/// assert!(is_wrapped_in_quotes("\"yes\""));
/// assert!(is_wrapped_in_quotes("'no'"));
/// assert!(!is_wrapped_in_quotes("\"mixed'"));
/// assert!(!is_wrapped_in_quotes("\""));
/// ```
pub fn is_wrapped_in_quotes(text: &str) -> bool {
    let mut chars = text.chars();
    match (chars.next(), chars.next_back()) {
        (Some(first), Some(last)) => is_quote(first) && first == last,
        _ => false,
    }
}

/// Returns true if `text` contains a bracket or quote character
pub fn has_risky_chars(text: &str) -> bool {
    text.contains(RISKY_CHARS)
}

/// Wrap `text` in double quotes, turning inner double quotes into single quotes
pub fn quote_label(text: &str) -> String {
    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push('"');
    quoted.push_str(&text.replace('"', "'"));
    quoted.push('"');
    quoted
}

/// Rewrite a resolved node label into its canonical quoted form
///
/// Whitespace is trimmed, one layer of matching quotes is removed if
/// present, and the result is wrapped with [`quote_label`].
///
/// # Example
/// ```
/// use codewalker::core::canonicalize_label;
///
/// assert_eq!(canonicalize_label(" Process Payment "), "\"Process Payment\"");
/// assert_eq!(canonicalize_label("'Done'"), "\"Done\"");
/// assert_eq!(canonicalize_label("say \"hi\""), "\"say 'hi'\"");
/// ```
pub fn canonicalize_label(raw: &str) -> String {
    let trimmed = raw.trim();
    if is_wrapped_in_quotes(trimmed) {
        // Both ends are one-byte quote characters.
        quote_label(&trimmed[1..trimmed.len() - 1])
    } else {
        quote_label(trimmed)
    }
}
