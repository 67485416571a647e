//! Terminal colorization for sanitized diagram output
//!
//! Applies ANSI escape codes to diagram elements using crossterm.

use crossterm::style::{Color, Stylize};

/// Colorize sanitized Mermaid source using ANSI escape codes
///
/// - Quoted labels: Green
/// - Node bracket tokens: Cyan
/// - Edge arrows (`-->`, `==>`, `-.->`, `---`): Yellow
/// - Everything else: Default (terminal color)
pub fn colorize_output(input: &str) -> String {
    // Extra space for ANSI codes
    let mut result = String::with_capacity(input.len() * 2);
    let chars: Vec<char> = input.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        match c {
            '"' => {
                let end = quoted_span_end(&chars, i);
                let span: String = chars[i..end].iter().collect();
                result.push_str(&format!("{}", span.with(Color::Green)));
                i = end;
            }
            '[' | ']' | '(' | ')' | '{' | '}' => {
                result.push_str(&format!("{}", c.to_string().with(Color::Cyan)));
                i += 1;
            }
            '-' | '=' | '.' | '>' | '<' => {
                let end = arrow_run_end(&chars, i);
                let run: String = chars[i..end].iter().collect();
                if is_arrow(&run) {
                    result.push_str(&format!("{}", run.with(Color::Yellow)));
                } else {
                    result.push_str(&run);
                }
                i = end;
            }
            _ => {
                result.push(c);
                i += 1;
            }
        }
    }

    result
}

/// Index just past the quote that closes the span opened at `start`
///
/// An unterminated quote runs to the end of its line.
fn quoted_span_end(chars: &[char], start: usize) -> usize {
    let mut i = start + 1;
    while i < chars.len() {
        match chars[i] {
            '"' => return i + 1,
            '\n' => return i,
            _ => i += 1,
        }
    }
    i
}

fn arrow_run_end(chars: &[char], start: usize) -> usize {
    let mut i = start;
    while i < chars.len() && matches!(chars[i], '-' | '=' | '.' | '>' | '<') {
        i += 1;
    }
    i
}

/// Runs like `-->`, `==`, `-.->` or `---`; a lone `-` or `.` is text
fn is_arrow(run: &str) -> bool {
    run.chars().count() >= 2 && run.chars().any(|c| c == '-' || c == '=')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strip_ansi(s: &str) -> String {
        let mut out = String::new();
        let mut chars = s.chars().peekable();
        while let Some(c) = chars.next() {
            if c == '\x1b' {
                for next in chars.by_ref() {
                    if next == 'm' {
                        break;
                    }
                }
            } else {
                out.push(c);
            }
        }
        out
    }

    #[test]
    fn test_colorize_preserves_content() {
        let input = "graph TD\n  A[\"Start\"] -- \"f(x)\" --> B{\"OK?\"}\n";
        let output = colorize_output(input);
        assert!(output.contains("\x1b["));
        assert_eq!(strip_ansi(&output), input);
    }

    #[test]
    fn test_quoted_label_is_one_span() {
        let output = colorize_output("\"a[b]\"");
        // Brackets inside the label are not colored separately
        assert_eq!(output, format!("{}", "\"a[b]\"".with(Color::Green)));
    }

    #[test]
    fn test_colorize_arrows() {
        let output = colorize_output("A --> B");
        assert!(output.contains(&format!("{}", "-->".with(Color::Yellow))));
    }

    #[test]
    fn test_hyphenated_words_not_arrows() {
        assert_eq!(colorize_output("well-known v1.2"), "well-known v1.2");
    }

    #[test]
    fn test_unterminated_quote_stops_at_line_end() {
        let output = colorize_output("A[\"open\nB");
        assert!(strip_ansi(&output).ends_with("\nB"));
        assert!(output.ends_with("\nB"));
    }

    #[test]
    fn test_no_trailing_newline_added() {
        assert_eq!(colorize_output("test"), "test");
        assert_eq!(colorize_output(""), "");
    }
}
