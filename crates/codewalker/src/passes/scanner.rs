//! Bracket-aware label scanner
//!
//! A single left-to-right state machine over the diagram text. Outside of
//! quotes, every node open token (see [`TokenFamily`]) triggers a bounded
//! lookahead for its balanced close token; a resolved label is rewritten
//! into canonical `"..."` form. Quoted text is copied verbatim and never
//! interpreted as structure.
//!
//! Nesting is counted per family: while resolving `[`, only `[` and `]`
//! change the depth, so `A[ B(C) D ]` keeps `(C)` as label text.
//!
//! An open token with no balanced close is not an error. Its first
//! character is copied literally and scanning resumes at the next
//! character, so the scanner always terminates with some output.

use tracing::{debug, trace};

use crate::core::{canonicalize_label, is_quote, Pass, TokenFamily};

/// Rewrites every resolvable node label into canonical quoted form
#[derive(Debug, Default, Clone, Copy)]
pub struct BracketScanner;

impl BracketScanner {
    pub fn new() -> Self {
        Self
    }
}

impl Pass for BracketScanner {
    fn name(&self) -> &'static str {
        "node-labels"
    }

    fn apply(&self, input: &str) -> String {
        normalize_node_labels(input)
    }
}

/// Scanner mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Normal,
    /// Inside a quoted span opened by the given quote character
    InsideQuote(char),
}

/// Quote every node label whose open token has a balanced close
///
/// # Example
/// ```
/// use codewalker::passes::normalize_node_labels;
///
/// assert_eq!(
///     normalize_node_labels("Node[Array[String]] --> End"),
///     "Node[\"Array[String]\"] --> End"
/// );
/// assert_eq!(normalize_node_labels("A(Incomplete"), "A(Incomplete");
/// ```
pub fn normalize_node_labels(input: &str) -> String {
    let chars: Vec<char> = input.chars().collect();
    let mut output = String::with_capacity(input.len() + input.len() / 8);
    let mut state = ScanState::Normal;
    let mut cursor = 0;

    while cursor < chars.len() {
        let c = chars[cursor];

        match state {
            ScanState::InsideQuote(quote) => {
                output.push(c);
                if c == '\\' {
                    if let Some(&escaped) = chars.get(cursor + 1) {
                        output.push(escaped);
                    }
                    cursor += 2;
                    continue;
                }
                if c == quote {
                    state = ScanState::Normal;
                }
                cursor += 1;
            }
            ScanState::Normal => {
                if is_quote(c) {
                    output.push(c);
                    state = ScanState::InsideQuote(c);
                    cursor += 1;
                    continue;
                }

                if TokenFamily::is_open_char(c) {
                    if let Some(family) = TokenFamily::match_open(&chars, cursor) {
                        let label_start = cursor + family.open_len();
                        match resolve_label(&chars, label_start, family) {
                            Some(label_end) => {
                                let raw: String = chars[label_start..label_end].iter().collect();
                                let label = canonicalize_label(&raw);
                                trace!(%family, offset = cursor, %label, "Resolved label");

                                output.push_str(family.open());
                                output.push_str(&label);
                                output.push_str(family.close());
                                cursor = label_end + family.close_len();
                                continue;
                            }
                            None => {
                                debug!(%family, offset = cursor, "No balanced close, copying open token literally");
                            }
                        }
                    }
                }

                output.push(c);
                cursor += 1;
            }
        }
    }

    output
}

/// Find the end of the label that starts at `start`
///
/// Returns the index of the close token that brings the same-family depth
/// back to zero, or `None` if the text ends first. Quoted spans are skipped
/// whole, and a backslash inside one escapes the next character.
pub fn resolve_label(chars: &[char], start: usize, family: TokenFamily) -> Option<usize> {
    let mut depth = 1usize;
    let mut quote: Option<char> = None;
    let mut cursor = start;

    while cursor < chars.len() {
        let c = chars[cursor];

        if let Some(open_quote) = quote {
            if c == '\\' {
                cursor += 2;
                continue;
            }
            if c == open_quote {
                quote = None;
            }
            cursor += 1;
            continue;
        }

        if is_quote(c) {
            quote = Some(c);
            cursor += 1;
        } else if family.closes_at(chars, cursor) {
            depth -= 1;
            if depth == 0 {
                return Some(cursor);
            }
            cursor += family.close_len();
        } else if family.opens_at(chars, cursor) {
            depth += 1;
            cursor += family.open_len();
        } else {
            cursor += 1;
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn test_always_quotes_resolved_labels() {
        assert_eq!(
            normalize_node_labels("A[Process Payment] --> B{Valid?}"),
            "A[\"Process Payment\"] --> B{\"Valid?\"}"
        );
    }

    #[test]
    fn test_every_family() {
        assert_eq!(normalize_node_labels("A((Start))"), "A((\"Start\"))");
        assert_eq!(normalize_node_labels("A[(Users DB)]"), "A[(\"Users DB\")]");
        assert_eq!(normalize_node_labels("A[[Retry]]"), "A[[\"Retry\"]]");
        assert_eq!(normalize_node_labels("A{{Prepare}}"), "A{{\"Prepare\"}}");
        assert_eq!(normalize_node_labels("A[Box]"), "A[\"Box\"]");
        assert_eq!(normalize_node_labels("A(Round)"), "A(\"Round\")");
        assert_eq!(normalize_node_labels("A{Choice}"), "A{\"Choice\"}");
    }

    #[test]
    fn test_family_scoped_nesting() {
        assert_eq!(
            normalize_node_labels("A[ B(C) D ]"),
            "A[\"B(C) D\"]"
        );
        assert_eq!(
            normalize_node_labels("A(list[0])"),
            "A(\"list[0]\")"
        );
    }

    #[test]
    fn test_same_family_nesting() {
        assert_eq!(
            normalize_node_labels("Node[Array[String]] --> End"),
            "Node[\"Array[String]\"] --> End"
        );
        assert_eq!(
            normalize_node_labels("F(g(h(x)))"),
            "F(\"g(h(x))\")"
        );
    }

    #[test]
    fn test_unterminated_open_copied_literally() {
        assert_eq!(normalize_node_labels("A(Incomplete"), "A(Incomplete");
        assert_eq!(normalize_node_labels("A[x"), "A[x");
    }

    #[test]
    fn test_failed_long_token_falls_back_per_character() {
        // `((` has no `))`, so the first `(` is literal and `(B)` resolves
        assert_eq!(normalize_node_labels("A((B)"), "A((\"B\")");
        // `[(` needs `)]`; neither `[` nor `(` gets a second chance at this position
        assert_eq!(normalize_node_labels("A[(x]"), "A[(x]");
    }

    #[test]
    fn test_overlapping_prefix_tokens() {
        // `[[` opens a subroutine but only `]` follows, so it never balances
        assert_eq!(normalize_node_labels("A[[B]"), "A[[\"B\"]");
    }

    #[test]
    fn test_inner_double_quotes_become_single() {
        assert_eq!(
            normalize_node_labels("A[say \"hi\" now]"),
            "A[\"say 'hi' now\"]"
        );
        assert_eq!(
            normalize_node_labels("A[\"wrapped \"inner\" text\"]"),
            "A[\"wrapped 'inner' text\"]"
        );
    }

    #[test]
    fn test_single_quoted_label_rewrapped() {
        assert_eq!(normalize_node_labels("A['Done']"), "A[\"Done\"]");
    }

    #[test]
    fn test_quoted_text_is_opaque() {
        let input = "A -- \"A[B]C\" --> B";
        assert_eq!(normalize_node_labels(input), input);
        assert_eq!(
            normalize_node_labels("A[\"x]y\"]"),
            "A[\"x]y\"]"
        );
    }

    #[test]
    fn test_escaped_quote_inside_quotes() {
        let input = "click A \"say \\\" [x]\" B[y]";
        assert_eq!(
            normalize_node_labels(input),
            "click A \"say \\\" [x]\" B[\"y\"]"
        );
    }

    #[test]
    fn test_unterminated_quote_swallows_rest() {
        let input = "A[it's] --> B[x]";
        assert_eq!(normalize_node_labels(input), input);
    }

    #[test]
    fn test_empty_label() {
        assert_eq!(normalize_node_labels("A[]"), "A[\"\"]");
        assert_eq!(normalize_node_labels("A[ ]"), "A[\"\"]");
    }

    #[test]
    fn test_text_without_tokens_unchanged() {
        let input = "graph TD\n  A --> B\n  B --> C";
        assert_eq!(normalize_node_labels(input), input);
        assert_eq!(normalize_node_labels(""), "");
    }

    #[test]
    fn test_unicode_labels() {
        assert_eq!(
            normalize_node_labels("A[🎉 Party] --> B(日本語)"),
            "A[\"🎉 Party\"] --> B(\"日本語\")"
        );
    }

    #[test]
    fn test_resolve_label_positions() {
        let buf = chars("[a[b]c]");
        assert_eq!(resolve_label(&buf, 1, TokenFamily::Rectangle), Some(6));
        let buf = chars("((x))");
        assert_eq!(resolve_label(&buf, 2, TokenFamily::Circle), Some(3));
        let buf = chars("(\"a)\")");
        assert_eq!(resolve_label(&buf, 1, TokenFamily::Rounded), Some(5));
        let buf = chars("(a");
        assert_eq!(resolve_label(&buf, 1, TokenFamily::Rounded), None);
    }

    #[test]
    fn test_trailing_backslash_in_quote_terminates() {
        assert_eq!(normalize_node_labels("\"abc\\"), "\"abc\\");
        assert_eq!(resolve_label(&chars("a\"\\"), 0, TokenFamily::Rectangle), None);
    }
}
