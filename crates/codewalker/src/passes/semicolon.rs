//! Trailing semicolon pass
//!
//! Mermaid accepts `;` as a statement separator, but a semicolon that ends
//! a line trips up the renderer on some diagram types.

use std::sync::OnceLock;

use regex::Regex;

use crate::core::Pass;

/// Replaces line-terminating semicolons with a newline
#[derive(Debug, Default, Clone, Copy)]
pub struct SemicolonStripper;

impl SemicolonStripper {
    pub fn new() -> Self {
        Self
    }
}

impl Pass for SemicolonStripper {
    fn name(&self) -> &'static str {
        "semicolons"
    }

    fn apply(&self, input: &str) -> String {
        strip_trailing_semicolons(input)
    }
}

// `$` without the multi-line flag only matches at the end of the text.
fn trailing_semicolon_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r";[ \t]*(?:\r?\n|$)").expect("trailing semicolon regex must compile")
    })
}

/// Replace each `;` that ends a line (or the text) with `\n`
///
/// Spaces and tabs between the semicolon and the line break are dropped
/// with it. Semicolons inside a line are kept.
///
/// # Example
/// ```
/// use codewalker::passes::strip_trailing_semicolons;
///
/// assert_eq!(strip_trailing_semicolons("A --> B;\nC --> D;"), "A --> B\nC --> D\n");
/// assert_eq!(strip_trailing_semicolons("graph LR; A-->B"), "graph LR; A-->B");
/// ```
pub fn strip_trailing_semicolons(input: &str) -> String {
    trailing_semicolon_regex()
        .replace_all(input, "\n")
        .into_owned()
}
