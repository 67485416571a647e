//! Edge label quoting pass
//!
//! Quotes inline edge labels (`A -- label --> B`) that contain brackets or
//! quotes, which Mermaid would otherwise read as node syntax.

use std::sync::OnceLock;

use regex::{Captures, Regex};
use tracing::trace;

use crate::core::{has_risky_chars, is_wrapped_in_quotes, quote_label, Pass};

/// Quotes risky inline edge labels
#[derive(Debug, Default, Clone, Copy)]
pub struct EdgeLabelQuoter;

impl EdgeLabelQuoter {
    pub fn new() -> Self {
        Self
    }
}

impl Pass for EdgeLabelQuoter {
    fn name(&self) -> &'static str {
        "edge-labels"
    }

    fn apply(&self, input: &str) -> String {
        quote_edge_labels(input)
    }
}

// Groups: 1 = character before the edge (re-emitted), 2 = start token,
// 3 = raw label, 4 = end token.
//
// The start token may not follow `-`, `=` or `.`, and the label may not
// begin with `>`, `-`, `.` or `=`, so plain arrows (`-->`, `==>`, `-.->`,
// `---`) never open a label. End tokens are tried longest first.
fn edge_label_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?m)(^|[^\-=.])(--|-\.|==)([^\n>\-.=][^\n]*?)(-->|\.-->|\.->|==>|--)")
            .expect("edge label regex must compile")
    })
}

/// Wrap risky edge labels in double quotes
///
/// Labels that are already quoted, or that contain none of `()[]{}"'`, are
/// left untouched. Edge tokens and the whitespace around the label are
/// preserved.
///
/// # Example
/// ```
/// use codewalker::passes::quote_edge_labels;
///
/// assert_eq!(
///     quote_edge_labels("A -- Failure (\"Error\") --> B"),
///     "A -- \"Failure ('Error')\" --> B"
/// );
/// assert_eq!(quote_edge_labels("A -- yes --> B"), "A -- yes --> B");
/// ```
pub fn quote_edge_labels(input: &str) -> String {
    edge_label_regex()
        .replace_all(input, |caps: &Captures| rewrite_edge(caps))
        .into_owned()
}

fn rewrite_edge(caps: &Captures) -> String {
    let raw = &caps[3];
    let label = raw.trim();

    if is_wrapped_in_quotes(label) || !has_risky_chars(label) {
        return caps[0].to_string();
    }

    trace!(label, "Quoting edge label");
    let leading = &raw[..raw.len() - raw.trim_start().len()];
    let trailing = &raw[raw.trim_end().len()..];
    format!(
        "{}{}{}{}{}{}",
        &caps[1],
        &caps[2],
        leading,
        quote_label(label),
        trailing,
        &caps[4]
    )
}
