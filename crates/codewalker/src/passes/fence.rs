//! Fence stripping pass
//!
//! Removes the markdown fence markers a model leaves in a diagram, plus
//! the surrounding whitespace. Mermaid rejects a stray ```` ``` ```` anywhere
//! in the text, not only around it.

use std::sync::OnceLock;

use regex::Regex;

use crate::core::Pass;

/// Strips code fences and outer whitespace
#[derive(Debug, Default, Clone, Copy)]
pub struct FenceStripper;

impl FenceStripper {
    pub fn new() -> Self {
        Self
    }
}

impl Pass for FenceStripper {
    fn name(&self) -> &'static str {
        "fences"
    }

    fn apply(&self, input: &str) -> String {
        strip_fences(input)
    }
}

// A line holding only a fence, optionally tagged `mermaid` or `mmd`.
// The whole line goes, including its line break.
fn fence_line_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?mi)^[ \t]*```[ \t]*(?:mermaid|mmd)?[ \t]*(?:\r?\n|$)")
            .expect("fence line regex must compile")
    })
}

// Any other fence marker, with a `mermaid` or `mmd` tag directly after it.
fn fence_marker_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)```(?:[ \t]*(?:mermaid|mmd)\b)?")
            .expect("fence marker regex must compile")
    })
}

/// Remove every fence marker and trim the result
///
/// A `mermaid` or `mmd` tag (any ASCII case) right after a marker goes with
/// it. Any other word after a marker, such as `sequenceDiagram`, is diagram
/// content and is kept.
///
/// # Example
/// ```
/// use codewalker::passes::strip_fences;
///
/// assert_eq!(strip_fences("```mermaid\ngraph TD\n  A-->B\n```\n"), "graph TD\n  A-->B");
/// assert_eq!(strip_fences("```sequenceDiagram\nA->>B: hi\n```"), "sequenceDiagram\nA->>B: hi");
/// assert_eq!(strip_fences("  graph LR  "), "graph LR");
/// ```
pub fn strip_fences(source: &str) -> String {
    let without_lines = fence_line_regex().replace_all(source, "");
    let without_markers = fence_marker_regex().replace_all(&without_lines, "");
    without_markers.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tagged_fence() {
        assert_eq!(strip_fences("```mermaid\nA-->B\n```"), "A-->B");
    }

    #[test]
    fn test_untagged_fence() {
        assert_eq!(strip_fences("```\nA-->B\n```"), "A-->B");
    }

    #[test]
    fn test_no_fence_is_trim_only() {
        assert_eq!(strip_fences("\n\n  A-->B\n\t"), "A-->B");
        assert_eq!(strip_fences("A-->B"), "A-->B");
    }

    #[test]
    fn test_empty_and_bare_fences() {
        assert_eq!(strip_fences(""), "");
        assert_eq!(strip_fences("   "), "");
        assert_eq!(strip_fences("```"), "");
        assert_eq!(strip_fences("``````"), "");
        assert_eq!(strip_fences("```mermaid\n```"), "");
    }

    #[test]
    fn test_tag_followed_by_content_on_same_line() {
        assert_eq!(strip_fences("```mermaid graph TD\nA-->B\n```"), "graph TD\nA-->B");
    }

    #[test]
    fn test_first_line_is_not_a_tag() {
        // Words other than a mermaid tag are diagram content
        assert_eq!(strip_fences("```graph TD\nA-->B```"), "graph TD\nA-->B");
        assert_eq!(
            strip_fences("```sequenceDiagram\nA->>B: hi\n```"),
            "sequenceDiagram\nA->>B: hi"
        );
        assert_eq!(strip_fences("```flowchart\nA-->B\n```"), "flowchart\nA-->B");
    }

    #[test]
    fn test_mmd_and_uppercase_tags() {
        assert_eq!(strip_fences("```mmd\nA-->B\n```"), "A-->B");
        assert_eq!(strip_fences("```MERMAID\nA-->B\n```"), "A-->B");
        assert_eq!(strip_fences("```mermaidx\nA-->B\n```"), "mermaidx\nA-->B");
    }

    #[test]
    fn test_nested_fences() {
        assert_eq!(strip_fences("```\n```mermaid\nA-->B\n```\n```"), "A-->B");
    }

    #[test]
    fn test_interior_fences_removed() {
        assert_eq!(strip_fences("A-->B\n```\nB-->C"), "A-->B\nB-->C");
        assert_eq!(
            strip_fences("graph TD\nA-->B\n```mermaid\nB-->C\n```"),
            "graph TD\nA-->B\nB-->C"
        );
        assert_eq!(strip_fences("A-->B ``` B-->C"), "A-->B  B-->C");
    }

    #[test]
    fn test_indented_fences() {
        assert_eq!(strip_fences("  ```mermaid\n  A-->B\n  ```"), "A-->B");
    }

    #[test]
    fn test_crlf() {
        assert_eq!(strip_fences("```mermaid\r\nA-->B\r\n```\r\n"), "A-->B");
    }

    #[test]
    fn test_pass_name() {
        assert_eq!(FenceStripper::new().name(), "fences");
    }
}
