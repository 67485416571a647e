//! Fenced code block extraction from markdown responses
//!
//! Generated answers embed diagrams inside prose as fenced blocks tagged
//! `mermaid`. These chumsky parsers pull the blocks out so each diagram can
//! be sanitized and rendered on its own.

use chumsky::prelude::*;
use serde::Serialize;
use tracing::debug;

const FENCE: &str = "```";

/// A fenced code block found in a markdown document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiagramBlock {
    /// First word of the info string, empty when the fence is untagged
    pub language: String,
    /// Block body without the fences
    pub source: String,
    /// Byte offset of the opening fence in the document
    pub offset: usize,
}

impl DiagramBlock {
    /// Returns true if the block is tagged `mermaid` (any ASCII case)
    pub fn is_mermaid(&self) -> bool {
        self.language.eq_ignore_ascii_case("mermaid")
    }
}

/// Parse the rest of an opening fence line (the info string).
fn info_string<'src>() -> impl Parser<'src, &'src str, &'src str> + Clone {
    none_of("`\n").repeated().to_slice()
}

/// Parse one fenced block, yielding `(info, body, offset)`.
fn fenced_block<'src>() -> impl Parser<'src, &'src str, (&'src str, &'src str, usize)> + Clone {
    let body = any().and_is(just(FENCE).not()).repeated().to_slice();

    just(FENCE)
        .ignore_then(info_string())
        .then_ignore(just('\r').or_not())
        .then_ignore(just('\n').or_not())
        .then(body)
        .then_ignore(just(FENCE))
        .map_with(|(info, body), e| {
            let span: SimpleSpan = e.span();
            (info, body, span.start)
        })
}

/// Parse a whole document: blocks interleaved with prose.
///
/// An opening fence without a closing fence fails `fenced_block` and is
/// consumed as prose one character at a time.
fn document<'src>() -> impl Parser<'src, &'src str, Vec<(&'src str, &'src str, usize)>> {
    fenced_block()
        .map(Some)
        .or(any().to(None))
        .repeated()
        .collect::<Vec<_>>()
        .map(|items: Vec<Option<_>>| items.into_iter().flatten().collect::<Vec<_>>())
}

/// Extract every fenced code block from `markdown`, in document order
///
/// # Example
/// ```
/// use codewalker::core::extract_code_blocks;
///
/// let blocks = extract_code_blocks("Intro\n```rust\nfn main() {}\n```\n");
/// assert_eq!(blocks.len(), 1);
/// assert_eq!(blocks[0].language, "rust");
/// assert_eq!(blocks[0].source, "fn main() {}");
/// ```
pub fn extract_code_blocks(markdown: &str) -> Vec<DiagramBlock> {
    let raw = document().parse(markdown).into_output().unwrap_or_default();

    let blocks: Vec<DiagramBlock> = raw
        .into_iter()
        .map(|(info, body, offset)| DiagramBlock {
            language: info.split_whitespace().next().unwrap_or("").to_string(),
            source: body.trim_end_matches(['\r', '\n']).to_string(),
            offset,
        })
        .collect();

    debug!(block_count = blocks.len(), "Extracted fenced blocks");
    blocks
}

/// Extract the `mermaid` blocks from `markdown`, in document order
pub fn extract_diagrams(markdown: &str) -> Vec<DiagramBlock> {
    extract_code_blocks(markdown)
        .into_iter()
        .filter(DiagramBlock::is_mermaid)
        .collect()
}
