//! Sanitizer orchestrator
//!
//! Threads the diagram source through the enabled passes in a fixed order:
//! Fence Stripper → Edge-Label Quoter → Bracket Scanner → Semicolon Stripper.

use serde::Serialize;
use tracing::{debug, span, trace, Level};

use super::{BracketScanner, EdgeLabelQuoter, FenceStripper, SemicolonStripper};
use crate::core::{Pass, SanitizeConfig, SanitizeError};

/// Runs the sanitizing passes over diagram source
///
/// The sanitizer holds no per-call state, so one instance can be shared
/// across threads and reused for any number of diagrams.
pub struct Sanitizer {
    passes: Vec<Box<dyn Pass>>,
}

impl Sanitizer {
    /// Create a sanitizer with every pass enabled
    pub fn new() -> Self {
        Self::with_config(&SanitizeConfig::default())
    }

    /// Create a sanitizer running only the passes enabled in `config`
    pub fn with_config(config: &SanitizeConfig) -> Self {
        let mut passes: Vec<Box<dyn Pass>> = Vec::with_capacity(4);
        if config.fences {
            passes.push(Box::new(FenceStripper::new()));
        }
        if config.edge_labels {
            passes.push(Box::new(EdgeLabelQuoter::new()));
        }
        if config.node_labels {
            passes.push(Box::new(BracketScanner::new()));
        }
        if config.semicolons {
            passes.push(Box::new(SemicolonStripper::new()));
        }
        Self { passes }
    }

    /// Names of the passes this sanitizer runs, in order
    pub fn pass_names(&self) -> Vec<&'static str> {
        self.passes.iter().map(|pass| pass.name()).collect()
    }

    /// Sanitize `source` and return the corrected text
    pub fn run(&self, source: &str) -> String {
        self.sanitize_diagram(source).sanitized
    }

    /// Sanitize `source`, keeping the original text and a per-pass record
    pub fn sanitize_diagram(&self, source: &str) -> SanitizedDiagram {
        let sanitize_span = span!(Level::DEBUG, "sanitize", input_len = source.len());
        let _enter = sanitize_span.enter();

        let mut text = source.to_string();
        let mut outcomes = Vec::with_capacity(self.passes.len());

        for pass in &self.passes {
            let next = pass.apply(&text);
            let changed = next.trim() != text.trim();
            trace!(pass = pass.name(), changed, output_len = next.len(), "Applied pass");
            outcomes.push(PassOutcome {
                pass: pass.name(),
                changed,
            });
            text = next;
        }

        let diagram = SanitizedDiagram {
            original: source.to_string(),
            sanitized: text,
            passes: outcomes,
        };
        debug!(changed = diagram.is_changed(), "Sanitized diagram");
        diagram
    }
}

impl Default for Sanitizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether a single pass changed the text
///
/// Changes to leading or trailing whitespace alone do not count, so a
/// clean file ending in a newline is reported unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PassOutcome {
    pub pass: &'static str,
    pub changed: bool,
}

/// Sanitized diagram text together with the source it came from
///
/// Renderers reject some inputs even after sanitizing. The original text is
/// kept so the failure can be shown against what the model actually wrote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SanitizedDiagram {
    original: String,
    sanitized: String,
    passes: Vec<PassOutcome>,
}

impl SanitizedDiagram {
    /// The unsanitized input
    pub fn original(&self) -> &str {
        &self.original
    }

    /// The text to hand to the renderer
    pub fn sanitized(&self) -> &str {
        &self.sanitized
    }

    /// Per-pass outcomes, in pipeline order
    pub fn outcomes(&self) -> &[PassOutcome] {
        &self.passes
    }

    /// Returns true if any pass changed the text beyond outer whitespace
    pub fn is_changed(&self) -> bool {
        self.passes.iter().any(|outcome| outcome.changed)
    }

    /// Take the sanitized text
    pub fn into_sanitized(self) -> String {
        self.sanitized
    }

    /// Build the error to surface when the renderer rejects the sanitized text
    ///
    /// The error carries the renderer's message and the original source.
    pub fn render_failure(&self, message: impl Into<String>) -> SanitizeError {
        SanitizeError::render(message, self.original.clone())
    }
}
