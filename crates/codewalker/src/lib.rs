//! Codewalker - repair AI-generated Mermaid diagram source
//!
//! Generative models write Mermaid diagrams with unquoted labels containing
//! brackets, mixed quote styles, stray fences and trailing semicolons. This
//! library rewrites that text into a form the Mermaid renderer accepts.
//!
//! # Quick Start
//!
//! ```rust
//! use codewalker::sanitize;
//!
//! let fixed = sanitize("```mermaid\nA[Array[String]] -- ok (200) --> B;\n```");
//! assert_eq!(fixed, "A[\"Array[String]\"] -- \"ok (200)\" --> B\n");
//! ```
//!
//! # Advanced Usage
//!
//! Keep the original next to the sanitized text so a render failure can be
//! shown against what the model wrote:
//!
//! ```rust
//! use codewalker::prelude::*;
//!
//! let sanitizer = Sanitizer::with_config(&SanitizeConfig::all().with_semicolons(false));
//! let diagram = sanitizer.sanitize_diagram("A{Valid?} --> B;");
//!
//! assert_eq!(diagram.sanitized(), "A{\"Valid?\"} --> B;");
//! assert_eq!(diagram.original(), "A{Valid?} --> B;");
//!
//! let error = diagram.render_failure("Parse error on line 1");
//! assert_eq!(error.original_source(), Some("A{Valid?} --> B;"));
//! ```

pub mod core;
pub mod passes;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use core::*;
pub use passes::{SanitizedDiagram, Sanitizer};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::core::{
        extract_diagrams, DiagramBlock, Pass, SanitizeConfig, SanitizeError, TokenFamily,
    };
    pub use crate::passes::{
        BracketScanner, EdgeLabelQuoter, FenceStripper, PassOutcome, SanitizedDiagram, Sanitizer,
        SemicolonStripper,
    };
}

/// Sanitize Mermaid diagram source with every pass enabled
///
/// Never fails: any input, including empty or badly malformed text,
/// produces a best-effort result.
///
/// # Example
/// ```rust
/// use codewalker::sanitize;
///
/// assert_eq!(
///     sanitize("A[Process Payment] --> B{Valid?}"),
///     "A[\"Process Payment\"] --> B{\"Valid?\"}"
/// );
/// assert_eq!(sanitize(""), "");
/// ```
pub fn sanitize(source: &str) -> String {
    Sanitizer::new().run(source)
}

/// Sanitize with a specific set of passes
///
/// # Example
/// ```rust
/// use codewalker::{sanitize_with_config, SanitizeConfig};
///
/// let config: SanitizeConfig = "fences".parse().unwrap();
/// assert_eq!(sanitize_with_config("```\nA[x];\n```", &config), "A[x];");
/// ```
pub fn sanitize_with_config(source: &str, config: &SanitizeConfig) -> String {
    Sanitizer::with_config(config).run(source)
}

/// Sanitize with every pass enabled, keeping the original source
pub fn sanitize_diagram(source: &str) -> SanitizedDiagram {
    Sanitizer::new().sanitize_diagram(source)
}
