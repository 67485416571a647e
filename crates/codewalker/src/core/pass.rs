//! Pass abstraction trait
//!
//! A pass is one pure text-to-text rewrite in the sanitizing pipeline.
//! The [`Sanitizer`](crate::passes::Sanitizer) threads a single string
//! through the enabled passes in a fixed order.

/// Core trait for sanitizing passes
///
/// Implementations must be total: every input string produces an output
/// string, and no state is shared between calls.
pub trait Pass: Send + Sync {
    /// Stable name of this pass, as accepted by [`SanitizeConfig`](crate::core::SanitizeConfig)
    fn name(&self) -> &'static str;

    /// Rewrite `input` and return the result
    fn apply(&self, input: &str) -> String;
}
