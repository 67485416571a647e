//! Core error types
//!
//! Sanitizing itself never fails. These errors cover configuration and the
//! downstream render failure that callers surface together with the
//! original diagram source.

use thiserror::Error;

/// Errors raised around the sanitizer
#[derive(Error, Debug)]
pub enum SanitizeError {
    #[error("Unknown pass: {name} (expected fences, edge-labels, node-labels, semicolons, all or none)")]
    UnknownPass { name: String },

    #[error("Render error: {message}\n--- original source ---\n{original_source}")]
    Render {
        message: String,
        original_source: String,
    },

    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl SanitizeError {
    /// Create a new unknown pass error
    pub fn unknown_pass(name: impl Into<String>) -> Self {
        Self::UnknownPass { name: name.into() }
    }

    /// Create a render error that keeps the unsanitized source for display
    pub fn render(message: impl Into<String>, original_source: impl Into<String>) -> Self {
        Self::Render {
            message: message.into(),
            original_source: original_source.into(),
        }
    }

    /// Create a new configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// The original diagram source, if this error carries one
    pub fn original_source(&self) -> Option<&str> {
        match self {
            Self::Render {
                original_source, ..
            } => Some(original_source),
            _ => None,
        }
    }
}
