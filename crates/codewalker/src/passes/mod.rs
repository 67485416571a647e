//! Sanitizing passes
//!
//! Each pass implements [`Pass`](crate::core::Pass) and is also exposed as a
//! plain function. [`Sanitizer`] runs them in order.

mod edge_label;
mod fence;
mod pipeline;
mod scanner;
mod semicolon;

pub use edge_label::*;
pub use fence::*;
pub use pipeline::*;
pub use scanner::*;
pub use semicolon::*;
