//! Core abstractions for diagram sanitizing
//!
//! Token families, label quoting rules, the [`Pass`] trait, configuration,
//! errors, logging, and markdown block extraction. The concrete passes live
//! in [`crate::passes`].

mod blocks;
mod config;
mod error;
mod label;
pub mod logging;
mod pass;
mod token;

pub use blocks::*;
pub use config::*;
pub use error::*;
pub use label::*;
pub use logging::*;
pub use pass::*;
pub use token::*;
