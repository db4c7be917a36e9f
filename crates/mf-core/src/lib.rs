//! mf-core: shared error type, metadata documents, and configuration.
//!
//! This crate is the foundational dependency for all other mf-* crates.

pub mod config;
pub mod document;
pub mod error;

// Re-export the most commonly used items at the crate root.
pub use document::{value_text, TagDocument, Track, TrackDocument};
pub use error::{Error, Result};
