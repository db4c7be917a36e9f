//! Mediafacts - media metadata fusion tool
//!
//! This library crate exposes the driver and record types for integration
//! testing.

pub mod config;
pub mod inspect;
pub mod record;

pub use inspect::Inspector;
pub use record::{human_readable_size, MediaRecord};
