//! # mf-av
//!
//! External metadata collaborators and content sniffing for mediafacts.
//!
//! This crate provides:
//!
//! - **Tool discovery** ([`ToolRegistry`]) -- find and cache paths to
//!   exiftool and mediainfo.
//! - **Command execution** ([`ToolCommand`]) -- async builder with timeout
//!   support for running external processes.
//! - **Metadata sources** ([`ExifToolSource`], [`MediaInfoSource`]) --
//!   implement [`TagSource`] and [`TrackSource`] by shelling out to the CLIs.
//! - **MIME sniffing** ([`ContentSniffer`]) -- magic-number detection behind
//!   the [`MimeSniffer`] seam.

pub mod command;
pub mod sniff;
pub mod source;
pub mod tools;

// ---- Re-exports for convenience ----

pub use command::{ToolCommand, ToolOutput};
pub use sniff::{ContentSniffer, MimeSniffer};
pub use source::{ExifToolSource, MediaInfoSource, TagSource, TrackSource};
pub use tools::{ToolConfig, ToolInfo, ToolRegistry};
