//! # mf-digest
//!
//! Multi-algorithm content digests computed in a single read pass.
//!
//! ## Quick start
//!
//! ```no_run
//! use mf_digest::{Algorithm, DigestEngine};
//! use std::path::Path;
//!
//! let engine = DigestEngine::default();
//! let digests = engine.digest_file(Path::new("clip.mp4"))?;
//! println!("sha256: {:?}", digests.get(Algorithm::Sha256));
//! # Ok::<(), mf_core::Error>(())
//! ```

pub mod algorithm;
pub mod engine;

pub use algorithm::Algorithm;
pub use engine::{DigestEngine, DigestSet};
