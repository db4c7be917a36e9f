//! Unified error type for mediafacts.
//!
//! Every failure that can abort a run funnels into [`Error`]. Each variant
//! maps to the pipeline stage that produced it via [`Error::stage`], which the
//! binary uses for its one-line diagnostic.

use std::path::PathBuf;

/// Fatal failure modes of a single inspection run.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No file path was supplied on the command line.
    #[error("missing file argument")]
    MissingArgument,

    /// The input file could not be stat-ed or opened.
    #[error("cannot access {}: {source}", path.display())]
    FileAccess {
        /// The path that was looked up.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// A metadata collaborator (exiftool, mediainfo) failed or produced
    /// unparseable output.
    #[error("{tool} unavailable: {message}")]
    SourceUnavailable {
        /// Name of the collaborator that failed.
        tool: String,
        /// Human-readable error description.
        message: String,
    },

    /// Reading the file failed part-way through the digest scan.
    #[error("failed to digest {}: {source}", path.display())]
    DigestIo {
        /// The file being scanned.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The final record could not be encoded.
    #[error("failed to serialize record: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration was present but invalid.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl Error {
    /// Name of the pipeline stage this error belongs to.
    pub fn stage(&self) -> &'static str {
        match self {
            Error::MissingArgument => "usage",
            Error::FileAccess { .. } => "stat",
            Error::SourceUnavailable { .. } => "metadata",
            Error::DigestIo { .. } => "digest",
            Error::Serialization(_) => "serialize",
            Error::Config(_) => "config",
        }
    }

    /// Convenience constructor for [`Error::FileAccess`].
    pub fn file_access(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::FileAccess {
            path: path.into(),
            source,
        }
    }

    /// Convenience constructor for [`Error::SourceUnavailable`].
    pub fn source_unavailable(tool: impl Into<String>, message: impl Into<String>) -> Self {
        Error::SourceUnavailable {
            tool: tool.into(),
            message: message.into(),
        }
    }

    /// Convenience constructor for [`Error::DigestIo`].
    pub fn digest_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::DigestIo {
            path: path.into(),
            source,
        }
    }
}

/// Result alias using the crate-level [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
