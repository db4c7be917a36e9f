//! Metadata source adapters.
//!
//! Each adapter shells out to one external tool and hands back its parsed
//! JSON as a loosely-typed document. Adapters make no attempt to interpret
//! fields; that is the fusion engine's job.

mod exiftool;
mod mediainfo;

pub use exiftool::ExifToolSource;
pub use mediainfo::MediaInfoSource;

use std::borrow::Cow;
use std::path::Path;

use async_trait::async_trait;
use mf_core::{TagDocument, TrackDocument};

/// Produces the flat tag document for a file.
///
/// Implementations must be safe to share across threads (`Send + Sync`).
#[async_trait]
pub trait TagSource: Send + Sync {
    /// Human-readable name identifying this source.
    fn name(&self) -> &'static str;

    /// Extract the tag document for `path`.
    ///
    /// Any failure, including unparseable output, is fatal for the run.
    async fn fetch(&self, path: &Path) -> mf_core::Result<TagDocument>;
}

/// Produces the hierarchical track document for a file.
#[async_trait]
pub trait TrackSource: Send + Sync {
    /// Human-readable name identifying this source.
    fn name(&self) -> &'static str;

    /// Extract the track document for `path`.
    async fn fetch(&self, path: &Path) -> mf_core::Result<TrackDocument>;
}

/// The file operand handed to a tool.
///
/// Relative paths gain a `./` prefix so a name like `-x.mp4` is never read
/// as an option.
pub(crate) fn file_operand(path: &Path) -> Cow<'_, Path> {
    if path.is_relative() {
        Cow::Owned(Path::new(".").join(path))
    } else {
        Cow::Borrowed(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_operand_is_prefixed() {
        assert_eq!(file_operand(Path::new("-j.mp4")), Path::new("./-j.mp4"));
        assert_eq!(file_operand(Path::new("clip.mp4")), Path::new("./clip.mp4"));
    }

    #[test]
    fn absolute_operand_is_untouched() {
        assert_eq!(file_operand(Path::new("/media/-x.gif")), Path::new("/media/-x.gif"));
    }
}
