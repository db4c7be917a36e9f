//! The emitted media record.

use std::path::Path;

use mf_core::{TagDocument, TrackDocument};
use mf_digest::DigestSet;
use mf_fusion::Classification;
use serde::{Deserialize, Serialize};

const SIZE_UNIT: u64 = 1000;
const SIZE_SUFFIXES: [&str; 6] = ["KB", "MB", "GB", "TB", "PB", "EB"];

/// Format a byte count with decimal (1000-based) units.
///
/// Below 1000 the exact count is printed (`"500 B"`); above, one fractional
/// digit is kept (`"1.5 KB"`, `"1.5 MB"`).
pub fn human_readable_size(bytes: u64) -> String {
    if bytes < SIZE_UNIT {
        return format!("{bytes} B");
    }

    let mut div = SIZE_UNIT;
    let mut exp = 0;
    let mut n = bytes / SIZE_UNIT;
    while n >= SIZE_UNIT && exp + 1 < SIZE_SUFFIXES.len() {
        div *= SIZE_UNIT;
        exp += 1;
        n /= SIZE_UNIT;
    }

    format!("{:.1} {}", bytes as f64 / div as f64, SIZE_SUFFIXES[exp])
}

/// Everything known about one file, in output order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaRecord {
    /// The path exactly as it was given.
    pub file_name: String,
    pub mime_type: String,
    pub file_extension: String,
    pub file_size: u64,
    pub file_size_human: String,
    pub duration: String,
    #[serde(rename = "media_is_animation")]
    pub is_animation: bool,
    #[serde(rename = "media_is_encrypted")]
    pub is_encrypted: bool,
    #[serde(rename = "media_video_with_audio_only")]
    pub is_audio_only_video: bool,
    pub hashes: DigestSet,
    pub exif: TagDocument,
    pub media: TrackDocument,
}

impl MediaRecord {
    /// Combine the per-stage results into a record. Pure; never fails.
    pub fn assemble(
        path: &Path,
        size: u64,
        classification: Classification,
        digests: DigestSet,
        tags: TagDocument,
        tracks: TrackDocument,
    ) -> Self {
        let Classification {
            mime_type,
            file_extension,
            duration,
            is_animation,
            is_encrypted,
            is_audio_only_video,
        } = classification;

        Self {
            file_name: path.to_string_lossy().into_owned(),
            mime_type,
            file_extension,
            file_size: size,
            file_size_human: human_readable_size(size),
            duration,
            is_animation,
            is_encrypted,
            is_audio_only_video,
            hashes: digests,
            exif: tags,
            media: tracks,
        }
    }

    /// Encode as a single line of JSON, or indented when `pretty` is set.
    pub fn to_json(&self, pretty: bool) -> mf_core::Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }
}
