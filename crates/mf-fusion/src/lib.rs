//! # mf-fusion
//!
//! Derives normalized facts about a media file from two loosely-typed
//! metadata documents: the exiftool tag document and the mediainfo track
//! document. Field presence and value types vary per file type and per tool
//! version, so every lookup degrades to "absent" instead of failing.
//!
//! ## Quick start
//!
//! ```
//! use mf_core::{TagDocument, TrackDocument};
//!
//! let tags = TagDocument::from_json("exiftool", r#"[{"MIMEType":"image/gif","FrameCount":4}]"#)?;
//! let tracks = TrackDocument::from_json("mediainfo", r#"{"media":{"track":[]}}"#)?;
//!
//! let facts = mf_fusion::classify(&tags, &tracks, || None);
//! assert_eq!(facts.mime_type, "image/gif");
//! assert!(facts.is_animation);
//! # Ok::<(), mf_core::Error>(())
//! ```

pub mod animation;
pub mod evidence;
pub mod resolve;
pub mod streams;

use mf_core::{TagDocument, TrackDocument};
use serde::{Deserialize, Serialize};

pub use evidence::{Evidence, Rule, Verdict};
pub use resolve::{resolve_duration, resolve_extension, resolve_mime};

/// The fused facts about one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub mime_type: String,
    pub file_extension: String,
    pub duration: String,
    pub is_animation: bool,
    pub is_encrypted: bool,
    pub is_audio_only_video: bool,
}

/// Fuse the two documents into a [`Classification`].
///
/// `sniff` is the content-sniffing fallback for the MIME type; it is called
/// at most once, and only when the tag document has no usable `MIMEType`.
pub fn classify<F>(tags: &TagDocument, tracks: &TrackDocument, sniff: F) -> Classification
where
    F: FnOnce() -> Option<String>,
{
    let mime_type = resolve_mime(tags, sniff);
    let evidence = Evidence::new(tags, tracks, &mime_type);

    let is_animation = animation::is_animation(&evidence);
    let is_encrypted = streams::is_encrypted(&evidence);
    let is_audio_only_video = streams::is_audio_only_video(&evidence);

    Classification {
        file_extension: resolve_extension(tags),
        duration: resolve_duration(tags, tracks),
        is_animation,
        is_encrypted,
        is_audio_only_video,
        mime_type,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn tags(value: Value) -> TagDocument {
        match value {
            Value::Object(map) => TagDocument::new(map),
            _ => panic!("fixture must be an object"),
        }
    }

    #[test]
    fn animated_gif_from_tracks() {
        let t = TagDocument::default();
        let tr = TrackDocument::new(json!({
            "media": {"track": [
                {"@type": "General", "Format": "GIF", "ImageCount": "1"},
                {"@type": "Image", "Format": "GIF", "FrameCount": "12"}
            ]}
        }));

        let facts = classify(&t, &tr, || Some("image/gif".into()));
        assert_eq!(facts.mime_type, "image/gif");
        assert_eq!(facts.file_extension, "txt");
        assert_eq!(facts.duration, "Unknown");
        assert!(facts.is_animation);
        assert!(!facts.is_encrypted);
        assert!(!facts.is_audio_only_video);
    }

    #[test]
    fn audio_in_mp4_container() {
        let t = tags(json!({
            "MIMEType": "video/mp4",
            "FileTypeExtension": "MP4",
            "Duration": 184.32
        }));
        let tr = TrackDocument::new(json!({
            "media": {"track": [
                {"@type": "General", "AudioCount": "1", "Duration": "184.320"},
                {"@type": "Audio", "Format": "AAC"}
            ]}
        }));

        let facts = classify(&t, &tr, || panic!("tags carry a MIME type"));
        assert_eq!(facts.mime_type, "video/mp4");
        assert_eq!(facts.file_extension, "mp4");
        assert_eq!(facts.duration, "184.32");
        assert!(!facts.is_animation);
        assert!(facts.is_audio_only_video);
    }

    #[test]
    fn encrypted_video() {
        let t = tags(json!({"MIMEType": "video/mp4", "VideoFrameRate": 25}));
        let tr = TrackDocument::new(json!({
            "media": {"track": [
                {"@type": "General", "VideoCount": "1"},
                {"@type": "Video", "Duration": "10.000", "Encryption": "Encrypted"}
            ]}
        }));

        let facts = classify(&t, &tr, || None);
        assert!(facts.is_encrypted);
        assert!(!facts.is_audio_only_video);
        assert_eq!(facts.duration, "10.000");
    }

    #[test]
    fn empty_documents_degrade_gracefully() {
        let facts = classify(&TagDocument::default(), &TrackDocument::default(), || None);
        assert_eq!(
            facts,
            Classification {
                mime_type: "unknown".into(),
                file_extension: "txt".into(),
                duration: "Unknown".into(),
                is_animation: false,
                is_encrypted: false,
                is_audio_only_video: false,
            }
        );
    }

    #[test]
    fn classify_is_deterministic() {
        let t = tags(json!({"MIMEType": "image/webp", "Duration": 1.2}));
        let tr = TrackDocument::new(json!({"media": {"track": [{"@type": "Image"}]}}));
        let a = classify(&t, &tr, || None);
        let b = classify(&t, &tr, || None);
        assert_eq!(a, b);
        assert!(a.is_animation);
    }
}
