//! String-valued facts: MIME type, extension, duration.

use mf_core::{TagDocument, TrackDocument};

/// MIME type reported when neither the tags nor the sniffer know better.
pub const UNKNOWN_MIME: &str = "unknown";

/// Placeholder exiftool writes when it cannot identify the file.
pub const PLACEHOLDER_MIME: &str = "application/unknown";

/// Extension reported when the tags carry none.
// TODO: revisit the "txt" default for unidentified binaries once downstream
// consumers stop relying on it.
pub const FALLBACK_EXTENSION: &str = "txt";

/// Duration reported when no source carries one.
pub const UNKNOWN_DURATION: &str = "Unknown";

/// Resolve the MIME type.
///
/// The tag document's `MIMEType` wins when it is a non-empty string other
/// than [`PLACEHOLDER_MIME`]. Otherwise `sniff` is called (and only then);
/// an empty or missing answer yields [`UNKNOWN_MIME`].
pub fn resolve_mime<F>(tags: &TagDocument, sniff: F) -> String
where
    F: FnOnce() -> Option<String>,
{
    if let Some(mime) = tags.get_str("MIMEType") {
        if !mime.is_empty() && mime != PLACEHOLDER_MIME {
            return mime.to_string();
        }
    }

    match sniff() {
        Some(mime) if !mime.is_empty() => mime,
        _ => UNKNOWN_MIME.to_string(),
    }
}

/// Resolve the file extension from `FileTypeExtension`, lower-cased.
pub fn resolve_extension(tags: &TagDocument) -> String {
    match tags.get_str("FileTypeExtension") {
        Some(ext) if !ext.is_empty() => ext.to_lowercase(),
        _ => FALLBACK_EXTENSION.to_string(),
    }
}

/// Resolve the display duration.
///
/// Tag `Duration` first, then the first `Video` track that carries a
/// `Duration`.
pub fn resolve_duration(tags: &TagDocument, tracks: &TrackDocument) -> String {
    if let Some(duration) = tags.get_text("Duration") {
        return duration;
    }

    tracks
        .tracks()
        .filter(|t| t.kind() == Some("Video"))
        .find_map(|t| t.get_text("Duration"))
        .unwrap_or_else(|| UNKNOWN_DURATION.to_string())
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
    fn tag_mime_wins_over_sniffer() {
        let doc = tags(json!({"MIMEType": "image/png"}));
        let mime = resolve_mime(&doc, || panic!("sniffer must not run"));
        assert_eq!(mime, "image/png");
    }

    #[test]
    fn placeholder_mime_falls_back_to_sniffer() {
        let doc = tags(json!({"MIMEType": "application/unknown"}));
        assert_eq!(resolve_mime(&doc, || Some("image/gif".into())), "image/gif");
    }

    #[test]
    fn empty_or_mistyped_mime_falls_back() {
        let doc = tags(json!({"MIMEType": ""}));
        assert_eq!(resolve_mime(&doc, || Some("video/mp4".into())), "video/mp4");

        let doc = tags(json!({"MIMEType": 7}));
        assert_eq!(resolve_mime(&doc, || Some("video/mp4".into())), "video/mp4");
    }

    #[test]
    fn sniffer_failure_is_unknown() {
        let doc = TagDocument::default();
        assert_eq!(resolve_mime(&doc, || None), "unknown");
        assert_eq!(resolve_mime(&doc, || Some(String::new())), "unknown");
    }

    #[test]
    fn extension_is_lowercased() {
        let doc = tags(json!({"FileTypeExtension": "WEBP"}));
        assert_eq!(resolve_extension(&doc), "webp");
    }

    #[test]
    fn extension_falls_back_to_txt() {
        assert_eq!(resolve_extension(&TagDocument::default()), "txt");
        assert_eq!(resolve_extension(&tags(json!({"FileTypeExtension": ""}))), "txt");
        assert_eq!(resolve_extension(&tags(json!({"FileTypeExtension": 3}))), "txt");
    }

    #[test]
    fn duration_prefers_tags() {
        let doc = tags(json!({"Duration": 12.5}));
        let tracks = TrackDocument::new(json!({
            "media": {"track": [{"@type": "Video", "Duration": "99.000"}]}
        }));
        assert_eq!(resolve_duration(&doc, &tracks), "12.5");
    }

    #[test]
    fn duration_string_tag_kept_verbatim() {
        let doc = tags(json!({"Duration": "0:01:05"}));
        assert_eq!(resolve_duration(&doc, &TrackDocument::default()), "0:01:05");
    }

    #[test]
    fn duration_from_first_video_track() {
        let tracks = TrackDocument::new(json!({
            "media": {"track": [
                {"@type": "General", "Duration": "60.000"},
                {"@type": "Video", "Duration": "59.960"},
                {"@type": "Video", "Duration": "1.000"}
            ]}
        }));
        assert_eq!(resolve_duration(&TagDocument::default(), &tracks), "59.960");
    }

    #[test]
    fn duration_skips_video_track_without_duration() {
        let tracks = TrackDocument::new(json!({
            "media": {"track": [
                {"@type": "Video"},
                {"@type": "Video", "Duration": "4.200"}
            ]}
        }));
        assert_eq!(resolve_duration(&TagDocument::default(), &tracks), "4.200");
    }

    #[test]
    fn duration_unknown_without_sources() {
        let tracks = TrackDocument::new(json!({
            "media": {"track": [{"@type": "Audio", "Duration": "30.0"}]}
        }));
        assert_eq!(resolve_duration(&TagDocument::default(), &tracks), "Unknown");
    }
}
