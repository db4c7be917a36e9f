//! Track-level facts: encryption and audio-only video containers.

use mf_core::Track;

use crate::evidence::{Evidence, Rule, Verdict};

/// Whether any track is marked `Encryption: Encrypted` (any case).
pub fn is_encrypted(evidence: &Evidence<'_>) -> bool {
    evidence.tracks.tracks().any(|t| {
        t.get_str("Encryption")
            .is_some_and(|e| e.eq_ignore_ascii_case("Encrypted"))
    })
}

/// Independent signals that a video container holds a picture stream.
pub const VIDEO_PRESENCE_RULES: &[Rule] = &[
    ("video_track", has_video_track),
    ("general_video_count", has_general_video_count),
    ("tag_frame_rate", has_tag_frame_rate),
];

/// Whether a `video/*` file carries no video stream by any signal in
/// [`VIDEO_PRESENCE_RULES`]. Non-video MIME types are never audio-only.
pub fn is_audio_only_video(evidence: &Evidence<'_>) -> bool {
    if !evidence.mime.starts_with("video/") {
        return false;
    }

    let any_video = VIDEO_PRESENCE_RULES
        .iter()
        .any(|(_, rule)| rule(evidence).is_yes());

    if !any_video {
        tracing::debug!(mime = evidence.mime, "video container without video stream");
    }
    !any_video
}

/// A track with `@type` `Video` exists.
pub fn has_video_track(ev: &Evidence<'_>) -> Verdict {
    Verdict::from_bool(ev.tracks.first_of_kind("Video").is_some())
}

/// A `General` track reports `VideoCount` > 0.
pub fn has_general_video_count(ev: &Evidence<'_>) -> Verdict {
    let found = ev
        .tracks
        .tracks()
        .filter(|t| t.kind() == Some("General"))
        .any(|t| video_count(&t).is_some_and(|n| n > 0));
    Verdict::from_bool(found)
}

/// The tag document carries `VideoFrameRate` or `FrameRate`.
pub fn has_tag_frame_rate(ev: &Evidence<'_>) -> Verdict {
    Verdict::from_bool(ev.tags.contains("VideoFrameRate") || ev.tags.contains("FrameRate"))
}

/// `VideoCount` as an integer; mediainfo writes it as a string.
fn video_count(track: &Track<'_>) -> Option<i64> {
    let value = track.get("VideoCount")?;
    match value.as_str() {
        Some(s) => s.parse().ok(),
        None => value.as_i64(),
    }
}
