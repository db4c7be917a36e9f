//! Animated-image detection.
//!
//! Still and animated GIF/WebP share a MIME type, so only frame-count or
//! duration evidence tells them apart.

use crate::evidence::{first_match, Evidence, Rule, Verdict};

const GIF: &str = "image/gif";
const WEBP: &str = "image/webp";

/// Ordered animation rules; the first `Yes` wins.
pub const ANIMATION_RULES: &[Rule] = &[
    ("tag_frame_count", tag_frame_count),
    ("tag_animation_flag", tag_animation_flag),
    ("tag_image_duration", tag_image_duration),
    ("track_frames", track_frames),
];

/// Whether the file is an animation, per [`ANIMATION_RULES`].
pub fn is_animation(evidence: &Evidence<'_>) -> bool {
    match first_match(ANIMATION_RULES, evidence) {
        Some(rule) => {
            tracing::debug!(rule, mime = evidence.mime, "animation detected");
            true
        }
        None => false,
    }
}

/// Tag `FrameCount` is a number greater than one.
pub fn tag_frame_count(ev: &Evidence<'_>) -> Verdict {
    match ev.tags.get_f64("FrameCount") {
        Some(count) => Verdict::from_bool(count > 1.0),
        None => Verdict::NotApplicable,
    }
}

/// Tag `Animation` is exactly `Yes` or `True`.
pub fn tag_animation_flag(ev: &Evidence<'_>) -> Verdict {
    match ev.tags.get_str("Animation") {
        Some(flag) => Verdict::from_bool(flag == "Yes" || flag == "True"),
        None => Verdict::NotApplicable,
    }
}

/// Tag `Duration` is a positive number on a GIF or WebP.
pub fn tag_image_duration(ev: &Evidence<'_>) -> Verdict {
    if ev.mime != GIF && ev.mime != WEBP {
        return Verdict::NotApplicable;
    }
    match ev.tags.get_f64("Duration") {
        Some(duration) => Verdict::from_bool(duration > 0.0),
        None => Verdict::NotApplicable,
    }
}

/// A GIF/WebP track reports more than one frame or a non-zero duration.
///
/// Only tracks whose `Format` matches the resolved MIME type are inspected:
/// `GIF` tracks for `image/gif`, `WebP` tracks for `image/webp`.
pub fn track_frames(ev: &Evidence<'_>) -> Verdict {
    let format_marker = match ev.mime {
        GIF => "GIF",
        WEBP => "WebP",
        _ => return Verdict::NotApplicable,
    };

    let animated = ev
        .tracks
        .tracks()
        .filter(|t| t.get_str("Format").is_some_and(|f| f.contains(format_marker)))
        .any(|t| {
            let many_frames = t.get_text("FrameCount").is_some_and(|fc| fc != "1");
            let has_duration = t.get_text("Duration").is_some_and(|d| d != "0");
            many_frames || has_duration
        });

    Verdict::from_bool(animated)
}
