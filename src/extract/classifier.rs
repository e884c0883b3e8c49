//! YouTube URL recognition and canonicalization.

use std::sync::LazyLock;

use regex::Regex;

/// Known YouTube link shapes, tried in order. Group 1 is the 11-char video id.
const VIDEO_URL_PATTERNS: &[&str] = &[
    r"(?:https?://)?(?:www\.|m\.)?youtube\.com/watch\?(?:[^#\s]*&)?v=([A-Za-z0-9_-]{11})",
    r"(?:https?://)?youtu\.be/([A-Za-z0-9_-]{11})",
    r"(?:https?://)?(?:www\.|m\.)?youtube\.com/embed/([A-Za-z0-9_-]{11})",
    r"(?:https?://)?(?:www\.|m\.)?youtube\.com/shorts/([A-Za-z0-9_-]{11})",
    r"(?:https?://)?(?:www\.|m\.)?youtube\.com/live/([A-Za-z0-9_-]{11})",
];

static VIDEO_URL_RES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    VIDEO_URL_PATTERNS
        .iter()
        .filter_map(|p| Regex::new(p).ok())
        .collect()
});

#[must_use]
pub fn is_video_url(url: &str) -> bool {
    extract_video_id(url).is_some()
}

/// The video id captured by the first matching pattern.
#[must_use]
pub fn extract_video_id(url: &str) -> Option<String> {
    VIDEO_URL_RES.iter().find_map(|re| {
        re.captures(url)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    })
}

/// Rewrite any recognized video link as `https://www.youtube.com/watch?v=<id>`.
/// Other URLs are returned unchanged.
#[must_use]
pub fn normalize(url: &str) -> String {
    match extract_video_id(url) {
        Some(id) => format!("https://www.youtube.com/watch?v={id}"),
        None => url.to_string(),
    }
}
