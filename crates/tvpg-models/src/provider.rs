//! Video URL classification.
//!
//! Turns an arbitrary user-supplied URL into a provider tag plus a canonical
//! identifier. All input is treated as untrusted: dangerous schemes are
//! rejected before any parsing, and extracted identifiers are validated
//! against strict per-provider alphabets. No network access, no side effects.

use serde::{Deserialize, Serialize};

/// Video hosting provider recognized by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provider {
    Youtube,
    Vimeo,
    Tiktok,
    Instagram,
    /// Directly hosted media file (mp4/webm/ogg)
    File,
    /// URL matched no known provider or extension
    Unrecognized,
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Provider::Youtube => write!(f, "youtube"),
            Provider::Vimeo => write!(f, "vimeo"),
            Provider::Tiktok => write!(f, "tiktok"),
            Provider::Instagram => write!(f, "instagram"),
            Provider::File => write!(f, "file"),
            Provider::Unrecognized => write!(f, "unrecognized"),
        }
    }
}

/// Result of classifying a raw video URL.
///
/// For YouTube and Vimeo only `id` is meaningful. TikTok and Instagram carry
/// both `id` and the original `url` (their embeds need the full permalink).
/// File carries only `url`. Unrecognized carries neither.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedVideo {
    pub provider: Provider,
    pub id: Option<String>,
    pub url: Option<String>,
}

impl ParsedVideo {
    fn unrecognized() -> Self {
        Self {
            provider: Provider::Unrecognized,
            id: None,
            url: None,
        }
    }

    /// Whether this parse carries an embeddable video.
    pub fn is_recognized(&self) -> bool {
        self.provider != Provider::Unrecognized
    }
}

/// Why an input string was rejected before provider matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputRejection {
    /// Empty or whitespace-only input
    Empty,
    /// `javascript:` or `data:` scheme
    UnsafeScheme,
}

impl std::fmt::Display for InputRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputRejection::Empty => write!(f, "empty input"),
            InputRejection::UnsafeScheme => write!(f, "unsafe URL scheme"),
        }
    }
}

/// Check the raw input for conditions that stop parsing entirely.
///
/// Callers that need to distinguish "no video selected" from "invalid
/// protocol" in their fallback output use this alongside [`classify`].
pub fn reject_input(raw_url: &str) -> Option<InputRejection> {
    let trimmed = raw_url.trim();
    if trimmed.is_empty() {
        return Some(InputRejection::Empty);
    }

    let lower = trimmed.to_ascii_lowercase();
    if lower.starts_with("javascript:") || lower.starts_with("data:") {
        return Some(InputRejection::UnsafeScheme);
    }

    None
}

/// Classify a raw URL into a provider and canonical identifier.
///
/// Detection order: YouTube, Vimeo, TikTok, Instagram, direct file. First
/// match wins. Unsafe or empty input short-circuits to `Unrecognized`
/// without any further parsing.
pub fn classify(raw_url: &str) -> ParsedVideo {
    if reject_input(raw_url).is_some() {
        return ParsedVideo::unrecognized();
    }

    let url = raw_url.trim();

    if let Some(id) = extract_youtube_id(url) {
        return ParsedVideo {
            provider: Provider::Youtube,
            id: Some(id),
            url: None,
        };
    }

    if let Some(id) = extract_vimeo_id(url) {
        return ParsedVideo {
            provider: Provider::Vimeo,
            id: Some(id),
            url: None,
        };
    }

    if let Some(id) = extract_tiktok_id(url) {
        return ParsedVideo {
            provider: Provider::Tiktok,
            id: Some(id),
            url: Some(url.to_string()),
        };
    }

    if let Some(id) = extract_instagram_id(url) {
        return ParsedVideo {
            provider: Provider::Instagram,
            id: Some(id),
            url: Some(url.to_string()),
        };
    }

    if has_media_file_extension(url) {
        return ParsedVideo {
            provider: Provider::File,
            id: None,
            url: Some(url.to_string()),
        };
    }

    ParsedVideo::unrecognized()
}

// ============================================================================
// YouTube
// ============================================================================

/// Check if URL is from a YouTube domain.
fn is_youtube_domain(url: &str) -> bool {
    let url = url.to_ascii_lowercase();
    url.contains("youtube.com") || url.contains("youtu.be") || url.contains("youtube-nocookie.com")
}

/// Extract a YouTube video ID from any supported URL shape.
///
/// Supports `watch?v=`, `youtu.be/`, `/embed/`, `/v/`, `/vi/`, `/shorts/`
/// and the legacy `/u/<x>/` channel-upload form.
fn extract_youtube_id(url: &str) -> Option<String> {
    if !is_youtube_domain(url) {
        return None;
    }

    // Try extraction strategies in order of how common the shape is.
    let candidate = extract_after_marker(url, "?v=")
        .or_else(|| extract_after_marker(url, "&v="))
        .or_else(|| extract_after_marker(url, "?vi="))
        .or_else(|| extract_after_marker(url, "&vi="))
        .or_else(|| extract_after_marker(url, "youtu.be/"))
        .or_else(|| extract_after_marker(url, "/embed/"))
        .or_else(|| extract_after_marker(url, "/shorts/"))
        .or_else(|| extract_after_marker(url, "/vi/"))
        .or_else(|| extract_after_marker(url, "/v/"))
        .or_else(|| extract_after_channel_upload(url))?;

    if !candidate.is_empty() && is_valid_youtube_id_chars(&candidate) {
        Some(candidate)
    } else {
        None
    }
}

/// Extract the segment following `marker`, terminated at a delimiter.
fn extract_after_marker(url: &str, marker: &str) -> Option<String> {
    let pos = url.find(marker)?;
    let start = pos + marker.len();
    if start >= url.len() {
        return None;
    }
    Some(take_id_segment(&url[start..]))
}

/// Legacy `/u/<x>/VIDEO_ID` channel-upload form.
fn extract_after_channel_upload(url: &str) -> Option<String> {
    let pos = url.find("/u/")?;
    let rest = &url[pos + 3..];
    // One path segment for the channel key, then the id.
    let slash = rest.find('/')?;
    let after = &rest[slash + 1..];
    if after.is_empty() {
        return None;
    }
    Some(take_id_segment(after))
}

/// Take characters up to the first id-terminating delimiter.
fn take_id_segment(segment: &str) -> String {
    const DELIMITERS: [char; 7] = ['#', '&', '?', '/', '"', '\'', '>'];
    let end = segment
        .find(|c| DELIMITERS.contains(&c))
        .unwrap_or(segment.len());
    segment[..end].trim().to_string()
}

/// YouTube ids draw from the alphanumeric/underscore/hyphen alphabet.
fn is_valid_youtube_id_chars(s: &str) -> bool {
    s.chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

// ============================================================================
// Vimeo
// ============================================================================

/// Extract a numeric Vimeo id.
///
/// Accepts `vimeo.com/ID` with optional `channels/<name>/`,
/// `groups/<name>/videos/`, `album/<num>/video/` or `video/` prefixes. The id
/// must be purely numeric and terminate at end-of-string, `/` or `?`.
fn extract_vimeo_id(url: &str) -> Option<String> {
    let lower = url.to_ascii_lowercase();
    let pos = lower.find("vimeo.com/")?;
    let mut rest = &url[pos + "vimeo.com/".len()..];

    if let Some(after) = rest.strip_prefix("channels/") {
        // Channel name segment is optional.
        rest = after;
        if !rest.starts_with(|c: char| c.is_ascii_digit()) {
            let slash = rest.find('/')?;
            rest = &rest[slash + 1..];
        }
    } else if let Some(after) = rest.strip_prefix("groups/") {
        let slash = after.find('/')?;
        rest = after[slash + 1..].strip_prefix("videos/")?;
    } else if let Some(after) = rest.strip_prefix("album/") {
        let slash = after.find('/')?;
        if !after[..slash].chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        rest = after[slash + 1..].strip_prefix("video/")?;
    } else if let Some(after) = rest.strip_prefix("video/") {
        rest = after;
    }

    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if end == 0 {
        return None;
    }

    // The id must be a whole path segment, not a numeric prefix of something.
    match rest[end..].chars().next() {
        None | Some('/') | Some('?') => Some(rest[..end].to_string()),
        Some(_) => None,
    }
}

// ============================================================================
// TikTok
// ============================================================================

/// Extract a TikTok video id from the canonical or short-link form.
fn extract_tiktok_id(url: &str) -> Option<String> {
    let lower = url.to_ascii_lowercase();

    // tiktok.com/@user/video/1234567890
    if let Some(pos) = lower.find("tiktok.com/@") {
        let rest = &url[pos + "tiktok.com/@".len()..];
        let slash = rest.find('/')?;
        let after = rest[slash + 1..].strip_prefix("video/")?;
        let end = after
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(after.len());
        if end > 0 {
            return Some(after[..end].to_string());
        }
        return None;
    }

    // vm.tiktok.com/TOKEN short link; the token stands in for the id.
    if let Some(pos) = lower.find("vm.tiktok.com/") {
        let rest = &url[pos + "vm.tiktok.com/".len()..];
        let end = rest
            .find(|c: char| !c.is_ascii_alphanumeric())
            .unwrap_or(rest.len());
        if end > 0 {
            return Some(rest[..end].to_string());
        }
    }

    None
}

// ============================================================================
// Instagram
// ============================================================================

/// Extract an Instagram reel/post token.
fn extract_instagram_id(url: &str) -> Option<String> {
    let lower = url.to_ascii_lowercase();
    let pos = lower.find("instagram.com/")?;
    let rest = &url[pos + "instagram.com/".len()..];

    let after = rest
        .strip_prefix("reel/")
        .or_else(|| rest.strip_prefix("p/"))?;

    let end = after
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-' || c == '_'))
        .unwrap_or(after.len());
    if end > 0 {
        Some(after[..end].to_string())
    } else {
        None
    }
}

// ============================================================================
// Direct files
// ============================================================================

const MEDIA_EXTENSIONS: [&str; 3] = ["mp4", "webm", "ogg"];

/// Check whether the URL path ends in a recognized media file extension.
fn has_media_file_extension(raw: &str) -> bool {
    let path = match url::Url::parse(raw) {
        Ok(parsed) => parsed.path().to_string(),
        // Scheme-less input: strip query/fragment by hand.
        Err(_) => {
            let no_fragment = raw.split('#').next().unwrap_or("");
            no_fragment.split('?').next().unwrap_or("").to_string()
        }
    };

    let ext = match path.rsplit_once('.') {
        Some((_, ext)) if !ext.contains('/') => ext.to_ascii_lowercase(),
        _ => return false,
    };

    MEDIA_EXTENSIONS.contains(&ext.as_str())
}
