//! Client-side URL classification.
//!
//! Independent rewrite of the server's provider detection. Keep the
//! observable behavior in lockstep with the server; the conformance tests
//! in `tests/conformance.rs` hold the two to the same answers.

/// Provider tags as the client script knows them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MirrorProvider {
    Youtube,
    Vimeo,
    Tiktok,
    Instagram,
    File,
    Unrecognized,
}

impl MirrorProvider {
    /// Wire tag, matching the server's `data-provider` values.
    pub fn tag(&self) -> &'static str {
        match self {
            MirrorProvider::Youtube => "youtube",
            MirrorProvider::Vimeo => "vimeo",
            MirrorProvider::Tiktok => "tiktok",
            MirrorProvider::Instagram => "instagram",
            MirrorProvider::File => "file",
            MirrorProvider::Unrecognized => "unrecognized",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MirrorParsed {
    pub provider: MirrorProvider,
    pub id: Option<String>,
    pub url: Option<String>,
}

impl MirrorParsed {
    fn none() -> Self {
        Self {
            provider: MirrorProvider::Unrecognized,
            id: None,
            url: None,
        }
    }
}

const ID_DELIMITERS: &str = "#&?/\"'>";

/// Classify a raw URL, first provider match wins.
pub fn classify_url(raw: &str) -> MirrorParsed {
    let url = raw.trim();
    if url.is_empty() {
        return MirrorParsed::none();
    }
    let lower = url.to_ascii_lowercase();
    if lower.starts_with("javascript:") || lower.starts_with("data:") {
        return MirrorParsed::none();
    }

    if let Some(id) = youtube_id(url, &lower) {
        return MirrorParsed {
            provider: MirrorProvider::Youtube,
            id: Some(id),
            url: None,
        };
    }
    if let Some(id) = vimeo_id(url, &lower) {
        return MirrorParsed {
            provider: MirrorProvider::Vimeo,
            id: Some(id),
            url: None,
        };
    }
    if let Some(id) = tiktok_id(url, &lower) {
        return MirrorParsed {
            provider: MirrorProvider::Tiktok,
            id: Some(id),
            url: Some(url.to_string()),
        };
    }
    if let Some(id) = instagram_id(url, &lower) {
        return MirrorParsed {
            provider: MirrorProvider::Instagram,
            id: Some(id),
            url: Some(url.to_string()),
        };
    }
    if is_media_file(url, &lower) {
        return MirrorParsed {
            provider: MirrorProvider::File,
            id: None,
            url: Some(url.to_string()),
        };
    }

    MirrorParsed::none()
}

fn until_delimiter(s: &str) -> &str {
    match s.find(|c| ID_DELIMITERS.contains(c)) {
        Some(end) => s[..end].trim(),
        None => s.trim(),
    }
}

fn youtube_id(url: &str, lower: &str) -> Option<String> {
    if !(lower.contains("youtube.com")
        || lower.contains("youtu.be")
        || lower.contains("youtube-nocookie.com"))
    {
        return None;
    }

    const MARKERS: [&str; 9] = [
        "?v=", "&v=", "?vi=", "&vi=", "youtu.be/", "/embed/", "/shorts/", "/vi/", "/v/",
    ];

    let candidate = MARKERS
        .iter()
        .find_map(|marker| {
            url.find(marker)
                .map(|pos| until_delimiter(&url[pos + marker.len()..]))
        })
        .or_else(|| {
            // Legacy channel-upload form: /u/<key>/ID
            let pos = url.find("/u/")?;
            let rest = &url[pos + 3..];
            let slash = rest.find('/')?;
            Some(until_delimiter(&rest[slash + 1..]))
        })?;

    let valid = !candidate.is_empty()
        && candidate
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    valid.then(|| candidate.to_string())
}

fn vimeo_id(url: &str, lower: &str) -> Option<String> {
    let pos = lower.find("vimeo.com/")?;
    let mut rest = &url[pos + "vimeo.com/".len()..];

    if let Some(after) = rest.strip_prefix("channels/") {
        rest = after;
        if !rest.starts_with(|c: char| c.is_ascii_digit()) {
            rest = &rest[rest.find('/')? + 1..];
        }
    } else if let Some(after) = rest.strip_prefix("groups/") {
        rest = after[after.find('/')? + 1..].strip_prefix("videos/")?;
    } else if let Some(after) = rest.strip_prefix("album/") {
        let slash = after.find('/')?;
        if !after[..slash].chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        rest = after[slash + 1..].strip_prefix("video/")?;
    } else if let Some(after) = rest.strip_prefix("video/") {
        rest = after;
    }

    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    match rest[digits.len()..].chars().next() {
        None | Some('/') | Some('?') => Some(digits),
        Some(_) => None,
    }
}

fn tiktok_id(url: &str, lower: &str) -> Option<String> {
    if let Some(pos) = lower.find("tiktok.com/@") {
        let rest = &url[pos + "tiktok.com/@".len()..];
        let after = rest[rest.find('/')? + 1..].strip_prefix("video/")?;
        let digits: String = after.chars().take_while(|c| c.is_ascii_digit()).collect();
        return (!digits.is_empty()).then_some(digits);
    }
    if let Some(pos) = lower.find("vm.tiktok.com/") {
        let rest = &url[pos + "vm.tiktok.com/".len()..];
        let token: String = rest.chars().take_while(|c| c.is_ascii_alphanumeric()).collect();
        return (!token.is_empty()).then_some(token);
    }
    None
}

fn instagram_id(url: &str, lower: &str) -> Option<String> {
    let pos = lower.find("instagram.com/")?;
    let rest = &url[pos + "instagram.com/".len()..];
    let after = rest
        .strip_prefix("reel/")
        .or_else(|| rest.strip_prefix("p/"))?;
    let token: String = after
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .collect();
    (!token.is_empty()).then_some(token)
}

fn is_media_file(url: &str, lower: &str) -> bool {
    // Strip fragment and query before checking the extension.
    let path = lower.split('#').next().unwrap_or(url);
    let path = path.split('?').next().unwrap_or(path);
    // Skip the scheme authority so a dot in the host does not count.
    let path = match path.find("://") {
        Some(pos) => match path[pos + 3..].find('/') {
            Some(slash) => &path[pos + 3 + slash..],
            None => return false,
        },
        None => path,
    };
    ["mp4", "webm", "ogg"]
        .iter()
        .any(|ext| path.rsplit_once('.').map_or(false, |(_, e)| e == *ext))
}
