//! Client-side embed parameter derivation.
//!
//! The client reads playback settings from string-valued data attributes,
//! so truthiness is decided here the same way the server decides it at its
//! deserialization boundary.

use std::collections::HashMap;

use crate::classify::{MirrorParsed, MirrorProvider};

/// Playback settings as delivered to the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MirrorConfig {
    pub autoplay: bool,
    pub loop_playback: bool,
    pub show_controls: bool,
    pub mute_autoplay: bool,
}

impl Default for MirrorConfig {
    fn default() -> Self {
        Self {
            autoplay: false,
            loop_playback: false,
            show_controls: true,
            mute_autoplay: true,
        }
    }
}

fn truthy(value: &str) -> bool {
    matches!(value, "1" | "true" | "TRUE" | "True")
}

impl MirrorConfig {
    /// Build from a data-attribute map; absent keys fall back to defaults.
    pub fn from_attrs(attrs: &HashMap<String, String>) -> Self {
        let defaults = Self::default();
        let read = |key: &str, fallback: bool| {
            attrs.get(key).map_or(fallback, |v| truthy(v))
        };
        Self {
            autoplay: read("autoplay", defaults.autoplay),
            loop_playback: read("loop", defaults.loop_playback),
            show_controls: read("controls", defaults.show_controls),
            mute_autoplay: read("mute", defaults.mute_autoplay),
        }
    }
}

/// Native `<video>` boolean attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileAttrs {
    pub controls: bool,
    pub loop_playback: bool,
    pub muted: bool,
    pub autoplay: bool,
}

fn bit(b: bool) -> &'static str {
    if b { "1" } else { "0" }
}

/// Embed URL for a main gallery slide; `None` when the provider has no
/// iframe URL (script embeds, files, unrecognized).
pub fn main_embed_url(parsed: &MirrorParsed, cfg: &MirrorConfig) -> Option<String> {
    match parsed.provider {
        MirrorProvider::Youtube => {
            let id = parsed.id.as_deref()?;
            let mut url = format!(
                "https://www.youtube.com/embed/{}?rel=0&enablejsapi=1&controls={}&loop={}",
                id,
                bit(cfg.show_controls),
                bit(cfg.loop_playback),
            );
            if cfg.loop_playback {
                url.push_str("&playlist=");
                url.push_str(id);
            }
            if cfg.autoplay {
                url.push_str("&autoplay=1");
                if cfg.mute_autoplay {
                    url.push_str("&mute=1");
                }
            }
            Some(url)
        }
        MirrorProvider::Vimeo => {
            let id = parsed.id.as_deref()?;
            let mut url = format!(
                "https://player.vimeo.com/video/{}?controls={}&loop={}",
                id,
                bit(cfg.show_controls),
                bit(cfg.loop_playback),
            );
            if cfg.autoplay {
                url.push_str("&autoplay=1");
                if cfg.mute_autoplay {
                    url.push_str("&muted=1");
                }
            }
            Some(url)
        }
        _ => None,
    }
}

/// Embed URL for the continuously playing thumbnail widget. Always muted
/// autoplay with controls stripped, whatever the configuration says.
pub fn live_thumb_url(parsed: &MirrorParsed) -> Option<String> {
    match parsed.provider {
        MirrorProvider::Youtube => {
            let id = parsed.id.as_deref()?;
            Some(format!(
                "https://www.youtube.com/embed/{id}?autoplay=1&mute=1&controls=0&loop=1&playlist={id}&end=9999&showinfo=0&modestbranding=1",
            ))
        }
        MirrorProvider::Vimeo => {
            let id = parsed.id.as_deref()?;
            Some(format!(
                "https://player.vimeo.com/video/{id}?background=1&autoplay=1&loop=1&byline=0&title=0&muted=1",
            ))
        }
        _ => None,
    }
}

/// Boolean attributes for a directly hosted file on a main slide.
pub fn file_playback_attrs(cfg: &MirrorConfig) -> FileAttrs {
    FileAttrs {
        controls: cfg.show_controls,
        loop_playback: cfg.loop_playback,
        muted: cfg.autoplay && cfg.mute_autoplay,
        autoplay: cfg.autoplay,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify_url;

    #[test]
    fn test_config_from_string_attrs() {
        let mut attrs = HashMap::new();
        attrs.insert("autoplay".to_string(), "1".to_string());
        attrs.insert("loop".to_string(), "true".to_string());
        attrs.insert("controls".to_string(), "0".to_string());
        let cfg = MirrorConfig::from_attrs(&attrs);
        assert!(cfg.autoplay);
        assert!(cfg.loop_playback);
        assert!(!cfg.show_controls);
        // Absent key keeps the default.
        assert!(cfg.mute_autoplay);
    }

    #[test]
    fn test_youtube_loop_adds_playlist() {
        let parsed = classify_url("https://youtu.be/dQw4w9WgXcQ");
        let cfg = MirrorConfig {
            loop_playback: true,
            ..MirrorConfig::default()
        };
        let url = main_embed_url(&parsed, &cfg).unwrap();
        assert!(url.contains("loop=1"));
        assert!(url.contains("playlist=dQw4w9WgXcQ"));
    }

    #[test]
    fn test_vimeo_autoplay_mute_pairing() {
        let parsed = classify_url("https://vimeo.com/76979871");
        let cfg = MirrorConfig {
            autoplay: true,
            mute_autoplay: true,
            ..MirrorConfig::default()
        };
        let url = main_embed_url(&parsed, &cfg).unwrap();
        assert!(url.contains("autoplay=1"));
        assert!(url.contains("muted=1"));

        let cfg = MirrorConfig {
            autoplay: true,
            mute_autoplay: false,
            ..MirrorConfig::default()
        };
        let url = main_embed_url(&parsed, &cfg).unwrap();
        assert!(!url.contains("muted=1"));
    }

    #[test]
    fn test_live_thumb_ignores_config() {
        let parsed = classify_url("https://www.youtube.com/watch?v=dQw4w9WgXcQ");
        let url = live_thumb_url(&parsed).unwrap();
        assert!(url.contains("autoplay=1"));
        assert!(url.contains("mute=1"));
        assert!(url.contains("controls=0"));
    }

    #[test]
    fn test_file_attrs_mute_needs_autoplay() {
        let attrs = file_playback_attrs(&MirrorConfig {
            autoplay: false,
            mute_autoplay: true,
            ..MirrorConfig::default()
        });
        assert!(!attrs.muted);
    }
}
