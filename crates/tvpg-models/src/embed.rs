//! Embed parameter derivation.
//!
//! Encodes each provider's autoplay/mute/loop/controls contract into typed
//! parameter sets. The renderers (server and client mirror) consume these
//! without re-deriving any provider quirks.

use serde::{Deserialize, Serialize};

use crate::playback::PlaybackConfig;
use crate::provider::{ParsedVideo, Provider};

/// Rendering context for an embed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderMode {
    /// Interactive gallery slide (lazy facade for iframe providers)
    MainSlide,
    /// Continuously autoplaying, muted, control-less thumbnail embed.
    /// Ignores user playback configuration by design.
    LiveThumbnail,
}

/// Provider-specific embed parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmbedParams {
    /// YouTube iframe query parameters
    Youtube {
        id: String,
        query: Vec<(&'static str, String)>,
    },
    /// Vimeo iframe query parameters
    Vimeo {
        id: String,
        query: Vec<(&'static str, String)>,
    },
    /// TikTok/Instagram blockquote placeholder; rendering delegates to the
    /// provider's asynchronously loaded embed script.
    EmbedScript {
        provider: Provider,
        id: String,
        permalink: String,
        script_src: String,
    },
    /// Native media element attributes for directly hosted files
    FileAttrs {
        url: String,
        controls: bool,
        loop_playback: bool,
        muted: bool,
        autoplay: bool,
    },
}

impl EmbedParams {
    /// Full embed URL for iframe providers; `None` for script embeds and
    /// native files.
    pub fn embed_url(&self) -> Option<String> {
        match self {
            EmbedParams::Youtube { id, query } => Some(format!(
                "https://www.youtube.com/embed/{}?{}",
                id,
                query_string(query)
            )),
            EmbedParams::Vimeo { id, query } => Some(format!(
                "https://player.vimeo.com/video/{}?{}",
                id,
                query_string(query)
            )),
            EmbedParams::EmbedScript { .. } | EmbedParams::FileAttrs { .. } => None,
        }
    }
}

fn query_string(pairs: &[(&'static str, String)]) -> String {
    pairs
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&")
}

fn flag(b: bool) -> String {
    if b { "1".to_string() } else { "0".to_string() }
}

/// Derive provider parameters from a parse result and playback config.
///
/// Returns `None` for unrecognized input or an internally inconsistent
/// `ParsedVideo` (recognized provider missing its identifying field).
pub fn build_params(
    parsed: &ParsedVideo,
    cfg: &PlaybackConfig,
    mode: RenderMode,
) -> Option<EmbedParams> {
    match parsed.provider {
        Provider::Youtube => {
            let id = parsed.id.clone()?;
            let query = match mode {
                RenderMode::MainSlide => youtube_main_query(&id, cfg),
                RenderMode::LiveThumbnail => youtube_live_query(&id),
            };
            Some(EmbedParams::Youtube { id, query })
        }
        Provider::Vimeo => {
            let id = parsed.id.clone()?;
            let query = match mode {
                RenderMode::MainSlide => vimeo_main_query(cfg),
                RenderMode::LiveThumbnail => vimeo_live_query(),
            };
            Some(EmbedParams::Vimeo { id, query })
        }
        Provider::Tiktok => {
            let id = parsed.id.clone()?;
            let permalink = parsed.url.clone()?;
            Some(EmbedParams::EmbedScript {
                provider: Provider::Tiktok,
                id,
                permalink,
                script_src: "https://www.tiktok.com/embed.js".to_string(),
            })
        }
        Provider::Instagram => {
            let id = parsed.id.clone()?;
            Some(EmbedParams::EmbedScript {
                provider: Provider::Instagram,
                permalink: format!("https://www.instagram.com/p/{}/", id),
                id,
                script_src: "https://www.instagram.com/embed.js".to_string(),
            })
        }
        Provider::File => {
            let url = parsed.url.clone()?;
            Some(match mode {
                RenderMode::MainSlide => EmbedParams::FileAttrs {
                    url,
                    controls: cfg.show_controls,
                    loop_playback: cfg.loop_playback,
                    // Unmuted autoplay is browser-blocked; mute only when the
                    // config asks for muted autoplay.
                    muted: cfg.autoplay && cfg.mute_autoplay,
                    autoplay: cfg.autoplay,
                },
                RenderMode::LiveThumbnail => EmbedParams::FileAttrs {
                    url,
                    controls: false,
                    loop_playback: true,
                    muted: true,
                    autoplay: true,
                },
            })
        }
        Provider::Unrecognized => None,
    }
}

fn youtube_main_query(id: &str, cfg: &PlaybackConfig) -> Vec<(&'static str, String)> {
    let mut query = vec![
        ("rel", "0".to_string()),
        ("enablejsapi", "1".to_string()),
        ("controls", flag(cfg.show_controls)),
        ("loop", flag(cfg.loop_playback)),
    ];

    // YouTube requires playlist=<id> for single-video looping to work.
    if cfg.loop_playback {
        query.push(("playlist", id.to_string()));
    }

    if cfg.autoplay {
        query.push(("autoplay", "1".to_string()));
        if cfg.mute_autoplay {
            query.push(("mute", "1".to_string()));
        }
    }

    query
}

fn youtube_live_query(id: &str) -> Vec<(&'static str, String)> {
    vec![
        ("autoplay", "1".to_string()),
        ("mute", "1".to_string()),
        ("controls", "0".to_string()),
        ("loop", "1".to_string()),
        ("playlist", id.to_string()),
        ("end", "9999".to_string()),
        ("showinfo", "0".to_string()),
        ("modestbranding", "1".to_string()),
    ]
}

fn vimeo_main_query(cfg: &PlaybackConfig) -> Vec<(&'static str, String)> {
    let mut query = vec![
        ("controls", flag(cfg.show_controls)),
        ("loop", flag(cfg.loop_playback)),
    ];

    if cfg.autoplay {
        query.push(("autoplay", "1".to_string()));
        if cfg.mute_autoplay {
            query.push(("muted", "1".to_string()));
        }
    }

    query
}

fn vimeo_live_query() -> Vec<(&'static str, String)> {
    vec![
        ("background", "1".to_string()),
        ("autoplay", "1".to_string()),
        ("loop", "1".to_string()),
        ("byline", "0".to_string()),
        ("title", "0".to_string()),
        ("muted", "1".to_string()),
    ]
}
