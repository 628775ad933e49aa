//! Playback configuration.
//!
//! Settings arrive from the transport boundary where booleans are sometimes
//! string-encoded ("1"/"true"). Normalization happens here, at
//! deserialization time; the rest of the core only ever sees strict `bool`s.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

/// How a video fills its slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VideoSizing {
    Contain,
    Cover,
}

impl VideoSizing {
    /// CSS object-fit value.
    pub fn as_css(&self) -> &'static str {
        match self {
            VideoSizing::Contain => "contain",
            VideoSizing::Cover => "cover",
        }
    }
}

impl Default for VideoSizing {
    fn default() -> Self {
        Self::Contain
    }
}

/// Where the video slide is spliced into the gallery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VideoPosition {
    First,
    Second,
    Last,
}

impl Default for VideoPosition {
    fn default() -> Self {
        Self::Second
    }
}

/// Preload strategy for the embed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VideoPreload {
    /// Lazy facade; iframe injected on click
    Lazy,
    Metadata,
    Auto,
}

impl Default for VideoPreload {
    fn default() -> Self {
        Self::Lazy
    }
}

/// Gallery playback configuration.
///
/// Read-only input per render call; owned by the settings collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybackConfig {
    #[serde(default, deserialize_with = "truthy")]
    pub autoplay: bool,

    #[serde(rename = "loop", default, deserialize_with = "truthy")]
    pub loop_playback: bool,

    #[serde(default = "default_true", deserialize_with = "truthy")]
    pub show_controls: bool,

    #[serde(default = "default_true", deserialize_with = "truthy")]
    pub mute_autoplay: bool,

    #[serde(default)]
    pub video_sizing: VideoSizing,

    #[serde(default)]
    pub video_position: VideoPosition,

    #[serde(default)]
    pub video_preload: VideoPreload,
}

fn default_true() -> bool {
    true
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            autoplay: false,
            loop_playback: false,
            show_controls: true,
            mute_autoplay: true,
            video_sizing: VideoSizing::default(),
            video_position: VideoPosition::default(),
            video_preload: VideoPreload::default(),
        }
    }
}

/// Normalize a truthy value from the transport boundary.
///
/// `true` and `"1"`/`"true"` are truthy; everything else is falsy. Numbers
/// follow the same rule (1 is truthy).
pub fn is_truthy_str(s: &str) -> bool {
    matches!(s.trim(), "1" | "true" | "TRUE" | "True")
}

fn truthy<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    struct TruthyVisitor;

    impl<'de> de::Visitor<'de> for TruthyVisitor {
        type Value = bool;

        fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
            f.write_str("a boolean, truthy string, or integer")
        }

        fn visit_bool<E: de::Error>(self, v: bool) -> Result<bool, E> {
            Ok(v)
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<bool, E> {
            Ok(is_truthy_str(v))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<bool, E> {
            Ok(v == 1)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<bool, E> {
            Ok(v == 1)
        }
    }

    deserializer.deserialize_any(TruthyVisitor)
}

impl VideoSizing {
    /// Parse a settings-store value, rejecting anything outside the enum.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "contain" => Some(Self::Contain),
            "cover" => Some(Self::Cover),
            _ => None,
        }
    }
}

impl VideoPosition {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "first" => Some(Self::First),
            "second" => Some(Self::Second),
            "last" => Some(Self::Last),
            _ => None,
        }
    }
}

impl VideoPreload {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "lazy" => Some(Self::Lazy),
            "metadata" => Some(Self::Metadata),
            "auto" => Some(Self::Auto),
            _ => None,
        }
    }
}
