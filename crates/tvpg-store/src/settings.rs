//! Versioned gallery settings store.
//!
//! Admin saves arrive as loosely typed field maps. Each field is validated
//! on its own: a bad value falls back to the current setting with a warning
//! instead of failing the whole save, matching how the admin screen treats
//! partial form submissions.

use serde::Deserialize;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::warn;

use tvpg_models::{
    is_truthy_str, PlaybackConfig, VideoPosition, VideoPreload, VideoSizing,
};

/// A point-in-time view of the settings plus their version counter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsSnapshot {
    pub config: PlaybackConfig,
    pub version: u64,
}

/// Partial settings update; absent fields keep their current value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SettingsPatch {
    pub autoplay: Option<Value>,
    #[serde(rename = "loop")]
    pub loop_playback: Option<Value>,
    pub show_controls: Option<Value>,
    pub mute_autoplay: Option<Value>,
    pub video_sizing: Option<String>,
    pub video_position: Option<String>,
    pub video_preload: Option<String>,
}

fn truthy_value(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) => Some(is_truthy_str(s)),
        Value::Number(n) => Some(n.as_i64() == Some(1)),
        _ => None,
    }
}

#[derive(Debug)]
pub struct SettingsStore {
    inner: RwLock<SettingsSnapshot>,
}

impl Default for SettingsStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(SettingsSnapshot {
                config: PlaybackConfig::default(),
                version: 1,
            }),
        }
    }

    pub async fn get(&self) -> SettingsSnapshot {
        self.inner.read().await.clone()
    }

    /// Apply a patch field by field and bump the version.
    pub async fn apply(&self, patch: SettingsPatch) -> SettingsSnapshot {
        let mut guard = self.inner.write().await;
        let config = &mut guard.config;

        apply_bool(&mut config.autoplay, "autoplay", patch.autoplay.as_ref());
        apply_bool(
            &mut config.loop_playback,
            "loop",
            patch.loop_playback.as_ref(),
        );
        apply_bool(
            &mut config.show_controls,
            "show_controls",
            patch.show_controls.as_ref(),
        );
        apply_bool(
            &mut config.mute_autoplay,
            "mute_autoplay",
            patch.mute_autoplay.as_ref(),
        );

        if let Some(raw) = patch.video_sizing.as_deref() {
            match VideoSizing::parse(raw) {
                Some(v) => config.video_sizing = v,
                None => warn!(field = "video_sizing", value = %raw, "Rejecting invalid settings value"),
            }
        }
        if let Some(raw) = patch.video_position.as_deref() {
            match VideoPosition::parse(raw) {
                Some(v) => config.video_position = v,
                None => warn!(field = "video_position", value = %raw, "Rejecting invalid settings value"),
            }
        }
        if let Some(raw) = patch.video_preload.as_deref() {
            match VideoPreload::parse(raw) {
                Some(v) => config.video_preload = v,
                None => warn!(field = "video_preload", value = %raw, "Rejecting invalid settings value"),
            }
        }

        guard.version += 1;
        guard.clone()
    }
}

fn apply_bool(slot: &mut bool, field: &'static str, value: Option<&Value>) {
    if let Some(value) = value {
        match truthy_value(value) {
            Some(b) => *slot = b,
            None => warn!(field, ?value, "Rejecting invalid settings value"),
        }
    }
}
