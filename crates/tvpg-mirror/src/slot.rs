//! Gallery video slot state machine.
//!
//! The video slide lives inside a third-party gallery that clones, moves
//! and occasionally rewrites its slides. The slot therefore keeps its own
//! expected markup and reconciles the live slide against it on a fixed
//! pulse, rather than trusting DOM events to arrive.

use std::time::Duration;

use tokio::time::{interval, sleep};
use tracing::debug;

use crate::classify::classify_url;
use crate::markup::{loaded_iframe, slide_markup};
use crate::params::MirrorConfig;

/// Reconciliation pulse period.
pub const RECONCILE_INTERVAL: Duration = Duration::from_millis(500);

/// Delay before applying a variation change, letting the storefront finish
/// its own gallery swap first.
pub const VARIATION_SETTLE: Duration = Duration::from_millis(50);

/// Inputs that drive the slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotEvent {
    /// User clicked the lazy facade.
    FacadeActivated { embed_url: String },
    /// A variation with its own video was selected.
    VariationChanged { video_url: String },
    /// Variation cleared; fall back to the product-level video.
    VariationReset,
}

/// What an event application did to the slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotOutcome {
    Updated,
    /// Event was a no-op (already-loaded facade, unchanged markup).
    Unchanged,
}

#[derive(Debug)]
pub struct GallerySlot {
    /// Server-delivered slide markup; the reset target.
    original_html: String,
    /// What the slide should currently contain.
    expected_html: String,
    /// What the slide actually contains.
    current_html: String,
    /// One-way marker; a facade activates at most once.
    loaded: bool,
    title: String,
    cfg: MirrorConfig,
}

impl GallerySlot {
    pub fn new(original_html: impl Into<String>, cfg: MirrorConfig, title: impl Into<String>) -> Self {
        let original_html = original_html.into();
        Self {
            expected_html: original_html.clone(),
            current_html: original_html.clone(),
            original_html,
            loaded: false,
            title: title.into(),
            cfg,
        }
    }

    pub fn current_html(&self) -> &str {
        &self.current_html
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Apply an event immediately, without settle delays.
    pub fn apply(&mut self, event: &SlotEvent) -> SlotOutcome {
        match event {
            SlotEvent::FacadeActivated { embed_url } => {
                if self.loaded {
                    debug!("Ignoring facade activation on an already-loaded slot");
                    return SlotOutcome::Unchanged;
                }
                self.loaded = true;
                self.set_expected(loaded_iframe(embed_url, &self.title))
            }
            SlotEvent::VariationChanged { video_url } => {
                let parsed = classify_url(video_url);
                match slide_markup(&parsed, &self.cfg, &self.title) {
                    // Unrenderable variation URL keeps the current slide.
                    None => SlotOutcome::Unchanged,
                    Some(html) => {
                        self.loaded = false;
                        self.set_expected(html)
                    }
                }
            }
            SlotEvent::VariationReset => {
                self.loaded = false;
                self.set_expected(self.original_html.clone())
            }
        }
    }

    /// Apply a variation event after the settle delay.
    pub async fn apply_settled(&mut self, event: &SlotEvent) -> SlotOutcome {
        if matches!(
            event,
            SlotEvent::VariationChanged { .. } | SlotEvent::VariationReset
        ) {
            sleep(VARIATION_SETTLE).await;
        }
        self.apply(event)
    }

    /// Record markup written into the slide by something other than us.
    pub fn observe_external(&mut self, html: impl Into<String>) {
        self.current_html = html.into();
    }

    /// One reconciliation pulse: restore the expected markup if the live
    /// slide has drifted.
    pub fn reconcile(&mut self) -> SlotOutcome {
        if self.current_html != self.expected_html {
            debug!("Slot drifted from expected markup, restoring");
            self.current_html = self.expected_html.clone();
            SlotOutcome::Updated
        } else {
            SlotOutcome::Unchanged
        }
    }

    /// Run `ticks` reconciliation pulses at the standard interval.
    pub async fn reconcile_for(&mut self, ticks: u32) {
        let mut pulse = interval(RECONCILE_INTERVAL);
        // The first tick of a tokio interval fires immediately; skip it so
        // every reconcile waits a full period.
        pulse.tick().await;
        for _ in 0..ticks {
            pulse.tick().await;
            self.reconcile();
        }
    }

    fn set_expected(&mut self, html: String) -> SlotOutcome {
        if self.expected_html == html && self.current_html == html {
            return SlotOutcome::Unchanged;
        }
        self.expected_html = html.clone();
        self.current_html = html;
        SlotOutcome::Updated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot() -> GallerySlot {
        GallerySlot::new(
            r#"<div class="tvpg-video-facade" data-embed-url="https://www.youtube.com/embed/a?rel=0"></div>"#,
            MirrorConfig::default(),
            "Demo",
        )
    }

    #[test]
    fn test_facade_activation_is_one_way() {
        let mut slot = slot();
        let event = SlotEvent::FacadeActivated {
            embed_url: "https://www.youtube.com/embed/a?rel=0".to_string(),
        };

        assert_eq!(slot.apply(&event), SlotOutcome::Updated);
        assert!(slot.is_loaded());
        assert!(slot.current_html().starts_with("<iframe"));

        let after_first = slot.current_html().to_string();
        // Double-click, re-dispatched event: nothing changes.
        assert_eq!(slot.apply(&event), SlotOutcome::Unchanged);
        assert_eq!(slot.current_html(), after_first);
    }

    #[test]
    fn test_variation_change_then_reset() {
        let mut slot = slot();
        let outcome = slot.apply(&SlotEvent::VariationChanged {
            video_url: "https://vimeo.com/76979871".to_string(),
        });
        assert_eq!(outcome, SlotOutcome::Updated);
        assert!(slot.current_html().contains("player.vimeo.com/video/76979871"));

        slot.apply(&SlotEvent::VariationReset);
        assert!(slot.current_html().contains("tvpg-video-facade"));
        assert!(!slot.is_loaded());
    }

    #[test]
    fn test_unrenderable_variation_url_keeps_slide() {
        let mut slot = slot();
        let before = slot.current_html().to_string();
        let outcome = slot.apply(&SlotEvent::VariationChanged {
            video_url: "https://example.com/not-a-video".to_string(),
        });
        assert_eq!(outcome, SlotOutcome::Unchanged);
        assert_eq!(slot.current_html(), before);
    }

    #[test]
    fn test_reconcile_restores_clobbered_slide() {
        let mut slot = slot();
        let expected = slot.current_html().to_string();

        slot.observe_external("<div class=\"gallery-clone\"></div>");
        assert_eq!(slot.reconcile(), SlotOutcome::Updated);
        assert_eq!(slot.current_html(), expected);

        // Stable slide: pulse is a no-op.
        assert_eq!(slot.reconcile(), SlotOutcome::Unchanged);
    }

    #[tokio::test(start_paused = true)]
    async fn test_clobbered_variation_video_restored_within_one_pulse() {
        // A variation with its own video is showing; a competing script
        // swaps the slide for a plain image. The next pulse restores it.
        let mut slot = slot();
        slot.apply_settled(&SlotEvent::VariationChanged {
            video_url: "https://vimeo.com/76979871".to_string(),
        })
        .await;
        let expected = slot.current_html().to_string();
        assert!(expected.contains("player.vimeo.com/video/76979871"));

        slot.observe_external(r#"<img src="variation-swatch.jpg">"#);
        slot.reconcile_for(1).await;
        assert_eq!(slot.current_html(), expected);
    }

    #[tokio::test(start_paused = true)]
    async fn test_variation_waits_for_settle() {
        let mut slot = slot();
        let event = SlotEvent::VariationChanged {
            video_url: "https://vimeo.com/76979871".to_string(),
        };

        let start = tokio::time::Instant::now();
        slot.apply_settled(&event).await;
        assert!(start.elapsed() >= VARIATION_SETTLE);
        assert!(slot.current_html().contains("76979871"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_reconcile_pulse_timing() {
        let mut slot = slot();
        slot.observe_external("clobbered");

        let start = tokio::time::Instant::now();
        slot.reconcile_for(3).await;
        assert_eq!(start.elapsed(), RECONCILE_INTERVAL * 3);
        assert!(slot.current_html().contains("tvpg-video-facade"));
    }
}
