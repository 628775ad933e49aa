//! Client-side markup strings.
//!
//! The client swaps markup into the video slide: a live iframe when a
//! facade is activated, and whole-slide replacements on variation change.

use crate::classify::{MirrorParsed, MirrorProvider};
use crate::params::{file_playback_attrs, main_embed_url, MirrorConfig};

fn escape_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Live iframe that replaces an activated facade.
pub fn loaded_iframe(embed_url: &str, title: &str) -> String {
    format!(
        r#"<iframe src="{}" frameborder="0" allowfullscreen title="{}" class="tvpg-video-iframe" style="width:100%;height:100%;"></iframe>"#,
        escape_attr(embed_url),
        escape_attr(title),
    )
}

/// Full slide markup for a video URL, as built on variation change.
pub fn slide_markup(parsed: &MirrorParsed, cfg: &MirrorConfig, title: &str) -> Option<String> {
    match parsed.provider {
        MirrorProvider::Youtube | MirrorProvider::Vimeo => {
            let url = main_embed_url(parsed, cfg)?;
            Some(loaded_iframe(&url, title))
        }
        MirrorProvider::File => {
            let src = parsed.url.as_deref()?;
            let attrs = file_playback_attrs(cfg);
            let mut flags = String::from(" playsinline");
            if attrs.controls {
                flags.push_str(" controls");
            }
            if attrs.loop_playback {
                flags.push_str(" loop");
            }
            if attrs.muted {
                flags.push_str(" muted");
            }
            if attrs.autoplay {
                flags.push_str(" autoplay");
            }
            Some(format!(
                r#"<video src="{}" class="tvpg-video-file"{}></video>"#,
                escape_attr(src),
                flags,
            ))
        }
        MirrorProvider::Tiktok | MirrorProvider::Instagram => {
            // Script embeds are injected by the provider script; the slide
            // only carries the blockquote shell.
            let permalink = match parsed.provider {
                MirrorProvider::Instagram => {
                    format!("https://www.instagram.com/p/{}/", parsed.id.as_deref()?)
                }
                _ => parsed.url.clone()?,
            };
            Some(format!(
                r#"<blockquote cite="{}" data-video-id="{}"></blockquote>"#,
                escape_attr(&permalink),
                escape_attr(parsed.id.as_deref()?),
            ))
        }
        MirrorProvider::Unrecognized => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify_url;

    #[test]
    fn test_loaded_iframe_escapes_title() {
        let html = loaded_iframe("https://www.youtube.com/embed/x?rel=0", "a\"b");
        assert!(html.contains("a&quot;b"));
        assert!(!html.contains("a\"b\""));
    }

    #[test]
    fn test_slide_markup_for_file() {
        let parsed = classify_url("https://example.com/clip.mp4");
        let cfg = MirrorConfig {
            autoplay: true,
            ..MirrorConfig::default()
        };
        let html = slide_markup(&parsed, &cfg, "Demo").unwrap();
        assert!(html.contains(" autoplay"));
        assert!(html.contains(" muted"));
        assert!(html.contains(" controls"));
    }

    #[test]
    fn test_slide_markup_unrecognized_is_none() {
        let parsed = classify_url("https://example.com/nope");
        assert_eq!(slide_markup(&parsed, &MirrorConfig::default(), "x"), None);
    }
}
