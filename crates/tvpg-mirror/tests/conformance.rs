//! Server/client conformance vectors.
//!
//! The server crates and this crate implement the same classification and
//! parameter logic twice, on purpose. These tests pin the two
//! implementations to identical observable output: same provider, same id,
//! same embed URL parameter set, same boolean playback attributes.

use std::collections::{HashMap, HashSet};

use tvpg_mirror::{
    classify_url, file_playback_attrs, live_thumb_url, main_embed_url, MirrorConfig,
    GallerySlot, SlotEvent, SlotOutcome,
};
use tvpg_models::{build_params, classify, EmbedParams, PlaybackConfig, RenderMode};

const URL_VECTORS: &[&str] = &[
    "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
    "https://www.youtube.com/watch?feature=shared&v=dQw4w9WgXcQ",
    "https://youtu.be/dQw4w9WgXcQ?t=42",
    "https://www.youtube.com/embed/dQw4w9WgXcQ",
    "https://www.youtube.com/v/dQw4w9WgXcQ",
    "https://www.youtube.com/vi/dQw4w9WgXcQ",
    "https://www.youtube.com/shorts/dQw4w9WgXcQ",
    "https://www.youtube.com/user/chan/u/1/dQw4w9WgXcQ",
    "https://www.youtube-nocookie.com/embed/dQw4w9WgXcQ",
    "https://vimeo.com/76979871",
    "https://vimeo.com/76979871?share=copy",
    "https://vimeo.com/channels/staffpicks/76979871",
    "https://vimeo.com/groups/shortfilms/videos/76979871",
    "https://vimeo.com/album/123/video/76979871",
    "https://vimeo.com/video/76979871",
    "https://www.tiktok.com/@someuser/video/7106594312292453675",
    "https://vm.tiktok.com/ZMabc123/",
    "https://www.instagram.com/reel/C1aB2cD3eF4/",
    "https://www.instagram.com/p/C1aB2cD3eF4/",
    "https://example.com/media/clip.mp4",
    "https://example.com/media/clip.webm",
    "https://example.com/media/clip.ogg?cb=1",
    // Non-matches and rejections.
    "",
    "   ",
    "javascript:alert(1)",
    "data:text/html,<b>x</b>",
    "https://example.com/page.html",
    "https://vimeo.com/abc123",
    "https://www.youtube.com/watch?v=",
];

fn all_configs() -> Vec<(PlaybackConfig, MirrorConfig)> {
    (0..16u8)
        .map(|bits| {
            let autoplay = bits & 1 != 0;
            let loop_playback = bits & 2 != 0;
            let show_controls = bits & 4 != 0;
            let mute_autoplay = bits & 8 != 0;
            (
                PlaybackConfig {
                    autoplay,
                    loop_playback,
                    show_controls,
                    mute_autoplay,
                    ..PlaybackConfig::default()
                },
                MirrorConfig {
                    autoplay,
                    loop_playback,
                    show_controls,
                    mute_autoplay,
                },
            )
        })
        .collect()
}

fn split_url(url: &str) -> (String, HashSet<(String, String)>) {
    match url.split_once('?') {
        Some((base, qs)) => {
            let params = qs
                .split('&')
                .filter(|p| !p.is_empty())
                .map(|pair| {
                    let (k, v) = pair.split_once('=').unwrap_or((pair, ""));
                    (k.to_string(), v.to_string())
                })
                .collect();
            (base.to_string(), params)
        }
        None => (url.to_string(), HashSet::new()),
    }
}

#[test]
fn test_classification_agrees_on_all_vectors() {
    for url in URL_VECTORS {
        let server = classify(url);
        let client = classify_url(url);

        assert_eq!(
            server.provider.to_string(),
            client.provider.tag(),
            "provider mismatch for {:?}",
            url
        );
        assert_eq!(server.id, client.id, "id mismatch for {:?}", url);
    }
}

#[test]
fn test_main_embed_urls_agree_across_all_configs() {
    for url in URL_VECTORS {
        for (server_cfg, client_cfg) in all_configs() {
            let server_url = build_params(&classify(url), &server_cfg, RenderMode::MainSlide)
                .and_then(|p| p.embed_url());
            let client_url = main_embed_url(&classify_url(url), &client_cfg);

            match (server_url, client_url) {
                (None, None) => {}
                (Some(s), Some(c)) => {
                    assert_eq!(split_url(&s), split_url(&c), "embed mismatch for {:?}", url);
                }
                (s, c) => panic!("presence mismatch for {:?}: {:?} vs {:?}", url, s, c),
            }
        }
    }
}

#[test]
fn test_live_thumbnail_urls_agree() {
    for url in ["https://youtu.be/dQw4w9WgXcQ", "https://vimeo.com/76979871"] {
        let server = build_params(
            &classify(url),
            &PlaybackConfig::default(),
            RenderMode::LiveThumbnail,
        )
        .unwrap()
        .embed_url()
        .unwrap();
        let client = live_thumb_url(&classify_url(url)).unwrap();
        assert_eq!(split_url(&server), split_url(&client), "url: {}", url);
    }
}

#[test]
fn test_file_attributes_agree_across_all_configs() {
    let url = "https://example.com/media/clip.mp4";
    for (server_cfg, client_cfg) in all_configs() {
        let server = build_params(&classify(url), &server_cfg, RenderMode::MainSlide).unwrap();
        let client = file_playback_attrs(&client_cfg);

        match server {
            EmbedParams::FileAttrs {
                controls,
                loop_playback,
                muted,
                autoplay,
                ..
            } => {
                assert_eq!(controls, client.controls);
                assert_eq!(loop_playback, client.loop_playback);
                assert_eq!(muted, client.muted);
                assert_eq!(autoplay, client.autoplay);
            }
            other => panic!("expected FileAttrs, got {:?}", other),
        }
    }
}

#[test]
fn test_config_truthiness_matches_server_deserialization() {
    // Server reads JSON with loose booleans; client reads data attributes.
    let server: PlaybackConfig = serde_json::from_str(
        r#"{"autoplay":"1","loop":"true","show_controls":"0","mute_autoplay":true}"#,
    )
    .unwrap();

    let mut attrs = HashMap::new();
    attrs.insert("autoplay".to_string(), "1".to_string());
    attrs.insert("loop".to_string(), "true".to_string());
    attrs.insert("controls".to_string(), "0".to_string());
    attrs.insert("mute".to_string(), "true".to_string());
    let client = MirrorConfig::from_attrs(&attrs);

    assert_eq!(server.autoplay, client.autoplay);
    assert_eq!(server.loop_playback, client.loop_playback);
    assert_eq!(server.show_controls, client.show_controls);
    assert_eq!(server.mute_autoplay, client.mute_autoplay);
}

#[test]
fn test_facade_activation_end_to_end() {
    // Server renders a facade, the client activates it: the resulting iframe
    // must point at the same embed URL the server advertised, and a second
    // activation must change nothing.
    let raw = "https://www.youtube.com/watch?v=dQw4w9WgXcQ";
    let server_cfg = PlaybackConfig {
        autoplay: true,
        ..PlaybackConfig::default()
    };
    let fragment = tvpg_render::render_url(
        raw,
        &server_cfg,
        RenderMode::MainSlide,
        None,
        "Demo Product",
    );
    assert!(fragment.is_lazy_facade);
    let advertised = fragment.embed_url.expect("facade advertises an embed url");

    let mut slot = GallerySlot::new(
        fragment.html,
        MirrorConfig {
            autoplay: true,
            ..MirrorConfig::default()
        },
        "Demo Product",
    );
    let event = SlotEvent::FacadeActivated {
        embed_url: advertised.clone(),
    };

    assert_eq!(slot.apply(&event), SlotOutcome::Updated);
    assert!(slot.current_html().contains("<iframe"));

    // The client would have derived the same URL on its own.
    let derived = main_embed_url(
        &classify_url(raw),
        &MirrorConfig {
            autoplay: true,
            ..MirrorConfig::default()
        },
    )
    .unwrap();
    assert_eq!(split_url(&advertised), split_url(&derived));

    let html_after_first = slot.current_html().to_string();
    assert_eq!(slot.apply(&event), SlotOutcome::Unchanged);
    assert_eq!(slot.current_html(), html_after_first);
}
