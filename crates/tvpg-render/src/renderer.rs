//! Server-side markup generation.
//!
//! Consumes classification and parameter results from `tvpg-models` and
//! produces gallery fragments: lazy facades for iframe providers, live
//! thumbnail iframes, native video elements and script-embed placeholders.
//! All markup goes through the allow-list builder in [`crate::html`].

use tracing::warn;

use tvpg_models::{
    build_params, reject_input, EmbedParams, InputRejection, ParsedVideo, PlaybackConfig,
    Provider, RenderMode, VideoSizing,
};

use crate::fragment::EmbedFragment;
use crate::html::Element;

/// Inline play-button glyph for the lazy facade. Static markup only; never
/// interpolated with user data.
pub const PLAY_ICON_SVG: &str = concat!(
    r##"<svg viewBox="0 0 68 48" width="68" height="48" aria-hidden="true">"##,
    r##"<path d="M66.52 7.74a8 8 0 0 0-5.63-5.66C55.93.9 34 .9 34 .9s-21.93 0-26.89 1.18"##,
    r##"a8 8 0 0 0-5.63 5.66A83.2 83.2 0 0 0 .36 24a83.2 83.2 0 0 0 1.12 16.26"##,
    r##"a8 8 0 0 0 5.63 5.66C12.07 47.1 34 47.1 34 47.1s21.93 0 26.89-1.18"##,
    r##"a8 8 0 0 0 5.63-5.66A83.2 83.2 0 0 0 67.64 24a83.2 83.2 0 0 0-1.12-16.26z" "##,
    r##"fill="#212121" fill-opacity="0.8"/>"##,
    r##"<path d="M45 24 27 14v20z" fill="#fff"/></svg>"##
);

const EMPTY_TEXT: &str = "No video selected";
const INVALID_PROTOCOL_TEXT: &str = "Invalid Protocol";
const INVALID_URL_TEXT: &str = "Invalid Video URL";

/// Render a raw URL straight to a fragment.
///
/// Classification failures produce a visible placeholder whose text
/// distinguishes empty input, unsafe schemes and unmatched URLs.
pub fn render_url(
    raw_url: &str,
    cfg: &PlaybackConfig,
    mode: RenderMode,
    thumbnail_url: Option<&str>,
    title: &str,
) -> EmbedFragment {
    match reject_input(raw_url) {
        Some(InputRejection::Empty) => return render_placeholder(EMPTY_TEXT),
        Some(InputRejection::UnsafeScheme) => {
            warn!(url = %raw_url, "Refusing to render unsafe URL scheme");
            return render_placeholder(INVALID_PROTOCOL_TEXT);
        }
        None => {}
    }

    let parsed = tvpg_models::classify(raw_url);
    render(&parsed, cfg, mode, thumbnail_url, title)
}

/// Render an already classified video.
pub fn render(
    parsed: &ParsedVideo,
    cfg: &PlaybackConfig,
    mode: RenderMode,
    thumbnail_url: Option<&str>,
    title: &str,
) -> EmbedFragment {
    let Some(params) = build_params(parsed, cfg, mode) else {
        return render_placeholder(INVALID_URL_TEXT);
    };

    match &params {
        EmbedParams::Youtube { .. } | EmbedParams::Vimeo { .. } => {
            let embed_url = params.embed_url().unwrap_or_default();
            match mode {
                RenderMode::MainSlide => {
                    facade_fragment(parsed.provider, &embed_url, thumbnail_url, title, cfg)
                }
                RenderMode::LiveThumbnail => {
                    live_thumbnail_fragment(parsed.provider, &embed_url, title)
                }
            }
        }
        EmbedParams::EmbedScript {
            provider,
            id,
            permalink,
            script_src,
        } => script_embed_fragment(*provider, id, permalink, script_src),
        EmbedParams::FileAttrs {
            url,
            controls,
            loop_playback,
            muted,
            autoplay,
        } => file_fragment(
            url,
            *controls,
            *loop_playback,
            *muted,
            *autoplay,
            mode,
            thumbnail_url,
            title,
            cfg.video_sizing,
        ),
    }
}

/// Visible fallback for input that cannot be rendered.
pub fn render_placeholder(message: &str) -> EmbedFragment {
    let html = Element::new("div")
        .attr("class", "tvpg-video-placeholder")
        .attr("role", "img")
        .attr("aria-label", message)
        .child(Element::new("p").attr("class", "tvpg-placeholder-text").text(message))
        .build();
    EmbedFragment::placeholder(html)
}

fn sizing_class(sizing: VideoSizing) -> &'static str {
    match sizing {
        VideoSizing::Contain => "tvpg-video-contain",
        VideoSizing::Cover => "tvpg-video-cover",
    }
}

/// Click-to-load facade: thumbnail plus play button, embed URL stashed in a
/// data attribute. The iframe itself is created client-side on activation.
fn facade_fragment(
    provider: Provider,
    embed_url: &str,
    thumbnail_url: Option<&str>,
    title: &str,
    cfg: &PlaybackConfig,
) -> EmbedFragment {
    let mut facade = Element::new("div")
        .attr("class", &format!("tvpg-video-facade {}", sizing_class(cfg.video_sizing)))
        .url_attr("data-embed-url", embed_url)
        .attr("data-provider", &provider.to_string())
        .attr("role", "button")
        .attr("aria-label", &format!("Play video: {}", title));

    facade = match thumbnail_url {
        Some(thumb) => facade.child(
            Element::new("img")
                .url_attr("src", thumb)
                .attr("alt", title)
                .attr("class", "tvpg-facade-thumb")
                .attr("loading", "lazy"),
        ),
        None => facade.child(Element::new("div").attr("class", "tvpg-facade-placeholder")),
    };

    facade = facade.child(
        Element::new("button")
            .attr("type", "button")
            .attr("class", "tvpg-play-button")
            .attr("aria-label", "Play video")
            .static_raw(PLAY_ICON_SVG),
    );

    EmbedFragment {
        html: facade.build(),
        provider,
        embed_url: Some(embed_url.to_string()),
        is_lazy_facade: true,
    }
}

/// Autoplaying muted thumbnail embed. Non-interactive: pointer events are
/// disabled so clicks fall through to the gallery thumbnail.
fn live_thumbnail_fragment(provider: Provider, embed_url: &str, title: &str) -> EmbedFragment {
    let html = Element::new("iframe")
        .url_attr("src", embed_url)
        .attr("frameborder", "0")
        .attr("loading", "lazy")
        .attr("title", title)
        .attr("class", "tvpg-live-thumb")
        .attr(
            "style",
            "width:100%;height:100%;object-fit:cover;pointer-events:none;",
        )
        .build();

    EmbedFragment {
        html,
        provider,
        embed_url: Some(embed_url.to_string()),
        is_lazy_facade: false,
    }
}

fn script_embed_fragment(
    provider: Provider,
    id: &str,
    permalink: &str,
    script_src: &str,
) -> EmbedFragment {
    let blockquote = match provider {
        Provider::Tiktok => Element::new("blockquote")
            .attr("class", "tiktok-embed")
            .url_attr("cite", permalink)
            .attr("data-video-id", id)
            .attr("style", "max-width:605px;min-width:325px;")
            .child(Element::new("section")),
        _ => Element::new("blockquote")
            .attr("class", "instagram-media")
            .url_attr("data-instgrm-permalink", permalink)
            .attr("data-instgrm-version", "14"),
    };

    let html = Element::new("div")
        .attr("class", "tvpg-script-embed")
        .attr("data-provider", &provider.to_string())
        .child(blockquote)
        .child(Element::new("script").flag("async").url_attr("src", script_src))
        .build();

    EmbedFragment {
        html,
        provider,
        embed_url: None,
        is_lazy_facade: false,
    }
}

#[allow(clippy::too_many_arguments)]
fn file_fragment(
    url: &str,
    controls: bool,
    loop_playback: bool,
    muted: bool,
    autoplay: bool,
    mode: RenderMode,
    thumbnail_url: Option<&str>,
    title: &str,
    sizing: VideoSizing,
) -> EmbedFragment {
    let mut video = Element::new("video")
        .url_attr("src", url)
        .attr("class", &format!("tvpg-video-file {}", sizing_class(sizing)))
        .attr("aria-label", title)
        .flag_if("controls", controls)
        .flag_if("loop", loop_playback)
        .flag_if("muted", muted)
        .flag_if("autoplay", autoplay)
        .flag("playsinline");

    if let Some(poster) = thumbnail_url {
        video = video.url_attr("poster", poster);
    }

    // Live thumbnails stay out of the tab order; main slides are focusable.
    video = match mode {
        RenderMode::MainSlide => video.attr("tabindex", "0"),
        RenderMode::LiveThumbnail => video
            .attr("tabindex", "-1")
            .attr("style", "pointer-events:none;"),
    };

    EmbedFragment {
        html: video.build(),
        provider: Provider::File,
        embed_url: None,
        is_lazy_facade: false,
    }
}
