//! Gallery assembly, structured data and admin preview handlers.

use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use tvpg_models::{assemble_slides, classify, RenderMode, Slide, VideoObjectSchema};
use tvpg_render::render_url;

use crate::error::{ApiError, ApiResult};
use crate::security::require_admin;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct GalleryQuery {
    #[serde(default)]
    pub main_image_id: Option<u64>,
    /// Comma-separated gallery attachment ids
    #[serde(default)]
    pub image_ids: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

#[derive(Serialize)]
pub struct GalleryResponse {
    pub success: bool,
    pub slides: Vec<Slide>,
    /// Rendered markup for the video slide, absent when the product has no
    /// video.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_html: Option<String>,
}

fn parse_id_list(raw: Option<&str>) -> Result<Vec<u64>, ApiError> {
    let Some(raw) = raw else {
        return Ok(Vec::new());
    };
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse()
                .map_err(|_| ApiError::bad_request(format!("Invalid attachment id: {}", s)))
        })
        .collect()
}

/// Assemble the slide list for a product and render its video slide.
pub async fn get_gallery(
    State(state): State<AppState>,
    Path(product_id): Path<u64>,
    Query(query): Query<GalleryQuery>,
) -> ApiResult<Json<GalleryResponse>> {
    let video = state.products.get_product(product_id).await?;
    let image_ids = parse_id_list(query.image_ids.as_deref())?;
    let snap = state.settings.get().await;

    let slides = assemble_slides(
        query.main_image_id,
        &image_ids,
        video.video_url.as_deref(),
        video.thumb_url.as_deref(),
        snap.config.video_position,
    );

    let video_html = match video.video_url.as_deref() {
        Some(url) => {
            let parsed = classify(url);
            let thumb = state
                .thumbnails
                .resolve(&parsed, video.thumb_url.as_deref())
                .await;
            let title = query.title.as_deref().unwrap_or("Product video");
            // Stored URLs go through the same input rejection as live ones;
            // an unsafe scheme that slipped into storage still renders the
            // protocol placeholder, never markup.
            Some(
                render_url(url, &snap.config, RenderMode::MainSlide, thumb.as_deref(), title)
                    .html,
            )
        }
        None => None,
    };

    Ok(Json(GalleryResponse {
        success: true,
        slides,
        video_html,
    }))
}

#[derive(Deserialize)]
pub struct StructuredDataQuery {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Product publication timestamp, RFC 3339
    #[serde(default)]
    pub published: Option<DateTime<Utc>>,
}

/// Emit the JSON-LD VideoObject block for a product's video.
///
/// 404 when the product has no video or the video has no stable embed URL
/// (script-embed providers).
pub async fn get_structured_data(
    State(state): State<AppState>,
    Path(product_id): Path<u64>,
    Query(query): Query<StructuredDataQuery>,
) -> ApiResult<Json<VideoObjectSchema>> {
    let video = state.products.get_product(product_id).await?;
    let url = video
        .video_url
        .as_deref()
        .ok_or_else(|| ApiError::not_found("Product has no video"))?;

    let parsed = classify(url);
    let thumb = state
        .thumbnails
        .resolve(&parsed, video.thumb_url.as_deref())
        .await;

    let schema = VideoObjectSchema::build(
        &parsed,
        &query.name,
        query.description.as_deref().unwrap_or(""),
        query.published.unwrap_or_else(Utc::now),
        thumb,
    )
    .ok_or_else(|| ApiError::not_found("Video has no structured data representation"))?;

    Ok(Json(schema))
}

#[derive(Deserialize)]
pub struct PreviewRequest {
    pub video_url: String,
    #[serde(default)]
    pub thumb_url: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

#[derive(Serialize)]
pub struct PreviewResponse {
    pub success: bool,
    pub provider: String,
    pub html: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub embed_url: Option<String>,
}

/// Render a preview fragment for the admin edit screen (admin only).
///
/// Uses the saved settings so the preview matches what the storefront will
/// show, including the placeholder texts for unusable URLs.
pub async fn preview(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<PreviewRequest>,
) -> ApiResult<Json<PreviewResponse>> {
    require_admin(&state, &headers)?;

    let snap = state.settings.get().await;
    let parsed = classify(&request.video_url);
    let thumb = state
        .thumbnails
        .resolve(&parsed, request.thumb_url.as_deref())
        .await;

    let fragment = render_url(
        &request.video_url,
        &snap.config,
        RenderMode::MainSlide,
        thumb.as_deref(),
        request.title.as_deref().unwrap_or("Preview"),
    );

    Ok(Json(PreviewResponse {
        success: true,
        provider: fragment.provider.to_string(),
        html: fragment.html,
        embed_url: fragment.embed_url,
    }))
}
