//! Product and variation video handlers.

use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

use tvpg_models::{classify, Provider, RenderMode};
use tvpg_render::render_url;
use tvpg_store::{ProductVideo, VariationVideo};

use crate::error::ApiResult;
use crate::security::require_admin;
use crate::state::AppState;

#[derive(Serialize)]
pub struct SavedResponse {
    pub success: bool,
}

/// Store a product's video metadata (admin only).
pub async fn save_product_video(
    State(state): State<AppState>,
    Path(product_id): Path<u64>,
    headers: HeaderMap,
    Json(video): Json<ProductVideo>,
) -> ApiResult<Json<SavedResponse>> {
    require_admin(&state, &headers)?;

    state.products.upsert_product(product_id, video).await;
    info!(product_id, "Saved product video");
    Ok(Json(SavedResponse { success: true }))
}

/// Store a variation's video metadata (admin only).
pub async fn save_variation_video(
    State(state): State<AppState>,
    Path((product_id, variation_id)): Path<(u64, u64)>,
    headers: HeaderMap,
    Json(video): Json<VariationVideo>,
) -> ApiResult<Json<SavedResponse>> {
    require_admin(&state, &headers)?;

    state
        .products
        .set_variation(product_id, variation_id, video)
        .await?;
    info!(product_id, variation_id, "Saved variation video");
    Ok(Json(SavedResponse { success: true }))
}

#[derive(Deserialize)]
pub struct VariationDataQuery {
    #[serde(default)]
    pub title: Option<String>,
}

/// Extra fields merged into the storefront's variation payload.
#[derive(Serialize)]
pub struct VariationDataResponse {
    pub success: bool,
    /// Main-slide markup for the variation's effective video, empty when
    /// the variation has no video at all.
    pub tvpg_video_html: String,
    /// Live thumbnail markup, empty for providers without an iframe embed.
    pub tvpg_video_thumb_html: String,
}

/// Resolve and render the video a variation should show.
pub async fn get_variation_data(
    State(state): State<AppState>,
    Path((product_id, variation_id)): Path<(u64, u64)>,
    Query(query): Query<VariationDataQuery>,
) -> ApiResult<Json<VariationDataResponse>> {
    let effective = state
        .products
        .effective_video(product_id, Some(variation_id))
        .await?;

    let Some(url) = effective.video_url.as_deref() else {
        // Outside production the empty slot carries a comment so storefront
        // integrators can tell "no video configured" from a render failure.
        let html = if state.config.is_production() {
            String::new()
        } else {
            format!(
                "<!-- tvpg: no video configured for product {} variation {} -->",
                product_id, variation_id
            )
        };
        return Ok(Json(VariationDataResponse {
            success: true,
            tvpg_video_html: html,
            tvpg_video_thumb_html: String::new(),
        }));
    };

    let snap = state.settings.get().await;
    let title = query.title.as_deref().unwrap_or("Product video");

    let parsed = classify(url);
    let thumb = state
        .thumbnails
        .resolve(&parsed, effective.thumb_url.as_deref())
        .await;

    // render_url re-runs input rejection so a stored unsafe scheme renders
    // the protocol placeholder instead of passing through as unrecognized.
    let main = render_url(url, &snap.config, RenderMode::MainSlide, thumb.as_deref(), title);
    // Script-embed providers have no thumbnail-sized rendition.
    let live_html = match parsed.provider {
        Provider::Youtube | Provider::Vimeo | Provider::File => {
            render_url(
                url,
                &snap.config,
                RenderMode::LiveThumbnail,
                thumb.as_deref(),
                title,
            )
            .html
        }
        _ => String::new(),
    };

    Ok(Json(VariationDataResponse {
        success: true,
        tvpg_video_html: main.html,
        tvpg_video_thumb_html: live_html,
    }))
}
