//! Gallery settings handlers.

use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use serde::Serialize;
use tracing::info;

use tvpg_models::PlaybackConfig;
use tvpg_store::SettingsPatch;

use crate::error::ApiResult;
use crate::security::require_admin;
use crate::state::AppState;

/// Settings response, shared by reads and writes.
#[derive(Serialize)]
pub struct SettingsResponse {
    pub success: bool,
    pub settings: PlaybackConfig,
    pub version: u64,
}

/// Get the current gallery settings.
pub async fn get_settings(State(state): State<AppState>) -> Json<SettingsResponse> {
    let snap = state.settings.get().await;
    Json(SettingsResponse {
        success: true,
        settings: snap.config,
        version: snap.version,
    })
}

/// Apply a settings patch (admin only).
///
/// Fields are validated individually; an invalid value keeps the current
/// setting rather than failing the save.
pub async fn update_settings(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(patch): Json<SettingsPatch>,
) -> ApiResult<Json<SettingsResponse>> {
    require_admin(&state, &headers)?;

    let snap = state.settings.apply(patch).await;
    info!(version = snap.version, "Gallery settings updated");

    Ok(Json(SettingsResponse {
        success: true,
        settings: snap.config,
        version: snap.version,
    }))
}
