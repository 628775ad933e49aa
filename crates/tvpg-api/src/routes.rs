//! API routes.

use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use tower_http::limit::RequestBodyLimitLayer;

use crate::handlers::gallery::{get_gallery, get_structured_data, preview};
use crate::handlers::health;
use crate::handlers::products::{get_variation_data, save_product_video, save_variation_video};
use crate::handlers::settings::{get_settings, update_settings};
use crate::middleware::{cors_layer, request_id, request_logging, security_headers};
use crate::state::AppState;

/// Create the API router.
pub fn create_router(state: AppState) -> Router {
    let settings_routes = Router::new()
        .route("/settings", get(get_settings))
        .route("/settings", post(update_settings));

    let product_routes = Router::new()
        .route("/products/:product_id/video", post(save_product_video))
        .route(
            "/products/:product_id/variations/:variation_id/video",
            post(save_variation_video),
        )
        .route(
            "/products/:product_id/variations/:variation_id",
            get(get_variation_data),
        )
        .route("/products/:product_id/gallery", get(get_gallery))
        .route(
            "/products/:product_id/structured-data",
            get(get_structured_data),
        );

    let preview_routes = Router::new().route("/preview", post(preview));

    let api_routes = Router::new()
        .merge(settings_routes)
        .merge(product_routes)
        .merge(preview_routes);

    let health_routes = Router::new()
        .route("/health", get(health))
        .route("/healthz", get(health));

    Router::new()
        .nest("/api", api_routes)
        .merge(health_routes)
        .layer(RequestBodyLimitLayer::new(state.config.max_body_size))
        .layer(middleware::from_fn(security_headers))
        .layer(middleware::from_fn(request_id))
        .layer(middleware::from_fn(request_logging))
        .layer(cors_layer(&state.config.cors_origins))
        .with_state(state)
}
