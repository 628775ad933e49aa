//! API integration tests.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use tvpg_api::{create_router, ApiConfig, AppState};

const ADMIN_TOKEN: &str = "test-admin-token";

fn test_router() -> axum::Router {
    let config = ApiConfig {
        admin_token: Some(ADMIN_TOKEN.to_string()),
        ..ApiConfig::default()
    };
    create_router(AppState::new(config))
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn json_request(method: &str, uri: &str, body: Value, admin: bool) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if admin {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", ADMIN_TOKEN));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = test_router();

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_get_settings_defaults() {
    let app = test_router();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/settings")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["version"], 1);
    assert_eq!(body["settings"]["autoplay"], false);
    assert_eq!(body["settings"]["show_controls"], true);
    assert_eq!(body["settings"]["video_position"], "second");
}

#[tokio::test]
async fn test_update_settings_requires_admin_token() {
    let app = test_router();

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/settings",
            serde_json::json!({"autoplay": "1"}),
            false,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/settings",
            serde_json::json!({"autoplay": "1", "video_sizing": "cover"}),
            true,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["settings"]["autoplay"], true);
    assert_eq!(body["settings"]["video_sizing"], "cover");
    assert_eq!(body["version"], 2);
}

#[tokio::test]
async fn test_invalid_settings_value_falls_back() {
    let app = test_router();

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/settings",
            serde_json::json!({"video_position": "middle", "loop": 1}),
            true,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    // Valid field applied, invalid one untouched.
    assert_eq!(body["settings"]["loop"], true);
    assert_eq!(body["settings"]["video_position"], "second");
}

#[tokio::test]
async fn test_gallery_flow_with_youtube_video() {
    let app = test_router();

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/products/42/video",
            serde_json::json!({"video_url": "https://www.youtube.com/watch?v=dQw4w9WgXcQ"}),
            true,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/products/42/gallery?main_image_id=7&image_ids=8,9&title=Demo")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;

    let slides = body["slides"].as_array().unwrap();
    assert_eq!(slides.len(), 4);
    // Default position splices the video in at index 1.
    assert_eq!(slides[1]["type"], "video");

    let html = body["video_html"].as_str().unwrap();
    assert!(html.contains("tvpg-video-facade"));
    assert!(html.contains("img.youtube.com/vi/dQw4w9WgXcQ"));
}

#[tokio::test]
async fn test_gallery_unknown_product_is_404() {
    let app = test_router();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/products/99/gallery")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_variation_data_uses_own_video() {
    let app = test_router();

    app.clone()
        .oneshot(json_request(
            "POST",
            "/api/products/1/video",
            serde_json::json!({"video_url": "https://youtu.be/dQw4w9WgXcQ"}),
            true,
        ))
        .await
        .unwrap();
    app.clone()
        .oneshot(json_request(
            "POST",
            "/api/products/1/variations/10/video",
            serde_json::json!({"video_url": "https://example.com/variant.mp4"}),
            true,
        ))
        .await
        .unwrap();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/products/1/variations/10")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert!(body["tvpg_video_html"]
        .as_str()
        .unwrap()
        .contains("variant.mp4"));
    assert!(!body["tvpg_video_thumb_html"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_variation_data_honors_use_same_video() {
    let app = test_router();

    app.clone()
        .oneshot(json_request(
            "POST",
            "/api/products/2/video",
            serde_json::json!({
                "video_url": "https://youtu.be/dQw4w9WgXcQ",
                "use_same_video": true
            }),
            true,
        ))
        .await
        .unwrap();
    app.clone()
        .oneshot(json_request(
            "POST",
            "/api/products/2/variations/20/video",
            serde_json::json!({"video_url": "https://example.com/other.mp4"}),
            true,
        ))
        .await
        .unwrap();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/products/2/variations/20")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let body = body_json(response).await;
    let html = body["tvpg_video_html"].as_str().unwrap();
    assert!(html.contains("dQw4w9WgXcQ"));
    assert!(!html.contains("other.mp4"));
}

#[tokio::test]
async fn test_variation_data_without_video_carries_debug_comment() {
    let app = test_router();

    app.clone()
        .oneshot(json_request(
            "POST",
            "/api/products/7/video",
            serde_json::json!({}),
            true,
        ))
        .await
        .unwrap();
    app.clone()
        .oneshot(json_request(
            "POST",
            "/api/products/7/variations/70/video",
            serde_json::json!({}),
            true,
        ))
        .await
        .unwrap();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/products/7/variations/70")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    // Development config: the empty slot is annotated for integrators.
    let html = body["tvpg_video_html"].as_str().unwrap();
    assert!(html.starts_with("<!--"));
    assert!(html.contains("product 7"));
    assert!(body["tvpg_video_thumb_html"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_stored_unsafe_scheme_renders_protocol_placeholder() {
    let app = test_router();

    // Saving is permissive; rendering is where unsafe schemes are stopped.
    app.clone()
        .oneshot(json_request(
            "POST",
            "/api/products/66/video",
            serde_json::json!({"video_url": "javascript:alert(1)"}),
            true,
        ))
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/products/66/gallery")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let html = body["video_html"].as_str().unwrap();
    assert!(html.contains("Invalid Protocol"));
    assert!(!html.contains("javascript:"));

    // Same rejection on the variation-data path.
    app.clone()
        .oneshot(json_request(
            "POST",
            "/api/products/66/variations/6/video",
            serde_json::json!({"video_url": "javascript:alert(1)"}),
            true,
        ))
        .await
        .unwrap();
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/products/66/variations/6")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let body = body_json(response).await;
    let html = body["tvpg_video_html"].as_str().unwrap();
    assert!(html.contains("Invalid Protocol"));
    assert!(!html.contains("javascript:"));
}

#[tokio::test]
async fn test_structured_data_for_youtube() {
    let app = test_router();

    app.clone()
        .oneshot(json_request(
            "POST",
            "/api/products/3/video",
            serde_json::json!({"video_url": "https://youtu.be/dQw4w9WgXcQ"}),
            true,
        ))
        .await
        .unwrap();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/products/3/structured-data?name=Demo%20Product")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["@type"], "VideoObject");
    assert_eq!(body["embedUrl"], "https://www.youtube.com/embed/dQw4w9WgXcQ");
    assert_eq!(body["name"], "Demo Product - Product Video");
}

#[tokio::test]
async fn test_structured_data_404_for_script_embed_provider() {
    let app = test_router();

    app.clone()
        .oneshot(json_request(
            "POST",
            "/api/products/4/video",
            serde_json::json!({"video_url": "https://www.tiktok.com/@user/video/7106594312292453675"}),
            true,
        ))
        .await
        .unwrap();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/products/4/structured-data?name=Demo")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_preview_renders_placeholder_for_unsafe_url() {
    let app = test_router();

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/preview",
            serde_json::json!({"video_url": "javascript:alert(1)"}),
            true,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["provider"], "unrecognized");
    assert!(body["html"].as_str().unwrap().contains("Invalid Protocol"));
}

#[tokio::test]
async fn test_security_headers_present() {
    let app = test_router();

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    let headers = response.headers();
    assert_eq!(headers.get("X-Content-Type-Options").unwrap(), "nosniff");
    assert_eq!(headers.get("X-Frame-Options").unwrap(), "DENY");
    assert!(headers.get("X-Request-ID").is_some());
}
