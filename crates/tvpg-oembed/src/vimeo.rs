//! Vimeo oEmbed client.
//!
//! Vimeo has no predictable thumbnail URL pattern, so resolution requires a
//! remote metadata lookup. Requests are time-bounded; callers treat any
//! error as a cache-miss-equivalent "no thumbnail".

use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use crate::error::{OembedError, OembedResult};

/// Public Vimeo oEmbed endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://vimeo.com/api/oembed.json";

/// Upper bound on the remote lookup so a slow provider cannot stall a render.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Deserialize)]
struct OembedResponse {
    thumbnail_url: Option<String>,
}

/// Fetch the thumbnail URL for a Vimeo video id.
pub async fn fetch_thumbnail(
    client: &reqwest::Client,
    endpoint: &str,
    video_id: &str,
) -> OembedResult<String> {
    let video_url = format!("https://vimeo.com/{}", video_id);
    let request_url = format!("{}?url={}", endpoint, urlencoding::encode(&video_url));

    debug!(video_id = %video_id, "Fetching Vimeo oEmbed metadata");

    let response = client
        .get(&request_url)
        .timeout(REQUEST_TIMEOUT)
        .send()
        .await?
        .error_for_status()?;

    let body: OembedResponse = response
        .json()
        .await
        .map_err(|e| OembedError::Malformed(e.to_string()))?;

    match body.thumbnail_url {
        Some(url) if !url.is_empty() => Ok(url),
        _ => Err(OembedError::MissingThumbnail),
    }
}
