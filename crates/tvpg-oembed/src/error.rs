//! oEmbed error types.

use thiserror::Error;

pub type OembedResult<T> = Result<T, OembedError>;

#[derive(Debug, Error)]
pub enum OembedError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Malformed oEmbed response: {0}")]
    Malformed(String),

    #[error("oEmbed response missing thumbnail_url")]
    MissingThumbnail,
}
