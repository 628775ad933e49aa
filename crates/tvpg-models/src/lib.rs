//! Shared domain models for the video product gallery.
//!
//! This crate provides the pure, side-effect-free core:
//! - Video URL classification across providers
//! - Playback configuration with transport-boundary normalization
//! - Embed parameter derivation per provider
//! - Gallery slide assembly (video position splice)
//! - VideoObject structured-data serialization

pub mod embed;
pub mod gallery;
pub mod playback;
pub mod provider;
pub mod schema;

// Re-export common types
pub use embed::{build_params, EmbedParams, RenderMode};
pub use gallery::{assemble_slides, Slide};
pub use playback::{is_truthy_str, PlaybackConfig, VideoPosition, VideoPreload, VideoSizing};
pub use provider::{classify, reject_input, InputRejection, ParsedVideo, Provider};
pub use schema::VideoObjectSchema;
