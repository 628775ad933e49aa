//! Thumbnail resolution for gallery videos.
//!
//! Priority order: user override, deterministic provider pattern (YouTube),
//! cached remote oEmbed lookup (Vimeo). Lookups are time-bounded and every
//! failure degrades to "no thumbnail" so a slow provider can never stall a
//! page render.

pub mod cache;
pub mod error;
pub mod resolver;
pub mod vimeo;

pub use cache::ThumbnailCache;
pub use error::{OembedError, OembedResult};
pub use resolver::ThumbnailResolver;
