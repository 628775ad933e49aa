//! Client-equivalent embed logic.
//!
//! This crate re-derives URL classification, embed parameters and markup
//! from scratch, without depending on the server-side crates. The two
//! implementations are kept in agreement by conformance tests, not shared
//! code: the client build ships independently and must produce the same
//! embeds the server would.

pub mod classify;
pub mod markup;
pub mod params;
pub mod slot;

pub use classify::{classify_url, MirrorParsed, MirrorProvider};
pub use params::{file_playback_attrs, live_thumb_url, main_embed_url, FileAttrs, MirrorConfig};
pub use slot::{GallerySlot, SlotEvent, SlotOutcome, RECONCILE_INTERVAL, VARIATION_SETTLE};
