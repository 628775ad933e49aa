//! Server-side gallery markup generation.
//!
//! Turns classified videos into HTML fragments through a strict allow-list
//! builder. Output is safe to inline into a product page without further
//! escaping.

pub mod fragment;
pub mod html;
pub mod renderer;

pub use fragment::EmbedFragment;
pub use html::{escape_attr, escape_text, sanitize_url, Element};
pub use renderer::{render, render_placeholder, render_url, PLAY_ICON_SVG};
