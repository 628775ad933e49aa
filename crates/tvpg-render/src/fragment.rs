use serde::Serialize;

use tvpg_models::Provider;

/// A rendered gallery fragment plus the metadata a client needs to manage
/// it after delivery (facade activation, reconciliation).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmbedFragment {
    pub html: String,
    pub provider: Provider,
    /// Iframe embed URL for providers that have one; `None` for script
    /// embeds, native files and placeholders.
    pub embed_url: Option<String>,
    /// True when `html` is a click-to-load facade rather than a live embed.
    pub is_lazy_facade: bool,
}

impl EmbedFragment {
    pub(crate) fn placeholder(html: String) -> Self {
        Self {
            html,
            provider: Provider::Unrecognized,
            embed_url: None,
            is_lazy_facade: false,
        }
    }
}
