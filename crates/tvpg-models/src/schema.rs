//! VideoObject structured data for search-engine consumption.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::provider::{ParsedVideo, Provider};

/// Schema.org VideoObject block emitted alongside a gallery with a video.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoObjectSchema {
    #[serde(rename = "@context")]
    pub context: String,
    #[serde(rename = "@type")]
    pub schema_type: String,
    pub name: String,
    pub description: String,
    #[serde(rename = "uploadDate")]
    pub upload_date: String,
    #[serde(rename = "contentUrl")]
    pub content_url: String,
    #[serde(rename = "embedUrl")]
    pub embed_url: String,
    #[serde(rename = "thumbnailUrl", skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
}

impl VideoObjectSchema {
    /// Build the structured-data block for a recognized video.
    ///
    /// Returns `None` for unrecognized input and for script-embed providers,
    /// which have no stable embed URL of their own.
    pub fn build(
        parsed: &ParsedVideo,
        product_name: &str,
        product_description: &str,
        published: DateTime<Utc>,
        thumbnail_url: Option<String>,
    ) -> Option<Self> {
        let embed_url = canonical_embed_url(parsed)?;

        let description = if product_description.trim().is_empty() {
            product_name.to_string()
        } else {
            product_description.to_string()
        };

        Some(Self {
            context: "https://schema.org".to_string(),
            schema_type: "VideoObject".to_string(),
            name: format!("{} - Product Video", product_name),
            description,
            upload_date: published.to_rfc3339(),
            content_url: embed_url.clone(),
            embed_url,
            thumbnail_url,
        })
    }

    /// Serialize as the JSON-LD payload.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Parameterless embed URL used for structured data.
fn canonical_embed_url(parsed: &ParsedVideo) -> Option<String> {
    match parsed.provider {
        Provider::Youtube => Some(format!(
            "https://www.youtube.com/embed/{}",
            parsed.id.as_deref()?
        )),
        Provider::Vimeo => Some(format!(
            "https://player.vimeo.com/video/{}",
            parsed.id.as_deref()?
        )),
        Provider::File => parsed.url.clone(),
        Provider::Tiktok | Provider::Instagram | Provider::Unrecognized => None,
    }
}
