//! Gallery slide assembly.
//!
//! Builds the ordered slide list for a product gallery: main image, gallery
//! images, an optional video slide spliced in by position, and a placeholder
//! when nothing else exists (so a carousel can still initialize and accept
//! dynamically injected variation videos).

use serde::{Deserialize, Serialize};

use crate::playback::VideoPosition;

/// A single gallery slide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Slide {
    Image {
        /// Attachment id; 0 marks the storefront placeholder image
        attachment_id: u64,
        #[serde(default, skip_serializing_if = "std::ops::Not::not")]
        is_placeholder: bool,
    },
    Video {
        url: String,
        /// Attachment used as the static thumbnail background
        thumb_attachment_id: u64,
        /// User-supplied custom thumbnail, wins over everything else
        #[serde(skip_serializing_if = "Option::is_none")]
        thumb_url: Option<String>,
    },
}

impl Slide {
    pub fn is_video(&self) -> bool {
        matches!(self, Slide::Video { .. })
    }
}

/// Assemble the slide list for a product.
///
/// Position rule is positional, not proportional: `Second` splices the video
/// at index 1 regardless of how many image slides exist, degrading to append
/// when there are fewer than two slides.
pub fn assemble_slides(
    main_image_id: Option<u64>,
    gallery_image_ids: &[u64],
    video_url: Option<&str>,
    custom_thumb_url: Option<&str>,
    position: VideoPosition,
) -> Vec<Slide> {
    let mut slides: Vec<Slide> = Vec::new();

    if let Some(id) = main_image_id {
        slides.push(Slide::Image {
            attachment_id: id,
            is_placeholder: false,
        });
    }

    for &id in gallery_image_ids {
        slides.push(Slide::Image {
            attachment_id: id,
            is_placeholder: false,
        });
    }

    // With no images and no video the carousel still needs one slide, so a
    // variation video can be injected into it later.
    if slides.is_empty() && video_url.is_none() {
        slides.push(Slide::Image {
            attachment_id: 0,
            is_placeholder: true,
        });
    }

    if let Some(url) = video_url {
        let video_slide = Slide::Video {
            url: url.to_string(),
            thumb_attachment_id: main_image_id.unwrap_or(0),
            thumb_url: custom_thumb_url.map(str::to_string),
        };

        match position {
            VideoPosition::First => slides.insert(0, video_slide),
            VideoPosition::Last => slides.push(video_slide),
            VideoPosition::Second => {
                if slides.is_empty() {
                    slides.push(video_slide);
                } else {
                    slides.insert(1, video_slide);
                }
            }
        }
    }

    slides
}
