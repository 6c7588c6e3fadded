//! Project media: gallery items, filename-based resolution, and the
//! fallback chain that turns a project into a displayable gallery.

mod gallery;
mod manifest;
mod resolver;

pub use gallery::{gallery_for, Gallery, GallerySource};
pub use manifest::{MediaManifest, MANIFEST_FILE};
pub use resolver::{MediaResolver, Scan, IMAGE_EXTENSIONS};

use serde::{Deserialize, Serialize};

/// Kind of displayable asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

/// One displayable asset. Identity is the URL; position in a gallery is the
/// display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaItem {
    #[serde(rename = "type")]
    pub kind: MediaKind,
    pub url: String,
    /// Poster frame for videos
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

impl MediaItem {
    pub fn image(url: impl Into<String>) -> Self {
        Self {
            kind: MediaKind::Image,
            url: url.into(),
            thumbnail: None,
        }
    }

    pub fn video(url: impl Into<String>) -> Self {
        Self {
            kind: MediaKind::Video,
            url: url.into(),
            thumbnail: None,
        }
    }
}
