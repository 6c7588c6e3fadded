//! Explicit per-project media lists
//!
//! A `media.toml` placed in the media directory pins the gallery of any
//! project it names, bypassing filename matching for that project:
//!
//! ```toml
//! [projects.zensu-ecommerce]
//! media = [
//!     { type = "image", url = "/images/zensu-1.png" },
//!     { type = "video", url = "/videos/zensu-demo.mp4", thumbnail = "/images/zensu-2.png" },
//! ]
//! ```

use super::MediaItem;
use crate::{Error, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::io;
use std::path::Path;

/// Manifest filename looked up inside the media directory
pub const MANIFEST_FILE: &str = "media.toml";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MediaManifest {
    #[serde(default)]
    projects: HashMap<String, ManifestEntry>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ManifestEntry {
    #[serde(default)]
    media: Vec<MediaItem>,
}

impl MediaManifest {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| Error::Config(format!("Failed to parse {}: {}", MANIFEST_FILE, e)))
    }

    /// Load the manifest from `media_dir`, `Ok(None)` when there is none
    pub fn load(media_dir: &Path) -> Result<Option<Self>> {
        let path = media_dir.join(MANIFEST_FILE);
        match std::fs::read_to_string(&path) {
            Ok(content) => Self::from_toml_str(&content).map(Some),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Pinned media for `slug`, if the manifest names it
    pub fn media_for(&self, slug: &str) -> Option<&[MediaItem]> {
        self.projects.get(slug).map(|entry| entry.media.as_slice())
    }
}
