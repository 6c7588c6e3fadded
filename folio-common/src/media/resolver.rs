//! Filename-based media resolution
//!
//! Project images live in one flat directory and are tied to projects only by
//! naming convention: `{slug}-N.ext` or `{prefix}-N.ext`, where the prefix is
//! the part of the slug before its first hyphen. Galleries are ordered by the
//! first number in the filename.

use super::{MediaItem, MediaManifest, MANIFEST_FILE};
use crate::Result;
use std::cmp::Ordering;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Extensions accepted as gallery images (compared case-insensitively)
pub const IMAGE_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "webp"];

/// Sort key for filenames without any digits; places them last
const NO_NUMBER: u64 = u64::MAX;

/// Outcome of a directory scan for one project
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scan {
    /// The media directory does not exist
    MissingDirectory,
    /// Directory was read; the list may be empty when nothing matched
    Found(Vec<MediaItem>),
}

impl Scan {
    pub fn into_items(self) -> Vec<MediaItem> {
        match self {
            Scan::MissingDirectory => Vec::new(),
            Scan::Found(items) => items,
        }
    }
}

/// Resolves project slugs to gallery images found in the media directory
#[derive(Debug, Clone)]
pub struct MediaResolver {
    media_dir: PathBuf,
    url_prefix: String,
    placeholder: String,
}

impl MediaResolver {
    /// `url_prefix` is the public path the media directory is served under,
    /// e.g. `/images`.
    pub fn new(media_dir: impl Into<PathBuf>, url_prefix: impl Into<String>) -> Self {
        let url_prefix = url_prefix.into().trim_end_matches('/').to_string();
        let placeholder = format!("{}/placeholder.jpg", url_prefix);
        Self {
            media_dir: media_dir.into(),
            url_prefix,
            placeholder,
        }
    }

    /// Override the image returned by [`thumbnail_for`](Self::thumbnail_for)
    /// when nothing matches
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn media_dir(&self) -> &Path {
        &self.media_dir
    }

    pub fn url_prefix(&self) -> &str {
        &self.url_prefix
    }

    /// Scan the media directory for `slug`, keeping the missing-directory,
    /// no-match and I/O-failure cases apart.
    pub fn scan(&self, slug: &str) -> Result<Scan> {
        let entries = match std::fs::read_dir(&self.media_dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Scan::MissingDirectory),
            Err(e) => return Err(e.into()),
        };

        if let Some(pinned) = self.pinned_media(slug) {
            return Ok(Scan::Found(pinned));
        }

        let prefix = slug_prefix(slug);
        let mut matched = Vec::new();
        for entry in entries {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                continue;
            }
            let Some(name) = entry.file_name().to_str().map(str::to_owned) else {
                continue;
            };
            if is_project_image(&name, slug, prefix) {
                matched.push(name);
            }
        }

        matched.sort_by(|a, b| compare_gallery_names(a, b));

        Ok(Scan::Found(
            matched
                .iter()
                .map(|name| MediaItem::image(self.public_url(name)))
                .collect(),
        ))
    }

    /// Resolve the gallery for `slug`. Failures and empty results both come
    /// back as an empty list; the difference is only logged.
    pub fn resolve(&self, slug: &str) -> Vec<MediaItem> {
        match self.scan(slug) {
            Ok(Scan::MissingDirectory) => {
                debug!(
                    "Media directory {} does not exist; no media for {}",
                    self.media_dir.display(),
                    slug
                );
                Vec::new()
            }
            Ok(Scan::Found(items)) => {
                if items.is_empty() {
                    debug!("No media files match project {}", slug);
                } else {
                    debug!("Resolved {} media files for {}", items.len(), slug);
                }
                items
            }
            Err(e) => {
                warn!("Error loading media for {}: {}", slug, e);
                Vec::new()
            }
        }
    }

    /// [`scan`](Self::scan) on the blocking pool
    pub async fn scan_async(&self, slug: &str) -> Result<Scan> {
        let resolver = self.clone();
        let slug = slug.to_string();
        tokio::task::spawn_blocking(move || resolver.scan(&slug))
            .await
            .map_err(|e| crate::Error::Internal(format!("Media scan task failed: {}", e)))?
    }

    /// [`resolve`](Self::resolve) on the blocking pool
    pub async fn resolve_async(&self, slug: &str) -> Vec<MediaItem> {
        let resolver = self.clone();
        let slug = slug.to_string();
        match tokio::task::spawn_blocking(move || resolver.resolve(&slug)).await {
            Ok(items) => items,
            Err(e) => {
                warn!("Media resolution task failed: {}", e);
                Vec::new()
            }
        }
    }

    /// Best-guess cover image for `slug`: `{slug}.jpg|png`, then the legacy
    /// `{prefix}-ecommerce.jpg|png`, then the first file starting with
    /// `{prefix}-`, else the placeholder.
    pub fn thumbnail_for(&self, slug: &str) -> String {
        let mut files = match self.list_file_names() {
            Ok(files) => files,
            Err(e) => {
                if e.kind() != io::ErrorKind::NotFound {
                    warn!("Error loading thumbnail for {}: {}", slug, e);
                }
                return self.placeholder.clone();
            }
        };
        files.sort();

        let prefix = slug_prefix(slug);
        let candidates = [
            format!("{}.jpg", slug),
            format!("{}.png", slug),
            format!("{}-ecommerce.jpg", prefix),
            format!("{}-ecommerce.png", prefix),
        ];
        if let Some(found) = candidates.iter().find(|c| files.contains(*c)) {
            return self.public_url(found);
        }

        let group = format!("{}-", prefix);
        files
            .iter()
            .find(|name| name.starts_with(&group))
            .map(|name| self.public_url(name))
            .unwrap_or_else(|| self.placeholder.clone())
    }

    fn pinned_media(&self, slug: &str) -> Option<Vec<MediaItem>> {
        match MediaManifest::load(&self.media_dir) {
            Ok(Some(manifest)) => manifest.media_for(slug).map(<[MediaItem]>::to_vec),
            Ok(None) => None,
            Err(e) => {
                warn!("Ignoring {}: {}", MANIFEST_FILE, e);
                None
            }
        }
    }

    fn list_file_names(&self) -> io::Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in std::fs::read_dir(&self.media_dir)? {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                names.push(name.to_string());
            }
        }
        Ok(names)
    }

    fn public_url(&self, file_name: &str) -> String {
        format!("{}/{}", self.url_prefix, file_name)
    }
}

/// Part of the slug before the first hyphen (the whole slug if none)
fn slug_prefix(slug: &str) -> &str {
    slug.split_once('-').map_or(slug, |(prefix, _)| prefix)
}

/// Filename matching rules for one project
fn is_project_image(file_name: &str, slug: &str, prefix: &str) -> bool {
    let path = Path::new(file_name);
    let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
        return false;
    };
    let is_image = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| IMAGE_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
        .unwrap_or(false);
    if !is_image || stem.contains("thumbnail") {
        return false;
    }

    stem.starts_with(&format!("{}-", slug))
        || stem.starts_with(&format!("{}-", prefix))
        || is_legacy_alias(stem, slug, prefix)
}

/// Historical names that predate the numbered convention
fn is_legacy_alias(stem: &str, slug: &str, prefix: &str) -> bool {
    stem == slug || stem == format!("{}-ecommerce", prefix)
}

/// First run of ASCII digits in the name, `NO_NUMBER` if there is none
fn first_number(name: &str) -> u64 {
    let digits: String = name
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();
    if digits.is_empty() {
        NO_NUMBER
    } else {
        // Absurdly long digit runs saturate just below the no-number sentinel
        digits.parse().unwrap_or(NO_NUMBER - 1)
    }
}

fn compare_gallery_names(a: &str, b: &str) -> Ordering {
    first_number(a)
        .cmp(&first_number(b))
        .then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn media_dir(files: &[&str]) -> TempDir {
        let dir = tempfile::tempdir().unwrap();
        for file in files {
            fs::write(dir.path().join(file), b"").unwrap();
        }
        dir
    }

    fn urls(items: &[MediaItem]) -> Vec<&str> {
        items.iter().map(|item| item.url.as_str()).collect()
    }

    #[test]
    fn test_slug_prefix() {
        assert_eq!(slug_prefix("zensu-ecommerce"), "zensu");
        assert_eq!(slug_prefix("decov"), "decov");
        assert_eq!(slug_prefix("a-b-c"), "a");
    }

    #[test]
    fn test_first_number() {
        assert_eq!(first_number("zensu-10.jpg"), 10);
        assert_eq!(first_number("a2b-7.png"), 2);
        assert_eq!(first_number("zensu-ecommerce.jpg"), NO_NUMBER);
    }

    #[test]
    fn test_numeric_not_lexicographic_order() {
        let dir = media_dir(&["zensu-ecommerce-2.png", "zensu-ecommerce-1.png", "zensu-ecommerce-10.jpg"]);
        let resolver = MediaResolver::new(dir.path(), "/images");

        let items = resolver.resolve("zensu-ecommerce");
        assert_eq!(
            urls(&items),
            vec![
                "/images/zensu-ecommerce-1.png",
                "/images/zensu-ecommerce-2.png",
                "/images/zensu-ecommerce-10.jpg",
            ]
        );
    }

    #[test]
    fn test_thumbnail_excluded() {
        let dir = media_dir(&["danger-ahead-thumbnail.png", "danger-ahead-1.png"]);
        let resolver = MediaResolver::new(dir.path(), "/images");

        assert_eq!(urls(&resolver.resolve("danger-ahead")), vec!["/images/danger-ahead-1.png"]);
    }

    #[test]
    fn test_legacy_bare_slug_matches_and_sorts_last() {
        let dir = media_dir(&["zensu-ecommerce.jpg", "zensu-3.png", "other-1.png"]);
        let resolver = MediaResolver::new(dir.path(), "/images");

        assert_eq!(
            urls(&resolver.resolve("zensu-ecommerce")),
            vec!["/images/zensu-3.png", "/images/zensu-ecommerce.jpg"]
        );
    }

    #[test]
    fn test_bare_slug_without_hyphen_prefix() {
        let dir = media_dir(&["decov.jpg", "decovish-1.png"]);
        let resolver = MediaResolver::new(dir.path(), "/images");

        assert_eq!(urls(&resolver.resolve("decov")), vec!["/images/decov.jpg"]);
    }

    #[test]
    fn test_non_image_extensions_ignored() {
        let dir = media_dir(&["zensu-1.PNG", "zensu-2.gif", "zensu-3.txt", "zensu-4.WebP"]);
        let resolver = MediaResolver::new(dir.path(), "/images");

        assert_eq!(
            urls(&resolver.resolve("zensu-ecommerce")),
            vec!["/images/zensu-1.PNG", "/images/zensu-4.WebP"]
        );
    }

    #[test]
    fn test_directories_ignored() {
        let dir = media_dir(&["zensu-1.png"]);
        fs::create_dir(dir.path().join("zensu-2.png")).unwrap();
        let resolver = MediaResolver::new(dir.path(), "/images");

        assert_eq!(urls(&resolver.resolve("zensu-ecommerce")), vec!["/images/zensu-1.png"]);
    }

    #[test]
    fn test_missing_directory_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let resolver = MediaResolver::new(dir.path().join("absent"), "/images");

        assert_eq!(resolver.scan("zensu-ecommerce").unwrap(), Scan::MissingDirectory);
        assert!(resolver.resolve("zensu-ecommerce").is_empty());
    }

    #[test]
    fn test_no_match_is_empty() {
        let dir = media_dir(&["farm-1.png"]);
        let resolver = MediaResolver::new(dir.path(), "/images");

        assert_eq!(resolver.scan("zensu-ecommerce").unwrap(), Scan::Found(Vec::new()));
    }

    #[test]
    fn test_unreadable_directory_resolves_empty() {
        // A regular file in place of the directory makes read_dir fail
        let dir = media_dir(&["not-a-dir"]);
        let resolver = MediaResolver::new(dir.path().join("not-a-dir"), "/images");

        assert!(resolver.scan("zensu").is_err());
        assert!(resolver.resolve("zensu").is_empty());
    }

    #[test]
    fn test_manifest_overrides_heuristic() {
        let dir = media_dir(&["zensu-1.png", "zensu-2.png"]);
        fs::write(
            dir.path().join(MANIFEST_FILE),
            "[projects.zensu-ecommerce]\nmedia = [{ type = \"image\", url = \"/images/zensu-2.png\" }]\n",
        )
        .unwrap();
        let resolver = MediaResolver::new(dir.path(), "/images");

        assert_eq!(urls(&resolver.resolve("zensu-ecommerce")), vec!["/images/zensu-2.png"]);
    }

    #[test]
    fn test_malformed_manifest_falls_back_to_heuristic() {
        let dir = media_dir(&["zensu-1.png"]);
        fs::write(dir.path().join(MANIFEST_FILE), "not [valid toml").unwrap();
        let resolver = MediaResolver::new(dir.path(), "/images");

        assert_eq!(urls(&resolver.resolve("zensu-ecommerce")), vec!["/images/zensu-1.png"]);
    }

    #[test]
    fn test_url_prefix_trailing_slash() {
        let dir = media_dir(&["zensu-1.png"]);
        let resolver = MediaResolver::new(dir.path(), "/static/img/");

        assert_eq!(urls(&resolver.resolve("zensu")), vec!["/static/img/zensu-1.png"]);
    }

    #[test]
    fn test_thumbnail_for_prefers_slug_image() {
        let dir = media_dir(&["zensu-1.png", "zensu-ecommerce.jpg"]);
        let resolver = MediaResolver::new(dir.path(), "/images");

        assert_eq!(resolver.thumbnail_for("zensu-ecommerce"), "/images/zensu-ecommerce.jpg");
    }

    #[test]
    fn test_thumbnail_for_falls_back_to_first_group_file() {
        let dir = media_dir(&["farm-2.png", "farm-1.png"]);
        let resolver = MediaResolver::new(dir.path(), "/images");

        assert_eq!(resolver.thumbnail_for("farm-control-platform"), "/images/farm-1.png");
    }

    #[test]
    fn test_thumbnail_for_placeholder() {
        let dir = media_dir(&[]);
        let resolver = MediaResolver::new(dir.path(), "/images");
        assert_eq!(resolver.thumbnail_for("decov-app"), "/images/placeholder.jpg");

        let resolver = MediaResolver::new(dir.path().join("absent"), "/images")
            .with_placeholder("/images/none.png");
        assert_eq!(resolver.thumbnail_for("decov-app"), "/images/none.png");
    }

    #[tokio::test]
    async fn test_resolve_async_matches_sync() {
        let dir = media_dir(&["zensu-2.png", "zensu-1.png"]);
        let resolver = MediaResolver::new(dir.path(), "/images");

        assert_eq!(resolver.resolve_async("zensu-ecommerce").await, resolver.resolve("zensu-ecommerce"));
        assert!(matches!(
            resolver.scan_async("zensu-ecommerce").await.unwrap(),
            Scan::Found(items) if items.len() == 2
        ));
    }
}
