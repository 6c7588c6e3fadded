//! Gallery fallback chain
//!
//! A project page always shows something: resolved files first, then the
//! catalog's declared media, then the legacy image list, then the thumbnail.

use super::MediaItem;
use crate::catalog::Project;
use serde::Serialize;

/// Which step of the fallback chain produced a gallery
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GallerySource {
    /// Files found in the media directory (or pinned by the manifest)
    Resolved,
    /// The project's declared `media` list
    Declared,
    /// The project's legacy `images`/`video` fields
    Legacy,
    /// The project thumbnail alone
    Thumbnail,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Gallery {
    pub source: GallerySource,
    pub media: Vec<MediaItem>,
}

/// Pick the gallery for `project` given the resolver's output. Never empty.
pub fn gallery_for(project: &Project, resolved: Vec<MediaItem>) -> Gallery {
    if !resolved.is_empty() {
        return Gallery {
            source: GallerySource::Resolved,
            media: resolved,
        };
    }

    if !project.media.is_empty() {
        return Gallery {
            source: GallerySource::Declared,
            media: project.media.clone(),
        };
    }

    if !project.images.is_empty() {
        let mut media: Vec<MediaItem> = project.images.iter().map(MediaItem::image).collect();
        if let Some(video) = &project.video {
            media.push(MediaItem::video(video));
        }
        return Gallery {
            source: GallerySource::Legacy,
            media,
        };
    }

    Gallery {
        source: GallerySource::Thumbnail,
        media: vec![MediaItem::image(&project.thumbnail)],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Category;
    use crate::media::MediaKind;

    fn bare_project() -> Project {
        Project {
            id: "9".to_string(),
            slug: "sample-app".to_string(),
            title: "Sample".to_string(),
            description: String::new(),
            category: Category::Other,
            thumbnail: "/images/sample-thumbnail.png".to_string(),
            images: Vec::new(),
            video: None,
            media: Vec::new(),
            tags: Vec::new(),
            date: "2023-01-01".parse().unwrap(),
            featured: false,
            link: None,
        }
    }

    #[test]
    fn test_resolved_wins() {
        let mut project = bare_project();
        project.media = vec![MediaItem::video("/videos/demo.mp4")];

        let gallery = gallery_for(&project, vec![MediaItem::image("/images/sample-1.png")]);
        assert_eq!(gallery.source, GallerySource::Resolved);
        assert_eq!(gallery.media, vec![MediaItem::image("/images/sample-1.png")]);
    }

    #[test]
    fn test_declared_media_when_nothing_resolved() {
        let mut project = bare_project();
        project.media = vec![MediaItem::video("/videos/demo.mp4")];
        project.images = vec!["/images/legacy.png".to_string()];

        let gallery = gallery_for(&project, Vec::new());
        assert_eq!(gallery.source, GallerySource::Declared);
        assert_eq!(gallery.media[0].kind, MediaKind::Video);
    }

    #[test]
    fn test_legacy_images_then_video() {
        let mut project = bare_project();
        project.images = vec!["/images/a.png".to_string(), "/images/b.png".to_string()];
        project.video = Some("/videos/old.mp4".to_string());

        let gallery = gallery_for(&project, Vec::new());
        assert_eq!(gallery.source, GallerySource::Legacy);
        assert_eq!(
            gallery.media,
            vec![
                MediaItem::image("/images/a.png"),
                MediaItem::image("/images/b.png"),
                MediaItem::video("/videos/old.mp4"),
            ]
        );
    }

    #[test]
    fn test_thumbnail_last_resort() {
        let gallery = gallery_for(&bare_project(), Vec::new());
        assert_eq!(gallery.source, GallerySource::Thumbnail);
        assert_eq!(gallery.media, vec![MediaItem::image("/images/sample-thumbnail.png")]);
    }
}
