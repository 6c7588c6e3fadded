//! Project media endpoints
//!
//! `/projects/:slug/media` exposes the raw resolver result; `/gallery` runs
//! the fallback chain for catalog projects.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use folio_common::media::{gallery_for, GallerySource, Scan};
use folio_common::MediaItem;
use serde::Serialize;
use tracing::{debug, error};

use super::ApiError;
use crate::AppState;

/// Media list response
#[derive(Debug, Serialize)]
pub struct MediaResponse {
    pub media: Vec<MediaItem>,
}

/// Gallery response after the fallback chain
#[derive(Debug, Serialize)]
pub struct GalleryResponse {
    pub slug: String,
    pub source: GallerySource,
    pub media: Vec<MediaItem>,
}

/// Thumbnail lookup response
#[derive(Debug, Serialize)]
pub struct ThumbnailResponse {
    pub url: String,
}

/// GET /projects/:slug/media
///
/// 200 with the matched images (empty when the media directory is missing or
/// nothing matches); 500 with an empty list when the directory can't be read.
pub async fn get_project_media(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Response {
    match state.resolver.scan_async(&slug).await {
        Ok(Scan::MissingDirectory) => {
            debug!(
                "Media directory {} missing; empty media for {}",
                state.resolver.media_dir().display(),
                slug
            );
            Json(MediaResponse { media: Vec::new() }).into_response()
        }
        Ok(Scan::Found(media)) => Json(MediaResponse { media }).into_response(),
        Err(e) => {
            error!("Error loading project media for {}: {}", slug, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(MediaResponse { media: Vec::new() }),
            )
                .into_response()
        }
    }
}

/// GET /projects/:slug/gallery
pub async fn get_project_gallery(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<GalleryResponse>, ApiError> {
    let project = state.catalog.by_slug(&slug)?;
    let resolved = state.resolver.resolve_async(&slug).await;
    let gallery = gallery_for(project, resolved);

    Ok(Json(GalleryResponse {
        slug,
        source: gallery.source,
        media: gallery.media,
    }))
}

/// GET /projects/:slug/thumbnail
pub async fn get_project_thumbnail(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<ThumbnailResponse>, ApiError> {
    let resolver = state.resolver.clone();
    let url = tokio::task::spawn_blocking(move || resolver.thumbnail_for(&slug))
        .await
        .map_err(|e| ApiError::Internal(format!("Thumbnail lookup failed: {}", e)))?;
    Ok(Json(ThumbnailResponse { url }))
}
