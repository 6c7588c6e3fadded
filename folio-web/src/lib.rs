//! folio-web library - portfolio content service
//!
//! Serves the project catalog, resolved project media and static site assets
//! over HTTP.

use axum::Router;
use folio_common::config::ResolvedConfig;
use folio_common::ui_state::Track;
use folio_common::{Catalog, MediaResolver};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;

pub mod api;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Read-only project catalog
    pub catalog: Arc<Catalog>,
    /// Media directory scanner
    pub resolver: Arc<MediaResolver>,
    /// Background audio playlist
    pub tracks: Arc<Vec<Track>>,
    /// Root of the static site assets
    pub public_dir: PathBuf,
}

impl AppState {
    /// Create new application state
    pub fn new(
        catalog: Catalog,
        resolver: MediaResolver,
        tracks: Vec<Track>,
        public_dir: PathBuf,
    ) -> Self {
        Self {
            catalog: Arc::new(catalog),
            resolver: Arc::new(resolver),
            tracks: Arc::new(tracks),
            public_dir,
        }
    }

    /// Build state from resolved configuration, loading the catalog file when
    /// one is configured and the compiled-in catalog otherwise
    pub fn from_config(config: &ResolvedConfig) -> folio_common::Result<Self> {
        let catalog = match &config.catalog_path {
            Some(path) => Catalog::load(path)?,
            None => {
                let catalog = Catalog::builtin()?;
                info!("Using built-in catalog ({} projects)", catalog.len());
                catalog
            }
        };

        let resolver = MediaResolver::new(&config.media_dir, &config.media_url_prefix)
            .with_placeholder(&config.placeholder_image);

        Ok(Self::new(
            catalog,
            resolver,
            config.tracks.clone(),
            config.public_dir.clone(),
        ))
    }
}

/// Build application router
///
/// JSON endpoints first; the media directory is mounted under its URL
/// prefix and everything else falls through to the public directory.
pub fn build_router(state: AppState) -> Router {
    use axum::routing::get;

    let mut router = Router::new()
        .route("/projects", get(api::list_projects))
        .route("/featured", get(api::list_featured))
        .route("/projects/:slug", get(api::get_project))
        .route("/projects/:slug/related", get(api::get_related_projects))
        .route("/projects/:slug/media", get(api::get_project_media))
        .route("/projects/:slug/gallery", get(api::get_project_gallery))
        .route("/projects/:slug/thumbnail", get(api::get_project_thumbnail))
        .route("/categories", get(api::list_categories))
        .route("/tracks", get(api::get_tracks))
        .route("/buildinfo", get(api::get_build_info))
        .merge(api::health_routes());

    let prefix = state.resolver.url_prefix();
    if prefix.len() > 1 && prefix.starts_with('/') {
        router = router.nest_service(
            prefix,
            ServeDir::new(state.resolver.media_dir()),
        );
    }

    router
        .fallback_service(ServeDir::new(&state.public_dir))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
