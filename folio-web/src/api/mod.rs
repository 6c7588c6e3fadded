//! HTTP API handlers for folio-web

pub mod buildinfo;
pub mod error;
pub mod health;
pub mod media;
pub mod projects;
pub mod tracks;

pub use buildinfo::get_build_info;
pub use error::ApiError;
pub use health::health_routes;
pub use media::{get_project_gallery, get_project_media, get_project_thumbnail};
pub use projects::{
    get_project, get_related_projects, list_categories, list_featured, list_projects,
};
pub use tracks::get_tracks;
