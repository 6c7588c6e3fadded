//! # Folio Common Library
//!
//! Shared code for the Folio portfolio service:
//! - Project catalog and category types
//! - Media resolution and the gallery fallback chain
//! - Catalog filtering, search and sorting
//! - Explicit UI state (filters, background audio player)
//! - Configuration loading

pub mod catalog;
pub mod config;
pub mod error;
pub mod filter;
pub mod media;
pub mod ui_state;

pub use catalog::{Catalog, Category, CategoryFilter, Project};
pub use error::{Error, Result};
pub use media::{MediaItem, MediaKind, MediaResolver};
