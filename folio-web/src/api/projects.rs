//! Catalog endpoints: listing with filter/search/sort, single project,
//! featured projects and category counts

use axum::{
    extract::{Path, Query, State},
    Json,
};
use folio_common::catalog::{CategoryCount, RELATED_LIMIT};
use folio_common::filter;
use folio_common::ui_state::{FilterState, SortBy};
use folio_common::{CategoryFilter, Project};
use serde::{Deserialize, Serialize};

use super::ApiError;
use crate::AppState;

/// Query parameters for the project list
#[derive(Debug, Default, Deserialize)]
pub struct ProjectQuery {
    /// `all` or a category value
    pub category: Option<String>,
    /// Free-text search
    pub q: Option<String>,
    /// `date` (default), `name` or `category`
    pub sort: Option<String>,
}

impl ProjectQuery {
    /// Convert to filter controls, rejecting unknown category or sort values
    pub fn to_filter_state(&self) -> Result<FilterState, ApiError> {
        let mut state = FilterState::default();
        if let Some(category) = self.category.as_deref().filter(|c| !c.is_empty()) {
            state.set_category(category.parse::<CategoryFilter>()?);
        }
        if let Some(q) = &self.q {
            state.set_search(q.as_str());
        }
        if let Some(sort) = self.sort.as_deref().filter(|s| !s.is_empty()) {
            state.set_sort_by(sort.parse::<SortBy>()?);
        }
        Ok(state)
    }
}

/// Project list response
#[derive(Debug, Serialize)]
pub struct ProjectListResponse {
    pub total: usize,
    pub category: CategoryFilter,
    pub query: String,
    pub sort: SortBy,
    pub projects: Vec<Project>,
}

/// GET /projects?category=&q=&sort=
pub async fn list_projects(
    State(state): State<AppState>,
    Query(query): Query<ProjectQuery>,
) -> Result<Json<ProjectListResponse>, ApiError> {
    let filter_state = query.to_filter_state()?;
    let projects: Vec<Project> = filter::apply(&state.catalog, &filter_state)
        .into_iter()
        .cloned()
        .collect();

    Ok(Json(ProjectListResponse {
        total: projects.len(),
        category: filter_state.category,
        query: filter_state.search,
        sort: filter_state.sort_by,
        projects,
    }))
}

/// GET /featured
///
/// Featured projects in catalog order.
pub async fn list_featured(State(state): State<AppState>) -> Json<Vec<Project>> {
    Json(state.catalog.featured().into_iter().cloned().collect())
}

/// GET /projects/:slug
pub async fn get_project(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Project>, ApiError> {
    let project = state.catalog.by_slug(&slug)?;
    Ok(Json(project.clone()))
}

/// Query parameters for related projects
#[derive(Debug, Default, Deserialize)]
pub struct RelatedQuery {
    pub limit: Option<usize>,
}

/// Catalog neighbours and related projects for one project
#[derive(Debug, Serialize)]
pub struct RelatedResponse {
    pub slug: String,
    pub previous: Option<Project>,
    pub next: Option<Project>,
    pub related: Vec<Project>,
}

/// GET /projects/:slug/related?limit=
///
/// Previous/next by catalog position, plus up to `limit` (default 4) related
/// projects.
pub async fn get_related_projects(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(query): Query<RelatedQuery>,
) -> Result<Json<RelatedResponse>, ApiError> {
    let (previous, next) = state.catalog.neighbors(&slug)?;
    let related = state
        .catalog
        .related(&slug, query.limit.unwrap_or(RELATED_LIMIT))?;

    Ok(Json(RelatedResponse {
        previous: previous.cloned(),
        next: next.cloned(),
        related: related.into_iter().cloned().collect(),
        slug,
    }))
}

/// GET /categories
pub async fn list_categories(State(state): State<AppState>) -> Json<Vec<CategoryCount>> {
    Json(state.catalog.category_counts())
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_common::Category;

    #[test]
    fn test_query_defaults() {
        let state = ProjectQuery::default().to_filter_state().unwrap();
        assert_eq!(state, FilterState::default());
    }

    #[test]
    fn test_query_parses_values() {
        let query = ProjectQuery {
            category: Some("ui-ux-design".to_string()),
            q: Some("Figma".to_string()),
            sort: Some("name".to_string()),
        };
        let state = query.to_filter_state().unwrap();
        assert_eq!(state.category, CategoryFilter::Only(Category::UiUxDesign));
        assert_eq!(state.search, "Figma");
        assert_eq!(state.sort_by, SortBy::Name);
    }

    #[test]
    fn test_query_rejects_unknown_values() {
        let query = ProjectQuery {
            category: Some("games".to_string()),
            ..Default::default()
        };
        assert!(matches!(query.to_filter_state(), Err(ApiError::BadRequest(_))));

        let query = ProjectQuery {
            sort: Some("size".to_string()),
            ..Default::default()
        };
        assert!(matches!(query.to_filter_state(), Err(ApiError::BadRequest(_))));
    }
}
