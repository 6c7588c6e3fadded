//! Catalog filtering, search and ordering

use crate::catalog::{Catalog, CategoryFilter, Project};
use crate::ui_state::{FilterState, SortBy};
use std::cmp::Ordering;

/// Category filter, then case-insensitive search over title, description and
/// tags, then newest first. Projects sharing a date keep catalog order.
pub fn filter_projects<'a>(
    catalog: &'a Catalog,
    category: CategoryFilter,
    query: &str,
) -> Vec<&'a Project> {
    let mut projects = select(catalog, category, query);
    projects.sort_by(|a, b| newest_first(a, b));
    projects
}

/// Apply the full filter controls, including the chosen ordering
pub fn apply<'a>(catalog: &'a Catalog, state: &FilterState) -> Vec<&'a Project> {
    let mut projects = select(catalog, state.category, &state.search);
    match state.sort_by {
        SortBy::Date => projects.sort_by(|a, b| newest_first(a, b)),
        SortBy::Name => projects.sort_by_cached_key(|p| p.title.to_lowercase()),
        SortBy::Category => {
            projects.sort_by(|a, b| a.category.cmp(&b.category).then_with(|| newest_first(a, b)))
        }
    }
    projects
}

/// True when `query` occurs in the title, description or any tag,
/// ignoring case. The empty query matches everything.
pub fn matches_query(project: &Project, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let query = query.to_lowercase();
    project.title.to_lowercase().contains(&query)
        || project.description.to_lowercase().contains(&query)
        || project
            .tags
            .iter()
            .any(|tag| tag.to_lowercase().contains(&query))
}

fn select<'a>(catalog: &'a Catalog, category: CategoryFilter, query: &str) -> Vec<&'a Project> {
    catalog
        .all()
        .iter()
        .filter(|p| category.matches(p.category))
        .filter(|p| matches_query(p, query))
        .collect()
}

fn newest_first(a: &Project, b: &Project) -> Ordering {
    b.date.cmp(&a.date)
}
