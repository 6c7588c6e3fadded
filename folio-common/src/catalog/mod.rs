//! Project catalog
//!
//! The catalog is an ordered, read-only list of project records. It is loaded
//! once (from the compiled-in TOML or a user-supplied file), validated, and
//! then shared behind an `Arc` by every request.

use crate::media::MediaItem;
use crate::{Error, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use tracing::info;

const BUILTIN_CATALOG: &str = include_str!("builtin.toml");

/// Project category (closed set)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    WebDevelopment,
    UiUxDesign,
    MobileApps,
    Other,
}

impl Category {
    /// All categories in display order
    pub const ALL: [Category; 4] = [
        Category::WebDevelopment,
        Category::UiUxDesign,
        Category::MobileApps,
        Category::Other,
    ];

    /// Wire value, e.g. `ui-ux-design`
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::WebDevelopment => "web-development",
            Category::UiUxDesign => "ui-ux-design",
            Category::MobileApps => "mobile-apps",
            Category::Other => "other",
        }
    }

    /// Human-readable label for filter menus
    pub fn label(&self) -> &'static str {
        match self {
            Category::WebDevelopment => "Web Development",
            Category::UiUxDesign => "UI/UX Design",
            Category::MobileApps => "Mobile Apps",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| Error::InvalidInput(format!("Unknown category: {}", s)))
    }
}

/// Category selection for filtering: every project, or a single category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryFilter::All => "all",
            CategoryFilter::Only(c) => c.as_str(),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CategoryFilter::All => "All Projects",
            CategoryFilter::Only(c) => c.label(),
        }
    }

    /// True when `category` passes this filter
    pub fn matches(&self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(c) => *c == category,
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s == "all" {
            Ok(CategoryFilter::All)
        } else {
            s.parse().map(CategoryFilter::Only)
        }
    }
}

impl TryFrom<String> for CategoryFilter {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<CategoryFilter> for String {
    fn from(filter: CategoryFilter) -> Self {
        filter.as_str().to_string()
    }
}

impl From<Category> for CategoryFilter {
    fn from(category: Category) -> Self {
        CategoryFilter::Only(category)
    }
}

/// A single portfolio project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    /// URL-safe key, unique across the catalog
    pub slug: String,
    pub title: String,
    pub description: String,
    pub category: Category,
    /// Thumbnail image URL
    #[serde(rename = "image")]
    pub thumbnail: String,
    /// Legacy list of image URLs
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,
    /// Legacy single video URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video: Option<String>,
    /// Explicitly declared media, in display order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub media: Vec<MediaItem>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub date: NaiveDate,
    #[serde(default)]
    pub featured: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

/// Number of projects per filter value, for the category sidebar
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub value: CategoryFilter,
    pub label: &'static str,
    pub count: usize,
}

#[derive(Deserialize)]
struct CatalogFile {
    #[serde(default)]
    projects: Vec<Project>,
}

/// Slug fragment shared by projects shown together across categories
const RELATED_FAMILY: &str = "adip";

/// Default number of related projects
pub const RELATED_LIMIT: usize = 4;

/// Validated, ordered project catalog
#[derive(Debug, Clone)]
pub struct Catalog {
    projects: Vec<Project>,
    index: HashMap<String, usize>,
}

impl Catalog {
    /// Build a catalog, checking slug and id invariants
    pub fn new(projects: Vec<Project>) -> Result<Self> {
        let mut index = HashMap::with_capacity(projects.len());
        let mut ids = HashSet::with_capacity(projects.len());

        for (position, project) in projects.iter().enumerate() {
            if !is_url_safe_slug(&project.slug) {
                return Err(Error::Catalog(format!(
                    "Project '{}' has an invalid slug: {:?}",
                    project.id, project.slug
                )));
            }
            if index.insert(project.slug.clone(), position).is_some() {
                return Err(Error::Catalog(format!("Duplicate slug: {}", project.slug)));
            }
            if !ids.insert(project.id.clone()) {
                return Err(Error::Catalog(format!("Duplicate project id: {}", project.id)));
            }
        }

        Ok(Self { projects, index })
    }

    /// The compiled-in catalog
    pub fn builtin() -> Result<Self> {
        Self::from_toml_str(BUILTIN_CATALOG)
    }

    /// Parse a catalog from TOML text (`[[projects]]` tables)
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: CatalogFile = toml::from_str(content)
            .map_err(|e| Error::Catalog(format!("Failed to parse catalog: {}", e)))?;
        Self::new(file.projects)
    }

    /// Load a catalog file from disk
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Catalog(format!("Failed to read catalog {}: {}", path.display(), e))
        })?;
        let catalog = Self::from_toml_str(&content)?;
        info!("Loaded {} projects from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    /// Every project in catalog order
    pub fn all(&self) -> &[Project] {
        &self.projects
    }

    pub fn by_slug(&self, slug: &str) -> Result<&Project> {
        self.position(slug).map(|i| &self.projects[i])
    }

    fn position(&self, slug: &str) -> Result<usize> {
        self.index
            .get(slug)
            .copied()
            .ok_or_else(|| Error::NotFound(format!("Project not found: {}", slug)))
    }

    /// Previous and next projects by catalog position
    pub fn neighbors(&self, slug: &str) -> Result<(Option<&Project>, Option<&Project>)> {
        let position = self.position(slug)?;
        let previous = position.checked_sub(1).map(|i| &self.projects[i]);
        let next = self.projects.get(position + 1);
        Ok((previous, next))
    }

    /// Up to `limit` other projects in the same category, in catalog order.
    /// Projects whose slugs both contain `adip` are related across categories.
    pub fn related(&self, slug: &str, limit: usize) -> Result<Vec<&Project>> {
        let current = self.by_slug(slug)?;
        let shares_family =
            |p: &Project| current.slug.contains(RELATED_FAMILY) && p.slug.contains(RELATED_FAMILY);

        Ok(self
            .projects
            .iter()
            .filter(|p| p.slug != current.slug)
            .filter(|p| p.category == current.category || shares_family(*p))
            .take(limit)
            .collect())
    }

    /// Featured projects, catalog order preserved
    pub fn featured(&self) -> Vec<&Project> {
        self.projects.iter().filter(|p| p.featured).collect()
    }

    /// Counts for `all` followed by each category in display order
    pub fn category_counts(&self) -> Vec<CategoryCount> {
        let mut counts = vec![CategoryCount {
            value: CategoryFilter::All,
            label: CategoryFilter::All.label(),
            count: self.projects.len(),
        }];
        counts.extend(Category::ALL.into_iter().map(|category| CategoryCount {
            value: CategoryFilter::Only(category),
            label: category.label(),
            count: self.projects.iter().filter(|p| p.category == category).count(),
        }));
        counts
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }
}

fn is_url_safe_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
