//! Catalog service
//!
//! Client-side browsing of the exhibit list:
//! - free-text search over name and description
//! - category filter
//! - newest / oldest / alphabetical ordering (Polish alphabet)
//!
//! Filtering and sorting are pure functions over a slice so they can be
//! reused on any list the API returns. Sorting is stable, which makes
//! filter and sort commute.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use super::SERVER_ERROR_MESSAGE;
use crate::client::{ApiError, ExhibitRepository};
use crate::models::{Exhibit, ExhibitCategory, ExhibitSearchCriteria};

/// Category restriction of a catalog query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(ExhibitCategory),
}

impl CategoryFilter {
    pub fn matches(&self, category: ExhibitCategory) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => *wanted == category,
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(CategoryFilter::All);
        }
        Ok(CategoryFilter::Only(s.parse()?))
    }
}

/// Ordering of catalog results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Highest id first
    #[default]
    Newest,
    /// Earliest production year first; unparseable years last
    Oldest,
    /// By name, Polish alphabet
    Alphabetical,
}

impl FromStr for SortOrder {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "newest" => Ok(SortOrder::Newest),
            "oldest" => Ok(SortOrder::Oldest),
            "alphabetical" | "az" | "a-z" => Ok(SortOrder::Alphabetical),
            _ => Err(anyhow::anyhow!(
                "Invalid sort order: {} (expected newest, oldest or alphabetical)",
                s
            )),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SortOrder::Newest => "newest",
            SortOrder::Oldest => "oldest",
            SortOrder::Alphabetical => "alphabetical",
        })
    }
}

/// Search, filter and sort settings of the catalog view
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogQuery {
    pub search: String,
    pub category: CategoryFilter,
    pub sort: SortOrder,
}

impl CatalogQuery {
    /// Whether an exhibit passes the search and category filter
    pub fn matches(&self, exhibit: &Exhibit) -> bool {
        self.category.matches(exhibit.category) && matches_search(exhibit, &self.search)
    }

    /// Filter then sort
    pub fn apply(&self, exhibits: &[Exhibit]) -> Vec<Exhibit> {
        let mut result = filter_exhibits(exhibits, &self.search, self.category);
        sort_exhibits(&mut result, self.sort);
        result
    }
}

fn matches_search(exhibit: &Exhibit, search: &str) -> bool {
    let needle = search.to_lowercase();
    needle.is_empty()
        || exhibit.name.to_lowercase().contains(&needle)
        || exhibit.description.to_lowercase().contains(&needle)
}

/// Exhibits whose name or description contains `search` (case-insensitive)
/// and whose category passes `category`, in input order
pub fn filter_exhibits(exhibits: &[Exhibit], search: &str, category: CategoryFilter) -> Vec<Exhibit> {
    exhibits
        .iter()
        .filter(|e| category.matches(e.category) && matches_search(e, search))
        .cloned()
        .collect()
}

/// Stable in-place sort
pub fn sort_exhibits(exhibits: &mut [Exhibit], order: SortOrder) {
    match order {
        SortOrder::Newest => exhibits.sort_by(|a, b| b.id.cmp(&a.id)),
        SortOrder::Oldest => exhibits.sort_by(|a, b| compare_years(a.parsed_year(), b.parsed_year())),
        SortOrder::Alphabetical => exhibits.sort_by(|a, b| polish_cmp(&a.name, &b.name)),
    }
}

fn compare_years(a: Option<i32>, b: Option<i32>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Admin exhibit list: name or raw production year contains `term`, newest first
pub fn admin_search(exhibits: &[Exhibit], term: &str) -> Vec<Exhibit> {
    let needle = term.to_lowercase();
    let mut result: Vec<Exhibit> = exhibits
        .iter()
        .filter(|e| {
            needle.is_empty()
                || e.name.to_lowercase().contains(&needle)
                || e.production_year.contains(&needle)
        })
        .cloned()
        .collect();
    sort_exhibits(&mut result, SortOrder::Newest);
    result
}

// ============================================================================
// Polish collation
// ============================================================================

const POLISH_ALPHABET: [char; 35] = [
    'a', 'ą', 'b', 'c', 'ć', 'd', 'e', 'ę', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'ł', 'm', 'n', 'ń',
    'o', 'ó', 'p', 'q', 'r', 's', 'ś', 't', 'u', 'v', 'w', 'x', 'y', 'z', 'ź', 'ż',
];

/// (class, weight): punctuation < digits < Polish letters < other letters
fn collation_key(s: &str) -> Vec<(u8, u32)> {
    s.chars()
        .flat_map(char::to_lowercase)
        .map(|c| {
            if let Some(pos) = POLISH_ALPHABET.iter().position(|a| *a == c) {
                (2, pos as u32)
            } else if let Some(digit) = c.to_digit(10) {
                (1, digit)
            } else if c.is_alphabetic() {
                (3, c as u32)
            } else {
                (0, c as u32)
            }
        })
        .collect()
}

/// Compare two strings in Polish alphabetical order.
///
/// Diacritic letters are separate letters ("ł" after "l"). Case only breaks
/// ties, lowercase first.
pub fn polish_cmp(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| {
            a.chars()
                .map(char::is_uppercase)
                .cmp(b.chars().map(char::is_uppercase))
        })
        .then_with(|| a.cmp(b))
}

// ============================================================================
// Service
// ============================================================================

/// Error types for catalog operations
#[derive(Debug, thiserror::Error)]
pub enum CatalogServiceError {
    #[error("Exhibit not found: {0}")]
    NotFound(i64),

    #[error("API error: {0}")]
    Api(#[from] ApiError),
}

impl CatalogServiceError {
    /// Message suitable for end users (Polish UI)
    pub fn user_message(&self) -> String {
        match self {
            CatalogServiceError::NotFound(_) => "Nie znaleziono eksponatu.".to_string(),
            CatalogServiceError::Api(_) => SERVER_ERROR_MESSAGE.to_string(),
        }
    }
}

/// Visitor-facing catalog
pub struct CatalogService {
    repo: Arc<dyn ExhibitRepository>,
}

impl CatalogService {
    pub fn new(repo: Arc<dyn ExhibitRepository>) -> Self {
        Self { repo }
    }

    /// Fetch the whole catalog and apply `query` locally
    pub async fn browse(&self, query: &CatalogQuery) -> Result<Vec<Exhibit>, CatalogServiceError> {
        let exhibits = self.repo.list(&ExhibitSearchCriteria::default()).await?;
        let result = query.apply(&exhibits);
        tracing::debug!(total = exhibits.len(), shown = result.len(), "Catalog filtered");
        Ok(result)
    }

    /// Server-side search, for large catalogs
    pub async fn search(
        &self,
        criteria: &ExhibitSearchCriteria,
    ) -> Result<Vec<Exhibit>, CatalogServiceError> {
        Ok(self.repo.list(criteria).await?)
    }

    /// Get a single exhibit
    pub async fn exhibit(&self, id: i64) -> Result<Exhibit, CatalogServiceError> {
        self.repo
            .get_by_id(id)
            .await?
            .ok_or(CatalogServiceError::NotFound(id))
    }
}
