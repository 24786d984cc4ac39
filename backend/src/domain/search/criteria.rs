//! Typed browse and search criteria.

use std::fmt;
use std::str::FromStr;

use pagination::PageRequest;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::resolver::{ListingFilter, TextMatch};

/// Result ordering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum SortMode {
    /// Most recently listed first.
    #[default]
    Newest,
    /// Most expensive first.
    PriceDesc,
    /// Cheapest first.
    PriceAsc,
}

impl SortMode {
    /// Wire value of the sort mode.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::PriceDesc => "priceDesc",
            Self::PriceAsc => "priceAsc",
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised for sort values outside `newest`, `priceDesc`, `priceAsc`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sort mode `{0}`")]
pub struct UnknownSortModeError(pub String);

impl FromStr for SortMode {
    type Err = UnknownSortModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "newest" => Ok(Self::Newest),
            "priceDesc" => Ok(Self::PriceDesc),
            "priceAsc" => Ok(Self::PriceAsc),
            other => Err(UnknownSortModeError(other.to_owned())),
        }
    }
}

/// Which fields a free-text search inspects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum SearchScope {
    /// Header search box: title and tags.
    Quick,
    /// Search results page: title, tags and description.
    #[default]
    Full,
}

/// Raised when a search query is blank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("search query must not be empty")]
pub struct SearchQueryError;

/// A trimmed, non-empty search query.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SearchQuery(String);

impl SearchQuery {
    /// Trim and validate a raw query.
    pub fn new(raw: &str) -> Result<Self, SearchQueryError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(SearchQueryError);
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|trimmed| !trimmed.is_empty())
        .map(str::to_owned)
}

/// Category browse selection.
///
/// Brand and model narrow within the selected category. Blank values are
/// treated as absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowseCriteria {
    category: Option<String>,
    brand: Option<String>,
    model: Option<String>,
    sort: SortMode,
    page: PageRequest,
}

impl BrowseCriteria {
    /// Criteria matching every active listing, newest first.
    pub fn new(page: PageRequest) -> Self {
        Self {
            category: None,
            brand: None,
            model: None,
            sort: SortMode::default(),
            page,
        }
    }

    #[must_use]
    pub fn with_category(mut self, category: Option<&str>) -> Self {
        self.category = non_blank(category);
        self
    }

    #[must_use]
    pub fn with_brand(mut self, brand: Option<&str>) -> Self {
        self.brand = non_blank(brand);
        self
    }

    #[must_use]
    pub fn with_model(mut self, model: Option<&str>) -> Self {
        self.model = non_blank(model);
        self
    }

    #[must_use]
    pub fn with_sort(mut self, sort: SortMode) -> Self {
        self.sort = sort;
        self
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }
    pub fn brand(&self) -> Option<&str> {
        self.brand.as_deref()
    }
    pub fn model(&self) -> Option<&str> {
        self.model.as_deref()
    }
    pub fn sort(&self) -> SortMode {
        self.sort
    }
    pub fn page(&self) -> PageRequest {
        self.page
    }

    /// Whether the brand/model rules must run in process.
    ///
    /// Storage matches categories natively but not the tag substring rules.
    /// A model only applies under a brand, so the brand alone decides.
    pub fn needs_in_process_filter(&self) -> bool {
        self.brand.is_some()
    }

    /// Filter equivalent to this selection.
    pub fn filter(&self) -> ListingFilter {
        ListingFilter {
            category: self.category.clone(),
            brand: self.brand.clone(),
            model: self.model.clone(),
            text: None,
        }
    }
}

/// Free-text search request; results are always newest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchCriteria {
    query: SearchQuery,
    scope: SearchScope,
    page: PageRequest,
}

impl SearchCriteria {
    pub fn new(query: SearchQuery, scope: SearchScope, page: PageRequest) -> Self {
        Self { query, scope, page }
    }

    pub fn query(&self) -> &SearchQuery {
        &self.query
    }
    pub fn scope(&self) -> SearchScope {
        self.scope
    }
    pub fn page(&self) -> PageRequest {
        self.page
    }

    /// Text match this search applies.
    pub fn text_match(&self) -> TextMatch {
        TextMatch {
            query: self.query.clone(),
            scope: self.scope,
        }
    }

    /// Filter equivalent to this search.
    pub fn filter(&self) -> ListingFilter {
        ListingFilter {
            text: Some(self.text_match()),
            ..ListingFilter::default()
        }
    }
}
