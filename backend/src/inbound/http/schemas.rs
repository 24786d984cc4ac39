//! Response payloads shared by the listing, favorite and user handlers.
//!
//! Domain listings stay free of wire concerns; these DTOs flatten them into
//! the camelCase JSON the storefront client renders, and attach the pager
//! window to every paged response.

use chrono::{DateTime, Utc};
use pagination::{Page, PageRange, page_link};
use url::Url;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Condition, Listing, ListingImage, ListingStatus};

/// A listing as rendered on cards and detail pages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListingResponse {
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: String,
    pub seller_id: String,
    #[schema(example = "AMD Ryzen 7 5800X")]
    pub title: String,
    pub description: String,
    /// Price in yen.
    #[schema(example = 32000)]
    pub price: u64,
    pub condition: Condition,
    /// Shopper-facing label of `condition`.
    #[schema(example = "未使用に近い")]
    pub condition_label: String,
    #[schema(example = "CPU")]
    pub category: String,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub tags: Vec<String>,
    pub images: Vec<ListingImage>,
    pub primary_image_url: Option<String>,
    pub status: ListingStatus,
    pub created_at: DateTime<Utc>,
}

impl From<&Listing> for ListingResponse {
    fn from(listing: &Listing) -> Self {
        Self {
            id: listing.id().to_string(),
            seller_id: listing.seller_id().to_string(),
            title: listing.title().to_owned(),
            description: listing.description().to_owned(),
            price: listing.price(),
            condition: listing.condition(),
            condition_label: listing.condition().label().to_owned(),
            category: listing.category().to_owned(),
            brand: listing.brand().map(str::to_owned),
            model: listing.model().map(str::to_owned),
            tags: listing.tags().to_vec(),
            images: listing.images().to_vec(),
            primary_image_url: listing.primary_image().map(|image| image.url.clone()),
            status: listing.status(),
            created_at: listing.created_at(),
        }
    }
}

impl From<Listing> for ListingResponse {
    fn from(listing: Listing) -> Self {
        Self::from(&listing)
    }
}

/// Pager state for a paged response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaginationResponse {
    #[schema(example = 2)]
    pub page: u32,
    #[schema(example = 20)]
    pub page_size: u32,
    #[schema(example = 45)]
    pub total_items: u64,
    #[schema(example = 3)]
    pub total_pages: u64,
    /// Page numbers to render as links, at most seven around `page`.
    #[schema(example = json!([1, 2, 3]))]
    pub pages: Vec<u64>,
    pub has_next: bool,
    pub has_previous: bool,
    /// Links for the neighbouring and visible pages, when the request URL is known.
    #[serde(default, skip_serializing_if = "PageLinksResponse::is_empty")]
    pub links: PageLinksResponse,
}

/// Relative page links that keep every other query parameter of the request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PageLinksResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "/api/v1/listings?category=CPU&page=1")]
    pub previous: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "/api/v1/listings?category=CPU&page=3")]
    pub next: Option<String>,
    /// One link per entry of `pages`, in the same order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pages: Vec<String>,
}

impl PageLinksResponse {
    fn is_empty(&self) -> bool {
        self.previous.is_none() && self.next.is_none() && self.pages.is_empty()
    }
}

fn relative_link(base: &Url, page: u64) -> String {
    let page = u32::try_from(page).unwrap_or(u32::MAX);
    let link = page_link(base, page);
    match link.query() {
        Some(query) => format!("{}?{query}", link.path()),
        None => link.path().to_owned(),
    }
}

impl PaginationResponse {
    /// Fill `links` from the URL the page was requested with.
    #[must_use]
    pub fn linked_to(mut self, request_url: &Url) -> Self {
        let current = u64::from(self.page);
        self.links = PageLinksResponse {
            previous: self
                .has_previous
                .then(|| relative_link(request_url, current.saturating_sub(1))),
            next: self
                .has_next
                .then(|| relative_link(request_url, current.saturating_add(1))),
            pages: self
                .pages
                .iter()
                .map(|&page| relative_link(request_url, page))
                .collect(),
        };
        self
    }
}

impl<T> From<&Page<T>> for PaginationResponse {
    fn from(page: &Page<T>) -> Self {
        Self {
            page: page.page(),
            page_size: page.page_size(),
            total_items: page.total_items(),
            total_pages: page.total_pages(),
            pages: PageRange::around(page.page(), page.total_pages())
                .pages()
                .collect(),
            has_next: page.has_next(),
            has_previous: page.has_previous(),
            links: PageLinksResponse::default(),
        }
    }
}

/// One page of listings with its pager state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListingPageResponse {
    pub items: Vec<ListingResponse>,
    pub pagination: PaginationResponse,
}

impl ListingPageResponse {
    /// Attach page links derived from `request_url`.
    #[must_use]
    pub fn linked_to(mut self, request_url: &Url) -> Self {
        self.pagination = self.pagination.linked_to(request_url);
        self
    }
}

impl From<Page<Listing>> for ListingPageResponse {
    fn from(page: Page<Listing>) -> Self {
        let pagination = PaginationResponse::from(&page);
        Self {
            items: page.into_items().into_iter().map(Into::into).collect(),
            pagination,
        }
    }
}

/// Unpaged listing collection, used for seller and favorite lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListingListResponse {
    pub items: Vec<ListingResponse>,
}

impl From<Vec<Listing>> for ListingListResponse {
    fn from(listings: Vec<Listing>) -> Self {
        Self {
            items: listings.into_iter().map(Into::into).collect(),
        }
    }
}
