//! Listing aggregate: an item a seller offers on the marketplace.
//!
//! Listings are created from a validated [`ListingContent`], revised by their
//! seller, and moved between [`ListingStatus`] values. Only `active` listings
//! appear on the browse and search surfaces.

mod draft;

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::UserId;

pub use draft::{
    ListingContent, ListingDraft, ListingValidationError, MAX_IMAGES, MAX_TAGS, MAX_TITLE_CHARS,
    normalize_tags,
};

/// Opaque listing identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ListingId(Uuid);

impl ListingId {
    /// Wrap an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Generate a fresh identifier for a new listing.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for ListingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for ListingId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Error returned when a stored or submitted enum code is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} `{value}`")]
pub struct UnknownCodeError {
    kind: &'static str,
    value: String,
}

/// Physical condition of the item, from new to poor.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    /// 新品
    #[default]
    New,
    /// 未使用に近い
    LikeNew,
    /// 目立った傷や汚れなし
    NoVisibleDamage,
    /// やや傷や汚れあり
    MinorDamage,
    /// 傷や汚れあり
    VisibleDamage,
    /// 全体的に状態が悪い
    Poor,
}

impl Condition {
    /// Every condition, best first.
    pub const ALL: [Self; 6] = [
        Self::New,
        Self::LikeNew,
        Self::NoVisibleDamage,
        Self::MinorDamage,
        Self::VisibleDamage,
        Self::Poor,
    ];

    /// Stable storage code.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::LikeNew => "like_new",
            Self::NoVisibleDamage => "no_visible_damage",
            Self::MinorDamage => "minor_damage",
            Self::VisibleDamage => "visible_damage",
            Self::Poor => "poor",
        }
    }

    /// Label shown to shoppers.
    pub fn label(self) -> &'static str {
        match self {
            Self::New => "新品",
            Self::LikeNew => "未使用に近い",
            Self::NoVisibleDamage => "目立った傷や汚れなし",
            Self::MinorDamage => "やや傷や汚れあり",
            Self::VisibleDamage => "傷や汚れあり",
            Self::Poor => "全体的に状態が悪い",
        }
    }
}

impl FromStr for Condition {
    type Err = UnknownCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|condition| condition.as_str() == s)
            .ok_or_else(|| UnknownCodeError {
                kind: "condition",
                value: s.to_owned(),
            })
    }
}

/// Visibility state of a listing.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum ListingStatus {
    /// Visible on browse and search.
    #[default]
    Active,
    /// Sold; visible on the detail page only.
    Sold,
    /// Withdrawn by the seller; visible to the seller only.
    Hidden,
}

impl ListingStatus {
    /// Stable storage code.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Sold => "sold",
            Self::Hidden => "hidden",
        }
    }
}

impl FromStr for ListingStatus {
    type Err = UnknownCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "sold" => Ok(Self::Sold),
            "hidden" => Ok(Self::Hidden),
            other => Err(UnknownCodeError {
                kind: "listing status",
                value: other.to_owned(),
            }),
        }
    }
}

/// Image attached to a listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListingImage {
    /// Public URL of the stored image.
    pub url: String,
    /// Whether this is the cover image.
    pub is_primary: bool,
}

/// Field values of a listing as persisted.
///
/// Adapters rebuild [`Listing`] values from storage through this struct;
/// it performs no validation because stored rows were validated on write.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingParts {
    pub id: ListingId,
    pub seller_id: UserId,
    pub title: String,
    pub description: String,
    pub price: u64,
    pub condition: Condition,
    pub category: String,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub tags: Vec<String>,
    pub images: Vec<ListingImage>,
    pub status: ListingStatus,
    pub created_at: DateTime<Utc>,
}

/// An item offered for sale.
///
/// ## Invariants
/// - `price` is positive when created through [`Listing::publish`].
/// - At most one image is primary.
/// - Tags hold no duplicates.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
    id: ListingId,
    seller_id: UserId,
    title: String,
    description: String,
    price: u64,
    condition: Condition,
    category: String,
    brand: Option<String>,
    model: Option<String>,
    tags: Vec<String>,
    images: Vec<ListingImage>,
    status: ListingStatus,
    created_at: DateTime<Utc>,
}

impl Listing {
    /// Create an active listing from validated seller input.
    pub fn publish(
        id: ListingId,
        seller_id: UserId,
        content: ListingContent,
        created_at: DateTime<Utc>,
    ) -> Self {
        let mut listing = Self {
            id,
            seller_id,
            title: String::new(),
            description: String::new(),
            price: 0,
            condition: Condition::default(),
            category: String::new(),
            brand: None,
            model: None,
            tags: Vec::new(),
            images: Vec::new(),
            status: ListingStatus::Active,
            created_at,
        };
        listing.revise(content);
        listing
    }

    /// Rebuild a listing from stored field values.
    pub fn from_parts(parts: ListingParts) -> Self {
        let ListingParts {
            id,
            seller_id,
            title,
            description,
            price,
            condition,
            category,
            brand,
            model,
            tags,
            images,
            status,
            created_at,
        } = parts;
        Self {
            id,
            seller_id,
            title,
            description,
            price,
            condition,
            category,
            brand,
            model,
            tags,
            images,
            status,
            created_at,
        }
    }

    /// Replace the seller-editable content, keeping id, status and timestamps.
    pub fn revise(&mut self, content: ListingContent) {
        let ListingContent {
            title,
            description,
            price,
            condition,
            category,
            brand,
            model,
            tags,
            images,
        } = content;
        self.title = title;
        self.description = description;
        self.price = price;
        self.condition = condition;
        self.category = category;
        self.brand = brand;
        self.model = model;
        self.tags = tags;
        self.images = images;
    }

    /// Move the listing to a new status.
    pub fn set_status(&mut self, status: ListingStatus) {
        self.status = status;
    }

    pub fn id(&self) -> ListingId {
        self.id
    }
    pub fn seller_id(&self) -> &UserId {
        &self.seller_id
    }
    pub fn title(&self) -> &str {
        &self.title
    }
    pub fn description(&self) -> &str {
        &self.description
    }
    pub fn price(&self) -> u64 {
        self.price
    }
    pub fn condition(&self) -> Condition {
        self.condition
    }
    pub fn category(&self) -> &str {
        &self.category
    }
    pub fn brand(&self) -> Option<&str> {
        self.brand.as_deref()
    }
    pub fn model(&self) -> Option<&str> {
        self.model.as_deref()
    }
    pub fn tags(&self) -> &[String] {
        &self.tags
    }
    pub fn images(&self) -> &[ListingImage] {
        &self.images
    }
    pub fn status(&self) -> ListingStatus {
        self.status
    }
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Cover image: the primary image, else the first one.
    pub fn primary_image(&self) -> Option<&ListingImage> {
        self.images
            .iter()
            .find(|image| image.is_primary)
            .or_else(|| self.images.first())
    }

    /// Whether `user` sold this listing.
    pub fn is_owned_by(&self, user: &UserId) -> bool {
        &self.seller_id == user
    }

    /// Whether `viewer` may see the listing's detail page.
    ///
    /// Hidden listings are visible to their seller only.
    pub fn is_visible_to(&self, viewer: Option<&UserId>) -> bool {
        self.status != ListingStatus::Hidden || viewer.is_some_and(|user| self.is_owned_by(user))
    }
}


#[cfg(test)]
pub(crate) mod fixtures;
