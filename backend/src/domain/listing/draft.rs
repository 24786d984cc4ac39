//! Seller-submitted listing content and its validation rules.

use serde::Deserialize;
use url::Url;

use super::{Condition, ListingImage};
use crate::domain::taxonomy;

/// Longest title accepted, in characters.
pub const MAX_TITLE_CHARS: usize = 60;
/// Most images a listing may carry.
pub const MAX_IMAGES: usize = 10;
/// Most tags a listing may carry after normalisation.
pub const MAX_TAGS: usize = 10;

/// Raw listing content as submitted by a seller.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingDraft {
    pub title: String,
    pub description: String,
    pub price: i64,
    #[serde(default)]
    pub condition: Option<Condition>,
    pub category: String,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub image_urls: Vec<String>,
}

/// Reasons a [`ListingDraft`] is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ListingValidationError {
    #[error("title must not be empty")]
    EmptyTitle,
    #[error("title must be at most {max} characters")]
    TitleTooLong { max: usize },
    #[error("description must not be empty")]
    EmptyDescription,
    #[error("price must be greater than zero")]
    NonPositivePrice,
    #[error("unknown category `{category}`")]
    UnknownCategory { category: String },
    #[error("at least one image is required")]
    MissingImages,
    #[error("at most {max} images are allowed")]
    TooManyImages { max: usize },
    #[error("image {index} is not an http(s) URL")]
    InvalidImageUrl { index: usize },
    #[error("at most {max} tags are allowed")]
    TooManyTags { max: usize },
}

impl ListingValidationError {
    /// camelCase name of the offending request field.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyTitle | Self::TitleTooLong { .. } => "title",
            Self::EmptyDescription => "description",
            Self::NonPositivePrice => "price",
            Self::UnknownCategory { .. } => "category",
            Self::MissingImages | Self::TooManyImages { .. } | Self::InvalidImageUrl { .. } => {
                "imageUrls"
            }
            Self::TooManyTags { .. } => "tags",
        }
    }
}

/// Listing content that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingContent {
    pub(super) title: String,
    pub(super) description: String,
    pub(super) price: u64,
    pub(super) condition: Condition,
    pub(super) category: String,
    pub(super) brand: Option<String>,
    pub(super) model: Option<String>,
    pub(super) tags: Vec<String>,
    pub(super) images: Vec<ListingImage>,
}

impl ListingContent {
    /// Validate a seller submission.
    pub fn new(draft: ListingDraft) -> Result<Self, ListingValidationError> {
        Self::try_from(draft)
    }

    pub fn title(&self) -> &str {
        &self.title
    }
    pub fn category(&self) -> &str {
        &self.category
    }
    pub fn tags(&self) -> &[String] {
        &self.tags
    }
    pub fn images(&self) -> &[ListingImage] {
        &self.images
    }
}

impl TryFrom<ListingDraft> for ListingContent {
    type Error = ListingValidationError;

    fn try_from(draft: ListingDraft) -> Result<Self, Self::Error> {
        let ListingDraft {
            title,
            description,
            price,
            condition,
            category,
            brand,
            model,
            tags,
            image_urls,
        } = draft;

        let title = validate_title(&title)?;
        if description.trim().is_empty() {
            return Err(ListingValidationError::EmptyDescription);
        }
        let price = validate_price(price)?;
        if taxonomy::category(&category).is_none() {
            return Err(ListingValidationError::UnknownCategory { category });
        }
        let images = validate_images(&image_urls)?;
        let tags = normalize_tags(tags);
        if tags.len() > MAX_TAGS {
            return Err(ListingValidationError::TooManyTags { max: MAX_TAGS });
        }

        Ok(Self {
            title,
            description,
            price,
            condition: condition.unwrap_or_default(),
            category,
            brand: non_blank(brand),
            model: non_blank(model),
            tags,
            images,
        })
    }
}

fn validate_title(raw: &str) -> Result<String, ListingValidationError> {
    let title = raw.trim();
    if title.is_empty() {
        return Err(ListingValidationError::EmptyTitle);
    }
    if title.chars().count() > MAX_TITLE_CHARS {
        return Err(ListingValidationError::TitleTooLong {
            max: MAX_TITLE_CHARS,
        });
    }
    Ok(title.to_owned())
}

fn validate_price(raw: i64) -> Result<u64, ListingValidationError> {
    u64::try_from(raw)
        .ok()
        .filter(|price| *price > 0)
        .ok_or(ListingValidationError::NonPositivePrice)
}

fn validate_images(urls: &[String]) -> Result<Vec<ListingImage>, ListingValidationError> {
    if urls.is_empty() {
        return Err(ListingValidationError::MissingImages);
    }
    if urls.len() > MAX_IMAGES {
        return Err(ListingValidationError::TooManyImages { max: MAX_IMAGES });
    }
    urls.iter()
        .enumerate()
        .map(|(index, raw)| {
            let url = Url::parse(raw.trim())
                .ok()
                .filter(|url| matches!(url.scheme(), "http" | "https"))
                .ok_or(ListingValidationError::InvalidImageUrl { index })?;
            Ok(ListingImage {
                url: url.into(),
                is_primary: index == 0,
            })
        })
        .collect()
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_owned())
        .filter(|trimmed| !trimmed.is_empty())
}

/// Normalise seller-entered tags.
///
/// Each tag is trimmed with commas removed; empty tags are dropped and later
/// duplicates of an earlier tag are ignored.
///
/// # Examples
/// ```
/// use storefront::domain::listing::normalize_tags;
///
/// let tags = normalize_tags(vec![" Ryzen 7 ".into(), "AM4,".into(), "Ryzen 7".into(), ",".into()]);
/// assert_eq!(tags, vec!["Ryzen 7".to_owned(), "AM4".to_owned()]);
/// ```
pub fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    let mut normalized: Vec<String> = Vec::with_capacity(tags.len());
    for raw in tags {
        let tag = raw.replace(',', "").trim().to_owned();
        if !tag.is_empty() && !normalized.contains(&tag) {
            normalized.push(tag);
        }
    }
    normalized
}
