//! Listing builders shared by unit tests.

use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;

use super::{Condition, Listing, ListingDraft, ListingId, ListingImage, ListingParts, ListingStatus};
use crate::domain::UserId;

pub(crate) const SELLER_ID: &str = "11111111-1111-1111-1111-111111111111";

pub(crate) fn seller() -> UserId {
    UserId::new(SELLER_ID).expect("fixture seller id is valid")
}

/// Timestamp `minutes` after a fixed epoch, so tests can order by age.
pub(crate) fn at(minutes: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 4, 1, 9, 0, 0)
        .single()
        .expect("fixed timestamp is valid")
        + chrono::Duration::minutes(minutes)
}

/// Clock frozen at [`at`]`(minutes)`.
pub(crate) struct FixedClock(DateTime<Utc>);

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

pub(crate) fn fixed_clock(minutes: i64) -> Arc<dyn Clock> {
    Arc::new(FixedClock(at(minutes)))
}

/// Builder producing active listings with sensible defaults.
#[derive(Debug, Clone)]
pub(crate) struct ListingBuilder {
    parts: ListingParts,
}

impl ListingBuilder {
    pub(crate) fn new(title: &str) -> Self {
        Self {
            parts: ListingParts {
                id: ListingId::random(),
                seller_id: seller(),
                title: title.to_owned(),
                description: format!("{title} in working order"),
                price: 10_000,
                condition: Condition::New,
                category: "CPU".to_owned(),
                brand: None,
                model: None,
                tags: Vec::new(),
                images: vec![ListingImage {
                    url: "https://img.example.test/1.jpg".to_owned(),
                    is_primary: true,
                }],
                status: ListingStatus::Active,
                created_at: at(0),
            },
        }
    }

    pub(crate) fn id(mut self, id: ListingId) -> Self {
        self.parts.id = id;
        self
    }

    pub(crate) fn seller(mut self, seller: UserId) -> Self {
        self.parts.seller_id = seller;
        self
    }

    pub(crate) fn category(mut self, category: &str) -> Self {
        self.parts.category = category.to_owned();
        self
    }

    pub(crate) fn brand(mut self, brand: &str) -> Self {
        self.parts.brand = Some(brand.to_owned());
        self
    }

    pub(crate) fn model(mut self, model: &str) -> Self {
        self.parts.model = Some(model.to_owned());
        self
    }

    pub(crate) fn tags(mut self, tags: &[&str]) -> Self {
        self.parts.tags = tags.iter().map(|tag| (*tag).to_owned()).collect();
        self
    }

    pub(crate) fn description(mut self, description: &str) -> Self {
        self.parts.description = description.to_owned();
        self
    }

    pub(crate) fn price(mut self, price: u64) -> Self {
        self.parts.price = price;
        self
    }

    pub(crate) fn status(mut self, status: ListingStatus) -> Self {
        self.parts.status = status;
        self
    }

    pub(crate) fn created_minutes(mut self, minutes: i64) -> Self {
        self.parts.created_at = at(minutes);
        self
    }

    pub(crate) fn build(self) -> Listing {
        Listing::from_parts(self.parts)
    }
}

/// A draft that passes every validation rule.
pub(crate) fn valid_draft() -> ListingDraft {
    ListingDraft {
        title: "AMD Ryzen 7 5800X".to_owned(),
        description: "Boxed, used for six months.".to_owned(),
        price: 32_000,
        condition: Some(Condition::LikeNew),
        category: "CPU".to_owned(),
        brand: Some("AMD".to_owned()),
        model: Some("Ryzen 7".to_owned()),
        tags: vec!["Ryzen 7".to_owned(), "Socket AM4".to_owned()],
        image_urls: vec![
            "https://img.example.test/front.jpg".to_owned(),
            "https://img.example.test/back.jpg".to_owned(),
        ],
    }
}
