//! Driving port for seller-side listing mutations.

use async_trait::async_trait;

use crate::domain::{Error, Listing, ListingDraft, ListingId, ListingStatus, UserId};

/// Domain use-case port for creating and maintaining listings.
///
/// Every operation acts on behalf of `seller`. Mutating another seller's
/// listing yields `forbidden`; an unknown id yields `not_found`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ListingsCommand: Send + Sync {
    /// Validate `draft` and publish it as an active listing.
    async fn create(&self, seller: &UserId, draft: ListingDraft) -> Result<Listing, Error>;

    /// Replace the content of a listing, keeping its id, status and age.
    async fn update(
        &self,
        seller: &UserId,
        id: ListingId,
        draft: ListingDraft,
    ) -> Result<Listing, Error>;

    /// Move a listing between active, sold and hidden.
    async fn change_status(
        &self,
        seller: &UserId,
        id: ListingId,
        status: ListingStatus,
    ) -> Result<Listing, Error>;

    /// Delete a listing and its images.
    async fn delete(&self, seller: &UserId, id: ListingId) -> Result<(), Error>;
}

/// Fixture command that validates drafts but persists nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureListingsCommand;

#[async_trait]
impl ListingsCommand for FixtureListingsCommand {
    async fn create(&self, seller: &UserId, draft: ListingDraft) -> Result<Listing, Error> {
        let content = crate::domain::ListingContent::new(draft)
            .map_err(|err| Error::invalid_request(err.to_string()))?;
        Ok(Listing::publish(
            ListingId::random(),
            seller.clone(),
            content,
            chrono::Utc::now(),
        ))
    }

    async fn update(
        &self,
        _seller: &UserId,
        id: ListingId,
        _draft: ListingDraft,
    ) -> Result<Listing, Error> {
        Err(Error::not_found(format!("listing {id} not found")))
    }

    async fn change_status(
        &self,
        _seller: &UserId,
        id: ListingId,
        _status: ListingStatus,
    ) -> Result<Listing, Error> {
        Err(Error::not_found(format!("listing {id} not found")))
    }

    async fn delete(&self, _seller: &UserId, id: ListingId) -> Result<(), Error> {
        Err(Error::not_found(format!("listing {id} not found")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::listing::fixtures::{seller, valid_draft};

    #[tokio::test]
    async fn fixture_create_publishes_an_active_listing() {
        let listing = FixtureListingsCommand
            .create(&seller(), valid_draft())
            .await
            .expect("valid draft is accepted");

        assert_eq!(listing.status(), ListingStatus::Active);
        assert!(listing.is_owned_by(&seller()));
    }

    #[tokio::test]
    async fn fixture_create_rejects_invalid_drafts() {
        let mut draft = valid_draft();
        draft.title = "   ".to_owned();

        let err = FixtureListingsCommand
            .create(&seller(), draft)
            .await
            .expect_err("blank title");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
    }
}
