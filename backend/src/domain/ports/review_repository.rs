//! Port for review persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::Review;

use super::define_port_error;

define_port_error! {
    /// Errors raised by review repository adapters.
    pub enum ReviewRepositoryError {
        /// Repository connection could not be established.
        Connection (connection) =>
            "review repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query (query) =>
            "review repository query failed: {message}",
        /// A uniqueness guard rejected a second review for one booking.
        Conflict (conflict) =>
            "review repository write conflicted: {message}",
    }
}

/// Port for reading and writing reviews.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    /// List every review written for an accommodation.
    async fn list_by_accommodation(
        &self,
        accommodation_id: &Uuid,
    ) -> Result<Vec<Review>, ReviewRepositoryError>;

    /// Whether a review already exists for a booking.
    async fn exists_for_booking(&self, booking_id: &Uuid) -> Result<bool, ReviewRepositoryError>;

    /// Persist a review. Adapters enforcing one review per booking signal a
    /// duplicate as `Conflict`.
    async fn save(&self, review: &Review) -> Result<(), ReviewRepositoryError>;
}

/// Fixture implementation for tests that do not exercise review persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureReviewRepository;

#[async_trait]
impl ReviewRepository for FixtureReviewRepository {
    async fn list_by_accommodation(
        &self,
        _accommodation_id: &Uuid,
    ) -> Result<Vec<Review>, ReviewRepositoryError> {
        Ok(Vec::new())
    }

    async fn exists_for_booking(&self, _booking_id: &Uuid) -> Result<bool, ReviewRepositoryError> {
        Ok(false)
    }

    async fn save(&self, _review: &Review) -> Result<(), ReviewRepositoryError> {
        Ok(())
    }
}
