//! Review domain services.
//!
//! Accepting a review settles a completed booking and refreshes the
//! accommodation's aggregate rating. The aggregate is recomputed from the
//! full review history on every accepted write rather than adjusted
//! incrementally, so a lost update cannot skew the stored mean.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use mockable::Clock;
use uuid::Uuid;

use crate::domain::ports::{
    AccommodationRepository, BookingRepository, ListReviewsRequest, ListReviewsResponse,
    ReviewCommand, ReviewPayload, ReviewQuery, ReviewRepository, SubmitReviewRequest,
    SubmitReviewResponse,
};
use crate::domain::service_support::{
    accommodation_not_found, booking_not_found, map_accommodation_repository_error,
    map_booking_repository_error, map_review_repository_error,
};
use crate::domain::{Error, Review, ReviewDraft, ReviewRating, rules};

/// Unweighted arithmetic mean of the stored ratings; `0.0` for an
/// accommodation nobody has reviewed yet.
fn mean_rating(reviews: &[Review]) -> f64 {
    if reviews.is_empty() {
        return 0.0;
    }
    let sum: f64 = reviews.iter().map(|review| review.rating().value()).sum();
    sum / reviews.len() as f64
}

/// Review service implementing the command driving port.
pub struct ReviewCommandService<A, B, R> {
    accommodation_repo: Arc<A>,
    booking_repo: Arc<B>,
    review_repo: Arc<R>,
    clock: Arc<dyn Clock>,
}

// Hand-rolled so cloning shares the `Arc`s without requiring the
// repositories themselves to be `Clone`.
impl<A, B, R> Clone for ReviewCommandService<A, B, R> {
    fn clone(&self) -> Self {
        Self {
            accommodation_repo: Arc::clone(&self.accommodation_repo),
            booking_repo: Arc::clone(&self.booking_repo),
            review_repo: Arc::clone(&self.review_repo),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<A, B, R> ReviewCommandService<A, B, R> {
    /// Create a new command service with the three repositories and a clock.
    pub fn new(
        accommodation_repo: Arc<A>,
        booking_repo: Arc<B>,
        review_repo: Arc<R>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            accommodation_repo,
            booking_repo,
            review_repo,
            clock,
        }
    }

    fn today(&self) -> NaiveDate {
        self.clock.utc().date_naive()
    }
}

#[async_trait]
impl<A, B, R> ReviewCommand for ReviewCommandService<A, B, R>
where
    A: AccommodationRepository,
    B: BookingRepository,
    R: ReviewRepository,
{
    async fn submit_review(
        &self,
        request: SubmitReviewRequest,
    ) -> Result<SubmitReviewResponse, Error> {
        let rating = ReviewRating::new(request.rating)
            .map_err(|err| Error::invalid_request(format!("invalid review payload: {err}")))?;
        let review = Review::new(ReviewDraft {
            id: Uuid::new_v4(),
            accommodation_id: request.accommodation_id,
            user_id: request.caller.id.clone(),
            booking_id: request.booking_id,
            rating,
            message: request.message,
            created_at: self.clock.utc(),
        })
        .map_err(|err| Error::invalid_request(format!("invalid review payload: {err}")))?;

        let mut accommodation = self
            .accommodation_repo
            .find_by_id(&request.accommodation_id)
            .await
            .map_err(map_accommodation_repository_error)?
            .ok_or_else(|| accommodation_not_found(&request.accommodation_id))?;

        let booking = self
            .booking_repo
            .find_by_id_and_user(&request.booking_id, &request.caller.id)
            .await
            .map_err(map_booking_repository_error)?
            .filter(|booking| booking.accommodation_id() == accommodation.id())
            .ok_or_else(|| booking_not_found(&request.booking_id))?;

        if !booking.is_completed(self.today()) {
            return Err(Error::rule_violation(rules::BOOKING_NOT_COMPLETED));
        }
        if self
            .review_repo
            .exists_for_booking(&request.booking_id)
            .await
            .map_err(map_review_repository_error)?
        {
            return Err(Error::rule_violation(rules::BOOKING_ALREADY_REVIEWED));
        }

        self.review_repo
            .save(&review)
            .await
            .map_err(map_review_repository_error)?;

        let reviews = self
            .review_repo
            .list_by_accommodation(&request.accommodation_id)
            .await
            .map_err(map_review_repository_error)?;
        let accommodation_rating = mean_rating(&reviews);
        accommodation.update_rating(accommodation_rating);
        self.accommodation_repo
            .save(&accommodation)
            .await
            .map_err(map_accommodation_repository_error)?;

        Ok(SubmitReviewResponse {
            review: review.into(),
            accommodation_rating,
        })
    }
}

/// Review service implementing the query driving port.
pub struct ReviewQueryService<A, R> {
    accommodation_repo: Arc<A>,
    review_repo: Arc<R>,
}

impl<A, R> Clone for ReviewQueryService<A, R> {
    fn clone(&self) -> Self {
        Self {
            accommodation_repo: Arc::clone(&self.accommodation_repo),
            review_repo: Arc::clone(&self.review_repo),
        }
    }
}

impl<A, R> ReviewQueryService<A, R> {
    /// Create a new query service with the accommodation and review
    /// repositories.
    pub fn new(accommodation_repo: Arc<A>, review_repo: Arc<R>) -> Self {
        Self {
            accommodation_repo,
            review_repo,
        }
    }
}

#[async_trait]
impl<A, R> ReviewQuery for ReviewQueryService<A, R>
where
    A: AccommodationRepository,
    R: ReviewRepository,
{
    async fn list_reviews(&self, request: ListReviewsRequest) -> Result<ListReviewsResponse, Error> {
        self.accommodation_repo
            .find_by_id(&request.accommodation_id)
            .await
            .map_err(map_accommodation_repository_error)?
            .ok_or_else(|| accommodation_not_found(&request.accommodation_id))?;

        let mut reviews = self
            .review_repo
            .list_by_accommodation(&request.accommodation_id)
            .await
            .map_err(map_review_repository_error)?;
        // Newest first, independent of adapter ordering.
        reviews.sort_by(|a, b| b.created_at().cmp(&a.created_at()));

        Ok(ListReviewsResponse {
            reviews: reviews.into_iter().map(ReviewPayload::from).collect(),
        })
    }
}

#[cfg(test)]
#[path = "review_service_tests.rs"]
mod tests;
