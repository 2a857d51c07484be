//! Driving port for review submission.
//!
//! Accepting a review also refreshes the accommodation's aggregate rating,
//! so the response carries the recomputed mean alongside the stored review.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{CallerContext, Error, Review, ReviewDraft, ReviewRating, UserId};

/// Serializable review payload for driving ports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewPayload {
    pub id: Uuid,
    pub accommodation_id: Uuid,
    pub user_id: UserId,
    pub booking_id: Uuid,
    pub rating: f64,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl From<Review> for ReviewPayload {
    fn from(value: Review) -> Self {
        Self {
            id: value.id(),
            accommodation_id: value.accommodation_id(),
            user_id: value.user_id().clone(),
            booking_id: value.booking_id(),
            rating: value.rating().value(),
            message: value.message().to_owned(),
            created_at: value.created_at(),
        }
    }
}

/// Request from a guest to review a completed stay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitReviewRequest {
    pub caller: CallerContext,
    pub accommodation_id: Uuid,
    pub booking_id: Uuid,
    pub rating: f64,
    pub message: String,
}

/// Response from submitting a review, including the accommodation's
/// recomputed aggregate rating.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitReviewResponse {
    pub review: ReviewPayload,
    pub accommodation_rating: f64,
}

/// Driving port for review write operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReviewCommand: Send + Sync {
    /// Submits a review for the caller's completed booking and recomputes
    /// the accommodation's aggregate rating.
    async fn submit_review(&self, request: SubmitReviewRequest)
    -> Result<SubmitReviewResponse, Error>;
}

/// Fixture command implementation for tests that do not need persistence.
/// The request is validated against the domain entities and echoed back;
/// the aggregate rating mirrors the single submitted review.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureReviewCommand;

#[async_trait]
impl ReviewCommand for FixtureReviewCommand {
    async fn submit_review(
        &self,
        request: SubmitReviewRequest,
    ) -> Result<SubmitReviewResponse, Error> {
        let rating = ReviewRating::new(request.rating)
            .map_err(|err| Error::invalid_request(format!("invalid review payload: {err}")))?;
        let review = Review::new(ReviewDraft {
            id: Uuid::new_v4(),
            accommodation_id: request.accommodation_id,
            user_id: request.caller.id,
            booking_id: request.booking_id,
            rating,
            message: request.message,
            created_at: DateTime::<Utc>::UNIX_EPOCH,
        })
        .map_err(|err| Error::invalid_request(format!("invalid review payload: {err}")))?;

        let accommodation_rating = review.rating().value();
        Ok(SubmitReviewResponse {
            review: review.into(),
            accommodation_rating,
        })
    }
}
