//! Review aggregate.

use std::fmt;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::UserId;

/// Validation errors raised by [`Review::new`] and [`ReviewRating::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewValidationError {
    EmptyMessage,
    MessageTooLong { max: usize },
    RatingOutOfRange,
}

impl fmt::Display for ReviewValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyMessage => write!(f, "review message must not be empty"),
            Self::MessageTooLong { max } => {
                write!(f, "review message must be at most {max} characters")
            }
            Self::RatingOutOfRange => write!(
                f,
                "review rating must be between {REVIEW_RATING_MIN} and {REVIEW_RATING_MAX}"
            ),
        }
    }
}

impl std::error::Error for ReviewValidationError {}

/// Lowest accepted review rating.
pub const REVIEW_RATING_MIN: f64 = 1.0;
/// Highest accepted review rating.
pub const REVIEW_RATING_MAX: f64 = 5.0;
/// Maximum allowed length for a review message.
pub const REVIEW_MESSAGE_MAX: usize = 1000;

/// A review score, constrained to the inclusive 1.0 to 5.0 band.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReviewRating(f64);

impl ReviewRating {
    /// Validates and wraps a raw score. Rejects values outside the band and
    /// non-finite floats.
    pub fn new(value: f64) -> Result<Self, ReviewValidationError> {
        if !value.is_finite() || !(REVIEW_RATING_MIN..=REVIEW_RATING_MAX).contains(&value) {
            return Err(ReviewValidationError::RatingOutOfRange);
        }
        Ok(Self(value))
    }

    /// Returns the raw score.
    pub fn value(self) -> f64 {
        self.0
    }
}

impl fmt::Display for ReviewRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Input payload for [`Review::new`].
#[derive(Debug, Clone)]
pub struct ReviewDraft {
    pub id: Uuid,
    pub accommodation_id: Uuid,
    pub user_id: UserId,
    pub booking_id: Uuid,
    pub rating: ReviewRating,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// A guest's verdict on a completed stay.
///
/// Reviews are immutable once written and feed the accommodation's derived
/// rating. At most one review exists per booking.
#[derive(Debug, Clone, PartialEq)]
pub struct Review {
    id: Uuid,
    accommodation_id: Uuid,
    user_id: UserId,
    booking_id: Uuid,
    rating: ReviewRating,
    message: String,
    created_at: DateTime<Utc>,
}

impl Review {
    /// Validates and creates a review.
    pub fn new(draft: ReviewDraft) -> Result<Self, ReviewValidationError> {
        if draft.message.trim().is_empty() {
            return Err(ReviewValidationError::EmptyMessage);
        }
        if draft.message.chars().count() > REVIEW_MESSAGE_MAX {
            return Err(ReviewValidationError::MessageTooLong {
                max: REVIEW_MESSAGE_MAX,
            });
        }
        Ok(Self {
            id: draft.id,
            accommodation_id: draft.accommodation_id,
            user_id: draft.user_id,
            booking_id: draft.booking_id,
            rating: draft.rating,
            message: draft.message,
            created_at: draft.created_at,
        })
    }

    /// Returns the review id.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Returns the reviewed accommodation id.
    pub fn accommodation_id(&self) -> Uuid {
        self.accommodation_id
    }

    /// Returns the reviewing user id.
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Returns the booking the review settles.
    pub fn booking_id(&self) -> Uuid {
        self.booking_id
    }

    /// Returns the score.
    pub fn rating(&self) -> ReviewRating {
        self.rating
    }

    /// Returns the review text.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Returns the submission timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
