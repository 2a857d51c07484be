//! Driving port for review read operations.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::Error;

use super::review_command::ReviewPayload;

/// Request to list an accommodation's reviews.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListReviewsRequest {
    pub accommodation_id: Uuid,
}

/// Response containing an accommodation's reviews, newest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListReviewsResponse {
    pub reviews: Vec<ReviewPayload>,
}

/// Driving port for review read operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReviewQuery: Send + Sync {
    /// Lists an existing accommodation's reviews, newest first.
    async fn list_reviews(&self, request: ListReviewsRequest) -> Result<ListReviewsResponse, Error>;
}

/// Fixture query implementation for tests that do not need persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureReviewQuery;

#[async_trait]
impl ReviewQuery for FixtureReviewQuery {
    async fn list_reviews(
        &self,
        _request: ListReviewsRequest,
    ) -> Result<ListReviewsResponse, Error> {
        Ok(ListReviewsResponse {
            reviews: Vec::new(),
        })
    }
}
