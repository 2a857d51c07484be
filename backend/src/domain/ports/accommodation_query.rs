//! Driving port for accommodation read operations.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::Error;

use super::accommodation_command::AccommodationPayload;

/// Request to fetch one accommodation by identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetAccommodationRequest {
    pub accommodation_id: Uuid,
}

/// Response for a single accommodation lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetAccommodationResponse {
    pub accommodation: AccommodationPayload,
}

/// Driving port for accommodation read operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccommodationQuery: Send + Sync {
    /// Fetches one accommodation by identifier, listed or not.
    async fn get_accommodation(
        &self,
        request: GetAccommodationRequest,
    ) -> Result<GetAccommodationResponse, Error>;
}

/// Fixture query implementation for tests that do not need persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureAccommodationQuery;

#[async_trait]
impl AccommodationQuery for FixtureAccommodationQuery {
    async fn get_accommodation(
        &self,
        request: GetAccommodationRequest,
    ) -> Result<GetAccommodationResponse, Error> {
        Err(Error::not_found(format!(
            "accommodation {} not found",
            request.accommodation_id
        )))
    }
}
