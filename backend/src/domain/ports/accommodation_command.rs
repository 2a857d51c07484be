//! Driving port for accommodation lifecycle mutations.
//!
//! Hosts register accommodations onto the marketplace and later take them
//! off again. Unlisting cascades into the accommodation's active bookings,
//! so the response reports which bookings were cancelled.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Accommodation, AccommodationDraft, CallerContext, Error, rules};

/// Serializable accommodation payload for driving ports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccommodationPayload {
    pub id: Uuid,
    pub host_id: crate::domain::UserId,
    pub name: String,
    pub max_guests: u32,
    pub listed: bool,
    pub rating: f64,
}

impl From<Accommodation> for AccommodationPayload {
    fn from(value: Accommodation) -> Self {
        Self {
            id: value.id(),
            host_id: value.host_id().clone(),
            name: value.name().to_owned(),
            max_guests: value.max_guests(),
            listed: value.listed(),
            rating: value.rating(),
        }
    }
}

/// Request from a host to put a new accommodation on the marketplace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterAccommodationRequest {
    pub caller: CallerContext,
    pub name: String,
    pub max_guests: u32,
}

/// Response from registering an accommodation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterAccommodationResponse {
    pub accommodation: AccommodationPayload,
}

/// Request from a host to take their accommodation off the marketplace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnlistAccommodationRequest {
    pub caller: CallerContext,
    pub accommodation_id: Uuid,
}

/// Response from unlisting an accommodation, including the active bookings
/// the cascade cancelled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnlistAccommodationResponse {
    pub accommodation: AccommodationPayload,
    pub cancelled_booking_ids: Vec<Uuid>,
}

/// Driving port for accommodation write operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccommodationCommand: Send + Sync {
    /// Registers a listed accommodation owned by the calling host.
    async fn register_accommodation(
        &self,
        request: RegisterAccommodationRequest,
    ) -> Result<RegisterAccommodationResponse, Error>;

    /// Takes an accommodation off the marketplace and cancels its active
    /// bookings. One-way; there is no relist operation.
    async fn unlist_accommodation(
        &self,
        request: UnlistAccommodationRequest,
    ) -> Result<UnlistAccommodationResponse, Error>;
}

/// Fixture command implementation for tests that do not need persistence.
/// Requests are validated against the domain entities and echoed back.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureAccommodationCommand;

#[async_trait]
impl AccommodationCommand for FixtureAccommodationCommand {
    async fn register_accommodation(
        &self,
        request: RegisterAccommodationRequest,
    ) -> Result<RegisterAccommodationResponse, Error> {
        if !request.caller.is_host() {
            return Err(Error::rule_violation(rules::CALLER_NOT_HOST));
        }
        let accommodation = Accommodation::new(AccommodationDraft {
            id: Uuid::new_v4(),
            host_id: request.caller.id,
            name: request.name,
            max_guests: request.max_guests,
        })
        .map_err(|err| Error::invalid_request(format!("invalid accommodation payload: {err}")))?;

        Ok(RegisterAccommodationResponse {
            accommodation: accommodation.into(),
        })
    }

    async fn unlist_accommodation(
        &self,
        request: UnlistAccommodationRequest,
    ) -> Result<UnlistAccommodationResponse, Error> {
        let mut accommodation = Accommodation::new(AccommodationDraft {
            id: request.accommodation_id,
            host_id: request.caller.id,
            name: "Fixture accommodation".to_owned(),
            max_guests: 2,
        })
        .map_err(|err| Error::internal(format!("fixture accommodation invalid: {err}")))?;
        accommodation
            .unlist()
            .map_err(|err| Error::rule_violation(err.to_string()))?;

        Ok(UnlistAccommodationResponse {
            accommodation: accommodation.into(),
            cancelled_booking_ids: Vec::new(),
        })
    }
}
