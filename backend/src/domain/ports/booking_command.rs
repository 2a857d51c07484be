//! Driving port for booking mutations.
//!
//! This port carries the four booking lifecycle operations: placement,
//! confirmation, cancellation, and reschedule. Every request names the
//! caller; the engine trusts the identity layer to have resolved it.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    Booking, BookingDraft, BookingStatus, CallerContext, Error, StayPeriod, UserId,
};

/// Serializable booking payload for driving ports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingPayload {
    pub id: Uuid,
    pub accommodation_id: Uuid,
    pub user_id: UserId,
    pub stay: StayPeriod,
    pub guests: u32,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
}

impl From<Booking> for BookingPayload {
    fn from(value: Booking) -> Self {
        Self {
            id: value.id(),
            accommodation_id: value.accommodation_id(),
            user_id: value.user_id().clone(),
            stay: *value.stay(),
            guests: value.guests(),
            status: value.status(),
            created_at: value.created_at(),
        }
    }
}

/// Request to place a booking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceBookingRequest {
    pub caller: CallerContext,
    pub accommodation_id: Uuid,
    pub stay: StayPeriod,
    pub guests: u32,
}

/// Response from placing a booking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceBookingResponse {
    pub booking: BookingPayload,
}

/// Request from a host to confirm a pending booking on their accommodation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmBookingRequest {
    pub caller: CallerContext,
    pub accommodation_id: Uuid,
    pub booking_id: Uuid,
}

/// Response from confirming a booking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmBookingResponse {
    pub booking: BookingPayload,
}

/// Request to cancel a booking, either by its guest or by the hosting
/// accommodation's owner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelBookingRequest {
    pub caller: CallerContext,
    pub booking_id: Uuid,
}

/// Response from cancelling a booking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelBookingResponse {
    pub booking: BookingPayload,
}

/// Request from a guest to move their booking to new dates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RescheduleBookingRequest {
    pub caller: CallerContext,
    pub booking_id: Uuid,
    pub stay: StayPeriod,
}

/// Response from rescheduling a booking. The booking returns to `pending`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RescheduleBookingResponse {
    pub booking: BookingPayload,
}

/// Driving port for booking write operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingCommand: Send + Sync {
    /// Places a booking once the accommodation, capacity, and both overlap
    /// checks allow it. The created booking starts `pending`.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # use chrono::NaiveDate;
    /// # use uuid::Uuid;
    /// # use backend::domain::{CallerContext, Role, StayPeriod, UserId};
    /// # use backend::domain::ports::{BookingCommand, FixtureBookingCommand, PlaceBookingRequest};
    /// # async fn example() -> Result<(), backend::domain::Error> {
    /// let command = FixtureBookingCommand;
    /// let checkin = NaiveDate::from_ymd_opt(2026, 6, 5).expect("valid checkin");
    /// let checkout = NaiveDate::from_ymd_opt(2026, 6, 10).expect("valid checkout");
    /// let request = PlaceBookingRequest {
    ///     caller: CallerContext::new(UserId::random(), vec![Role::Guest]),
    ///     accommodation_id: Uuid::new_v4(),
    ///     stay: StayPeriod::new(checkin, checkout).expect("valid stay"),
    ///     guests: 2,
    /// };
    /// let response = command.place_booking(request).await?;
    /// assert_eq!(response.booking.guests, 2);
    /// # Ok(())
    /// # }
    /// ```
    async fn place_booking(
        &self,
        request: PlaceBookingRequest,
    ) -> Result<PlaceBookingResponse, Error>;

    /// Confirms a pending booking on behalf of the accommodation's host.
    async fn confirm_booking(
        &self,
        request: ConfirmBookingRequest,
    ) -> Result<ConfirmBookingResponse, Error>;

    /// Cancels an active booking before its checkin day.
    async fn cancel_booking(
        &self,
        request: CancelBookingRequest,
    ) -> Result<CancelBookingResponse, Error>;

    /// Moves an active booking to new dates, rerunning the availability
    /// checks and resetting the booking to `pending`.
    async fn reschedule_booking(
        &self,
        request: RescheduleBookingRequest,
    ) -> Result<RescheduleBookingResponse, Error>;
}

/// Fixture command implementation for tests that do not need persistence.
/// Requests are validated against the domain entities and echoed back in
/// their post-transition state.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureBookingCommand;

impl FixtureBookingCommand {
    fn booking(
        booking_id: Uuid,
        accommodation_id: Uuid,
        user_id: UserId,
        stay: StayPeriod,
        guests: u32,
    ) -> Result<Booking, Error> {
        Booking::new(BookingDraft {
            id: booking_id,
            accommodation_id,
            user_id,
            stay,
            guests,
            created_at: DateTime::<Utc>::UNIX_EPOCH,
        })
        .map_err(|err| Error::invalid_request(format!("invalid booking payload: {err}")))
    }

    fn placeholder_stay() -> StayPeriod {
        let checkin = chrono::NaiveDate::from_ymd_opt(2999, 1, 1).expect("valid fixture checkin");
        let checkout =
            chrono::NaiveDate::from_ymd_opt(2999, 1, 8).expect("valid fixture checkout");
        StayPeriod::new(checkin, checkout).expect("valid fixture stay")
    }

    fn fixture_today() -> chrono::NaiveDate {
        DateTime::<Utc>::UNIX_EPOCH.date_naive()
    }
}

#[async_trait]
impl BookingCommand for FixtureBookingCommand {
    async fn place_booking(
        &self,
        request: PlaceBookingRequest,
    ) -> Result<PlaceBookingResponse, Error> {
        let booking = Self::booking(
            Uuid::new_v4(),
            request.accommodation_id,
            request.caller.id,
            request.stay,
            request.guests,
        )?;
        Ok(PlaceBookingResponse {
            booking: booking.into(),
        })
    }

    async fn confirm_booking(
        &self,
        request: ConfirmBookingRequest,
    ) -> Result<ConfirmBookingResponse, Error> {
        let mut booking = Self::booking(
            request.booking_id,
            request.accommodation_id,
            request.caller.id,
            Self::placeholder_stay(),
            1,
        )?;
        booking
            .confirm()
            .map_err(|err| Error::rule_violation(err.to_string()))?;
        Ok(ConfirmBookingResponse {
            booking: booking.into(),
        })
    }

    async fn cancel_booking(
        &self,
        request: CancelBookingRequest,
    ) -> Result<CancelBookingResponse, Error> {
        let mut booking = Self::booking(
            request.booking_id,
            Uuid::new_v4(),
            request.caller.id,
            Self::placeholder_stay(),
            1,
        )?;
        booking
            .cancel(Self::fixture_today())
            .map_err(|err| Error::rule_violation(err.to_string()))?;
        Ok(CancelBookingResponse {
            booking: booking.into(),
        })
    }

    async fn reschedule_booking(
        &self,
        request: RescheduleBookingRequest,
    ) -> Result<RescheduleBookingResponse, Error> {
        let mut booking = Self::booking(
            request.booking_id,
            Uuid::new_v4(),
            request.caller.id,
            Self::placeholder_stay(),
            1,
        )?;
        booking
            .reschedule(request.stay, Self::fixture_today())
            .map_err(|err| Error::rule_violation(err.to_string()))?;
        Ok(RescheduleBookingResponse {
            booking: booking.into(),
        })
    }
}
