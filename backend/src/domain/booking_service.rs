//! Booking lifecycle domain service.
//!
//! Implements the booking driving port: placement behind the availability
//! guard, host confirmation, cancellation, and reschedule. Placement and
//! reschedule hold a [`StayLockRegistry`] permit across their
//! check-then-act window so concurrent callers cannot double-book an
//! interval on this instance.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use mockable::Clock;
use uuid::Uuid;

use crate::domain::ports::{
    AccommodationRepository, BookingCommand, BookingRepository, CancelBookingRequest,
    CancelBookingResponse, ConfirmBookingRequest, ConfirmBookingResponse, PlaceBookingRequest,
    PlaceBookingResponse, RescheduleBookingRequest, RescheduleBookingResponse,
};
use crate::domain::service_support::{
    accommodation_not_found, booking_not_found, map_accommodation_repository_error,
    map_booking_repository_error,
};
use crate::domain::{
    Accommodation, Booking, BookingDraft, Error, StayLockRegistry, StayPeriod, UserId, rules,
};

/// Booking service implementing the command driving port.
pub struct BookingCommandService<A, B> {
    accommodation_repo: Arc<A>,
    booking_repo: Arc<B>,
    stay_locks: Arc<StayLockRegistry>,
    clock: Arc<dyn Clock>,
}

// Hand-rolled so cloning shares the `Arc`s without requiring the
// repositories themselves to be `Clone`.
impl<A, B> Clone for BookingCommandService<A, B> {
    fn clone(&self) -> Self {
        Self {
            accommodation_repo: Arc::clone(&self.accommodation_repo),
            booking_repo: Arc::clone(&self.booking_repo),
            stay_locks: Arc::clone(&self.stay_locks),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<A, B> BookingCommandService<A, B> {
    /// Create a new command service with the accommodation and booking
    /// repositories, the shared lock registry, and a clock.
    pub fn new(
        accommodation_repo: Arc<A>,
        booking_repo: Arc<B>,
        stay_locks: Arc<StayLockRegistry>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            accommodation_repo,
            booking_repo,
            stay_locks,
            clock,
        }
    }
}

impl<A, B> BookingCommandService<A, B>
where
    A: AccommodationRepository,
    B: BookingRepository,
{
    fn today(&self) -> NaiveDate {
        self.clock.utc().date_naive()
    }

    async fn find_accommodation(&self, accommodation_id: &Uuid) -> Result<Accommodation, Error> {
        self.accommodation_repo
            .find_by_id(accommodation_id)
            .await
            .map_err(map_accommodation_repository_error)?
            .ok_or_else(|| accommodation_not_found(accommodation_id))
    }

    /// Runs the two overlap checks concurrently. The caller's own calendar
    /// is checked before the accommodation's, so a request that violates
    /// both reports the user-side reason.
    async fn ensure_stay_available(
        &self,
        accommodation_id: &Uuid,
        user_id: &UserId,
        stay: &StayPeriod,
        exclude_booking_id: Option<Uuid>,
    ) -> Result<(), Error> {
        let user_overlaps =
            self.booking_repo
                .count_active_overlapping_for_user(user_id, stay, exclude_booking_id);
        let accommodation_overlaps = self
            .booking_repo
            .count_active_overlapping_for_accommodation(accommodation_id, stay, exclude_booking_id);
        let (user_overlaps, accommodation_overlaps) =
            tokio::try_join!(user_overlaps, accommodation_overlaps)
                .map_err(map_booking_repository_error)?;

        if user_overlaps > 0 {
            return Err(Error::rule_violation(rules::USER_HAS_BOOKINGS_BETWEEN_DATES));
        }
        if accommodation_overlaps > 0 {
            return Err(Error::rule_violation(rules::ACCOMMODATION_ALREADY_BOOKED));
        }
        Ok(())
    }

    /// Resolves a booking for cancellation: first as the caller's own, then
    /// as a booking on an accommodation the caller hosts. Both misses
    /// collapse into a single not-found outcome.
    async fn find_cancellable_booking(
        &self,
        booking_id: &Uuid,
        caller_id: &UserId,
    ) -> Result<Booking, Error> {
        if let Some(booking) = self
            .booking_repo
            .find_by_id_and_user(booking_id, caller_id)
            .await
            .map_err(map_booking_repository_error)?
        {
            return Ok(booking);
        }

        let booking = self
            .booking_repo
            .find_by_id(booking_id)
            .await
            .map_err(map_booking_repository_error)?
            .ok_or_else(|| booking_not_found(booking_id))?;
        self.accommodation_repo
            .find_by_id_and_host(&booking.accommodation_id(), caller_id)
            .await
            .map_err(map_accommodation_repository_error)?
            .ok_or_else(|| booking_not_found(booking_id))?;
        Ok(booking)
    }
}

#[async_trait]
impl<A, B> BookingCommand for BookingCommandService<A, B>
where
    A: AccommodationRepository,
    B: BookingRepository,
{
    async fn place_booking(
        &self,
        request: PlaceBookingRequest,
    ) -> Result<PlaceBookingResponse, Error> {
        if request.guests == 0 {
            return Err(Error::invalid_request("guest count must be at least 1"));
        }

        // Everything from the listing check to the save happens under the
        // permit; a concurrent unlist or competing placement waits here.
        let _permit = self
            .stay_locks
            .acquire(request.accommodation_id, &request.caller.id)
            .await;

        let accommodation = self.find_accommodation(&request.accommodation_id).await?;
        if !accommodation.listed() {
            return Err(Error::rule_violation(rules::ACCOMMODATION_NOT_LISTED));
        }
        if accommodation.host_id() == &request.caller.id {
            return Err(Error::rule_violation(
                rules::HOST_CANNOT_BOOK_OWN_ACCOMMODATION,
            ));
        }
        if request.guests > accommodation.max_guests() {
            return Err(Error::rule_violation(rules::GUESTS_EXCEED_CAPACITY));
        }
        self.ensure_stay_available(
            &request.accommodation_id,
            &request.caller.id,
            &request.stay,
            None,
        )
        .await?;

        let booking = Booking::new(BookingDraft {
            id: Uuid::new_v4(),
            accommodation_id: request.accommodation_id,
            user_id: request.caller.id,
            stay: request.stay,
            guests: request.guests,
            created_at: self.clock.utc(),
        })
        .map_err(|err| Error::invalid_request(format!("invalid booking payload: {err}")))?;

        self.booking_repo
            .save(&booking)
            .await
            .map_err(map_booking_repository_error)?;

        Ok(PlaceBookingResponse {
            booking: booking.into(),
        })
    }

    async fn confirm_booking(
        &self,
        request: ConfirmBookingRequest,
    ) -> Result<ConfirmBookingResponse, Error> {
        let accommodation = self
            .accommodation_repo
            .find_by_id_and_host(&request.accommodation_id, &request.caller.id)
            .await
            .map_err(map_accommodation_repository_error)?
            .ok_or_else(|| accommodation_not_found(&request.accommodation_id))?;

        // The read-modify-save must not interleave with a reschedule of the
        // same booking, which writes the whole entity back.
        let _permit = self
            .stay_locks
            .acquire_accommodation(request.accommodation_id)
            .await;

        let mut booking = self
            .booking_repo
            .find_by_id_and_accommodation(&request.booking_id, &accommodation.id())
            .await
            .map_err(map_booking_repository_error)?
            .ok_or_else(|| booking_not_found(&request.booking_id))?;

        booking
            .confirm()
            .map_err(|err| Error::rule_violation(err.to_string()))?;

        self.booking_repo
            .save(&booking)
            .await
            .map_err(map_booking_repository_error)?;

        Ok(ConfirmBookingResponse {
            booking: booking.into(),
        })
    }

    async fn cancel_booking(
        &self,
        request: CancelBookingRequest,
    ) -> Result<CancelBookingResponse, Error> {
        // First read resolves the accommodation so the permit can be keyed.
        let initial = self
            .find_cancellable_booking(&request.booking_id, &request.caller.id)
            .await?;

        let _permit = self
            .stay_locks
            .acquire_accommodation(initial.accommodation_id())
            .await;

        // The pre-permit read may be stale; re-fetch before deciding.
        let mut booking = self
            .find_cancellable_booking(&request.booking_id, &request.caller.id)
            .await?;

        booking
            .cancel(self.today())
            .map_err(|err| Error::rule_violation(err.to_string()))?;

        self.booking_repo
            .save(&booking)
            .await
            .map_err(map_booking_repository_error)?;

        Ok(CancelBookingResponse {
            booking: booking.into(),
        })
    }

    async fn reschedule_booking(
        &self,
        request: RescheduleBookingRequest,
    ) -> Result<RescheduleBookingResponse, Error> {
        // First read resolves the accommodation so the permit can be keyed.
        let initial = self
            .booking_repo
            .find_by_id_and_user(&request.booking_id, &request.caller.id)
            .await
            .map_err(map_booking_repository_error)?
            .ok_or_else(|| booking_not_found(&request.booking_id))?;
        let accommodation_id = initial.accommodation_id();

        let _permit = self
            .stay_locks
            .acquire(accommodation_id, &request.caller.id)
            .await;

        // The pre-permit read may be stale; re-fetch before deciding.
        let mut booking = self
            .booking_repo
            .find_by_id_and_user(&request.booking_id, &request.caller.id)
            .await
            .map_err(map_booking_repository_error)?
            .ok_or_else(|| booking_not_found(&request.booking_id))?;

        booking
            .reschedule(request.stay, self.today())
            .map_err(|err| Error::rule_violation(err.to_string()))?;
        self.ensure_stay_available(
            &accommodation_id,
            &request.caller.id,
            &request.stay,
            Some(booking.id()),
        )
        .await?;

        self.booking_repo
            .save(&booking)
            .await
            .map_err(map_booking_repository_error)?;

        Ok(RescheduleBookingResponse {
            booking: booking.into(),
        })
    }
}

#[cfg(test)]
#[path = "booking_service_tests.rs"]
mod tests;
