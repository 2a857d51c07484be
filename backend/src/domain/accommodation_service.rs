//! Accommodation lifecycle domain services.
//!
//! Registration puts a host's accommodation on the marketplace; unlisting
//! takes it off again and force-cancels every still-active booking. The
//! cascade runs under the accommodation's write lock so placements on this
//! instance cannot slip between the listing flip and the booking sweep.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::ports::{
    AccommodationCommand, AccommodationPayload, AccommodationQuery, AccommodationRepository,
    BookingRepository, GetAccommodationRequest, GetAccommodationResponse,
    RegisterAccommodationRequest, RegisterAccommodationResponse, UnlistAccommodationRequest,
    UnlistAccommodationResponse,
};
use crate::domain::service_support::{
    accommodation_not_found, map_accommodation_repository_error, map_booking_repository_error,
};
use crate::domain::{Accommodation, AccommodationDraft, Error, StayLockRegistry, rules};

/// Accommodation service implementing the command driving port.
pub struct AccommodationCommandService<A, B> {
    accommodation_repo: Arc<A>,
    booking_repo: Arc<B>,
    stay_locks: Arc<StayLockRegistry>,
}

// Hand-rolled so cloning shares the `Arc`s without requiring the
// repositories themselves to be `Clone`.
impl<A, B> Clone for AccommodationCommandService<A, B> {
    fn clone(&self) -> Self {
        Self {
            accommodation_repo: Arc::clone(&self.accommodation_repo),
            booking_repo: Arc::clone(&self.booking_repo),
            stay_locks: Arc::clone(&self.stay_locks),
        }
    }
}

impl<A, B> AccommodationCommandService<A, B> {
    /// Create a new command service with both repositories and the shared
    /// lock registry.
    pub fn new(
        accommodation_repo: Arc<A>,
        booking_repo: Arc<B>,
        stay_locks: Arc<StayLockRegistry>,
    ) -> Self {
        Self {
            accommodation_repo,
            booking_repo,
            stay_locks,
        }
    }
}

#[async_trait]
impl<A, B> AccommodationCommand for AccommodationCommandService<A, B>
where
    A: AccommodationRepository,
    B: BookingRepository,
{
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

        self.accommodation_repo
            .save(&accommodation)
            .await
            .map_err(map_accommodation_repository_error)?;

        Ok(RegisterAccommodationResponse {
            accommodation: accommodation.into(),
        })
    }

    async fn unlist_accommodation(
        &self,
        request: UnlistAccommodationRequest,
    ) -> Result<UnlistAccommodationResponse, Error> {
        let _permit = self
            .stay_locks
            .acquire_accommodation(request.accommodation_id)
            .await;

        let mut accommodation = self
            .accommodation_repo
            .find_by_id_and_host(&request.accommodation_id, &request.caller.id)
            .await
            .map_err(map_accommodation_repository_error)?
            .ok_or_else(|| accommodation_not_found(&request.accommodation_id))?;

        accommodation
            .unlist()
            .map_err(|err| Error::rule_violation(err.to_string()))?;

        // The flag flips before the cascade; a cascade failure leaves the
        // accommodation unlisted and the error propagates to the caller.
        self.accommodation_repo
            .save(&accommodation)
            .await
            .map_err(map_accommodation_repository_error)?;

        let mut cancelled_bookings = self
            .booking_repo
            .find_active_by_accommodation(&request.accommodation_id)
            .await
            .map_err(map_booking_repository_error)?;
        let mut cancelled_booking_ids = Vec::with_capacity(cancelled_bookings.len());
        for booking in &mut cancelled_bookings {
            if booking.cancel_for_unlisting() {
                cancelled_booking_ids.push(booking.id());
            }
        }
        if !cancelled_bookings.is_empty() {
            self.booking_repo
                .save_all(&cancelled_bookings)
                .await
                .map_err(map_booking_repository_error)?;
        }

        Ok(UnlistAccommodationResponse {
            accommodation: accommodation.into(),
            cancelled_booking_ids,
        })
    }
}

/// Accommodation service implementing the query driving port.
pub struct AccommodationQueryService<A> {
    accommodation_repo: Arc<A>,
}

impl<A> Clone for AccommodationQueryService<A> {
    fn clone(&self) -> Self {
        Self {
            accommodation_repo: Arc::clone(&self.accommodation_repo),
        }
    }
}

impl<A> AccommodationQueryService<A> {
    /// Create a new query service with the accommodation repository.
    pub fn new(accommodation_repo: Arc<A>) -> Self {
        Self { accommodation_repo }
    }
}

#[async_trait]
impl<A> AccommodationQuery for AccommodationQueryService<A>
where
    A: AccommodationRepository,
{
    async fn get_accommodation(
        &self,
        request: GetAccommodationRequest,
    ) -> Result<GetAccommodationResponse, Error> {
        let accommodation = self
            .accommodation_repo
            .find_by_id(&request.accommodation_id)
            .await
            .map_err(map_accommodation_repository_error)?
            .ok_or_else(|| accommodation_not_found(&request.accommodation_id))?;

        Ok(GetAccommodationResponse {
            accommodation: AccommodationPayload::from(accommodation),
        })
    }
}

#[cfg(test)]
#[path = "accommodation_service_tests.rs"]
mod tests;
