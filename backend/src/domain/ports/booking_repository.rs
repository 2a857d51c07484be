//! Port for booking persistence and availability counts.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Booking, StayPeriod, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by booking repository adapters.
    pub enum BookingRepositoryError {
        /// Repository connection could not be established.
        Connection (connection) =>
            "booking repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query (query) =>
            "booking repository query failed: {message}",
        /// A uniqueness guard rejected the write.
        Conflict (conflict) =>
            "booking repository write conflicted: {message}",
    }
}

/// Port for reading and writing bookings.
///
/// The overlap counts use half-open stay semantics: two stays conflict when
/// their `[checkin, checkout)` intervals intersect. Only bookings with an
/// active status (`pending` or `confirmed`) participate.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Find a booking by id.
    async fn find_by_id(
        &self,
        booking_id: &Uuid,
    ) -> Result<Option<Booking>, BookingRepositoryError>;

    /// Find a booking by id, scoped to the user who placed it.
    async fn find_by_id_and_user(
        &self,
        booking_id: &Uuid,
        user_id: &UserId,
    ) -> Result<Option<Booking>, BookingRepositoryError>;

    /// Find a booking by id, scoped to its accommodation.
    async fn find_by_id_and_accommodation(
        &self,
        booking_id: &Uuid,
        accommodation_id: &Uuid,
    ) -> Result<Option<Booking>, BookingRepositoryError>;

    /// Persist a booking, replacing any stored state. Adapters with their
    /// own interval uniqueness guard signal a lost race as `Conflict`.
    async fn save(&self, booking: &Booking) -> Result<(), BookingRepositoryError>;

    /// Persist a batch of bookings. Used by the unlist cascade.
    async fn save_all(&self, bookings: &[Booking]) -> Result<(), BookingRepositoryError>;

    /// List the active-status bookings on an accommodation.
    async fn find_active_by_accommodation(
        &self,
        accommodation_id: &Uuid,
    ) -> Result<Vec<Booking>, BookingRepositoryError>;

    /// Count the active-status bookings on an accommodation whose stays
    /// overlap `stay`, optionally skipping one booking id. Reschedules pass
    /// the booking being moved so it does not conflict with itself.
    async fn count_active_overlapping_for_accommodation(
        &self,
        accommodation_id: &Uuid,
        stay: &StayPeriod,
        exclude_booking_id: Option<Uuid>,
    ) -> Result<u64, BookingRepositoryError>;

    /// Count the active-status bookings of a user, across accommodations,
    /// whose stays overlap `stay`, optionally skipping one booking id.
    async fn count_active_overlapping_for_user(
        &self,
        user_id: &UserId,
        stay: &StayPeriod,
        exclude_booking_id: Option<Uuid>,
    ) -> Result<u64, BookingRepositoryError>;
}

/// Fixture implementation for tests that do not exercise booking
/// persistence. Lookups miss and counts report a free calendar.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureBookingRepository;

#[async_trait]
impl BookingRepository for FixtureBookingRepository {
    async fn find_by_id(
        &self,
        _booking_id: &Uuid,
    ) -> Result<Option<Booking>, BookingRepositoryError> {
        Ok(None)
    }

    async fn find_by_id_and_user(
        &self,
        _booking_id: &Uuid,
        _user_id: &UserId,
    ) -> Result<Option<Booking>, BookingRepositoryError> {
        Ok(None)
    }

    async fn find_by_id_and_accommodation(
        &self,
        _booking_id: &Uuid,
        _accommodation_id: &Uuid,
    ) -> Result<Option<Booking>, BookingRepositoryError> {
        Ok(None)
    }

    async fn save(&self, _booking: &Booking) -> Result<(), BookingRepositoryError> {
        Ok(())
    }

    async fn save_all(&self, _bookings: &[Booking]) -> Result<(), BookingRepositoryError> {
        Ok(())
    }

    async fn find_active_by_accommodation(
        &self,
        _accommodation_id: &Uuid,
    ) -> Result<Vec<Booking>, BookingRepositoryError> {
        Ok(Vec::new())
    }

    async fn count_active_overlapping_for_accommodation(
        &self,
        _accommodation_id: &Uuid,
        _stay: &StayPeriod,
        _exclude_booking_id: Option<Uuid>,
    ) -> Result<u64, BookingRepositoryError> {
        Ok(0)
    }

    async fn count_active_overlapping_for_user(
        &self,
        _user_id: &UserId,
        _stay: &StayPeriod,
        _exclude_booking_id: Option<Uuid>,
    ) -> Result<u64, BookingRepositoryError> {
        Ok(0)
    }
}
