//! Booking aggregate and its status transitions.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::domain::{BookingStatus, StayPeriod, UserId};

/// Validation errors returned by [`Booking::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingValidationError {
    ZeroGuests,
}

impl fmt::Display for BookingValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroGuests => write!(f, "guest count must be at least 1"),
        }
    }
}

impl std::error::Error for BookingValidationError {}

/// Precondition failures raised by booking status transitions.
///
/// The display text of each variant is the verbatim reason from
/// [`crate::domain::rules`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingTransitionError {
    NotPending,
    NotActive,
    DatesUnchanged,
}

impl fmt::Display for BookingTransitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotPending => write!(f, "booking not pending"),
            Self::NotActive => write!(f, "booking not active"),
            Self::DatesUnchanged => write!(f, "dates same as reschedule dates"),
        }
    }
}

impl std::error::Error for BookingTransitionError {}

/// Input payload for [`Booking::new`].
#[derive(Debug, Clone)]
pub struct BookingDraft {
    pub id: Uuid,
    pub accommodation_id: Uuid,
    pub user_id: UserId,
    pub stay: StayPeriod,
    pub guests: u32,
    pub created_at: DateTime<Utc>,
}

/// A reservation of one accommodation for one stay.
///
/// ## Invariants
/// - Bookings start `pending` and are never deleted; every lifecycle event
///   is a status transition.
/// - `cancelled` and `done` are terminal.
/// - `done` is written by an external completion job once checkout has
///   passed; the engine only reads it through [`Booking::is_completed`].
#[derive(Debug, Clone, PartialEq)]
pub struct Booking {
    id: Uuid,
    accommodation_id: Uuid,
    user_id: UserId,
    stay: StayPeriod,
    guests: u32,
    status: BookingStatus,
    created_at: DateTime<Utc>,
}

impl Booking {
    /// Creates a pending booking.
    pub fn new(draft: BookingDraft) -> Result<Self, BookingValidationError> {
        if draft.guests == 0 {
            return Err(BookingValidationError::ZeroGuests);
        }
        Ok(Self {
            id: draft.id,
            accommodation_id: draft.accommodation_id,
            user_id: draft.user_id,
            stay: draft.stay,
            guests: draft.guests,
            status: BookingStatus::Pending,
            created_at: draft.created_at,
        })
    }

    /// Returns the booking id.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Returns the booked accommodation id.
    pub fn accommodation_id(&self) -> Uuid {
        self.accommodation_id
    }

    /// Returns the booking user id.
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Returns the booked stay period.
    pub fn stay(&self) -> &StayPeriod {
        &self.stay
    }

    /// Returns the guest count.
    pub fn guests(&self) -> u32 {
        self.guests
    }

    /// Returns the current lifecycle status.
    pub fn status(&self) -> BookingStatus {
        self.status
    }

    /// Returns the creation timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Whether the status counts toward availability checks.
    pub fn has_active_status(&self) -> bool {
        self.status.is_active()
    }

    /// Whether the booking can still be cancelled or rescheduled: the status
    /// is active and checkin has not arrived.
    pub fn is_active(&self, today: NaiveDate) -> bool {
        self.has_active_status() && self.stay.checkin() > today
    }

    /// Whether the stay has ended.
    pub fn has_ended(&self, today: NaiveDate) -> bool {
        self.stay.checkout() <= today
    }

    /// Whether the stay completed: marked done and checkout has passed.
    /// Reviews require this.
    pub fn is_completed(&self, today: NaiveDate) -> bool {
        self.status == BookingStatus::Done && self.has_ended(today)
    }

    /// Host acceptance of a pending booking.
    pub fn confirm(&mut self) -> Result<(), BookingTransitionError> {
        if self.status != BookingStatus::Pending {
            return Err(BookingTransitionError::NotPending);
        }
        self.status = BookingStatus::Confirmed;
        Ok(())
    }

    /// Cancels an active booking before its checkin day.
    pub fn cancel(&mut self, today: NaiveDate) -> Result<(), BookingTransitionError> {
        if !self.is_active(today) {
            return Err(BookingTransitionError::NotActive);
        }
        self.status = BookingStatus::Cancelled;
        Ok(())
    }

    /// Moves an active booking to new dates and resets it to `pending`,
    /// regardless of whether it had been confirmed.
    pub fn reschedule(
        &mut self,
        stay: StayPeriod,
        today: NaiveDate,
    ) -> Result<(), BookingTransitionError> {
        if !self.is_active(today) {
            return Err(BookingTransitionError::NotActive);
        }
        if stay == self.stay {
            return Err(BookingTransitionError::DatesUnchanged);
        }
        self.stay = stay;
        self.status = BookingStatus::Pending;
        Ok(())
    }

    /// Cascade transition applied when the accommodation is unlisted.
    ///
    /// Forces any active-status booking to `cancelled` regardless of its
    /// dates and reports whether the transition applied. Terminal statuses
    /// are left untouched.
    pub fn cancel_for_unlisting(&mut self) -> bool {
        if !self.has_active_status() {
            return false;
        }
        self.status = BookingStatus::Cancelled;
        true
    }

    /// Marks the stay as completed. Applied by the external completion job
    /// once checkout has passed, never by engine operations.
    pub fn mark_done(&mut self) {
        self.status = BookingStatus::Done;
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use chrono::TimeZone;
    use rstest::rstest;

    use super::*;
    use crate::domain::rules;

    fn day(ordinal: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 1)
            .expect("valid base date")
            .checked_add_days(chrono::Days::new(u64::from(ordinal)))
            .expect("offset stays in range")
    }

    fn stay(checkin: u32, checkout: u32) -> StayPeriod {
        StayPeriod::new(day(checkin), day(checkout)).expect("valid stay")
    }

    fn sample_booking(booked: StayPeriod) -> Booking {
        Booking::new(BookingDraft {
            id: Uuid::new_v4(),
            accommodation_id: Uuid::new_v4(),
            user_id: UserId::random(),
            stay: booked,
            guests: 2,
            created_at: Utc
                .with_ymd_and_hms(2026, 2, 24, 10, 30, 0)
                .single()
                .expect("valid fixture timestamp"),
        })
        .expect("valid booking")
    }

    #[rstest]
    fn new_booking_starts_pending() {
        let booking = sample_booking(stay(5, 10));
        assert_eq!(booking.status(), BookingStatus::Pending);
        assert!(booking.has_active_status());
    }

    #[rstest]
    fn new_rejects_zero_guests() {
        let mut draft = BookingDraft {
            id: Uuid::new_v4(),
            accommodation_id: Uuid::new_v4(),
            user_id: UserId::random(),
            stay: stay(5, 10),
            guests: 2,
            created_at: Utc::now(),
        };
        draft.guests = 0;
        assert_eq!(
            Booking::new(draft).expect_err("zero guests"),
            BookingValidationError::ZeroGuests
        );
    }

    #[rstest]
    fn confirm_requires_pending() {
        let mut booking = sample_booking(stay(5, 10));
        booking.confirm().expect("pending booking confirms");
        assert_eq!(booking.status(), BookingStatus::Confirmed);

        let err = booking.confirm().expect_err("second confirm fails");
        assert_eq!(err, BookingTransitionError::NotPending);
        assert_eq!(err.to_string(), rules::BOOKING_NOT_PENDING);
    }

    #[rstest]
    fn cancelled_booking_cannot_be_confirmed() {
        let mut booking = sample_booking(stay(5, 10));
        booking.cancel(day(0)).expect("active booking cancels");

        let err = booking.confirm().expect_err("cancelled booking");
        assert_eq!(err, BookingTransitionError::NotPending);
    }

    #[rstest]
    fn cancel_requires_future_checkin() {
        let mut booking = sample_booking(stay(5, 10));

        let err = booking.cancel(day(5)).expect_err("checkin day reached");
        assert_eq!(err, BookingTransitionError::NotActive);
        assert_eq!(err.to_string(), rules::BOOKING_NOT_ACTIVE);

        booking.cancel(day(4)).expect("day before checkin cancels");
        assert_eq!(booking.status(), BookingStatus::Cancelled);
    }

    #[rstest]
    fn cancel_requires_active_status() {
        let mut booking = sample_booking(stay(5, 10));
        booking.mark_done();
        assert_eq!(
            booking.cancel(day(0)).expect_err("done booking"),
            BookingTransitionError::NotActive
        );
    }

    #[rstest]
    fn reschedule_resets_confirmed_to_pending() {
        let mut booking = sample_booking(stay(5, 10));
        booking.confirm().expect("pending booking confirms");

        booking
            .reschedule(stay(20, 25), day(0))
            .expect("active booking reschedules");
        assert_eq!(booking.status(), BookingStatus::Pending);
        assert_eq!(booking.stay(), &stay(20, 25));
    }

    #[rstest]
    fn reschedule_rejects_identical_dates() {
        let mut booking = sample_booking(stay(5, 10));
        let err = booking
            .reschedule(stay(5, 10), day(0))
            .expect_err("identical dates");
        assert_eq!(err, BookingTransitionError::DatesUnchanged);
        assert_eq!(err.to_string(), rules::DATES_UNCHANGED);
        assert_eq!(booking.stay(), &stay(5, 10));
    }

    #[rstest]
    fn reschedule_requires_active_booking() {
        let mut booking = sample_booking(stay(5, 10));
        assert_eq!(
            booking
                .reschedule(stay(20, 25), day(5))
                .expect_err("checkin day reached"),
            BookingTransitionError::NotActive
        );
    }

    #[rstest]
    fn cascade_cancel_only_touches_active_statuses() {
        let mut pending = sample_booking(stay(5, 10));
        assert!(pending.cancel_for_unlisting());
        assert_eq!(pending.status(), BookingStatus::Cancelled);

        let mut confirmed = sample_booking(stay(5, 10));
        confirmed.confirm().expect("pending booking confirms");
        assert!(confirmed.cancel_for_unlisting());

        let mut done = sample_booking(stay(5, 10));
        done.mark_done();
        assert!(!done.cancel_for_unlisting());
        assert_eq!(done.status(), BookingStatus::Done);

        assert!(!pending.cancel_for_unlisting());
    }

    #[rstest]
    fn completion_requires_done_status_and_past_checkout() {
        let mut booking = sample_booking(stay(5, 10));
        assert!(!booking.is_completed(day(10)));

        booking.mark_done();
        assert!(!booking.is_completed(day(9)));
        assert!(booking.is_completed(day(10)));
        assert!(booking.is_completed(day(11)));
    }
}
