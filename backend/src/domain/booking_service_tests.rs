//! Tests for the booking lifecycle service.

use std::sync::Arc;

use chrono::{DateTime, Days, Local, NaiveDate, TimeZone, Utc};
use mockable::Clock;
use uuid::Uuid;

use super::*;
use crate::domain::ports::{
    BookingRepositoryError, MockAccommodationRepository, MockBookingRepository,
};
use crate::domain::{
    AccommodationDraft, BookingStatus, CallerContext, ErrorCode, Role, StayLockRegistry,
};

/// Fixed wall clock; every test runs on 2026-03-01.
fn fixture_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0)
        .single()
        .expect("valid fixture timestamp")
}

struct FixtureClock {
    utc_now: DateTime<Utc>,
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc_now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.utc_now
    }
}

fn fixture_clock() -> Arc<dyn Clock> {
    Arc::new(FixtureClock {
        utc_now: fixture_timestamp(),
    })
}

fn day(ordinal: u32) -> NaiveDate {
    fixture_timestamp()
        .date_naive()
        .checked_add_days(Days::new(u64::from(ordinal)))
        .expect("offset stays in range")
}

fn stay(checkin: u32, checkout: u32) -> StayPeriod {
    StayPeriod::new(day(checkin), day(checkout)).expect("valid stay")
}

fn guest_caller() -> CallerContext {
    CallerContext::new(UserId::random(), vec![Role::Guest])
}

fn listed_accommodation(host_id: UserId, max_guests: u32) -> Accommodation {
    Accommodation::new(AccommodationDraft {
        id: Uuid::new_v4(),
        host_id,
        name: "Harbour flat".to_owned(),
        max_guests,
    })
    .expect("valid accommodation")
}

fn pending_booking(accommodation_id: Uuid, user_id: UserId, booked: StayPeriod) -> Booking {
    Booking::new(BookingDraft {
        id: Uuid::new_v4(),
        accommodation_id,
        user_id,
        stay: booked,
        guests: 2,
        created_at: fixture_timestamp(),
    })
    .expect("valid booking")
}

fn make_service(
    accommodation_repo: MockAccommodationRepository,
    booking_repo: MockBookingRepository,
) -> BookingCommandService<MockAccommodationRepository, MockBookingRepository> {
    BookingCommandService::new(
        Arc::new(accommodation_repo),
        Arc::new(booking_repo),
        Arc::new(StayLockRegistry::new()),
        fixture_clock(),
    )
}

#[tokio::test]
async fn cloned_services_share_repositories_that_are_not_clone() {
    let caller = guest_caller();
    let booking = pending_booking(Uuid::new_v4(), caller.id.clone(), stay(5, 10));
    let booking_id = booking.id();

    // Mock repositories implement no `Clone`; only the handles may be cloned.
    let mut booking_repo = MockBookingRepository::new();
    booking_repo
        .expect_find_by_id_and_user()
        .times(2)
        .returning(move |_, _| Ok(Some(booking.clone())));
    booking_repo.expect_save().times(1).return_once(|_| Ok(()));

    let service = make_service(MockAccommodationRepository::new(), booking_repo).clone();
    let response = service
        .cancel_booking(CancelBookingRequest {
            caller,
            booking_id,
        })
        .await
        .expect("clone serves commands");

    assert_eq!(response.booking.status, BookingStatus::Cancelled);
}

fn place_request(caller: CallerContext, accommodation_id: Uuid) -> PlaceBookingRequest {
    PlaceBookingRequest {
        caller,
        accommodation_id,
        stay: stay(5, 10),
        guests: 2,
    }
}

fn expect_counts(booking_repo: &mut MockBookingRepository, for_user: u64, for_accommodation: u64) {
    booking_repo
        .expect_count_active_overlapping_for_user()
        .times(1)
        .return_once(move |_, _, _| Ok(for_user));
    booking_repo
        .expect_count_active_overlapping_for_accommodation()
        .times(1)
        .return_once(move |_, _, _| Ok(for_accommodation));
}

#[tokio::test]
async fn place_booking_persists_a_pending_booking() {
    let caller = guest_caller();
    let accommodation = listed_accommodation(UserId::random(), 4);
    let accommodation_id = accommodation.id();

    let mut accommodation_repo = MockAccommodationRepository::new();
    accommodation_repo
        .expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(accommodation)));
    let mut booking_repo = MockBookingRepository::new();
    expect_counts(&mut booking_repo, 0, 0);
    booking_repo.expect_save().times(1).return_once(|_| Ok(()));

    let service = make_service(accommodation_repo, booking_repo);
    let response = service
        .place_booking(place_request(caller.clone(), accommodation_id))
        .await
        .expect("placement succeeds");

    assert_eq!(response.booking.status, BookingStatus::Pending);
    assert_eq!(response.booking.user_id, caller.id);
    assert_eq!(response.booking.stay, stay(5, 10));
    assert_eq!(response.booking.created_at, fixture_timestamp());
}

#[tokio::test]
async fn place_booking_rejects_zero_guests_before_touching_storage() {
    let service = make_service(
        MockAccommodationRepository::new(),
        MockBookingRepository::new(),
    );
    let mut request = place_request(guest_caller(), Uuid::new_v4());
    request.guests = 0;

    let error = service
        .place_booking(request)
        .await
        .expect_err("zero guests rejected");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
}

#[tokio::test]
async fn place_booking_reports_missing_accommodation() {
    let mut accommodation_repo = MockAccommodationRepository::new();
    accommodation_repo
        .expect_find_by_id()
        .times(1)
        .return_once(|_| Ok(None));

    let service = make_service(accommodation_repo, MockBookingRepository::new());
    let error = service
        .place_booking(place_request(guest_caller(), Uuid::new_v4()))
        .await
        .expect_err("not found");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn place_booking_rejects_unlisted_accommodation() {
    let mut accommodation = listed_accommodation(UserId::random(), 4);
    accommodation.unlist().expect("listed accommodation unlists");
    let accommodation_id = accommodation.id();

    let mut accommodation_repo = MockAccommodationRepository::new();
    accommodation_repo
        .expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(accommodation)));

    let service = make_service(accommodation_repo, MockBookingRepository::new());
    let error = service
        .place_booking(place_request(guest_caller(), accommodation_id))
        .await
        .expect_err("unlisted accommodation rejected");

    assert_eq!(error.code(), ErrorCode::RuleViolation);
    assert_eq!(error.message(), rules::ACCOMMODATION_NOT_LISTED);
}

#[tokio::test]
async fn place_booking_rejects_the_host_booking_their_own_accommodation() {
    let caller = guest_caller();
    let accommodation = listed_accommodation(caller.id.clone(), 4);
    let accommodation_id = accommodation.id();

    let mut accommodation_repo = MockAccommodationRepository::new();
    accommodation_repo
        .expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(accommodation)));

    let service = make_service(accommodation_repo, MockBookingRepository::new());
    let error = service
        .place_booking(place_request(caller, accommodation_id))
        .await
        .expect_err("self-booking rejected");

    assert_eq!(error.message(), rules::HOST_CANNOT_BOOK_OWN_ACCOMMODATION);
}

#[tokio::test]
async fn place_booking_rejects_guest_counts_over_capacity() {
    let accommodation = listed_accommodation(UserId::random(), 4);
    let accommodation_id = accommodation.id();

    let mut accommodation_repo = MockAccommodationRepository::new();
    accommodation_repo
        .expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(accommodation)));

    let service = make_service(accommodation_repo, MockBookingRepository::new());
    let mut request = place_request(guest_caller(), accommodation_id);
    request.guests = 5;

    let error = service
        .place_booking(request)
        .await
        .expect_err("over capacity rejected");

    assert_eq!(error.message(), rules::GUESTS_EXCEED_CAPACITY);
}

#[tokio::test]
async fn place_booking_reports_the_callers_own_conflict_first() {
    let accommodation = listed_accommodation(UserId::random(), 4);
    let accommodation_id = accommodation.id();

    let mut accommodation_repo = MockAccommodationRepository::new();
    accommodation_repo
        .expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(accommodation)));
    let mut booking_repo = MockBookingRepository::new();
    expect_counts(&mut booking_repo, 1, 1);

    let service = make_service(accommodation_repo, booking_repo);
    let error = service
        .place_booking(place_request(guest_caller(), accommodation_id))
        .await
        .expect_err("double booking rejected");

    assert_eq!(error.message(), rules::USER_HAS_BOOKINGS_BETWEEN_DATES);
}

#[tokio::test]
async fn place_booking_rejects_a_taken_interval() {
    let accommodation = listed_accommodation(UserId::random(), 4);
    let accommodation_id = accommodation.id();

    let mut accommodation_repo = MockAccommodationRepository::new();
    accommodation_repo
        .expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(accommodation)));
    let mut booking_repo = MockBookingRepository::new();
    expect_counts(&mut booking_repo, 0, 1);

    let service = make_service(accommodation_repo, booking_repo);
    let error = service
        .place_booking(place_request(guest_caller(), accommodation_id))
        .await
        .expect_err("taken interval rejected");

    assert_eq!(error.message(), rules::ACCOMMODATION_ALREADY_BOOKED);
}

#[tokio::test]
async fn place_booking_maps_a_save_conflict_to_the_overlap_reason() {
    let accommodation = listed_accommodation(UserId::random(), 4);
    let accommodation_id = accommodation.id();

    let mut accommodation_repo = MockAccommodationRepository::new();
    accommodation_repo
        .expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(accommodation)));
    let mut booking_repo = MockBookingRepository::new();
    expect_counts(&mut booking_repo, 0, 0);
    booking_repo
        .expect_save()
        .times(1)
        .return_once(|_| Err(BookingRepositoryError::conflict("interval taken")));

    let service = make_service(accommodation_repo, booking_repo);
    let error = service
        .place_booking(place_request(guest_caller(), accommodation_id))
        .await
        .expect_err("lost race surfaces as overlap");

    assert_eq!(error.code(), ErrorCode::RuleViolation);
    assert_eq!(error.message(), rules::ACCOMMODATION_ALREADY_BOOKED);
}

#[tokio::test]
async fn place_booking_maps_connection_failures_to_service_unavailable() {
    let mut accommodation_repo = MockAccommodationRepository::new();
    accommodation_repo.expect_find_by_id().times(1).return_once(|_| {
        Err(crate::domain::ports::AccommodationRepositoryError::connection(
            "pool unavailable",
        ))
    });

    let service = make_service(accommodation_repo, MockBookingRepository::new());
    let error = service
        .place_booking(place_request(guest_caller(), Uuid::new_v4()))
        .await
        .expect_err("service unavailable");

    assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
}

#[tokio::test]
async fn confirm_booking_confirms_a_pending_booking() {
    let host = guest_caller();
    let accommodation = listed_accommodation(host.id.clone(), 4);
    let accommodation_id = accommodation.id();
    let booking = pending_booking(accommodation_id, UserId::random(), stay(5, 10));
    let booking_id = booking.id();

    let mut accommodation_repo = MockAccommodationRepository::new();
    accommodation_repo
        .expect_find_by_id_and_host()
        .times(1)
        .return_once(move |_, _| Ok(Some(accommodation)));
    let mut booking_repo = MockBookingRepository::new();
    booking_repo
        .expect_find_by_id_and_accommodation()
        .times(1)
        .return_once(move |_, _| Ok(Some(booking)));
    booking_repo.expect_save().times(1).return_once(|_| Ok(()));

    let service = make_service(accommodation_repo, booking_repo);
    let response = service
        .confirm_booking(ConfirmBookingRequest {
            caller: host,
            accommodation_id,
            booking_id,
        })
        .await
        .expect("confirmation succeeds");

    assert_eq!(response.booking.status, BookingStatus::Confirmed);
}

#[tokio::test]
async fn confirm_booking_scopes_the_accommodation_to_the_calling_host() {
    let mut accommodation_repo = MockAccommodationRepository::new();
    accommodation_repo
        .expect_find_by_id_and_host()
        .times(1)
        .return_once(|_, _| Ok(None));

    let service = make_service(accommodation_repo, MockBookingRepository::new());
    let error = service
        .confirm_booking(ConfirmBookingRequest {
            caller: guest_caller(),
            accommodation_id: Uuid::new_v4(),
            booking_id: Uuid::new_v4(),
        })
        .await
        .expect_err("foreign accommodation hidden");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn confirm_booking_rejects_a_booking_that_is_not_pending() {
    let host = guest_caller();
    let accommodation = listed_accommodation(host.id.clone(), 4);
    let accommodation_id = accommodation.id();
    let mut booking = pending_booking(accommodation_id, UserId::random(), stay(5, 10));
    booking.confirm().expect("pending booking confirms");
    let booking_id = booking.id();

    let mut accommodation_repo = MockAccommodationRepository::new();
    accommodation_repo
        .expect_find_by_id_and_host()
        .times(1)
        .return_once(move |_, _| Ok(Some(accommodation)));
    let mut booking_repo = MockBookingRepository::new();
    booking_repo
        .expect_find_by_id_and_accommodation()
        .times(1)
        .return_once(move |_, _| Ok(Some(booking)));
    booking_repo.expect_save().times(0);

    let service = make_service(accommodation_repo, booking_repo);
    let error = service
        .confirm_booking(ConfirmBookingRequest {
            caller: host,
            accommodation_id,
            booking_id,
        })
        .await
        .expect_err("double confirm rejected");

    assert_eq!(error.code(), ErrorCode::RuleViolation);
    assert_eq!(error.message(), rules::BOOKING_NOT_PENDING);
}

#[tokio::test]
async fn cancel_booking_cancels_the_callers_own_booking() {
    let caller = guest_caller();
    let booking = pending_booking(Uuid::new_v4(), caller.id.clone(), stay(5, 10));
    let booking_id = booking.id();

    let mut booking_repo = MockBookingRepository::new();
    booking_repo
        .expect_find_by_id_and_user()
        .times(2)
        .returning(move |_, _| Ok(Some(booking.clone())));
    booking_repo.expect_save().times(1).return_once(|_| Ok(()));

    let service = make_service(MockAccommodationRepository::new(), booking_repo);
    let response = service
        .cancel_booking(CancelBookingRequest {
            caller,
            booking_id,
        })
        .await
        .expect("cancellation succeeds");

    assert_eq!(response.booking.status, BookingStatus::Cancelled);
}

#[tokio::test]
async fn cancel_booking_falls_back_to_the_hosting_owner() {
    let host = guest_caller();
    let accommodation = listed_accommodation(host.id.clone(), 4);
    let booking = pending_booking(accommodation.id(), UserId::random(), stay(5, 10));
    let booking_id = booking.id();

    let mut accommodation_repo = MockAccommodationRepository::new();
    accommodation_repo
        .expect_find_by_id_and_host()
        .times(2)
        .returning(move |_, _| Ok(Some(accommodation.clone())));
    let mut booking_repo = MockBookingRepository::new();
    booking_repo
        .expect_find_by_id_and_user()
        .times(2)
        .returning(|_, _| Ok(None));
    booking_repo
        .expect_find_by_id()
        .times(2)
        .returning(move |_| Ok(Some(booking.clone())));
    booking_repo.expect_save().times(1).return_once(|_| Ok(()));

    let service = make_service(accommodation_repo, booking_repo);
    let response = service
        .cancel_booking(CancelBookingRequest {
            caller: host,
            booking_id,
        })
        .await
        .expect("host cancellation succeeds");

    assert_eq!(response.booking.status, BookingStatus::Cancelled);
}

#[tokio::test]
async fn cancel_booking_hides_bookings_of_other_users() {
    let booking = pending_booking(Uuid::new_v4(), UserId::random(), stay(5, 10));
    let booking_id = booking.id();

    let mut accommodation_repo = MockAccommodationRepository::new();
    accommodation_repo
        .expect_find_by_id_and_host()
        .times(1)
        .return_once(|_, _| Ok(None));
    let mut booking_repo = MockBookingRepository::new();
    booking_repo
        .expect_find_by_id_and_user()
        .times(1)
        .return_once(|_, _| Ok(None));
    booking_repo
        .expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(booking)));

    let service = make_service(accommodation_repo, booking_repo);
    let error = service
        .cancel_booking(CancelBookingRequest {
            caller: guest_caller(),
            booking_id,
        })
        .await
        .expect_err("foreign booking hidden");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn cancel_booking_rejects_a_stay_that_already_started() {
    let caller = guest_caller();
    // Checkin on the fixture day itself; cancellation needs a future checkin.
    let booking = pending_booking(Uuid::new_v4(), caller.id.clone(), stay(0, 3));
    let booking_id = booking.id();

    let mut booking_repo = MockBookingRepository::new();
    booking_repo
        .expect_find_by_id_and_user()
        .times(2)
        .returning(move |_, _| Ok(Some(booking.clone())));
    booking_repo.expect_save().times(0);

    let service = make_service(MockAccommodationRepository::new(), booking_repo);
    let error = service
        .cancel_booking(CancelBookingRequest {
            caller,
            booking_id,
        })
        .await
        .expect_err("started stay not cancellable");

    assert_eq!(error.message(), rules::BOOKING_NOT_ACTIVE);
}

#[tokio::test]
async fn reschedule_booking_moves_the_stay_and_resets_to_pending() {
    let caller = guest_caller();
    let mut booking = pending_booking(Uuid::new_v4(), caller.id.clone(), stay(5, 10));
    booking.confirm().expect("pending booking confirms");
    let booking_id = booking.id();

    let mut booking_repo = MockBookingRepository::new();
    booking_repo
        .expect_find_by_id_and_user()
        .times(2)
        .returning(move |_, _| Ok(Some(booking.clone())));
    booking_repo
        .expect_count_active_overlapping_for_user()
        .withf(move |_, _, exclude| *exclude == Some(booking_id))
        .times(1)
        .return_once(|_, _, _| Ok(0));
    booking_repo
        .expect_count_active_overlapping_for_accommodation()
        .withf(move |_, _, exclude| *exclude == Some(booking_id))
        .times(1)
        .return_once(|_, _, _| Ok(0));
    booking_repo.expect_save().times(1).return_once(|_| Ok(()));

    let service = make_service(MockAccommodationRepository::new(), booking_repo);
    let response = service
        .reschedule_booking(RescheduleBookingRequest {
            caller,
            booking_id,
            stay: stay(20, 25),
        })
        .await
        .expect("reschedule succeeds");

    assert_eq!(response.booking.status, BookingStatus::Pending);
    assert_eq!(response.booking.stay, stay(20, 25));
}

#[tokio::test]
async fn reschedule_booking_rejects_identical_dates() {
    let caller = guest_caller();
    let booking = pending_booking(Uuid::new_v4(), caller.id.clone(), stay(5, 10));
    let booking_id = booking.id();

    let mut booking_repo = MockBookingRepository::new();
    booking_repo
        .expect_find_by_id_and_user()
        .times(2)
        .returning(move |_, _| Ok(Some(booking.clone())));
    booking_repo.expect_save().times(0);

    let service = make_service(MockAccommodationRepository::new(), booking_repo);
    let error = service
        .reschedule_booking(RescheduleBookingRequest {
            caller,
            booking_id,
            stay: stay(5, 10),
        })
        .await
        .expect_err("identical dates rejected");

    assert_eq!(error.message(), rules::DATES_UNCHANGED);
}

#[tokio::test]
async fn reschedule_booking_keeps_the_stored_stay_on_conflict() {
    let caller = guest_caller();
    let booking = pending_booking(Uuid::new_v4(), caller.id.clone(), stay(5, 10));
    let booking_id = booking.id();

    let mut booking_repo = MockBookingRepository::new();
    booking_repo
        .expect_find_by_id_and_user()
        .times(2)
        .returning(move |_, _| Ok(Some(booking.clone())));
    booking_repo
        .expect_count_active_overlapping_for_user()
        .times(1)
        .return_once(|_, _, _| Ok(1));
    booking_repo
        .expect_count_active_overlapping_for_accommodation()
        .times(1)
        .return_once(|_, _, _| Ok(0));
    booking_repo.expect_save().times(0);

    let service = make_service(MockAccommodationRepository::new(), booking_repo);
    let error = service
        .reschedule_booking(RescheduleBookingRequest {
            caller,
            booking_id,
            stay: stay(7, 9),
        })
        .await
        .expect_err("conflicting target rejected");

    assert_eq!(error.message(), rules::USER_HAS_BOOKINGS_BETWEEN_DATES);
}

#[tokio::test]
async fn reschedule_booking_requires_the_callers_own_booking() {
    let mut booking_repo = MockBookingRepository::new();
    booking_repo
        .expect_find_by_id_and_user()
        .times(1)
        .return_once(|_, _| Ok(None));

    let service = make_service(MockAccommodationRepository::new(), booking_repo);
    let error = service
        .reschedule_booking(RescheduleBookingRequest {
            caller: guest_caller(),
            booking_id: Uuid::new_v4(),
            stay: stay(20, 25),
        })
        .await
        .expect_err("foreign booking hidden");

    assert_eq!(error.code(), ErrorCode::NotFound);
}
