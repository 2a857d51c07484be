//! Internal helpers shared by the domain services.

use uuid::Uuid;

use crate::domain::ports::{
    AccommodationRepositoryError, BookingRepositoryError, FavoriteRepositoryError,
    ReviewRepositoryError,
};
use crate::domain::{Error, rules};

pub(crate) fn map_accommodation_repository_error(error: AccommodationRepositoryError) -> Error {
    match error {
        AccommodationRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("accommodation repository unavailable: {message}"))
        }
        AccommodationRepositoryError::Query { message } => {
            Error::internal(format!("accommodation repository error: {message}"))
        }
    }
}

/// A save-time `Conflict` means an adapter-level uniqueness guard lost the
/// interval race, so it surfaces as the overlap rule violation.
pub(crate) fn map_booking_repository_error(error: BookingRepositoryError) -> Error {
    match error {
        BookingRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("booking repository unavailable: {message}"))
        }
        BookingRepositoryError::Query { message } => {
            Error::internal(format!("booking repository error: {message}"))
        }
        BookingRepositoryError::Conflict { .. } => {
            Error::rule_violation(rules::ACCOMMODATION_ALREADY_BOOKED)
        }
    }
}

/// A save-time `Conflict` means a second review raced in for the same
/// booking, so it surfaces as the duplicate-review rule violation.
pub(crate) fn map_review_repository_error(error: ReviewRepositoryError) -> Error {
    match error {
        ReviewRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("review repository unavailable: {message}"))
        }
        ReviewRepositoryError::Query { message } => {
            Error::internal(format!("review repository error: {message}"))
        }
        ReviewRepositoryError::Conflict { .. } => {
            Error::rule_violation(rules::BOOKING_ALREADY_REVIEWED)
        }
    }
}

pub(crate) fn map_favorite_repository_error(error: FavoriteRepositoryError) -> Error {
    match error {
        FavoriteRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("favorite repository unavailable: {message}"))
        }
        FavoriteRepositoryError::Query { message } => {
            Error::internal(format!("favorite repository error: {message}"))
        }
    }
}

pub(crate) fn accommodation_not_found(accommodation_id: &Uuid) -> Error {
    Error::not_found(format!("accommodation {accommodation_id} not found"))
}

pub(crate) fn booking_not_found(booking_id: &Uuid) -> Error {
    Error::not_found(format!("booking {booking_id} not found"))
}
