//! Domain primitives, aggregates, and services for the booking engine.
//!
//! Purpose: own the booking lifecycle rules (availability checks, status
//! transitions, cascading cancellation on unlisting) and the review-driven
//! rating aggregation. Keep types transport agnostic and document invariants
//! and serialisation contracts (serde) in each type's Rustdoc. The driving
//! and driven ports in [`ports`] define the edges of the hexagon.

pub mod accommodation;
pub mod booking;
pub mod caller;
pub mod error;
pub mod favorite;
pub mod ports;
pub mod review;
pub mod rules;
pub mod stay;
pub mod status;

mod accommodation_service;
mod booking_service;
mod favorite_service;
mod review_service;
mod service_support;
mod stay_locks;

pub use self::accommodation::{Accommodation, AccommodationDraft, AccommodationValidationError};
pub use self::accommodation_service::{AccommodationCommandService, AccommodationQueryService};
pub use self::booking::{Booking, BookingDraft, BookingTransitionError, BookingValidationError};
pub use self::booking_service::BookingCommandService;
pub use self::caller::{CallerContext, CallerValidationError, ParseRoleError, Role, UserId};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::favorite::Favorite;
pub use self::favorite_service::FavoriteCommandService;
pub use self::review::{Review, ReviewDraft, ReviewRating, ReviewValidationError};
pub use self::review_service::{ReviewCommandService, ReviewQueryService};
pub use self::stay::{StayPeriod, StayValidationError};
pub use self::stay_locks::{AccommodationPermit, StayLockRegistry, StayPermit};
pub use self::status::{BookingStatus, ParseBookingStatusError};
