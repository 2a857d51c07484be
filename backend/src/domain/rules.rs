//! Fixed catalog of business-rule reason strings.
//!
//! Every [`crate::domain::ErrorCode::RuleViolation`] carries one of these
//! strings verbatim. Clients display the text as-is, so the catalog is part
//! of the engine's contract and changes here are breaking changes.

/// Confirm was attempted on a booking that is not `pending`.
pub const BOOKING_NOT_PENDING: &str = "booking not pending";

/// Cancel or reschedule was attempted on a booking that is not active.
pub const BOOKING_NOT_ACTIVE: &str = "booking not active";

/// Reschedule dates match the booking's current dates.
pub const DATES_UNCHANGED: &str = "dates same as reschedule dates";

/// The accommodation has an active booking overlapping the requested stay.
pub const ACCOMMODATION_ALREADY_BOOKED: &str = "accommodation already booked";

/// The user holds an active booking overlapping the requested stay.
pub const USER_HAS_BOOKINGS_BETWEEN_DATES: &str = "user has bookings between dates";

/// The requested guest count exceeds the accommodation's capacity.
pub const GUESTS_EXCEED_CAPACITY: &str = "guests exceed maximum capacity";

/// The accommodation's host attempted to book their own accommodation.
pub const HOST_CANNOT_BOOK_OWN_ACCOMMODATION: &str = "host cannot book own accommodation";

/// A booking was attempted against an unlisted accommodation.
pub const ACCOMMODATION_NOT_LISTED: &str = "accommodation not listed";

/// Unlisting was attempted on an accommodation that is already unlisted.
pub const ALREADY_UNLISTED: &str = "already unlisted";

/// A review was submitted for a booking that has not completed.
pub const BOOKING_NOT_COMPLETED: &str = "booking not completed";

/// A review already exists for the booking.
pub const BOOKING_ALREADY_REVIEWED: &str = "booking already reviewed";

/// The accommodation is already in the caller's favourites.
pub const ACCOMMODATION_ALREADY_FAVORITED: &str = "accommodation already favorited";

/// The accommodation is not in the caller's favourites.
pub const ACCOMMODATION_NOT_FAVORITED: &str = "accommodation not favorited";

/// A host-only operation was invoked without the host role.
pub const CALLER_NOT_HOST: &str = "caller is not a host";
