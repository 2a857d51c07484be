//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod accommodation_command;
mod accommodation_query;
mod accommodation_repository;
mod booking_command;
mod booking_repository;
mod favorite_command;
mod favorite_repository;
mod review_command;
mod review_query;
mod review_repository;

#[cfg(test)]
pub use accommodation_command::MockAccommodationCommand;
pub use accommodation_command::{
    AccommodationCommand, AccommodationPayload, FixtureAccommodationCommand,
    RegisterAccommodationRequest, RegisterAccommodationResponse, UnlistAccommodationRequest,
    UnlistAccommodationResponse,
};
#[cfg(test)]
pub use accommodation_query::MockAccommodationQuery;
pub use accommodation_query::{
    AccommodationQuery, FixtureAccommodationQuery, GetAccommodationRequest,
    GetAccommodationResponse,
};
#[cfg(test)]
pub use accommodation_repository::MockAccommodationRepository;
pub use accommodation_repository::{
    AccommodationRepository, AccommodationRepositoryError, FixtureAccommodationRepository,
};
#[cfg(test)]
pub use booking_command::MockBookingCommand;
pub use booking_command::{
    BookingCommand, BookingPayload, CancelBookingRequest, CancelBookingResponse,
    ConfirmBookingRequest, ConfirmBookingResponse, FixtureBookingCommand, PlaceBookingRequest,
    PlaceBookingResponse, RescheduleBookingRequest, RescheduleBookingResponse,
};
#[cfg(test)]
pub use booking_repository::MockBookingRepository;
pub use booking_repository::{BookingRepository, BookingRepositoryError, FixtureBookingRepository};
#[cfg(test)]
pub use favorite_command::MockFavoriteCommand;
pub use favorite_command::{
    AddFavoriteRequest, AddFavoriteResponse, FavoriteCommand, FixtureFavoriteCommand,
    RemoveFavoriteRequest, RemoveFavoriteResponse,
};
#[cfg(test)]
pub use favorite_repository::MockFavoriteRepository;
pub use favorite_repository::{
    FavoriteRepository, FavoriteRepositoryError, FixtureFavoriteRepository,
};
#[cfg(test)]
pub use review_command::MockReviewCommand;
pub use review_command::{
    FixtureReviewCommand, ReviewCommand, ReviewPayload, SubmitReviewRequest, SubmitReviewResponse,
};
#[cfg(test)]
pub use review_query::MockReviewQuery;
pub use review_query::{FixtureReviewQuery, ListReviewsRequest, ListReviewsResponse, ReviewQuery};
#[cfg(test)]
pub use review_repository::MockReviewRepository;
pub use review_repository::{FixtureReviewRepository, ReviewRepository, ReviewRepositoryError};
