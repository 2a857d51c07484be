//! Process-local implementation of the repository ports.
//!
//! [`InMemoryStore`] keeps every aggregate in a [`DashMap`] and implements
//! all four driven repository ports on one value, so a single `Arc` can back
//! a whole engine. Booking saves enforce the accommodation-interval
//! uniqueness guard the port documents: an active booking whose stay
//! overlaps another active booking on the same accommodation is rejected
//! with a conflict, which the services surface as the overlap rule
//! violation. Review saves enforce one review per booking the same way.

use std::sync::Mutex;

use async_trait::async_trait;
use dashmap::DashMap;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::domain::ports::{
    AccommodationRepository, AccommodationRepositoryError, BookingRepository,
    BookingRepositoryError, FavoriteRepository, FavoriteRepositoryError, ReviewRepository,
    ReviewRepositoryError,
};
use crate::domain::{Accommodation, Booking, Favorite, Review, StayPeriod, UserId};

/// In-memory store backing all repository ports.
///
/// Reads reflect whatever the most recent save stored; there is no
/// transaction scope beyond a single call. The booking write guard makes
/// the conflict check and the insert atomic with respect to other booking
/// saves on the same store.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    accommodations: DashMap<Uuid, Accommodation>,
    bookings: DashMap<Uuid, Booking>,
    reviews: DashMap<Uuid, Review>,
    favorites: DashMap<(Uuid, Uuid), Favorite>,
    booking_write_guard: Mutex<()>,
    review_write_guard: Mutex<()>,
}

impl InMemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn count_overlapping<P>(&self, stay: &StayPeriod, exclude: Option<Uuid>, scope: P) -> u64
    where
        P: Fn(&Booking) -> bool,
    {
        let count = self
            .bookings
            .iter()
            .filter(|entry| {
                let booking = entry.value();
                Some(booking.id()) != exclude
                    && booking.has_active_status()
                    && scope(booking)
                    && booking.stay().overlaps(stay)
            })
            .count();
        count as u64
    }

    fn has_conflicting_booking(&self, candidate: &Booking) -> bool {
        self.bookings.iter().any(|entry| {
            let stored = entry.value();
            stored.id() != candidate.id()
                && stored.accommodation_id() == candidate.accommodation_id()
                && stored.has_active_status()
                && stored.stay().overlaps(candidate.stay())
        })
    }
}

#[async_trait]
impl AccommodationRepository for InMemoryStore {
    async fn find_by_id(
        &self,
        accommodation_id: &Uuid,
    ) -> Result<Option<Accommodation>, AccommodationRepositoryError> {
        Ok(self
            .accommodations
            .get(accommodation_id)
            .map(|entry| entry.value().clone()))
    }

    async fn find_by_id_and_host(
        &self,
        accommodation_id: &Uuid,
        host_id: &UserId,
    ) -> Result<Option<Accommodation>, AccommodationRepositoryError> {
        Ok(self
            .accommodations
            .get(accommodation_id)
            .filter(|entry| entry.value().host_id() == host_id)
            .map(|entry| entry.value().clone()))
    }

    async fn save(
        &self,
        accommodation: &Accommodation,
    ) -> Result<(), AccommodationRepositoryError> {
        debug!(accommodation = %accommodation.id(), listed = accommodation.listed(), "stored accommodation");
        self.accommodations
            .insert(accommodation.id(), accommodation.clone());
        Ok(())
    }
}

#[async_trait]
impl BookingRepository for InMemoryStore {
    async fn find_by_id(
        &self,
        booking_id: &Uuid,
    ) -> Result<Option<Booking>, BookingRepositoryError> {
        Ok(self
            .bookings
            .get(booking_id)
            .map(|entry| entry.value().clone()))
    }

    async fn find_by_id_and_user(
        &self,
        booking_id: &Uuid,
        user_id: &UserId,
    ) -> Result<Option<Booking>, BookingRepositoryError> {
        Ok(self
            .bookings
            .get(booking_id)
            .filter(|entry| entry.value().user_id() == user_id)
            .map(|entry| entry.value().clone()))
    }

    async fn find_by_id_and_accommodation(
        &self,
        booking_id: &Uuid,
        accommodation_id: &Uuid,
    ) -> Result<Option<Booking>, BookingRepositoryError> {
        Ok(self
            .bookings
            .get(booking_id)
            .filter(|entry| entry.value().accommodation_id() == *accommodation_id)
            .map(|entry| entry.value().clone()))
    }

    async fn save(&self, booking: &Booking) -> Result<(), BookingRepositoryError> {
        // Serialize conflict check and insert against other booking saves.
        let guard = self
            .booking_write_guard
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if booking.has_active_status() && self.has_conflicting_booking(booking) {
            warn!(
                booking = %booking.id(),
                accommodation = %booking.accommodation_id(),
                stay = %booking.stay(),
                "rejected booking save over a taken interval"
            );
            return Err(BookingRepositoryError::conflict(format!(
                "active booking overlaps {} on accommodation {}",
                booking.stay(),
                booking.accommodation_id()
            )));
        }

        debug!(booking = %booking.id(), status = %booking.status(), "stored booking");
        self.bookings.insert(booking.id(), booking.clone());
        drop(guard);
        Ok(())
    }

    async fn save_all(&self, bookings: &[Booking]) -> Result<(), BookingRepositoryError> {
        let guard = self
            .booking_write_guard
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        debug!(count = bookings.len(), "stored booking batch");
        for booking in bookings {
            self.bookings.insert(booking.id(), booking.clone());
        }
        drop(guard);
        Ok(())
    }

    async fn find_active_by_accommodation(
        &self,
        accommodation_id: &Uuid,
    ) -> Result<Vec<Booking>, BookingRepositoryError> {
        Ok(self
            .bookings
            .iter()
            .filter(|entry| {
                let booking = entry.value();
                booking.accommodation_id() == *accommodation_id && booking.has_active_status()
            })
            .map(|entry| entry.value().clone())
            .collect())
    }

    async fn count_active_overlapping_for_accommodation(
        &self,
        accommodation_id: &Uuid,
        stay: &StayPeriod,
        exclude_booking_id: Option<Uuid>,
    ) -> Result<u64, BookingRepositoryError> {
        let accommodation_id = *accommodation_id;
        Ok(self.count_overlapping(stay, exclude_booking_id, |booking| {
            booking.accommodation_id() == accommodation_id
        }))
    }

    async fn count_active_overlapping_for_user(
        &self,
        user_id: &UserId,
        stay: &StayPeriod,
        exclude_booking_id: Option<Uuid>,
    ) -> Result<u64, BookingRepositoryError> {
        Ok(self.count_overlapping(stay, exclude_booking_id, |booking| {
            booking.user_id() == user_id
        }))
    }
}

#[async_trait]
impl ReviewRepository for InMemoryStore {
    async fn list_by_accommodation(
        &self,
        accommodation_id: &Uuid,
    ) -> Result<Vec<Review>, ReviewRepositoryError> {
        Ok(self
            .reviews
            .iter()
            .filter(|entry| entry.value().accommodation_id() == *accommodation_id)
            .map(|entry| entry.value().clone())
            .collect())
    }

    async fn exists_for_booking(&self, booking_id: &Uuid) -> Result<bool, ReviewRepositoryError> {
        Ok(self
            .reviews
            .iter()
            .any(|entry| entry.value().booking_id() == *booking_id))
    }

    async fn save(&self, review: &Review) -> Result<(), ReviewRepositoryError> {
        let guard = self
            .review_write_guard
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let duplicate = self.reviews.iter().any(|entry| {
            entry.value().id() != review.id() && entry.value().booking_id() == review.booking_id()
        });
        if duplicate {
            warn!(
                review = %review.id(),
                booking = %review.booking_id(),
                "rejected second review for one booking"
            );
            return Err(ReviewRepositoryError::conflict(format!(
                "booking {} already reviewed",
                review.booking_id()
            )));
        }

        debug!(review = %review.id(), accommodation = %review.accommodation_id(), "stored review");
        self.reviews.insert(review.id(), review.clone());
        drop(guard);
        Ok(())
    }
}

#[async_trait]
impl FavoriteRepository for InMemoryStore {
    async fn exists_for_user_and_accommodation(
        &self,
        user_id: &UserId,
        accommodation_id: &Uuid,
    ) -> Result<bool, FavoriteRepositoryError> {
        Ok(self
            .favorites
            .contains_key(&(*user_id.as_uuid(), *accommodation_id)))
    }

    async fn save(&self, favorite: &Favorite) -> Result<(), FavoriteRepositoryError> {
        debug!(
            user = %favorite.user_id(),
            accommodation = %favorite.accommodation_id(),
            "stored favourite mark"
        );
        self.favorites.insert(
            (*favorite.user_id().as_uuid(), favorite.accommodation_id()),
            favorite.clone(),
        );
        Ok(())
    }

    async fn delete_for_user_and_accommodation(
        &self,
        user_id: &UserId,
        accommodation_id: &Uuid,
    ) -> Result<bool, FavoriteRepositoryError> {
        Ok(self
            .favorites
            .remove(&(*user_id.as_uuid(), *accommodation_id))
            .is_some())
    }
}
