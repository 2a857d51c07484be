//! Port for accommodation persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Accommodation, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by accommodation repository adapters.
    pub enum AccommodationRepositoryError {
        /// Repository connection could not be established.
        Connection (connection) =>
            "accommodation repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query (query) =>
            "accommodation repository query failed: {message}",
    }
}

/// Port for reading and writing accommodations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccommodationRepository: Send + Sync {
    /// Find an accommodation by id.
    async fn find_by_id(
        &self,
        accommodation_id: &Uuid,
    ) -> Result<Option<Accommodation>, AccommodationRepositoryError>;

    /// Find an accommodation by id, scoped to its owning host. Returns
    /// `None` when the accommodation exists but belongs to another host.
    async fn find_by_id_and_host(
        &self,
        accommodation_id: &Uuid,
        host_id: &UserId,
    ) -> Result<Option<Accommodation>, AccommodationRepositoryError>;

    /// Persist an accommodation, replacing any stored state.
    async fn save(
        &self,
        accommodation: &Accommodation,
    ) -> Result<(), AccommodationRepositoryError>;
}

/// Fixture implementation for tests that do not exercise accommodation
/// persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureAccommodationRepository;

#[async_trait]
impl AccommodationRepository for FixtureAccommodationRepository {
    async fn find_by_id(
        &self,
        _accommodation_id: &Uuid,
    ) -> Result<Option<Accommodation>, AccommodationRepositoryError> {
        Ok(None)
    }

    async fn find_by_id_and_host(
        &self,
        _accommodation_id: &Uuid,
        _host_id: &UserId,
    ) -> Result<Option<Accommodation>, AccommodationRepositoryError> {
        Ok(None)
    }

    async fn save(
        &self,
        _accommodation: &Accommodation,
    ) -> Result<(), AccommodationRepositoryError> {
        Ok(())
    }
}
