//! Port for favourite mark persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Favorite, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by favourite repository adapters.
    pub enum FavoriteRepositoryError {
        /// Repository connection could not be established.
        Connection (connection) =>
            "favorite repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query (query) =>
            "favorite repository query failed: {message}",
    }
}

/// Port for reading and writing favourite marks.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FavoriteRepository: Send + Sync {
    /// Whether the user has marked the accommodation.
    async fn exists_for_user_and_accommodation(
        &self,
        user_id: &UserId,
        accommodation_id: &Uuid,
    ) -> Result<bool, FavoriteRepositoryError>;

    /// Persist a favourite mark.
    async fn save(&self, favorite: &Favorite) -> Result<(), FavoriteRepositoryError>;

    /// Remove the user's mark on the accommodation, reporting whether one
    /// was stored.
    async fn delete_for_user_and_accommodation(
        &self,
        user_id: &UserId,
        accommodation_id: &Uuid,
    ) -> Result<bool, FavoriteRepositoryError>;
}

/// Fixture implementation for tests that do not exercise favourite
/// persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureFavoriteRepository;

#[async_trait]
impl FavoriteRepository for FixtureFavoriteRepository {
    async fn exists_for_user_and_accommodation(
        &self,
        _user_id: &UserId,
        _accommodation_id: &Uuid,
    ) -> Result<bool, FavoriteRepositoryError> {
        Ok(false)
    }

    async fn save(&self, _favorite: &Favorite) -> Result<(), FavoriteRepositoryError> {
        Ok(())
    }

    async fn delete_for_user_and_accommodation(
        &self,
        _user_id: &UserId,
        _accommodation_id: &Uuid,
    ) -> Result<bool, FavoriteRepositoryError> {
        Ok(false)
    }
}
