//! Favourite mark domain service.
//!
//! Favourites are a plain (user, accommodation) pair. Both mutations verify
//! the accommodation first so a dangling mark can never be created, and both
//! report the catalog reason when the mark is already in the requested state.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;

use crate::domain::ports::{
    AccommodationRepository, AddFavoriteRequest, AddFavoriteResponse, FavoriteCommand,
    FavoriteRepository, RemoveFavoriteRequest, RemoveFavoriteResponse,
};
use crate::domain::service_support::{
    accommodation_not_found, map_accommodation_repository_error, map_favorite_repository_error,
};
use crate::domain::{Error, Favorite, rules};

/// Favourite service implementing the command driving port.
pub struct FavoriteCommandService<A, F> {
    accommodation_repo: Arc<A>,
    favorite_repo: Arc<F>,
    clock: Arc<dyn Clock>,
}

// Hand-rolled so cloning shares the `Arc`s without requiring the
// repositories themselves to be `Clone`.
impl<A, F> Clone for FavoriteCommandService<A, F> {
    fn clone(&self) -> Self {
        Self {
            accommodation_repo: Arc::clone(&self.accommodation_repo),
            favorite_repo: Arc::clone(&self.favorite_repo),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<A, F> FavoriteCommandService<A, F> {
    /// Create a new command service with the accommodation and favourite
    /// repositories and a clock.
    pub fn new(accommodation_repo: Arc<A>, favorite_repo: Arc<F>, clock: Arc<dyn Clock>) -> Self {
        Self {
            accommodation_repo,
            favorite_repo,
            clock,
        }
    }
}

impl<A, F> FavoriteCommandService<A, F>
where
    A: AccommodationRepository,
{
    async fn ensure_accommodation_exists(&self, request_id: &uuid::Uuid) -> Result<(), Error> {
        self.accommodation_repo
            .find_by_id(request_id)
            .await
            .map_err(map_accommodation_repository_error)?
            .ok_or_else(|| accommodation_not_found(request_id))?;
        Ok(())
    }
}

#[async_trait]
impl<A, F> FavoriteCommand for FavoriteCommandService<A, F>
where
    A: AccommodationRepository,
    F: FavoriteRepository,
{
    async fn add_favorite(
        &self,
        request: AddFavoriteRequest,
    ) -> Result<AddFavoriteResponse, Error> {
        self.ensure_accommodation_exists(&request.accommodation_id)
            .await?;

        let already_marked = self
            .favorite_repo
            .exists_for_user_and_accommodation(&request.caller.id, &request.accommodation_id)
            .await
            .map_err(map_favorite_repository_error)?;
        if already_marked {
            return Err(Error::rule_violation(rules::ACCOMMODATION_ALREADY_FAVORITED));
        }

        let favorite = Favorite::new(
            request.caller.id.clone(),
            request.accommodation_id,
            self.clock.utc(),
        );
        self.favorite_repo
            .save(&favorite)
            .await
            .map_err(map_favorite_repository_error)?;

        Ok(AddFavoriteResponse {
            user_id: request.caller.id,
            accommodation_id: request.accommodation_id,
            created_at: favorite.created_at(),
        })
    }

    async fn remove_favorite(
        &self,
        request: RemoveFavoriteRequest,
    ) -> Result<RemoveFavoriteResponse, Error> {
        self.ensure_accommodation_exists(&request.accommodation_id)
            .await?;

        let removed = self
            .favorite_repo
            .delete_for_user_and_accommodation(&request.caller.id, &request.accommodation_id)
            .await
            .map_err(map_favorite_repository_error)?;
        if !removed {
            return Err(Error::rule_violation(rules::ACCOMMODATION_NOT_FAVORITED));
        }

        Ok(RemoveFavoriteResponse {
            accommodation_id: request.accommodation_id,
        })
    }
}

#[cfg(test)]
#[path = "favorite_service_tests.rs"]
mod tests;
