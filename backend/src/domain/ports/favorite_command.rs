//! Driving port for favourite mark mutations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{CallerContext, Error, UserId};

/// Request to mark an accommodation as a favourite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddFavoriteRequest {
    pub caller: CallerContext,
    pub accommodation_id: Uuid,
}

/// Response from adding a favourite mark.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddFavoriteResponse {
    pub user_id: UserId,
    pub accommodation_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Request to remove a favourite mark.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveFavoriteRequest {
    pub caller: CallerContext,
    pub accommodation_id: Uuid,
}

/// Response from removing a favourite mark.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveFavoriteResponse {
    pub accommodation_id: Uuid,
}

/// Driving port for favourite write operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FavoriteCommand: Send + Sync {
    /// Marks an accommodation as one of the caller's favourites.
    async fn add_favorite(&self, request: AddFavoriteRequest) -> Result<AddFavoriteResponse, Error>;

    /// Removes the caller's favourite mark from an accommodation.
    async fn remove_favorite(
        &self,
        request: RemoveFavoriteRequest,
    ) -> Result<RemoveFavoriteResponse, Error>;
}

/// Fixture command implementation for tests that do not need persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureFavoriteCommand;

#[async_trait]
impl FavoriteCommand for FixtureFavoriteCommand {
    async fn add_favorite(
        &self,
        request: AddFavoriteRequest,
    ) -> Result<AddFavoriteResponse, Error> {
        Ok(AddFavoriteResponse {
            user_id: request.caller.id,
            accommodation_id: request.accommodation_id,
            created_at: DateTime::<Utc>::UNIX_EPOCH,
        })
    }

    async fn remove_favorite(
        &self,
        request: RemoveFavoriteRequest,
    ) -> Result<RemoveFavoriteResponse, Error> {
        Ok(RemoveFavoriteResponse {
            accommodation_id: request.accommodation_id,
        })
    }
}
