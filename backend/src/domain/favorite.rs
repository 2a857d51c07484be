//! Favourite marks linking users to accommodations.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::UserId;

/// A user's favourite mark on an accommodation.
///
/// At most one favourite exists per (user, accommodation) pair; the store
/// enforces the uniqueness, the service enforces the user-facing rule.
#[derive(Debug, Clone, PartialEq)]
pub struct Favorite {
    user_id: UserId,
    accommodation_id: Uuid,
    created_at: DateTime<Utc>,
}

impl Favorite {
    /// Creates a favourite mark.
    pub fn new(user_id: UserId, accommodation_id: Uuid, created_at: DateTime<Utc>) -> Self {
        Self {
            user_id,
            accommodation_id,
            created_at,
        }
    }

    /// Returns the marking user id.
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Returns the marked accommodation id.
    pub fn accommodation_id(&self) -> Uuid {
        self.accommodation_id
    }

    /// Returns the marking timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
