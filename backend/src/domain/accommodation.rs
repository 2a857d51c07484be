//! Accommodation aggregate.

use std::fmt;

use uuid::Uuid;

use crate::domain::UserId;

/// Validation and state errors raised by [`Accommodation`] operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccommodationValidationError {
    EmptyName,
    NameTooShort { min: usize },
    NameTooLong { max: usize },
    NameUntrimmed,
    ZeroMaxGuests,
    AlreadyUnlisted,
}

impl fmt::Display for AccommodationValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "accommodation name must not be empty"),
            Self::NameTooShort { min } => {
                write!(f, "accommodation name must be at least {min} characters")
            }
            Self::NameTooLong { max } => {
                write!(f, "accommodation name must be at most {max} characters")
            }
            Self::NameUntrimmed => {
                write!(f, "accommodation name must not have surrounding whitespace")
            }
            Self::ZeroMaxGuests => write!(f, "maximum guest capacity must be at least 1"),
            Self::AlreadyUnlisted => write!(f, "already unlisted"),
        }
    }
}

impl std::error::Error for AccommodationValidationError {}

/// Minimum allowed length for an accommodation name.
pub const ACCOMMODATION_NAME_MIN: usize = 3;
/// Maximum allowed length for an accommodation name.
pub const ACCOMMODATION_NAME_MAX: usize = 120;

/// Input payload for [`Accommodation::new`].
#[derive(Debug, Clone)]
pub struct AccommodationDraft {
    pub id: Uuid,
    pub host_id: UserId,
    pub name: String,
    pub max_guests: u32,
}

/// A bookable accommodation owned by a host.
///
/// ## Invariants
/// - `max_guests` is at least 1.
/// - `rating` is derived from the review history; `0.0` until the first
///   review is accepted, the arithmetic mean of all review ratings after.
/// - Accommodations are never deleted; `listed` turning false soft-removes
///   them from the marketplace.
#[derive(Debug, Clone, PartialEq)]
pub struct Accommodation {
    id: Uuid,
    host_id: UserId,
    name: String,
    max_guests: u32,
    listed: bool,
    rating: f64,
}

impl Accommodation {
    /// Creates a freshly registered accommodation: listed, not yet rated.
    pub fn new(draft: AccommodationDraft) -> Result<Self, AccommodationValidationError> {
        validate_name(&draft.name)?;
        if draft.max_guests == 0 {
            return Err(AccommodationValidationError::ZeroMaxGuests);
        }
        Ok(Self {
            id: draft.id,
            host_id: draft.host_id,
            name: draft.name,
            max_guests: draft.max_guests,
            listed: true,
            rating: 0.0,
        })
    }

    /// Returns the accommodation id.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Returns the owning host id.
    pub fn host_id(&self) -> &UserId {
        &self.host_id
    }

    /// Returns the display name.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Returns the maximum guest capacity.
    pub fn max_guests(&self) -> u32 {
        self.max_guests
    }

    /// Whether the accommodation is visible on the marketplace.
    pub fn listed(&self) -> bool {
        self.listed
    }

    /// Returns the derived average review rating.
    pub fn rating(&self) -> f64 {
        self.rating
    }

    /// Takes the accommodation off the marketplace.
    ///
    /// Fails with [`AccommodationValidationError::AlreadyUnlisted`] when the
    /// accommodation is no longer listed.
    pub fn unlist(&mut self) -> Result<(), AccommodationValidationError> {
        if !self.listed {
            return Err(AccommodationValidationError::AlreadyUnlisted);
        }
        self.listed = false;
        Ok(())
    }

    /// Replaces the derived rating. Only the rating aggregation path writes
    /// through this.
    pub fn update_rating(&mut self, rating: f64) {
        self.rating = rating;
    }
}

fn validate_name(name: &str) -> Result<(), AccommodationValidationError> {
    if name.trim().is_empty() {
        return Err(AccommodationValidationError::EmptyName);
    }
    if name.trim() != name {
        return Err(AccommodationValidationError::NameUntrimmed);
    }

    let length = name.chars().count();
    if length < ACCOMMODATION_NAME_MIN {
        return Err(AccommodationValidationError::NameTooShort {
            min: ACCOMMODATION_NAME_MIN,
        });
    }
    if length > ACCOMMODATION_NAME_MAX {
        return Err(AccommodationValidationError::NameTooLong {
            max: ACCOMMODATION_NAME_MAX,
        });
    }
    Ok(())
}
