//! Keyed write arbitration for availability-sensitive operations.
//!
//! Placement, reschedule, and unlisting all follow a check-then-act shape:
//! read the active bookings, decide, then write. Two such windows running
//! concurrently for the same accommodation (or the same user) could both
//! pass their checks and double-book an interval. [`StayLockRegistry`] makes
//! the windows mutually exclusive by funnelling every writer through a
//! per-accommodation lock, plus a per-user lock for the placement paths that
//! also guard the caller's own calendar.
//!
//! ## Ordering
//! The accommodation lock is always acquired before the user lock, and a
//! holder never takes a second accommodation lock. With a single lock class
//! per level and a fixed level order, the registry cannot deadlock.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};
use uuid::Uuid;

use crate::domain::UserId;

/// Exclusive hold on one accommodation's booking writes.
#[derive(Debug)]
pub struct AccommodationPermit {
    _guard: OwnedMutexGuard<()>,
}

/// Exclusive hold on one accommodation's and one user's booking writes.
#[derive(Debug)]
pub struct StayPermit {
    _accommodation: OwnedMutexGuard<()>,
    _user: OwnedMutexGuard<()>,
}

/// Process-wide registry of per-accommodation and per-user write locks.
///
/// Lock entries are created on first use and kept for the registry's
/// lifetime; the registry is shared behind an `Arc` by every service that
/// mutates bookings.
#[derive(Debug, Default)]
pub struct StayLockRegistry {
    accommodation_locks: DashMap<Uuid, Arc<Mutex<()>>>,
    user_locks: DashMap<Uuid, Arc<Mutex<()>>>,
}

impl StayLockRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Locks one accommodation's booking writes. Used by the unlist cascade,
    /// which touches every booking of the accommodation but no single user's
    /// calendar.
    pub async fn acquire_accommodation(&self, accommodation_id: Uuid) -> AccommodationPermit {
        let guard = Self::lock_entry(&self.accommodation_locks, accommodation_id).await;
        AccommodationPermit { _guard: guard }
    }

    /// Locks one accommodation's and one user's booking writes, in that
    /// order. Used by placement and reschedule, whose availability checks
    /// span both calendars.
    pub async fn acquire(&self, accommodation_id: Uuid, user_id: &UserId) -> StayPermit {
        let accommodation = Self::lock_entry(&self.accommodation_locks, accommodation_id).await;
        let user = Self::lock_entry(&self.user_locks, *user_id.as_uuid()).await;
        StayPermit {
            _accommodation: accommodation,
            _user: user,
        }
    }

    async fn lock_entry(locks: &DashMap<Uuid, Arc<Mutex<()>>>, key: Uuid) -> OwnedMutexGuard<()> {
        // The map guard must drop before the await, so clone the Arc out
        // first.
        let entry = locks.entry(key).or_default().value().clone();
        entry.lock_owned().await
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use std::time::Duration;

    use super::*;

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn permits_serialize_writers_on_one_accommodation() {
        let registry = Arc::new(StayLockRegistry::new());
        let accommodation = Uuid::new_v4();
        let first_user = UserId::random();
        let second_user = UserId::random();

        let held = registry.acquire(accommodation, &first_user).await;

        let contender = {
            let registry = Arc::clone(&registry);
            tokio::spawn(async move {
                let _permit = registry.acquire(accommodation, &second_user).await;
            })
        };

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(
            !contender.is_finished(),
            "second writer must wait for the permit"
        );

        drop(held);
        tokio::time::timeout(Duration::from_secs(1), contender)
            .await
            .expect("contender acquires after release")
            .expect("contender task completes");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn permits_serialize_one_user_across_accommodations() {
        let registry = Arc::new(StayLockRegistry::new());
        let user = UserId::random();

        let held = registry.acquire(Uuid::new_v4(), &user).await;

        let contender = {
            let registry = Arc::clone(&registry);
            let user = user.clone();
            tokio::spawn(async move {
                let _permit = registry.acquire(Uuid::new_v4(), &user).await;
            })
        };

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(
            !contender.is_finished(),
            "same user must wait for the permit"
        );

        drop(held);
        tokio::time::timeout(Duration::from_secs(1), contender)
            .await
            .expect("contender acquires after release")
            .expect("contender task completes");
    }

    #[tokio::test]
    async fn distinct_pairs_do_not_contend() {
        let registry = StayLockRegistry::new();

        let _first = registry.acquire(Uuid::new_v4(), &UserId::random()).await;
        let second = tokio::time::timeout(
            Duration::from_secs(1),
            registry.acquire(Uuid::new_v4(), &UserId::random()),
        )
        .await
        .expect("distinct pair acquires immediately");
        drop(second);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn accommodation_permit_blocks_stay_permit() {
        let registry = Arc::new(StayLockRegistry::new());
        let accommodation = Uuid::new_v4();
        let user = UserId::random();

        let held = registry.acquire_accommodation(accommodation).await;

        let contender = {
            let registry = Arc::clone(&registry);
            let user = user.clone();
            tokio::spawn(async move {
                let _permit = registry.acquire(accommodation, &user).await;
            })
        };

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!contender.is_finished(), "cascade holds off placements");

        drop(held);
        tokio::time::timeout(Duration::from_secs(1), contender)
            .await
            .expect("placement proceeds after the cascade")
            .expect("contender task completes");
    }
}
