//! Timestamp helper traits shared by database models.

use jiff::{SignedDuration, Timestamp};

/// Duration for considering something "recently created" (24 hours).
const RECENTLY_CREATED: SignedDuration = SignedDuration::from_hours(24);

/// Duration for considering something "recently updated" (1 hour).
const RECENTLY_UPDATED: SignedDuration = SignedDuration::from_hours(1);

/// Returns whether a timestamp is within the specified duration from now.
fn is_within_duration(timestamp: Timestamp, duration: SignedDuration) -> bool {
    Timestamp::now().duration_since(timestamp) <= duration
}

/// Trait for models that have creation timestamps.
pub trait HasCreatedAt {
    /// Returns the creation timestamp.
    fn created_at(&self) -> Timestamp;

    /// Returns whether the entity was created recently.
    fn is_recently_created(&self) -> bool {
        is_within_duration(self.created_at(), RECENTLY_CREATED)
    }

    /// Returns the age of the entity since creation.
    fn creation_age(&self) -> SignedDuration {
        Timestamp::now().duration_since(self.created_at())
    }
}

/// Trait for models that have update timestamps.
pub trait HasUpdatedAt {
    /// Returns the last update timestamp.
    fn updated_at(&self) -> Timestamp;

    /// Returns whether the entity was updated recently.
    fn is_recently_updated(&self) -> bool {
        is_within_duration(self.updated_at(), RECENTLY_UPDATED)
    }

    /// Returns whether the entity was updated within the specified duration.
    fn was_updated_within(&self, duration: SignedDuration) -> bool {
        is_within_duration(self.updated_at(), duration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Stamped {
        created_at: Timestamp,
        updated_at: Timestamp,
    }

    impl HasCreatedAt for Stamped {
        fn created_at(&self) -> Timestamp {
            self.created_at
        }
    }

    impl HasUpdatedAt for Stamped {
        fn updated_at(&self) -> Timestamp {
            self.updated_at
        }
    }

    #[test]
    fn recent_timestamps() {
        let now = Timestamp::now();
        let stamped = Stamped {
            created_at: now,
            updated_at: now,
        };

        assert!(stamped.is_recently_created());
        assert!(stamped.is_recently_updated());
        assert!(stamped.was_updated_within(SignedDuration::from_secs(60)));
    }

    #[test]
    fn stale_timestamps() {
        let old = Timestamp::now() - SignedDuration::from_hours(48);
        let stamped = Stamped {
            created_at: old,
            updated_at: old,
        };

        assert!(!stamped.is_recently_created());
        assert!(!stamped.is_recently_updated());
        assert!(stamped.creation_age() >= SignedDuration::from_hours(48));
    }
}
