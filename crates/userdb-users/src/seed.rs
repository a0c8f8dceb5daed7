//! Synthetic bulk seeding

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::ops::Range;

use crate::error::UserError;
use crate::store::UserStore;
use crate::user::User;
use crate::Result;

/// Number of users written by [`UserStore::add_large_number_of_users`].
pub const LARGE_SEED_TOTAL: usize = 100_000;

/// Outcome of a seeding run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedReport {
    pub inserted: usize,
    pub batches: usize,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl SeedReport {
    pub fn begin() -> Self {
        let now = Utc::now();
        Self {
            inserted: 0,
            batches: 0,
            started_at: now,
            finished_at: now,
        }
    }

    /// Account for one committed batch.
    pub fn record_batch(&mut self, size: usize) {
        self.inserted += size;
        self.batches += 1;
        self.finished_at = Utc::now();
    }

    pub fn duration(&self) -> Duration {
        self.finished_at - self.started_at
    }
}

/// The deterministic synthetic user for key `i`.
pub fn synthetic_user(i: i64) -> User {
    User {
        id: i,
        name: format!("User {}", i),
        age: 18 + i.rem_euclid(60),
        email: Some(format!("user{}@example.com", i)),
    }
}

pub fn synthetic_users(ids: Range<i64>) -> Vec<User> {
    ids.map(synthetic_user).collect()
}

/// Split keys `1..=total` into consecutive ranges of at most `batch_size`.
pub fn batch_ranges(total: usize, batch_size: usize) -> Result<Vec<Range<i64>>> {
    if batch_size == 0 {
        return Err(UserError::InvalidBatchSize);
    }

    let end = total.saturating_add(1);
    let mut ranges = Vec::with_capacity(total.div_ceil(batch_size));
    let mut start: usize = 1;
    while start < end {
        let stop = start.saturating_add(batch_size).min(end);
        ranges.push(start as i64..stop as i64);
        start = stop;
    }

    Ok(ranges)
}

impl UserStore {
    /// Write `total` synthetic users, one batch transaction at a time.
    ///
    /// Each batch commits before the next is generated. A failed batch stops the
    /// run; batches already committed stay in the store.
    pub fn seed_users(&self, total: usize, batch_size: usize) -> Result<SeedReport> {
        let ranges = batch_ranges(total, batch_size)?;
        let mut report = SeedReport::begin();

        for range in ranges {
            let batch = synthetic_users(range);
            self.add_users_bulk(&batch)?;
            report.record_batch(batch.len());

            tracing::debug!(
                inserted = report.inserted,
                total,
                "Committed seed batch"
            );
        }

        tracing::info!(
            inserted = report.inserted,
            batches = report.batches,
            elapsed_ms = report.duration().num_milliseconds(),
            "Seeded users"
        );

        Ok(report)
    }

    pub fn add_large_number_of_users(&self, batch_size: usize) -> Result<SeedReport> {
        self.seed_users(LARGE_SEED_TOTAL, batch_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SortOrder;
    use userdb_storage::Database;

    #[test]
    fn test_synthetic_user() {
        let user = synthetic_user(61);
        assert_eq!(user.name, "User 61");
        assert_eq!(user.age, 19);
        assert_eq!(user.email.as_deref(), Some("user61@example.com"));
    }

    #[test]
    fn test_batch_ranges() {
        assert_eq!(batch_ranges(10, 4).unwrap(), vec![1..5, 5..9, 9..11]);
        assert_eq!(batch_ranges(4, 4).unwrap(), vec![1..5]);
        assert!(batch_ranges(0, 4).unwrap().is_empty());
        assert!(matches!(batch_ranges(10, 0), Err(UserError::InvalidBatchSize)));
    }

    #[test]
    fn test_batch_ranges_oversized_batch() {
        assert_eq!(batch_ranges(10, usize::MAX).unwrap(), vec![1..11]);
        assert_eq!(batch_ranges(10, i64::MAX as usize + 1).unwrap(), vec![1..11]);
        assert_eq!(
            batch_ranges(LARGE_SEED_TOTAL, i64::MAX as usize).unwrap(),
            vec![1..LARGE_SEED_TOTAL as i64 + 1]
        );
    }

    #[test]
    fn test_seed_stops_at_failed_batch() {
        let store = UserStore::new(Database::open_in_memory().unwrap());
        store
            .database()
            .with_connection(|conn| {
                conn.execute_batch(
                    "CREATE TRIGGER reject_twenty_five BEFORE INSERT ON users
                     WHEN NEW.id = 25
                     BEGIN SELECT RAISE(ABORT, 'rejected'); END;",
                )?;
                Ok(())
            })
            .unwrap();

        let result = store.seed_users(50, 10);

        assert!(matches!(result, Err(UserError::Storage(_))));
        assert_eq!(store.count_users().unwrap(), 20);
        for id in 21..=30 {
            assert_eq!(store.get_user(id).unwrap(), None);
        }
        assert_eq!(store.get_user(20).unwrap(), Some(synthetic_user(20)));
    }

    #[test]
    fn test_seed_users() {
        let store = UserStore::new(Database::open_in_memory().unwrap());
        let report = store.seed_users(25, 10).unwrap();

        assert_eq!(report.inserted, 25);
        assert_eq!(report.batches, 3);
        assert!(report.duration() >= Duration::zero());
        assert_eq!(store.count_users().unwrap(), 25);
        assert_eq!(store.get_user(25).unwrap(), Some(synthetic_user(25)));
    }

    #[test]
    fn test_add_large_number_of_users() {
        let store = UserStore::new(Database::open_in_memory().unwrap());
        let report = store.add_large_number_of_users(3_000).unwrap();

        assert_eq!(report.inserted, LARGE_SEED_TOTAL);
        assert_eq!(report.batches, 34);
        assert_eq!(store.count_users().unwrap(), LARGE_SEED_TOTAL as u64);

        let last = store.get_users(SortOrder::Desc, 1, 0).unwrap();
        assert_eq!(last[0].id, LARGE_SEED_TOTAL as i64);
    }

    #[test]
    fn test_zero_batch_size_writes_nothing() {
        let store = UserStore::new(Database::open_in_memory().unwrap());
        assert!(matches!(
            store.add_large_number_of_users(0),
            Err(UserError::InvalidBatchSize)
        ));
        assert_eq!(store.count_users().unwrap(), 0);
    }
}
