//! User store commands
use userdb_core::{
    batch_ranges, synthetic_users, Config, CoreError, SeedReport, SortOrder, User, UserDb,
    LARGE_SEED_TOTAL,
};

use super::{run_blocking, CommandResult};
use crate::state::AppState;

/// Open (or create) the database described by `config`.
///
/// Calling it again once a database is open keeps the existing handle.
pub async fn open_database(state: &AppState, config: Config) -> CommandResult<()> {
    if state.is_open() {
        return CommandResult::ok(());
    }

    match tokio::task::spawn_blocking(move || UserDb::new(config)).await {
        Ok(Ok(db)) => {
            state.install(db);
            CommandResult::ok(())
        }
        Ok(Err(e)) => {
            tracing::error!(error = %e, "Failed to open database");
            CommandResult::err(e.to_string())
        }
        Err(e) => CommandResult::err(format!("Task failed: {}", e)),
    }
}

pub async fn add_user(state: &AppState, user: User) -> CommandResult<()> {
    run_blocking(state, "add_user", move |db| db.add_user(&user)).await
}

pub async fn add_users_bulk(state: &AppState, users: Vec<User>) -> CommandResult<()> {
    run_blocking(state, "add_users_bulk", move |db| db.add_users_bulk(&users)).await
}

pub async fn get_user(state: &AppState, id: i64) -> CommandResult<Option<User>> {
    run_blocking(state, "get_user", move |db| db.get_user(id)).await
}

pub async fn get_all_users(state: &AppState) -> CommandResult<Vec<User>> {
    run_blocking(state, "get_all_users", |db| db.get_all_users()).await
}

/// `order` is `"asc"` or `"desc"`.
pub async fn get_users(
    state: &AppState,
    order: String,
    count: usize,
    skip: usize,
) -> CommandResult<Vec<User>> {
    let order: SortOrder = match order.parse() {
        Ok(order) => order,
        Err(e) => return CommandResult::err(e.to_string()),
    };

    run_blocking(state, "get_users", move |db| db.get_users(order, count, skip)).await
}

pub async fn delete_user(state: &AppState, id: i64) -> CommandResult<bool> {
    run_blocking(state, "delete_user", move |db| db.delete_user(id)).await
}

pub async fn clear_users(state: &AppState) -> CommandResult<usize> {
    run_blocking(state, "clear_users", |db| db.clear_users()).await
}

pub async fn count_users(state: &AppState) -> CommandResult<u64> {
    run_blocking(state, "count_users", |db| db.count_users()).await
}

/// Insert 100,000 synthetic users through [`add_users_bulk`], awaiting each
/// batch before the next one starts. Stops at the first failed batch.
pub async fn add_large_number_of_users(
    state: &AppState,
    batch_size: Option<usize>,
) -> CommandResult<SeedReport> {
    let batch_size = match (batch_size, state.config()) {
        (Some(size), _) => size,
        (None, Some(config)) => config.batch_size,
        (None, None) => return CommandResult::err(CoreError::NotInitialized.to_string()),
    };

    let ranges = match batch_ranges(LARGE_SEED_TOTAL, batch_size) {
        Ok(ranges) => ranges,
        Err(e) => return CommandResult::err(e.to_string()),
    };

    let mut report = SeedReport::begin();
    for range in ranges {
        let batch = synthetic_users(range);
        let size = batch.len();

        if let Err(e) = add_users_bulk(state, batch).await.into_result() {
            tracing::error!(
                inserted = report.inserted,
                error = %e,
                "Seeding stopped at failed batch"
            );
            return CommandResult::err(e);
        }
        report.record_batch(size);
    }

    tracing::info!(
        inserted = report.inserted,
        batches = report.batches,
        elapsed_ms = report.duration().num_milliseconds(),
        "Seeded users"
    );

    CommandResult::ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn open_state(dir: &std::path::Path) -> AppState {
        let state = AppState::new();
        let result = open_database(&state, Config::new(dir.to_path_buf())).await;
        assert!(result.success, "{:?}", result.error);
        state
    }

    fn ids(users: &[User]) -> Vec<i64> {
        users.iter().map(|u| u.id).collect()
    }

    #[tokio::test]
    async fn test_commands_before_open_fail_with_message() {
        let state = AppState::new();

        let result = get_user(&state, 1).await;
        assert!(!result.success);
        assert_eq!(result.error.as_deref(), Some("Database not opened"));

        let seeded = add_large_number_of_users(&state, None).await;
        assert_eq!(seeded.error.as_deref(), Some("Database not opened"));
    }

    #[tokio::test]
    async fn test_open_database_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let state = open_state(dir.path()).await;

        add_user(&state, User::new(1, "Ada", 36)).await.into_result().unwrap();

        let again = open_database(&state, Config::new(dir.path().join("other"))).await;
        assert!(again.success);
        assert_eq!(
            get_user(&state, 1).await.into_result().unwrap(),
            Some(User::new(1, "Ada", 36))
        );
    }

    #[tokio::test]
    async fn test_crud_round() {
        let dir = tempfile::tempdir().unwrap();
        let state = open_state(dir.path()).await;

        let users: Vec<User> = (1..=5).map(|id| User::new(id, format!("u{id}"), 30)).collect();
        add_users_bulk(&state, users).await.into_result().unwrap();
        add_user(&state, User::new(3, "Three", 33).with_email("three@example.com"))
            .await
            .into_result()
            .unwrap();

        let three = get_user(&state, 3).await.into_result().unwrap().unwrap();
        assert_eq!(three.name, "Three");
        assert_eq!(three.email.as_deref(), Some("three@example.com"));

        assert!(delete_user(&state, 4).await.into_result().unwrap());
        assert_eq!(get_user(&state, 4).await.into_result().unwrap(), None);
        assert_eq!(
            ids(&get_all_users(&state).await.into_result().unwrap()),
            vec![1, 2, 3, 5]
        );

        assert_eq!(clear_users(&state).await.into_result().unwrap(), 4);
        assert!(get_all_users(&state).await.into_result().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_users_rejects_unknown_order() {
        let dir = tempfile::tempdir().unwrap();
        let state = open_state(dir.path()).await;

        let result = get_users(&state, "sideways".to_string(), 5, 0).await;
        assert!(!result.success);
        assert!(result.error.unwrap().contains("sideways"));
    }

    #[tokio::test]
    async fn test_seed_then_paginate() {
        let dir = tempfile::tempdir().unwrap();
        let state = open_state(dir.path()).await;

        let report = add_large_number_of_users(&state, Some(25_000))
            .await
            .into_result()
            .unwrap();
        assert_eq!(report.inserted, LARGE_SEED_TOTAL);
        assert_eq!(report.batches, 4);
        assert_eq!(
            count_users(&state).await.into_result().unwrap(),
            LARGE_SEED_TOTAL as u64
        );

        let first = get_users(&state, "desc".to_string(), 3, 0).await.into_result().unwrap();
        let second = get_users(&state, "desc".to_string(), 3, 3).await.into_result().unwrap();
        assert_eq!(ids(&first), vec![100_000, 99_999, 99_998]);
        assert_eq!(ids(&second), vec![99_997, 99_996, 99_995]);
    }

    #[tokio::test]
    async fn test_seed_stops_at_failed_batch() {
        let dir = tempfile::tempdir().unwrap();
        let state = open_state(dir.path()).await;

        // id 60_000 lands in the third batch of 25,000
        state
            .db()
            .unwrap()
            .users()
            .database()
            .with_connection(|conn| {
                conn.execute_batch(
                    "CREATE TRIGGER reject_sixty_thousand BEFORE INSERT ON users
                     WHEN NEW.id = 60000
                     BEGIN SELECT RAISE(ABORT, 'rejected'); END;",
                )?;
                Ok(())
            })
            .unwrap();

        let result = add_large_number_of_users(&state, Some(25_000)).await;
        assert!(!result.success);
        assert!(result.error.unwrap().contains("rejected"));

        assert_eq!(count_users(&state).await.into_result().unwrap(), 50_000);
        for id in [50_001, 60_000, 75_000, 75_001] {
            assert_eq!(get_user(&state, id).await.into_result().unwrap(), None);
        }
        assert!(get_user(&state, 50_000).await.into_result().unwrap().is_some());
    }

    #[tokio::test]
    async fn test_seed_with_oversized_batch() {
        let dir = tempfile::tempdir().unwrap();
        let state = open_state(dir.path()).await;

        let report = add_large_number_of_users(&state, Some(usize::MAX))
            .await
            .into_result()
            .unwrap();
        assert_eq!(report.batches, 1);
        assert_eq!(report.inserted, LARGE_SEED_TOTAL);
    }

    #[tokio::test]
    async fn test_seed_rejects_zero_batch() {
        let dir = tempfile::tempdir().unwrap();
        let state = open_state(dir.path()).await;

        let result = add_large_number_of_users(&state, Some(0)).await;
        assert_eq!(
            result.error.as_deref(),
            Some("Batch size must be greater than zero")
        );
        assert_eq!(count_users(&state).await.into_result().unwrap(), 0);
    }
}
