//! User Store
//!
//! Every operation takes the shared connection, runs one transaction or one
//! cursor, and returns. Nothing is cached between calls.

use rusqlite::{Connection, OptionalExtension};
use std::ops::ControlFlow;

use userdb_storage::{Database, Direction};

use crate::order::SortOrder;
use crate::user::User;
use crate::Result;

const STORE: &str = "users";

pub struct UserStore {
    db: Database,
}

impl UserStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Insert or replace a single user.
    pub fn add_user(&self, user: &User) -> Result<()> {
        self.db.transaction(|conn| {
            put(conn, user)?;
            Ok(())
        })?;

        tracing::debug!(user_id = user.id, "Stored user");

        Ok(())
    }

    /// Insert or replace many users in one transaction.
    ///
    /// If any write fails the whole batch is rolled back.
    pub fn add_users_bulk(&self, users: &[User]) -> Result<()> {
        if users.is_empty() {
            return Ok(());
        }

        self.db.transaction(|conn| {
            for user in users {
                put(conn, user)?;
            }
            Ok(())
        })?;

        tracing::debug!(count = users.len(), "Stored user batch");

        Ok(())
    }

    pub fn get_user(&self, id: i64) -> Result<Option<User>> {
        Ok(self.db.with_connection(|conn| {
            let user = conn
                .query_row(
                    "SELECT id, name, age, email FROM users WHERE id = ?1",
                    [id],
                    User::from_row,
                )
                .optional()?;
            Ok(user)
        })?)
    }

    /// Every user, walked in key order.
    pub fn get_all_users(&self) -> Result<Vec<User>> {
        let mut users = Vec::new();
        self.db.scan(STORE, Direction::Next, |row| {
            users.push(User::from_row(row)?);
            Ok(ControlFlow::Continue(()))
        })?;

        Ok(users)
    }

    /// A page of users in `order`: the cursor steps over `skip` records, then
    /// collects up to `count` and stops.
    pub fn get_users(&self, order: SortOrder, count: usize, skip: usize) -> Result<Vec<User>> {
        if count == 0 {
            return Ok(Vec::new());
        }

        let mut skipped = 0;
        let mut page = Vec::with_capacity(count.min(1024));
        self.db.scan(STORE, order.direction(), |row| {
            if skipped < skip {
                skipped += 1;
                return Ok(ControlFlow::Continue(()));
            }

            page.push(User::from_row(row)?);
            if page.len() >= count {
                Ok(ControlFlow::Break(()))
            } else {
                Ok(ControlFlow::Continue(()))
            }
        })?;

        tracing::debug!(
            order = order.as_str(),
            count,
            skip,
            returned = page.len(),
            "Read user page"
        );

        Ok(page)
    }

    /// Remove a user by id. Returns whether a record was removed.
    pub fn delete_user(&self, id: i64) -> Result<bool> {
        let removed = self.db.transaction(|conn| {
            Ok(conn.execute("DELETE FROM users WHERE id = ?1", [id])?)
        })?;

        tracing::debug!(user_id = id, removed, "Deleted user");

        Ok(removed > 0)
    }

    /// Remove every user. Returns how many were removed.
    pub fn clear_users(&self) -> Result<usize> {
        let removed = self
            .db
            .transaction(|conn| Ok(conn.execute("DELETE FROM users", [])?))?;

        tracing::info!(removed, "Cleared users store");

        Ok(removed)
    }

    pub fn count_users(&self) -> Result<u64> {
        Ok(self.db.with_connection(|conn| {
            let count: i64 = conn.query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))?;
            Ok(count as u64)
        })?)
    }
}

impl Clone for UserStore {
    fn clone(&self) -> Self {
        Self {
            db: self.db.clone(),
        }
    }
}

fn put(conn: &Connection, user: &User) -> rusqlite::Result<()> {
    let mut stmt = conn.prepare_cached(
        "INSERT OR REPLACE INTO users (id, name, age, email) VALUES (?1, ?2, ?3, ?4)",
    )?;
    stmt.execute(rusqlite::params![user.id, user.name, user.age, user.email])?;
    Ok(())
}
