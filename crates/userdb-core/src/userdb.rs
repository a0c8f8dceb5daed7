//! Top-level database container
//!
//! Owns the configuration, the database handle and the user store. Cloning
//! is cheap; clones share one connection.

use userdb_storage::Database;
use userdb_users::{SeedReport, SortOrder, User, UserStore};

use crate::config::Config;
use crate::Result;

pub struct UserDb {
    /// Configuration
    config: Config,
    /// User store over the shared database
    users: UserStore,
}

impl UserDb {
    /// Open the configured database, creating the file and the users store if needed.
    pub fn new(config: Config) -> Result<Self> {
        let db = Database::open(&config.database_path)?;
        Ok(Self::with_database(config, db))
    }

    /// An instance backed by a throwaway in-memory database.
    pub fn in_memory(config: Config) -> Result<Self> {
        let db = Database::open_in_memory()?;
        Ok(Self::with_database(config, db))
    }

    fn with_database(config: Config, db: Database) -> Self {
        tracing::info!(batch_size = config.batch_size, "User database ready");

        Self {
            config,
            users: UserStore::new(db),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn users(&self) -> &UserStore {
        &self.users
    }

    // === User operations ===

    pub fn add_user(&self, user: &User) -> Result<()> {
        Ok(self.users.add_user(user)?)
    }

    pub fn add_users_bulk(&self, users: &[User]) -> Result<()> {
        Ok(self.users.add_users_bulk(users)?)
    }

    pub fn get_user(&self, id: i64) -> Result<Option<User>> {
        Ok(self.users.get_user(id)?)
    }

    pub fn get_all_users(&self) -> Result<Vec<User>> {
        Ok(self.users.get_all_users()?)
    }

    pub fn get_users(&self, order: SortOrder, count: usize, skip: usize) -> Result<Vec<User>> {
        Ok(self.users.get_users(order, count, skip)?)
    }

    pub fn delete_user(&self, id: i64) -> Result<bool> {
        Ok(self.users.delete_user(id)?)
    }

    pub fn clear_users(&self) -> Result<usize> {
        Ok(self.users.clear_users()?)
    }

    pub fn count_users(&self) -> Result<u64> {
        Ok(self.users.count_users()?)
    }

    /// Seed 100,000 synthetic users, using the configured batch size when none is given.
    pub fn add_large_number_of_users(&self, batch_size: Option<usize>) -> Result<SeedReport> {
        let batch_size = batch_size.unwrap_or(self.config.batch_size);
        Ok(self.users.add_large_number_of_users(batch_size)?)
    }
}

impl Clone for UserDb {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            users: self.users.clone(),
        }
    }
}
