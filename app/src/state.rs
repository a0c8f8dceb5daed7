//! Application state management
use parking_lot::RwLock;
use std::sync::Arc;
use userdb_core::{Config, CoreError, Result, UserDb};

/// Thread-safe application state wrapper
#[derive(Clone, Default)]
pub struct AppState {
    db: Arc<RwLock<Option<UserDb>>>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.db.read().is_some()
    }

    /// Install `db` unless a database is already open.
    pub fn install(&self, db: UserDb) {
        self.db.write().get_or_insert(db);
    }

    /// A handle to the open database, cheap to move onto a blocking task.
    pub fn db(&self) -> Result<UserDb> {
        self.db.read().clone().ok_or(CoreError::NotInitialized)
    }

    pub fn config(&self) -> Option<Config> {
        self.db.read().as_ref().map(|db| db.config().clone())
    }
}
