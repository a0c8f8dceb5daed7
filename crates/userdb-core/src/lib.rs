//! userdb Core
//!
//! Central coordination layer: configuration, logging, and the
//! [`UserDb`] container that owns the database and the user store.

mod config;
mod error;
mod userdb;

pub use config::Config;
pub use error::CoreError;
pub use userdb::UserDb;

// Re-export core components
pub use userdb_storage::{Database, Direction, StorageError};
pub use userdb_users::{
    batch_ranges, synthetic_user, synthetic_users, SeedReport, SortOrder, User, UserError,
    UserStore, LARGE_SEED_TOTAL,
};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_target(true).init();
}
