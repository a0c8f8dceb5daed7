//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Storage error: {0}")]
    Storage(#[from] userdb_storage::StorageError),

    #[error("User store error: {0}")]
    User(#[from] userdb_users::UserError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Database not opened")]
    NotInitialized,
}
