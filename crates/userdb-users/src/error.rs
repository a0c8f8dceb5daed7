//! User store error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum UserError {
    #[error("Storage error: {0}")]
    Storage(#[from] userdb_storage::StorageError),

    #[error("Invalid sort order: {0} (expected \"asc\" or \"desc\")")]
    InvalidOrder(String),

    #[error("Batch size must be greater than zero")]
    InvalidBatchSize,
}
