//! userdb Storage Layer
//!
//! SQLite used as an embedded keyed record store.
//! Every write runs inside a transaction; reads walk the store in key order.

mod cursor;
mod database;
mod error;
mod migrations;

pub use cursor::Direction;
pub use database::Database;
pub use error::StorageError;

pub type Result<T> = std::result::Result<T, StorageError>;
