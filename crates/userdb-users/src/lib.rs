//! userdb User Store
//!
//! CRUD and cursor pagination over the `users` store:
//! - Writes are upserts keyed by id (insert-or-replace)
//! - Bulk writes commit or abort as one transaction
//! - Pages are read by walking a cursor, skipping then collecting
//! - Large synthetic data sets are inserted batch after batch

mod error;
mod order;
mod seed;
mod store;
mod user;

pub use error::UserError;
pub use order::SortOrder;
pub use seed::{batch_ranges, synthetic_user, synthetic_users, SeedReport, LARGE_SEED_TOTAL};
pub use store::UserStore;
pub use user::User;

pub type Result<T> = std::result::Result<T, UserError>;
