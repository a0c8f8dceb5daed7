//! Async commands
//!
//! Each command runs one store operation on the blocking pool and resolves
//! to a [`CommandResult`]. Failures reach the caller as plain strings.

pub mod users;

use serde::{Deserialize, Serialize};
use userdb_core::UserDb;

use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct CommandResult<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> CommandResult<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(error: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
        }
    }

    pub fn into_result(self) -> Result<T, String> {
        match (self.success, self.data) {
            (true, Some(data)) => Ok(data),
            _ => Err(self.error.unwrap_or_else(|| "Unknown error".to_string())),
        }
    }
}

/// Run `f` against the open database on the blocking pool.
async fn run_blocking<F, T>(state: &AppState, command: &'static str, f: F) -> CommandResult<T>
where
    F: FnOnce(&UserDb) -> userdb_core::Result<T> + Send + 'static,
    T: Send + 'static,
{
    let db = match state.db() {
        Ok(db) => db,
        Err(e) => return CommandResult::err(e.to_string()),
    };

    match tokio::task::spawn_blocking(move || f(&db)).await {
        Ok(Ok(data)) => CommandResult::ok(data),
        Ok(Err(e)) => {
            tracing::warn!(command, error = %e, "Command failed");
            CommandResult::err(e.to_string())
        }
        Err(e) => {
            tracing::error!(command, error = %e, "Command task panicked");
            CommandResult::err(format!("Task failed: {}", e))
        }
    }
}
