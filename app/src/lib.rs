//! userdb - Async command surface
//!
//! Opens the configured database, seeds it when empty and prints a page
//! from each end of the users store.

pub mod commands;
pub mod state;

use commands::users;
use state::AppState;
use userdb_core::Config;

const PAGE_SIZE: usize = 10;

pub async fn run() -> anyhow::Result<()> {
    // Initialize logging
    userdb_core::init_logging();

    let config = Config::from_env()?;
    tracing::info!(path = %config.database_path.display(), "Starting userdb");

    let state = AppState::new();
    users::open_database(&state, config)
        .await
        .into_result()
        .map_err(anyhow::Error::msg)?;

    let count = users::count_users(&state)
        .await
        .into_result()
        .map_err(anyhow::Error::msg)?;

    if count == 0 {
        let report = users::add_large_number_of_users(&state, None)
            .await
            .into_result()
            .map_err(anyhow::Error::msg)?;
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    for order in ["asc", "desc"] {
        let page = users::get_users(&state, order.to_string(), PAGE_SIZE, 0)
            .await
            .into_result()
            .map_err(anyhow::Error::msg)?;
        println!("{}", serde_json::to_string_pretty(&page)?);
    }

    Ok(())
}
