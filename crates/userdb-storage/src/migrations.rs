//! Store creation
//!
//! The database holds a single keyed store, `users`.

use crate::Result;
use rusqlite::Connection;

const SCHEMA_VERSION: i32 = 1;

/// A keyed record collection and the columns a cursor reads from it.
#[derive(Debug, Clone, Copy)]
pub(crate) struct StoreDef {
    pub name: &'static str,
    pub key: &'static str,
    pub columns: &'static str,
}

pub(crate) const STORES: &[StoreDef] = &[StoreDef {
    name: "users",
    key: "id",
    columns: "id, name, age, email",
}];

pub(crate) fn store(name: &str) -> Option<&'static StoreDef> {
    STORES.iter().find(|s| s.name == name)
}

/// Ensure every store exists. Safe to run on an already initialised database.
pub fn run_migrations(conn: &Connection) -> Result<()> {
    let current_version = get_schema_version(conn)?;

    if current_version < 1 {
        migrate_v1(conn)?;
    }

    if current_version != SCHEMA_VERSION {
        set_schema_version(conn, SCHEMA_VERSION)?;
    }
    Ok(())
}

fn get_schema_version(conn: &Connection) -> Result<i32> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_version (version INTEGER NOT NULL)",
        [],
    )?;

    let result: std::result::Result<i32, _> =
        conn.query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
            row.get(0)
        });

    match result {
        Ok(v) => Ok(v),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(0),
        Err(e) => Err(e.into()),
    }
}

fn set_schema_version(conn: &Connection, version: i32) -> Result<()> {
    conn.execute("DELETE FROM schema_version", [])?;
    conn.execute(
        "INSERT INTO schema_version (version) VALUES (?1)",
        [version],
    )?;
    Ok(())
}

fn migrate_v1(conn: &Connection) -> Result<()> {
    tracing::info!("Running migration v1: creating users store");

    // id aliases the rowid
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            age INTEGER NOT NULL,
            email TEXT
        );
    "#,
    )?;

    Ok(())
}
