//! Key-ordered cursor traversal over a store

use std::ops::ControlFlow;

use rusqlite::{Connection, Row};

use crate::error::StorageError;
use crate::migrations;
use crate::Result;

/// Direction a cursor walks the primary key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Ascending key order
    #[default]
    Next,
    /// Descending key order
    Prev,
}

impl Direction {
    fn sql(self) -> &'static str {
        match self {
            Direction::Next => "ASC",
            Direction::Prev => "DESC",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Next => "next",
            Direction::Prev => "prev",
        }
    }
}

/// Walk `store` in key order, handing each record to `visit` until it breaks
/// or the store is exhausted. Returns the number of records visited.
pub(crate) fn walk<F>(
    conn: &Connection,
    store: &str,
    direction: Direction,
    mut visit: F,
) -> Result<usize>
where
    F: FnMut(&Row<'_>) -> Result<ControlFlow<()>>,
{
    let def = migrations::store(store)
        .ok_or_else(|| StorageError::UnknownStore(store.to_string()))?;

    let sql = format!(
        "SELECT {} FROM {} ORDER BY {} {}",
        def.columns,
        def.name,
        def.key,
        direction.sql()
    );
    let mut stmt = conn.prepare_cached(&sql)?;
    let mut rows = stmt.query([])?;

    let mut visited = 0;
    while let Some(row) = rows.next()? {
        visited += 1;
        if visit(row)?.is_break() {
            break;
        }
    }

    tracing::debug!(store, direction = direction.as_str(), visited, "Cursor finished");

    Ok(visited)
}
