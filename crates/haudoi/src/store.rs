//! SQLite link store.
//!
//! Executes compiled search predicates against a `link` table aliased `l`, so
//! configured columns may be written either bare (`title`) or qualified
//! (`l.title`).

use std::path::{Path, PathBuf};

use haudoi_dsl::{Fragment, SqlValue};
use rusqlite::{Connection, OpenFlags, Row, params_from_iter, types::Value};
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

/// Errors raised by the link store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The database could not be opened.
    #[error("failed to open link store {path}: {source}")]
    Open {
        /// Database path.
        path: PathBuf,
        /// Underlying SQLite error.
        source: rusqlite::Error,
    },

    /// A query failed.
    #[error("link query failed: {0}")]
    Query(#[from] rusqlite::Error),
}

/// A stored link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    /// Row id.
    pub id: i64,
    /// Page title.
    pub title: String,
    /// Target URL.
    pub url: String,
    /// Free-form note.
    pub note: String,
    /// Archived flag.
    pub archive: bool,
    /// Favorite flag.
    pub favorite: bool,
}

impl Link {
    /// Reads a link from a row selected in `search` column order.
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            title: row.get(1)?,
            url: row.get(2)?,
            note: row.get(3)?,
            archive: row.get(4)?,
            favorite: row.get(5)?,
        })
    }
}

/// A read-only connection to a link database.
pub struct LinkStore {
    /// Open connection.
    conn: Connection,
}

impl LinkStore {
    /// Opens an existing database read-only.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)
            .map_err(|source| StoreError::Open {
                path: path.to_path_buf(),
                source,
            })?;
        debug!(path = %path.display(), "opened link store");
        Ok(Self { conn })
    }

    /// Wraps an existing connection.
    pub fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }

    /// Returns links matching `predicate`, newest first, at most `limit`.
    pub fn search(&self, predicate: &Fragment, limit: usize) -> Result<Vec<Link>, StoreError> {
        let statement = select_statement(predicate, limit);
        debug!(
            sql = statement.sql(),
            params = statement.params().len(),
            "executing search"
        );

        let mut stmt = self.conn.prepare(statement.sql())?;
        let links = stmt
            .query_map(params_from_iter(bind(statement.params())), Link::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        debug!(rows = links.len(), "search complete");
        Ok(links)
    }
}

/// Builds the full `SELECT` around a predicate.
fn select_statement(predicate: &Fragment, limit: usize) -> Fragment {
    let mut statement =
        Fragment::raw("SELECT id, title, url, note, archive, favorite FROM link AS l WHERE ");
    statement
        .push_fragment(predicate.clone())
        .push_raw(" ORDER BY l.id DESC LIMIT ")
        .push_param(i64::try_from(limit).unwrap_or(i64::MAX));
    statement
}

/// Converts bound values for rusqlite.
fn bind(params: &[SqlValue]) -> Vec<Value> {
    params
        .iter()
        .map(|param| match param {
            SqlValue::Integer(value) => Value::Integer(*value),
            SqlValue::Text(value) => Value::Text(value.clone()),
        })
        .collect()
}

/// Creates the `link` table.
pub fn create_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS link (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            url TEXT NOT NULL,
            note TEXT NOT NULL DEFAULT '',
            archive INTEGER NOT NULL DEFAULT 0,
            favorite INTEGER NOT NULL DEFAULT 0
        );",
    )
}
