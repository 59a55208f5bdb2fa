//! Local slot database: one SQLite file standing in for the page's
//! key-value storage.
//!
//! The schema is a single `kv_slots` table. Each slot name maps to one text
//! value that is overwritten whole on every write.
//!
//! # Invariants
//! - `PRAGMA user_version` records the applied schema version.
//! - A connection is handed out only after every migration is applied, so
//!   slot repositories never see a partial schema.

use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

/// Table holding every named slot.
pub const SLOT_TABLE: &str = "kv_slots";

pub type DbResult<T> = Result<T, DbError>;

/// Failure opening or migrating the slot database.
#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    /// File was written by a newer build; slots are left untouched.
    SchemaTooNew { found: u32, supported: u32 },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "slot database error: {err}"),
            Self::SchemaTooNew { found, supported } => write!(
                f,
                "slot database uses schema {found}, this build reads up to {supported}"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::SchemaTooNew { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

/// Whether `conn` already carries the slot table.
pub fn slot_table_exists(conn: &Connection) -> DbResult<bool> {
    let exists = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1);",
        [SLOT_TABLE],
        |row| row.get::<_, bool>(0),
    )?;
    Ok(exists)
}
