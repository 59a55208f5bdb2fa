//! Named key-value slot contracts and implementations.
//!
//! # Responsibility
//! - Read and overwrite one text value per slot name.
//! - Provide SQLite-backed and in-memory implementations.
//!
//! # Invariants
//! - `write_slot` is a single synchronous whole-value overwrite.
//! - Reading a never-written slot returns `None`, not an error.

use crate::db::{slot_table_exists, DbError, SLOT_TABLE};
use log::{debug, error};
use rusqlite::{params, Connection, OptionalExtension};
use std::cell::RefCell;
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Persistence error for slot storage.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    /// Payload could not be encoded before writing.
    Serialization(serde_json::Error),
    InvalidData(String),
    /// Backend refused the operation (e.g. quota exceeded, read-only store).
    Unavailable(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Serialization(err) => write!(f, "failed to encode slot payload: {err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted slot data: {message}"),
            Self::Unavailable(message) => write!(f, "slot storage unavailable: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Serialization(err) => Some(err),
            Self::InvalidData(_) | Self::Unavailable(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<serde_json::Error> for RepoError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialization(value)
    }
}

/// Repository interface for named text slots.
pub trait SlotRepository {
    /// Returns the stored value, or `None` when the slot was never written.
    fn read_slot(&self, key: &str) -> RepoResult<Option<String>>;
    /// Overwrites the slot with `value`.
    fn write_slot(&mut self, key: &str, value: &str) -> RepoResult<()>;
}

/// SQLite-backed slot repository over the `kv_slots` table.
pub struct SqliteSlotRepository {
    conn: Connection,
}

impl SqliteSlotRepository {
    /// Wraps a migrated connection.
    ///
    /// # Errors
    /// - `InvalidData` when the `kv_slots` table is missing, i.e. the
    ///   connection did not come from [`crate::db::open_db`].
    pub fn try_new(conn: Connection) -> RepoResult<Self> {
        if !slot_table_exists(&conn)? {
            return Err(RepoError::InvalidData(format!(
                "required table `{SLOT_TABLE}` is missing"
            )));
        }
        Ok(Self { conn })
    }

    /// Borrows the underlying connection.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl SlotRepository for SqliteSlotRepository {
    fn read_slot(&self, key: &str) -> RepoResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_slots WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        debug!(
            "event=slot_read module=repo status=ok key={key} found={}",
            value.is_some()
        );
        Ok(value)
    }

    fn write_slot(&mut self, key: &str, value: &str) -> RepoResult<()> {
        let result = self.conn.execute(
            "INSERT INTO kv_slots (key, value, updated_at)
             VALUES (?1, ?2, strftime('%s', 'now') * 1000)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        );
        match result {
            Ok(_) => {
                debug!(
                    "event=slot_write module=repo status=ok key={key} bytes={}",
                    value.len()
                );
                Ok(())
            }
            Err(err) => {
                error!("event=slot_write module=repo status=error key={key} error={err}");
                Err(err.into())
            }
        }
    }
}

/// In-memory slot repository.
///
/// Supports failure injection so callers can exercise non-fatal
/// persistence error paths.
#[derive(Debug, Default)]
pub struct MemorySlotRepository {
    slots: HashMap<String, String>,
    fail_writes: bool,
    reads: RefCell<usize>,
}

impl MemorySlotRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository with one pre-populated slot.
    pub fn with_slot(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut repo = Self::new();
        repo.slots.insert(key.into(), value.into());
        repo
    }

    /// Makes every following write fail with `RepoError::Unavailable`.
    pub fn set_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    /// Returns the raw stored value, bypassing the trait.
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.slots.get(key).map(String::as_str)
    }

    /// Number of `read_slot` calls served so far.
    pub fn read_count(&self) -> usize {
        *self.reads.borrow()
    }
}

impl SlotRepository for MemorySlotRepository {
    fn read_slot(&self, key: &str) -> RepoResult<Option<String>> {
        *self.reads.borrow_mut() += 1;
        Ok(self.slots.get(key).cloned())
    }

    fn write_slot(&mut self, key: &str, value: &str) -> RepoResult<()> {
        if self.fail_writes {
            return Err(RepoError::Unavailable(format!(
                "write to `{key}` rejected: quota exceeded"
            )));
        }
        self.slots.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

impl<R: SlotRepository + ?Sized> SlotRepository for &mut R {
    fn read_slot(&self, key: &str) -> RepoResult<Option<String>> {
        (**self).read_slot(key)
    }

    fn write_slot(&mut self, key: &str, value: &str) -> RepoResult<()> {
        (**self).write_slot(key, value)
    }
}

#[cfg(test)]
mod tests {
    use super::{MemorySlotRepository, RepoError, SlotRepository};

    #[test]
    fn memory_slot_overwrites_whole_value() {
        let mut repo = MemorySlotRepository::new();
        assert_eq!(repo.read_slot("k").unwrap(), None);
        repo.write_slot("k", "first").unwrap();
        repo.write_slot("k", "second").unwrap();
        assert_eq!(repo.read_slot("k").unwrap().as_deref(), Some("second"));
        assert_eq!(repo.read_count(), 2);
    }

    #[test]
    fn memory_slot_failure_injection_keeps_previous_value() {
        let mut repo = MemorySlotRepository::with_slot("k", "kept");
        repo.set_fail_writes(true);
        let err = repo.write_slot("k", "lost").unwrap_err();
        assert!(matches!(err, RepoError::Unavailable(_)));
        assert_eq!(repo.raw("k"), Some("kept"));
    }
}
