//! Key-value state store contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide string-keyed get/put/remove over the `local_store` table.
//! - Enforce rolling expiry: writes re-stamp, expired reads come back empty.
//!
//! # Invariants
//! - `put` with a retention sets `expires_at = now + retention`.
//! - `get` of an expired entry deletes the row and returns `None`.
//! - Entries written without retention never expire.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::lead::now_epoch_ms;
use log::debug;
use rusqlite::{params, Connection, OptionalExtension};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Default retention window for rolling-expiry entries: 30 days.
pub const DEFAULT_RETENTION_MS: i64 = 30 * 24 * 60 * 60 * 1000;

pub type StoreResult<T> = Result<T, StoreError>;

/// Store-layer error for persistence and payload decoding.
#[derive(Debug)]
pub enum StoreError {
    Db(DbError),
    /// The connection was opened without running migrations.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// A stored payload failed to decode or violated a model invariant.
    InvalidPayload { key: String, message: String },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}; open connections through db::open_db"
            ),
            Self::InvalidPayload { key, message } => {
                write!(f, "invalid stored payload under `{key}`: {message}")
            }
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::UninitializedConnection { .. } | Self::InvalidPayload { .. } => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Local storage interface shared by session and board persistence.
pub trait StateStore {
    /// Writes `value` under `key`, re-stamping expiry when a retention is set.
    fn put(&self, key: &str, value: &str, retention_ms: Option<i64>) -> StoreResult<()>;
    /// Reads the live value under `key`; expired entries read as `None`.
    fn get(&self, key: &str) -> StoreResult<Option<String>>;
    /// Removes the entry under `key`. Removing a missing key is a no-op.
    fn remove(&self, key: &str) -> StoreResult<()>;
}

/// SQLite-backed state store over the `local_store` table.
pub struct SqliteStateStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteStateStore<'conn> {
    /// Wraps a migrated connection.
    ///
    /// # Errors
    /// - `UninitializedConnection` when the schema version does not match the
    ///   migrations compiled into this binary.
    pub fn try_new(conn: &'conn Connection) -> StoreResult<Self> {
        let actual_version =
            conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
        let expected_version = latest_version();
        if actual_version != expected_version {
            return Err(StoreError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }
        Ok(Self { conn })
    }
}

impl StateStore for SqliteStateStore<'_> {
    fn put(&self, key: &str, value: &str, retention_ms: Option<i64>) -> StoreResult<()> {
        let now = now_epoch_ms();
        let expires_at = retention_ms.map(|retention| now + retention);
        self.conn.execute(
            "INSERT INTO local_store (key, value, expires_at, updated_at)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT (key) DO UPDATE SET
                value = excluded.value,
                expires_at = excluded.expires_at,
                updated_at = excluded.updated_at;",
            params![key, value, expires_at, now],
        )?;
        Ok(())
    }

    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let row = self
            .conn
            .query_row(
                "SELECT value, expires_at FROM local_store WHERE key = ?1;",
                [key],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, Option<i64>>(1)?,
                    ))
                },
            )
            .optional()?;

        let (value, expires_at) = match row {
            Some(found) => found,
            None => return Ok(None),
        };

        if let Some(expires_at) = expires_at {
            if expires_at <= now_epoch_ms() {
                self.conn
                    .execute("DELETE FROM local_store WHERE key = ?1;", [key])?;
                debug!("event=store_expired module=store key={key}");
                return Ok(None);
            }
        }

        Ok(Some(value))
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        self.conn
            .execute("DELETE FROM local_store WHERE key = ?1;", [key])?;
        Ok(())
    }
}
