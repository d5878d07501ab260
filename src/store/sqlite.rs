//! SQLite-backed session store
//!
//! A single `timer_sessions` table, one row per session. Every operation is
//! a single-row statement; the connection is serialized through a mutex and
//! concurrent writers to the same row race last-write-wins.

use std::path::Path;
use std::sync::Mutex;

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Row};
use thiserror::Error;
use tracing::debug;

use super::session::{SessionPatch, TimerSession};

/// Errors surfaced by the session store
#[derive(Debug, Error)]
pub enum StoreError {
    /// SQLite engine or I/O error
    #[error("database error: {0}")]
    Db(String),
    /// The connection mutex was poisoned by a panicking holder
    #[error("store mutex poisoned")]
    Poisoned,
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        Self::Db(err.to_string())
    }
}

/// Persistence seam for timer sessions
///
/// The HTTP handlers only see this trait, so tests and alternative backends
/// can be swapped in at composition time.
pub trait SessionStore: Send + Sync {
    /// Create a row with `remaining = duration`, both flags false
    fn insert(&self, duration_seconds: i64) -> Result<TimerSession, StoreError>;

    /// Fetch a session by id, `None` when no row matches
    fn find_by_id(&self, id: i64) -> Result<Option<TimerSession>, StoreError>;

    /// Apply only the provided fields and refresh `updated_at`
    ///
    /// `duration_seconds` and `created_at` are never touched. Returns `None`
    /// when no row matches.
    fn update_fields(
        &self,
        id: i64,
        patch: &SessionPatch,
    ) -> Result<Option<TimerSession>, StoreError>;
}

/// SQLite implementation of [`SessionStore`]
pub struct SqliteSessionStore {
    connection: Mutex<Connection>,
}

impl SqliteSessionStore {
    /// Open (or create) a file-backed store
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let connection = Connection::open(path)?;
        Self::from_connection(connection)
    }

    /// Open an in-memory store, used by tests and the client-side fake
    pub fn in_memory() -> Result<Self, StoreError> {
        let connection = Connection::open_in_memory()?;
        Self::from_connection(connection)
    }

    fn from_connection(connection: Connection) -> Result<Self, StoreError> {
        connection.pragma_update(None, "busy_timeout", 5_000)?;
        connection.execute_batch(
            "CREATE TABLE IF NOT EXISTS timer_sessions (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                duration_seconds INTEGER NOT NULL,
                remaining_seconds INTEGER NOT NULL,
                is_running INTEGER NOT NULL DEFAULT 0,
                is_completed INTEGER NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )",
        )?;
        Ok(Self {
            connection: Mutex::new(connection),
        })
    }

    fn map_row(row: &Row<'_>) -> rusqlite::Result<TimerSession> {
        Ok(TimerSession {
            id: row.get(0)?,
            duration_seconds: row.get(1)?,
            remaining_seconds: row.get(2)?,
            is_running: row.get(3)?,
            is_completed: row.get(4)?,
            created_at: row.get(5)?,
            updated_at: row.get(6)?,
        })
    }
}

const SELECT_COLUMNS: &str = "id, duration_seconds, remaining_seconds, \
     is_running, is_completed, created_at, updated_at";

impl SessionStore for SqliteSessionStore {
    fn insert(&self, duration_seconds: i64) -> Result<TimerSession, StoreError> {
        let guard = self.connection.lock().map_err(|_| StoreError::Poisoned)?;
        let now = Utc::now();
        guard.execute(
            "INSERT INTO timer_sessions \
             (duration_seconds, remaining_seconds, is_running, is_completed, \
              created_at, updated_at) \
             VALUES (?1, ?1, 0, 0, ?2, ?2)",
            params![duration_seconds, now],
        )?;
        let id = guard.last_insert_rowid();
        debug!("Inserted timer session {} ({}s)", id, duration_seconds);
        Ok(TimerSession {
            id,
            duration_seconds,
            remaining_seconds: duration_seconds,
            is_running: false,
            is_completed: false,
            created_at: now,
            updated_at: now,
        })
    }

    fn find_by_id(&self, id: i64) -> Result<Option<TimerSession>, StoreError> {
        let guard = self.connection.lock().map_err(|_| StoreError::Poisoned)?;
        let session = guard
            .query_row(
                &format!("SELECT {SELECT_COLUMNS} FROM timer_sessions WHERE id = ?1"),
                params![id],
                Self::map_row,
            )
            .optional()?;
        Ok(session)
    }

    fn update_fields(
        &self,
        id: i64,
        patch: &SessionPatch,
    ) -> Result<Option<TimerSession>, StoreError> {
        let guard = self.connection.lock().map_err(|_| StoreError::Poisoned)?;
        let changed = guard.execute(
            "UPDATE timer_sessions SET \
             remaining_seconds = COALESCE(?2, remaining_seconds), \
             is_running = COALESCE(?3, is_running), \
             is_completed = COALESCE(?4, is_completed), \
             updated_at = ?5 \
             WHERE id = ?1",
            params![
                id,
                patch.remaining_seconds,
                patch.is_running,
                patch.is_completed,
                Utc::now(),
            ],
        )?;
        if changed == 0 {
            return Ok(None);
        }
        let session = guard
            .query_row(
                &format!("SELECT {SELECT_COLUMNS} FROM timer_sessions WHERE id = ?1"),
                params![id],
                Self::map_row,
            )
            .optional()?;
        Ok(session)
    }
}
