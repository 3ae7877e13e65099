//! Durable key-value backing for oxifleet stores.
//!
//! The backing is a scoped string-keyed medium holding one serialized value
//! per key. Fallibility is explicit at this layer: operations return a
//! [`StorageError`] so the store layer can *visibly* discard failures
//! rather than the medium swallowing them. No backing fault ever reaches a
//! store's callers.

pub mod schema;

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use rusqlite::{params, Connection, OptionalExtension};
use thiserror::Error;
use tracing::{debug, info};

use crate::error::{Error, Result};

/// Faults the backing medium can report.
///
/// The store layer logs and drops these; callers of stores never see them.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The medium itself is absent (no database, privacy mode, etc.).
    #[error("storage medium unavailable")]
    Unavailable,
    /// A read against the medium failed.
    #[error("storage read failed: {0}")]
    ReadFailed(String),
    /// A write or delete against the medium failed.
    #[error("storage write failed: {0}")]
    WriteFailed(String),
}

/// A durable string-keyed medium holding one serialized value per key.
///
/// Keys are namespaced per store; exactly one store writes each key.
pub trait Backing: Send + Sync {
    /// Read the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the medium cannot be read.
    fn read(&self, key: &str) -> std::result::Result<Option<String>, StorageError>;

    /// Write `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the medium cannot be written.
    fn write(&self, key: &str, value: &str) -> std::result::Result<(), StorageError>;

    /// Remove the value stored under `key`. Removing an absent key succeeds.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the medium cannot be written.
    fn delete(&self, key: &str) -> std::result::Result<(), StorageError>;
}

impl fmt::Debug for dyn Backing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Backing")
    }
}

/// Recover a mutex guard even if a previous holder panicked.
///
/// The backing keeps serving after a poisoned lock; availability over
/// strictness.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// `SQLite`-backed key-value medium.
///
/// One `kv` table, one row per store key. Survives process restarts.
pub struct SqliteBacking {
    /// Path to the database file.
    path: PathBuf,
    /// Database connection.
    conn: Mutex<Connection>,
}

impl fmt::Debug for SqliteBacking {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqliteBacking")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl SqliteBacking {
    /// Open or create a backing database at the given path.
    ///
    /// Creates the parent directories and database file if they don't exist.
    /// Initializes the schema if this is a new database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or schema
    /// initialization fails.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        // Create parent directories if needed
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        debug!("Opening database at {}", path.display());
        let conn = Connection::open(&path).map_err(|source| Error::DatabaseOpen {
            path: path.clone(),
            source,
        })?;

        // Enable WAL mode for better concurrent read performance
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")?;

        Self::initialize_schema(&conn)?;

        info!("Database opened successfully at {}", path.display());
        Ok(Self {
            path,
            conn: Mutex::new(conn),
        })
    }

    /// Create an in-memory backing instance for testing.
    ///
    /// # Errors
    ///
    /// Returns an error if the in-memory database cannot be created.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|source| Error::DatabaseOpen {
            path: PathBuf::from(":memory:"),
            source,
        })?;

        Self::initialize_schema(&conn)?;

        Ok(Self {
            path: PathBuf::from(":memory:"),
            conn: Mutex::new(conn),
        })
    }

    /// Get the path to the database file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn initialize_schema(conn: &Connection) -> Result<()> {
        for statement in schema::SCHEMA_STATEMENTS {
            conn.execute(statement, [])?;
        }
        Ok(())
    }
}

impl Backing for SqliteBacking {
    fn read(&self, key: &str) -> std::result::Result<Option<String>, StorageError> {
        let conn = lock(&self.conn);
        conn.query_row("SELECT value FROM kv WHERE key = ?1", [key], |row| {
            row.get(0)
        })
        .optional()
        .map_err(|err| StorageError::ReadFailed(err.to_string()))
    }

    fn write(&self, key: &str, value: &str) -> std::result::Result<(), StorageError> {
        let conn = lock(&self.conn);
        conn.execute(
            r"
            INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, datetime('now'))
            ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at
            ",
            params![key, value],
        )
        .map(|_| ())
        .map_err(|err| StorageError::WriteFailed(err.to_string()))
    }

    fn delete(&self, key: &str) -> std::result::Result<(), StorageError> {
        let conn = lock(&self.conn);
        conn.execute("DELETE FROM kv WHERE key = ?1", [key])
            .map(|_| ())
            .map_err(|err| StorageError::WriteFailed(err.to_string()))
    }
}

/// In-memory key-value medium for tests and ephemeral runs.
#[derive(Debug, Default)]
pub struct MemoryBacking {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryBacking {
    /// Create an empty in-memory backing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Backing for MemoryBacking {
    fn read(&self, key: &str) -> std::result::Result<Option<String>, StorageError> {
        Ok(lock(&self.entries).get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> std::result::Result<(), StorageError> {
        lock(&self.entries).insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) -> std::result::Result<(), StorageError> {
        lock(&self.entries).remove(key);
        Ok(())
    }
}

/// Backing for environments without a usable medium.
///
/// Reads report absence; writes and deletes fail with
/// [`StorageError::Unavailable`]. Stores built on this backing keep
/// functioning with in-memory state only.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullBacking;

impl Backing for NullBacking {
    fn read(&self, _key: &str) -> std::result::Result<Option<String>, StorageError> {
        Ok(None)
    }

    fn write(&self, _key: &str, _value: &str) -> std::result::Result<(), StorageError> {
        Err(StorageError::Unavailable)
    }

    fn delete(&self, _key: &str) -> std::result::Result<(), StorageError> {
        Err(StorageError::Unavailable)
    }
}
