//! Database connection management
//!
//! `Storage` is the explicit handle created once at startup. Every task asks
//! it for a `Session` (one connection each) and groups writes in a
//! `UnitOfWork`, which rolls back unless committed.

use crate::errors::{from_rusqlite, storage_unavailable, Result};
use crate::migrations::apply_migrations;
use rusqlite::{Connection, Transaction, TransactionBehavior};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Database file used when nothing else is configured
pub const DEFAULT_DB_PATH: &str = "telegram.db";

/// How long a writer waits for another writer's lock before giving up
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Handle to an initialized database file
#[derive(Debug, Clone)]
pub struct Storage {
    path: PathBuf,
}

impl Storage {
    /// Open (creating if absent) the database at `path` and apply migrations
    ///
    /// # Errors
    ///
    /// `StorageUnavailable` when the file cannot be opened or written,
    /// `ConstraintViolation` when an applied migration was edited.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let mut conn = open_connection(&path)?;
        apply_migrations(&mut conn)?;

        tracing::debug!(path = %path.display(), "storage opened");
        Ok(Self { path })
    }

    /// Path of the underlying database file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open a new session with its own configured connection
    ///
    /// # Errors
    ///
    /// `StorageUnavailable` if the file disappeared or became unreadable.
    pub fn new_session(&self) -> Result<Session> {
        Ok(Session {
            conn: open_connection(&self.path)?,
        })
    }

    /// Shutdown hook: fold the write-ahead log back into the main file
    ///
    /// # Errors
    ///
    /// Propagates checkpoint failures.
    pub fn close(self) -> Result<()> {
        let conn = open_connection(&self.path)?;
        conn.query_row("PRAGMA wal_checkpoint(TRUNCATE)", [], |_| Ok(()))
            .map_err(from_rusqlite)?;
        conn.close().map_err(|(_, e)| from_rusqlite(e))?;

        tracing::debug!(path = %self.path.display(), "storage closed");
        Ok(())
    }
}

/// A scoped connection; dropping it releases the connection
pub struct Session {
    conn: Connection,
}

impl Session {
    /// Connection for reads outside a unit of work
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Begin an IMMEDIATE transaction
    ///
    /// # Errors
    ///
    /// Fails if the write lock cannot be taken within the busy timeout.
    pub fn unit_of_work(&mut self) -> Result<UnitOfWork<'_>> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(from_rusqlite)?;
        Ok(UnitOfWork { tx })
    }

    /// Close the session explicitly, surfacing any close error
    ///
    /// # Errors
    ///
    /// Propagates the error reported by SQLite while closing.
    pub fn close(self) -> Result<()> {
        self.conn.close().map_err(|(_, e)| from_rusqlite(e))
    }
}

/// A transaction guard; rolls back on drop unless `commit` was called
pub struct UnitOfWork<'s> {
    tx: Transaction<'s>,
}

impl<'s> UnitOfWork<'s> {
    pub fn conn(&self) -> &Connection {
        &self.tx
    }

    /// # Errors
    ///
    /// Propagates commit failures; the transaction is rolled back.
    pub fn commit(self) -> Result<()> {
        self.tx.commit().map_err(from_rusqlite)
    }
}

/// Open a connection and apply per-connection settings
fn open_connection(path: &Path) -> Result<Connection> {
    let conn = Connection::open(path).map_err(|e| storage_unavailable(path, e))?;
    configure(&conn)?;
    Ok(conn)
}

/// Configure a connection: foreign keys, WAL, busy timeout
pub fn configure(conn: &Connection) -> Result<()> {
    // Off by default in SQLite; cascade delete depends on it
    conn.pragma_update(None, "foreign_keys", "ON")
        .map_err(from_rusqlite)?;

    conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| {
        row.get::<_, String>(0)
    })
    .map_err(from_rusqlite)?;

    conn.busy_timeout(BUSY_TIMEOUT).map_err(from_rusqlite)?;

    Ok(())
}
