// SPDX-FileCopyrightText: 2026 Boxtrack Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Database connection management with PRAGMA setup, WAL mode, and lifecycle.
//!
//! All writes are serialized through tokio-rusqlite's single background
//! thread. Do NOT create additional Connection instances for writes.

use boxtrack_core::BoxtrackError;
use tracing::debug;

use crate::migrations;

/// Convert a tokio-rusqlite error into [`BoxtrackError::Storage`].
pub fn map_tr_err(e: tokio_rusqlite::Error<rusqlite::Error>) -> BoxtrackError {
    BoxtrackError::Storage {
        source: Box::new(e),
    }
}

/// A migrated SQLite database handle.
///
/// Wraps a single `tokio_rusqlite::Connection`; query modules accept
/// `&Database` and go through [`Database::connection`], so every write runs
/// on the one background thread and SQLITE_BUSY never surfaces.
pub struct Database {
    conn: tokio_rusqlite::Connection,
}

impl Database {
    /// Open (or create) the database at `path`, apply PRAGMAs, and run all
    /// pending migrations.
    pub async fn open(path: &str) -> Result<Self, BoxtrackError> {
        let conn = tokio_rusqlite::Connection::open(path)
            .await
            .map_err(|e| BoxtrackError::Storage {
                source: Box::new(e),
            })?;
        Self::setup(conn, true).await
    }

    /// Open an in-memory database. WAL does not apply; migrations still run.
    pub async fn open_in_memory() -> Result<Self, BoxtrackError> {
        let conn = tokio_rusqlite::Connection::open_in_memory()
            .await
            .map_err(|e| BoxtrackError::Storage {
                source: Box::new(e),
            })?;
        Self::setup(conn, false).await
    }

    async fn setup(conn: tokio_rusqlite::Connection, wal: bool) -> Result<Self, BoxtrackError> {
        conn.call(move |conn| -> Result<(), rusqlite::Error> {
            if wal {
                conn.pragma_update(None, "journal_mode", "WAL")?;
                conn.pragma_update(None, "synchronous", "NORMAL")?;
            }
            conn.pragma_update(None, "foreign_keys", "ON")?;
            conn.busy_timeout(std::time::Duration::from_secs(5))?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)?;

        conn.call(|conn| migrations::run_migrations(conn))
            .await
            .map_err(|e| BoxtrackError::Storage {
                source: Box::new(e),
            })?;

        debug!("database opened and migrated");
        Ok(Self { conn })
    }

    /// The underlying tokio-rusqlite connection.
    pub fn connection(&self) -> &tokio_rusqlite::Connection {
        &self.conn
    }

    /// Checkpoint the WAL and flush pending writes.
    pub async fn close(&self) -> Result<(), BoxtrackError> {
        self.conn
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)?;
        debug!("WAL checkpoint complete");
        Ok(())
    }
}
