//! # pulse-db
//!
//! libSQL record store for Pulse.
//!
//! Holds all relational state: projects, pulses, weekly updates, artifacts, and
//! per-team time tracking. [`PulseDb`] owns the database; every caller (an HTTP
//! request, a report run) opens its own short-lived [`Session`] and drops it
//! when done. Multi-statement operations run inside one transaction on that
//! session and either commit or roll back as a unit.

pub mod error;
pub mod flows;
pub mod helpers;
mod migrations;
pub mod records;
pub mod repos;

#[cfg(test)]
mod test_support;

use std::time::Duration;

use error::DatabaseError;
use libsql::Builder;

/// How long a session waits on a locked database before failing.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Central database handle for all Pulse state.
///
/// Opening runs migrations once; [`PulseDb::session`] hands out connections.
/// The database must be file-backed: every session is a separate connection,
/// and `:memory:` connections do not share state.
pub struct PulseDb {
    db: libsql::Database,
}

impl PulseDb {
    /// Open a local database at the given path.
    ///
    /// Runs migrations automatically on open.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        let pulse_db = Self { db };

        let session = pulse_db.session().await?;
        let mut rows = session.conn().query("PRAGMA journal_mode = WAL", ()).await?;
        while rows.next().await?.is_some() {}
        Self::run_migrations(session.conn()).await?;

        tracing::debug!(path, "database opened");
        Ok(pulse_db)
    }

    /// Open a new session (connection) on the database.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the connection cannot be created or configured.
    pub async fn session(&self) -> Result<Session, DatabaseError> {
        let conn = self.db.connect()?;

        // Enable foreign keys (must be per-connection in SQLite)
        conn.execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(|e| DatabaseError::Migration(format!("PRAGMA foreign_keys: {e}")))?;
        let mut rows = conn
            .query(
                &format!("PRAGMA busy_timeout = {}", BUSY_TIMEOUT.as_millis()),
                (),
            )
            .await?;
        while rows.next().await?.is_some() {}

        Ok(Session { conn })
    }
}

/// One caller's connection to the record store.
///
/// Repository methods are implemented as `impl Session` blocks in [`repos`].
pub struct Session {
    conn: libsql::Connection,
}

impl Session {
    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }

    /// Generate a prefixed ID via libSQL. Returns e.g., `"upd-a3f8b2c1"`.
    ///
    /// Uses `randomblob(4)` in SQL to produce 8-char hex, then prepends the prefix.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or returns no rows.
    pub async fn generate_id(&self, prefix: &str) -> Result<String, DatabaseError> {
        let mut rows = self
            .conn
            .query(
                &format!("SELECT '{prefix}-' || lower(hex(randomblob(4)))"),
                (),
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        Ok(row.get::<String>(0)?)
    }

    /// Start a write transaction. Pair with [`Session::finish`].
    pub(crate) async fn begin(&self) -> Result<(), DatabaseError> {
        self.conn.execute("BEGIN IMMEDIATE", ()).await?;
        Ok(())
    }

    /// Start a read transaction so several SELECTs see one snapshot.
    /// Pair with [`Session::finish`].
    pub(crate) async fn begin_read(&self) -> Result<(), DatabaseError> {
        self.conn.execute("BEGIN DEFERRED", ()).await?;
        Ok(())
    }

    /// Commit if `result` is `Ok`, roll back otherwise, and pass `result` through.
    pub(crate) async fn finish<T>(
        &self,
        result: Result<T, DatabaseError>,
    ) -> Result<T, DatabaseError> {
        match result {
            Ok(value) => {
                self.conn.execute("COMMIT", ()).await?;
                Ok(value)
            }
            Err(error) => {
                if let Err(rollback) = self.conn.execute("ROLLBACK", ()).await {
                    tracing::warn!(%rollback, "rollback failed");
                }
                Err(error)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::{is_generated_id, test_db};

    #[tokio::test]
    async fn open_local_creates_schema() {
        let (db, _dir) = test_db().await;
        let session = db.session().await.unwrap();

        let tables = [
            "projects",
            "pulses",
            "weekly_updates",
            "artifacts",
            "time_tracking",
        ];
        for table in &tables {
            let mut rows = session
                .conn()
                .query(
                    "SELECT name FROM sqlite_master WHERE type='table' AND name=?1",
                    [*table],
                )
                .await
                .unwrap();
            let row = rows.next().await.unwrap();
            assert!(row.is_some(), "table '{table}' should exist");
        }
    }

    #[tokio::test]
    async fn migrations_are_idempotent() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("pulse.db");
        let path = path.to_str().unwrap();

        PulseDb::open_local(path).await.unwrap();
        PulseDb::open_local(path).await.unwrap();
    }

    #[tokio::test]
    async fn generate_id_format() {
        let (db, _dir) = test_db().await;
        let session = db.session().await.unwrap();

        let id = session.generate_id("upd").await.unwrap();
        assert!(is_generated_id(&id, "upd"), "bad id: {id}");
        assert!(!is_generated_id(&id, "art"));
        assert!(!is_generated_id("upd-zzzzzzzz", "upd"));
    }

    #[tokio::test]
    async fn sessions_share_state() {
        let (db, _dir) = test_db().await;
        let first = db.session().await.unwrap();
        first
            .conn()
            .execute(
                "INSERT INTO projects (project_id, name, start_date, end_date, methodology)
                 VALUES ('P1', 'Shared', '2026-01-05', '2026-03-27', 'Agile')",
                (),
            )
            .await
            .unwrap();
        drop(first);

        let second = db.session().await.unwrap();
        let mut rows = second
            .conn()
            .query("SELECT COUNT(*) FROM projects", ())
            .await
            .unwrap();
        let count = rows.next().await.unwrap().unwrap().get::<i64>(0).unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn finish_rolls_back_on_error() {
        let (db, _dir) = test_db().await;
        let session = db.session().await.unwrap();

        session.begin().await.unwrap();
        session
            .conn()
            .execute(
                "INSERT INTO projects (project_id, name, start_date, end_date, methodology)
                 VALUES ('P1', 'Doomed', '2026-01-05', '2026-03-27', 'Agile')",
                (),
            )
            .await
            .unwrap();
        let result: Result<(), DatabaseError> = session
            .finish(Err(DatabaseError::project_not_found("P2")))
            .await;
        assert!(result.is_err());

        let mut rows = session
            .conn()
            .query("SELECT COUNT(*) FROM projects", ())
            .await
            .unwrap();
        let count = rows.next().await.unwrap().unwrap().get::<i64>(0).unwrap();
        assert_eq!(count, 0);
    }
}
