//! Database migration runner.
//!
//! Embeds the SQL migration files at compile time and executes them on
//! database open. All statements use `IF NOT EXISTS` for idempotent re-running.

use crate::PulseDb;
use crate::error::DatabaseError;

/// Initial schema: 5 tables, 4 indexes, 1 trigger.
const MIGRATION_001: &str = include_str!("../migrations/001_initial.sql");

impl PulseDb {
    /// Run all embedded migrations in sequence.
    pub(crate) async fn run_migrations(conn: &libsql::Connection) -> Result<(), DatabaseError> {
        conn.execute_batch(MIGRATION_001)
            .await
            .map_err(|e| DatabaseError::Migration(format!("001_initial: {e}")))?;
        Ok(())
    }
}
