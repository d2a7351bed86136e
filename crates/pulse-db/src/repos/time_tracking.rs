//! Time tracking repository.
//!
//! One row per (project, team). `actual_hours` is never incremented in place:
//! every write re-derives it from the team's weekly updates, so the stored
//! value does not depend on the order updates arrived in.

use chrono::Utc;

use pulse_core::entities::TimeTracking;

use crate::Session;
use crate::error::DatabaseError;
use crate::helpers::parse_datetime;

const SELECT_COLS: &str = "project_id, team, planned_hours, actual_hours, variance, updated_at";

fn row_to_tracking(row: &libsql::Row) -> Result<TimeTracking, DatabaseError> {
    Ok(TimeTracking {
        project_id: row.get(0)?,
        team: row.get(1)?,
        planned_hours: row.get::<f64>(2)?,
        actual_hours: row.get::<f64>(3)?,
        variance: row.get::<f64>(4)?,
        updated_at: parse_datetime(&row.get::<String>(5)?)?,
    })
}

impl Session {
    pub async fn get_time_tracking(
        &self,
        project_id: &str,
        team: &str,
    ) -> Result<Option<TimeTracking>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM time_tracking WHERE project_id = ?1 AND team = ?2"
                ),
                libsql::params![project_id, team],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_tracking(&row)?)),
            None => Ok(None),
        }
    }

    /// All tracking rows of a project, ordered by team.
    pub async fn list_time_tracking(
        &self,
        project_id: &str,
    ) -> Result<Vec<TimeTracking>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM time_tracking WHERE project_id = ?1 ORDER BY team"
                ),
                [project_id],
            )
            .await?;

        let mut records = Vec::new();
        while let Some(row) = rows.next().await? {
            records.push(row_to_tracking(&row)?);
        }
        Ok(records)
    }

    /// Bring a team's tracking row in line with its weekly updates.
    ///
    /// Creates the row with zero planned hours if it does not exist yet.
    /// `new_hours_spent` is the update that triggered the reconcile; it is
    /// already included in the stored sum and is only logged.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the upsert or read-back fails.
    pub async fn reconcile_time_tracking(
        &self,
        project_id: &str,
        team: &str,
        new_hours_spent: f64,
    ) -> Result<TimeTracking, DatabaseError> {
        let actual = self.sum_team_hours(project_id, team).await?;
        tracing::debug!(project_id, team, new_hours_spent, actual, "reconciling time tracking");

        self.conn()
            .execute(
                "INSERT INTO time_tracking (project_id, team, planned_hours, actual_hours, variance, updated_at)
                 VALUES (?1, ?2, 0.0, ?3, 0.0 - ?3, ?4)
                 ON CONFLICT (project_id, team) DO UPDATE SET
                     actual_hours = excluded.actual_hours,
                     variance = time_tracking.planned_hours - excluded.actual_hours,
                     updated_at = excluded.updated_at",
                libsql::params![project_id, team, actual, Utc::now().to_rfc3339()],
            )
            .await?;

        self.get_time_tracking(project_id, team)
            .await?
            .ok_or(DatabaseError::NoResult)
    }

    /// Set a team's planned hours and recompute its variance.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the upsert or read-back fails.
    pub async fn upsert_planned_hours(
        &self,
        project_id: &str,
        team: &str,
        planned_hours: f64,
    ) -> Result<TimeTracking, DatabaseError> {
        let actual = self.sum_team_hours(project_id, team).await?;

        self.conn()
            .execute(
                "INSERT INTO time_tracking (project_id, team, planned_hours, actual_hours, variance, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?3 - ?4, ?5)
                 ON CONFLICT (project_id, team) DO UPDATE SET
                     planned_hours = excluded.planned_hours,
                     actual_hours = excluded.actual_hours,
                     variance = excluded.variance,
                     updated_at = excluded.updated_at",
                libsql::params![
                    project_id,
                    team,
                    planned_hours,
                    actual,
                    Utc::now().to_rfc3339()
                ],
            )
            .await?;

        self.get_time_tracking(project_id, team)
            .await?
            .ok_or(DatabaseError::NoResult)
    }
}
