//! Weekly update repository: append-only inserts and reads.

use chrono::Utc;

use pulse_core::entities::{NewWeeklyUpdate, WeeklyUpdate};
use pulse_core::ids::PREFIX_UPDATE;

use crate::Session;
use crate::error::DatabaseError;
use crate::helpers::{parse_datetime, parse_string_list, string_list_json};

const SELECT_COLS: &str =
    "id, project_id, week, team, work_done, hours_spent, blockers, status, created_at";

fn row_to_update(row: &libsql::Row) -> Result<WeeklyUpdate, DatabaseError> {
    Ok(WeeklyUpdate {
        id: row.get(0)?,
        project_id: row.get(1)?,
        week: row.get(2)?,
        team: row.get(3)?,
        work_done: parse_string_list(&row.get::<String>(4)?)?,
        hours_spent: row.get::<f64>(5)?,
        blockers: parse_string_list(&row.get::<String>(6)?)?,
        status: row.get(7)?,
        created_at: parse_datetime(&row.get::<String>(8)?)?,
    })
}

impl Session {
    pub async fn create_weekly_update(
        &self,
        new: &NewWeeklyUpdate,
    ) -> Result<WeeklyUpdate, DatabaseError> {
        let now = Utc::now();
        let id = self.generate_id(PREFIX_UPDATE).await?;

        self.conn()
            .execute(
                &format!(
                    "INSERT INTO weekly_updates ({SELECT_COLS})
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)"
                ),
                libsql::params![
                    id.as_str(),
                    new.project_id.as_str(),
                    new.week.as_str(),
                    new.team.as_str(),
                    string_list_json(&new.work_done)?,
                    new.hours_spent,
                    string_list_json(&new.blockers)?,
                    new.status.as_str(),
                    now.to_rfc3339()
                ],
            )
            .await?;

        Ok(WeeklyUpdate {
            id,
            project_id: new.project_id.clone(),
            week: new.week.clone(),
            team: new.team.clone(),
            work_done: new.work_done.clone(),
            hours_spent: new.hours_spent,
            blockers: new.blockers.clone(),
            status: new.status.clone(),
            created_at: now,
        })
    }

    /// Updates of a project in submission order.
    pub async fn list_weekly_updates(
        &self,
        project_id: &str,
    ) -> Result<Vec<WeeklyUpdate>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM weekly_updates WHERE project_id = ?1 ORDER BY rowid"
                ),
                [project_id],
            )
            .await?;

        let mut updates = Vec::new();
        while let Some(row) = rows.next().await? {
            updates.push(row_to_update(&row)?);
        }
        Ok(updates)
    }

    /// Sum of `hours_spent` over every update a team filed for a project.
    pub async fn sum_team_hours(&self, project_id: &str, team: &str) -> Result<f64, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                "SELECT COALESCE(SUM(hours_spent), 0.0) FROM weekly_updates
                 WHERE project_id = ?1 AND team = ?2",
                libsql::params![project_id, team],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        Ok(row.get::<f64>(0)?)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::test_support::helpers::{new_project, new_update, test_session};

    #[tokio::test]
    async fn create_update_roundtrip() {
        let (svc, _db, _dir) = test_session().await;
        svc.create_project(&new_project("PRJ-1")).await.unwrap();

        let mut new = new_update("PRJ-1", "DEV", 12.5);
        new.blockers = vec!["Waiting on API keys".into()];
        let created = svc.create_weekly_update(&new).await.unwrap();
        assert!(created.id.starts_with("upd-"));

        let updates = svc.list_weekly_updates("PRJ-1").await.unwrap();
        assert_eq!(updates, vec![created]);
    }

    #[tokio::test]
    async fn updates_are_append_only() {
        let (svc, _db, _dir) = test_session().await;
        svc.create_project(&new_project("PRJ-1")).await.unwrap();
        let created = svc
            .create_weekly_update(&new_update("PRJ-1", "DEV", 4.0))
            .await
            .unwrap();

        let result = svc
            .conn()
            .execute(
                "UPDATE weekly_updates SET hours_spent = 99 WHERE id = ?1",
                [created.id.as_str()],
            )
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn negative_hours_are_rejected_by_schema() {
        let (svc, _db, _dir) = test_session().await;
        svc.create_project(&new_project("PRJ-1")).await.unwrap();
        let result = svc
            .create_weekly_update(&new_update("PRJ-1", "DEV", -1.0))
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn sum_team_hours_is_per_team() {
        let (svc, _db, _dir) = test_session().await;
        svc.create_project(&new_project("PRJ-1")).await.unwrap();

        for hours in [3.0, 4.5, 2.5] {
            svc.create_weekly_update(&new_update("PRJ-1", "DEV", hours))
                .await
                .unwrap();
        }
        svc.create_weekly_update(&new_update("PRJ-1", "QA", 7.0))
            .await
            .unwrap();

        assert!((svc.sum_team_hours("PRJ-1", "DEV").await.unwrap() - 10.0).abs() < f64::EPSILON);
        assert!((svc.sum_team_hours("PRJ-1", "QA").await.unwrap() - 7.0).abs() < f64::EPSILON);
        assert!(svc.sum_team_hours("PRJ-1", "OPS").await.unwrap().abs() < f64::EPSILON);
    }
}
