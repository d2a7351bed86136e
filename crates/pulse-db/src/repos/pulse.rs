//! Pulse repository: create and list.

use chrono::Utc;

use pulse_core::entities::{NewPulse, Pulse};

use crate::Session;
use crate::error::DatabaseError;
use crate::helpers::{get_pulse_index, parse_datetime, parse_enum};

const SELECT_COLS: &str =
    "id, project_id, pulse_id, name, start_week, end_week, status, created_at";

fn row_to_pulse(row: &libsql::Row) -> Result<Pulse, DatabaseError> {
    Ok(Pulse {
        id: row.get(0)?,
        project_id: row.get(1)?,
        pulse_id: get_pulse_index(row, 2)?,
        name: row.get(3)?,
        start_week: row.get(4)?,
        end_week: row.get(5)?,
        status: parse_enum(&row.get::<String>(6)?)?,
        created_at: parse_datetime(&row.get::<String>(7)?)?,
    })
}

impl Session {
    /// Insert a pulse. Does not check for an existing pulse with the same index.
    pub async fn create_pulse(&self, new: &NewPulse) -> Result<Pulse, DatabaseError> {
        let now = Utc::now();
        self.conn()
            .execute(
                "INSERT INTO pulses (project_id, pulse_id, name, start_week, end_week, status, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                libsql::params![
                    new.project_id.as_str(),
                    i64::from(new.pulse_id),
                    new.name.as_str(),
                    new.start_week.as_str(),
                    new.end_week.as_str(),
                    new.status.as_str(),
                    now.to_rfc3339()
                ],
            )
            .await?;

        Ok(Pulse {
            id: self.conn().last_insert_rowid(),
            project_id: new.project_id.clone(),
            pulse_id: new.pulse_id,
            name: new.name.clone(),
            start_week: new.start_week.clone(),
            end_week: new.end_week.clone(),
            status: new.status,
            created_at: now,
        })
    }

    /// Pulses of a project ordered by index, then insertion.
    pub async fn list_pulses(&self, project_id: &str) -> Result<Vec<Pulse>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM pulses WHERE project_id = ?1 ORDER BY pulse_id, id"
                ),
                [project_id],
            )
            .await?;

        let mut pulses = Vec::new();
        while let Some(row) = rows.next().await? {
            pulses.push(row_to_pulse(&row)?);
        }
        Ok(pulses)
    }
}
