//! Artifact repository.

use chrono::Utc;

use pulse_core::entities::{Artifact, NewArtifact};
use pulse_core::ids::PREFIX_ARTIFACT;

use crate::Session;
use crate::error::DatabaseError;
use crate::helpers::{get_pulse_index, parse_datetime, parse_string_list, string_list_json};

const SELECT_COLS: &str =
    "id, project_id, artifact_type, pulse_id, owner, visible_to, content, created_at";

fn row_to_artifact(row: &libsql::Row) -> Result<Artifact, DatabaseError> {
    Ok(Artifact {
        id: row.get(0)?,
        project_id: row.get(1)?,
        artifact_type: row.get(2)?,
        pulse_id: get_pulse_index(row, 3)?,
        owner: row.get(4)?,
        visible_to: parse_string_list(&row.get::<String>(5)?)?,
        content: row.get(6)?,
        created_at: parse_datetime(&row.get::<String>(7)?)?,
    })
}

impl Session {
    pub async fn create_artifact(&self, new: &NewArtifact) -> Result<Artifact, DatabaseError> {
        let now = Utc::now();
        let id = self.generate_id(PREFIX_ARTIFACT).await?;

        self.conn()
            .execute(
                &format!(
                    "INSERT INTO artifacts ({SELECT_COLS})
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)"
                ),
                libsql::params![
                    id.as_str(),
                    new.project_id.as_str(),
                    new.artifact_type.as_str(),
                    i64::from(new.pulse_id),
                    new.owner.as_str(),
                    string_list_json(&new.visible_to)?,
                    new.content.as_str(),
                    now.to_rfc3339()
                ],
            )
            .await?;

        Ok(Artifact {
            id,
            project_id: new.project_id.clone(),
            artifact_type: new.artifact_type.clone(),
            pulse_id: new.pulse_id,
            owner: new.owner.clone(),
            visible_to: new.visible_to.clone(),
            content: new.content.clone(),
            created_at: now,
        })
    }

    /// Artifacts of a project in creation order, with full content.
    pub async fn list_artifacts(&self, project_id: &str) -> Result<Vec<Artifact>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM artifacts WHERE project_id = ?1 ORDER BY rowid"
                ),
                [project_id],
            )
            .await?;

        let mut artifacts = Vec::new();
        while let Some(row) = rows.next().await? {
            artifacts.push(row_to_artifact(&row)?);
        }
        Ok(artifacts)
    }
}
