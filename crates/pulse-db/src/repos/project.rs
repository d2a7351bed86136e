//! Project repository: create, lookup, listing, requirements.

use chrono::Utc;

use pulse_core::entities::{NewProject, Project};
use pulse_core::enums::ProjectStatus;

use crate::Session;
use crate::error::DatabaseError;
use crate::helpers::{parse_date, parse_datetime, parse_enum, parse_string_list, string_list_json};

const SELECT_COLS: &str = "project_id, name, start_date, end_date, methodology, teams, status, \
     requirements, stakeholders, created_at, updated_at";

fn row_to_project(row: &libsql::Row) -> Result<Project, DatabaseError> {
    Ok(Project {
        project_id: row.get(0)?,
        name: row.get(1)?,
        start_date: parse_date(&row.get::<String>(2)?)?,
        end_date: parse_date(&row.get::<String>(3)?)?,
        methodology: row.get(4)?,
        teams: parse_string_list(&row.get::<String>(5)?)?,
        status: parse_enum(&row.get::<String>(6)?)?,
        requirements: parse_string_list(&row.get::<String>(7)?)?,
        stakeholders: parse_string_list(&row.get::<String>(8)?)?,
        created_at: parse_datetime(&row.get::<String>(9)?)?,
        updated_at: parse_datetime(&row.get::<String>(10)?)?,
    })
}

impl Session {
    /// Create a project. The existing record is left untouched on conflict.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Conflict` if `project_id` is already taken.
    pub async fn create_project(&self, new: &NewProject) -> Result<Project, DatabaseError> {
        if self.project_exists(&new.project_id).await? {
            return Err(DatabaseError::Conflict {
                entity: "Project",
                id: new.project_id.clone(),
            });
        }

        let now = Utc::now();
        let result = self
            .conn()
            .execute(
                &format!(
                    "INSERT INTO projects ({SELECT_COLS})
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)"
                ),
                libsql::params![
                    new.project_id.as_str(),
                    new.name.as_str(),
                    new.start_date.format("%Y-%m-%d").to_string(),
                    new.end_date.format("%Y-%m-%d").to_string(),
                    new.methodology.as_str(),
                    string_list_json(&new.teams)?,
                    new.status.as_str(),
                    string_list_json(&new.requirements)?,
                    string_list_json(&new.stakeholders)?,
                    now.to_rfc3339(),
                    now.to_rfc3339()
                ],
            )
            .await;

        match result {
            Ok(_) => {}
            // Lost a race with a concurrent create of the same id.
            Err(e) if e.to_string().contains("UNIQUE constraint failed") => {
                return Err(DatabaseError::Conflict {
                    entity: "Project",
                    id: new.project_id.clone(),
                });
            }
            Err(e) => return Err(e.into()),
        }

        Ok(Project {
            project_id: new.project_id.clone(),
            name: new.name.clone(),
            start_date: new.start_date,
            end_date: new.end_date,
            methodology: new.methodology.clone(),
            teams: new.teams.clone(),
            status: new.status,
            requirements: new.requirements.clone(),
            stakeholders: new.stakeholders.clone(),
            created_at: now,
            updated_at: now,
        })
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if no project has this id.
    pub async fn get_project(&self, project_id: &str) -> Result<Project, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM projects WHERE project_id = ?1"),
                [project_id],
            )
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| DatabaseError::project_not_found(project_id))?;
        row_to_project(&row)
    }

    pub async fn project_exists(&self, project_id: &str) -> Result<bool, DatabaseError> {
        let mut rows = self
            .conn()
            .query("SELECT 1 FROM projects WHERE project_id = ?1", [project_id])
            .await?;
        Ok(rows.next().await?.is_some())
    }

    /// All projects in creation order.
    pub async fn list_projects(&self) -> Result<Vec<Project>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM projects ORDER BY rowid"),
                (),
            )
            .await?;

        let mut projects = Vec::new();
        while let Some(row) = rows.next().await? {
            projects.push(row_to_project(&row)?);
        }
        Ok(projects)
    }

    pub async fn list_projects_by_status(
        &self,
        status: ProjectStatus,
    ) -> Result<Vec<Project>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM projects WHERE status = ?1 ORDER BY rowid"),
                [status.as_str()],
            )
            .await?;

        let mut projects = Vec::new();
        while let Some(row) = rows.next().await? {
            projects.push(row_to_project(&row)?);
        }
        Ok(projects)
    }

    /// Replace the project's requirement list.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if no project has this id.
    pub async fn set_requirements(
        &self,
        project_id: &str,
        requirements: &[String],
    ) -> Result<(), DatabaseError> {
        let changed = self
            .conn()
            .execute(
                "UPDATE projects SET requirements = ?1, updated_at = ?2 WHERE project_id = ?3",
                libsql::params![
                    string_list_json(requirements)?,
                    Utc::now().to_rfc3339(),
                    project_id
                ],
            )
            .await?;
        if changed == 0 {
            return Err(DatabaseError::project_not_found(project_id));
        }
        Ok(())
    }
}
