//! Whole-project reads used by the dashboard and the weekly reporter.

use pulse_core::aggregate::{ProjectRecords, compute_dashboard};
use pulse_core::entities::Project;
use pulse_core::responses::DashboardView;

use crate::Session;
use crate::error::DatabaseError;

impl Session {
    /// Load everything a project owns from one read snapshot.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if no project has this id.
    pub async fn load_project_records(
        &self,
        project_id: &str,
    ) -> Result<ProjectRecords, DatabaseError> {
        self.begin_read().await?;
        let result = async {
            let project = self.get_project(project_id).await?;
            self.read_owned(project).await
        }
        .await;
        self.finish(result).await
    }

    /// Load the records owned by an already-fetched project, from one read
    /// snapshot.
    pub async fn load_records_for(&self, project: Project) -> Result<ProjectRecords, DatabaseError> {
        self.begin_read().await?;
        let result = self.read_owned(project).await;
        self.finish(result).await
    }

    async fn read_owned(&self, project: Project) -> Result<ProjectRecords, DatabaseError> {
        let pulses = self.list_pulses(&project.project_id).await?;
        let updates = self.list_weekly_updates(&project.project_id).await?;
        let artifacts = self.list_artifacts(&project.project_id).await?;
        let time_tracking = self.list_time_tracking(&project.project_id).await?;
        Ok(ProjectRecords {
            project,
            pulses,
            updates,
            artifacts,
            time_tracking,
        })
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if no project has this id.
    pub async fn dashboard(&self, project_id: &str) -> Result<DashboardView, DatabaseError> {
        let records = self.load_project_records(project_id).await?;
        Ok(compute_dashboard(&records))
    }
}
