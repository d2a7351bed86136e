//! Response bodies returned as JSON by the HTTP surface.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{Artifact, Project, Pulse, TimeTracking, WeeklyUpdate};
use crate::enums::ProjectStatus;

/// Response from `GET /`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct RootStatus {
    pub service: String,
    pub version: String,
    pub status: String,
    pub endpoints: Vec<String>,
}

/// One row of `GET /projects`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ProjectBrief {
    pub project_id: String,
    pub name: String,
    pub status: ProjectStatus,
    pub methodology: String,
    pub teams: Vec<String>,
}

impl From<&Project> for ProjectBrief {
    fn from(project: &Project) -> Self {
        Self {
            project_id: project.project_id.clone(),
            name: project.name.clone(),
            status: project.status,
            methodology: project.methodology.clone(),
            teams: project.teams.clone(),
        }
    }
}

/// Response from `GET /projects`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ProjectListing {
    pub count: usize,
    pub projects: Vec<ProjectBrief>,
}

/// Rolled-up numbers shown at the top of a dashboard.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct DashboardStats {
    pub total_pulses: u32,
    pub completed_pulses: usize,
    pub in_progress_pulses: usize,
    pub progress_percentage: f64,
    pub total_hours: f64,
    pub total_blockers: usize,
}

/// A time tracking record with its variance expressed as a percentage of plan.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct TimeTrackingView {
    #[serde(flatten)]
    pub tracking: TimeTracking,
    pub variance_percentage: f64,
}

/// Response from `GET /dashboard/{project_id}`.
///
/// Artifact content in `artifacts` may be truncated; see
/// [`crate::aggregate::truncate_content`].
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct DashboardView {
    pub project: Project,
    pub pulses: Vec<Pulse>,
    pub statistics: DashboardStats,
    pub updates: Vec<WeeklyUpdate>,
    pub artifacts: Vec<Artifact>,
    pub time_tracking: Vec<TimeTrackingView>,
}

/// Response from `POST /requirements`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct RequirementsAccepted {
    pub project_id: String,
    pub requirement_count: usize,
    pub artifact: Artifact,
    pub pulse: Pulse,
}

/// Response from `POST /weekly-update`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct WeeklyUpdateAccepted {
    pub update: WeeklyUpdate,
    pub time_tracking: TimeTracking,
}
