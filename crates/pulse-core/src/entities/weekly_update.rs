use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A team's status report for one week. Never mutated after creation.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct WeeklyUpdate {
    pub id: String,
    pub project_id: String,
    pub week: String,
    pub team: String,
    pub work_done: Vec<String>,
    pub hours_spent: f64,
    pub blockers: Vec<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// Body of `POST /weekly-update`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct NewWeeklyUpdate {
    pub project_id: String,
    pub week: String,
    pub team: String,
    #[serde(default)]
    pub work_done: Vec<String>,
    pub hours_spent: f64,
    #[serde(default)]
    pub blockers: Vec<String>,
    pub status: String,
}
