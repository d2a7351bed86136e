use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Planned vs. actual hours for one team on one project.
///
/// `actual_hours` always equals the sum of the team's weekly `hours_spent`;
/// `variance` is `planned_hours - actual_hours`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct TimeTracking {
    pub project_id: String,
    pub team: String,
    pub planned_hours: f64,
    pub actual_hours: f64,
    pub variance: f64,
    pub updated_at: DateTime<Utc>,
}

/// Body of `PUT /time-tracking/plan`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct PlannedHours {
    pub project_id: String,
    pub team: String,
    pub planned_hours: f64,
}
