use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::PulseStatus;

/// A delivery phase of a project.
///
/// `pulse_id` is the phase index (0-8), not a unique key: the same index may
/// appear more than once for a project.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Pulse {
    /// Storage row id.
    pub id: i64,
    pub project_id: String,
    pub pulse_id: u8,
    pub name: String,
    pub start_week: String,
    pub end_week: String,
    pub status: PulseStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPulse {
    pub project_id: String,
    pub pulse_id: u8,
    pub name: String,
    pub start_week: String,
    pub end_week: String,
    pub status: PulseStatus,
}
