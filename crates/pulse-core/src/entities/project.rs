use chrono::{DateTime, NaiveDate, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::ProjectStatus;

/// A tracked project. Owns its pulses, updates, artifacts, and time tracking.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Project {
    /// Caller-assigned, unique.
    pub project_id: String,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub methodology: String,
    /// Team names in display order. Team names double as caller identities.
    pub teams: Vec<String>,
    pub status: ProjectStatus,
    pub requirements: Vec<String>,
    /// Stakeholder email addresses.
    pub stakeholders: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of `POST /projects`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct NewProject {
    pub project_id: String,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub methodology: String,
    #[serde(default)]
    pub teams: Vec<String>,
    #[serde(default)]
    pub status: ProjectStatus,
    #[serde(default)]
    pub requirements: Vec<String>,
    #[serde(default)]
    pub stakeholders: Vec<String>,
}

/// Body of `POST /requirements`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct RequirementsSubmission {
    pub project_id: String,
    #[serde(default)]
    pub requirements: Vec<String>,
}
