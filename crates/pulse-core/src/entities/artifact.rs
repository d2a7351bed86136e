use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A generated document attached to a project pulse.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Artifact {
    pub id: String,
    pub project_id: String,
    /// Free-form type tag, e.g. `"FRD Draft"`.
    pub artifact_type: String,
    pub pulse_id: u8,
    /// Role that produced the artifact.
    pub owner: String,
    /// Roles allowed to see the artifact.
    pub visible_to: Vec<String>,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewArtifact {
    pub project_id: String,
    pub artifact_type: String,
    pub pulse_id: u8,
    pub owner: String,
    pub visible_to: Vec<String>,
    pub content: String,
}
