//! Checks on inbound payloads that serde alone cannot express.

use crate::entities::{NewProject, NewWeeklyUpdate, PlannedHours, RequirementsSubmission};
use crate::errors::CoreError;

fn require_text(field: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be empty")));
    }
    Ok(())
}

fn require_hours(field: &str, value: f64) -> Result<(), CoreError> {
    if !value.is_finite() || value < 0.0 {
        return Err(CoreError::Validation(format!(
            "{field} must be a non-negative number, got {value}"
        )));
    }
    Ok(())
}

impl NewProject {
    /// # Errors
    ///
    /// Returns `CoreError::Validation` for a blank id or name, or an end date
    /// before the start date.
    pub fn validate(&self) -> Result<(), CoreError> {
        require_text("project_id", &self.project_id)?;
        require_text("name", &self.name)?;
        if self.end_date < self.start_date {
            return Err(CoreError::Validation(format!(
                "end_date {} is before start_date {}",
                self.end_date, self.start_date
            )));
        }
        Ok(())
    }
}

impl RequirementsSubmission {
    /// # Errors
    ///
    /// Returns `CoreError::Validation` for a blank project id.
    pub fn validate(&self) -> Result<(), CoreError> {
        require_text("project_id", &self.project_id)
    }
}

impl NewWeeklyUpdate {
    /// # Errors
    ///
    /// Returns `CoreError::Validation` for blank keys or negative hours.
    pub fn validate(&self) -> Result<(), CoreError> {
        require_text("project_id", &self.project_id)?;
        require_text("team", &self.team)?;
        require_hours("hours_spent", self.hours_spent)
    }
}

impl PlannedHours {
    /// # Errors
    ///
    /// Returns `CoreError::Validation` for blank keys or negative hours.
    pub fn validate(&self) -> Result<(), CoreError> {
        require_text("project_id", &self.project_id)?;
        require_text("team", &self.team)?;
        require_hours("planned_hours", self.planned_hours)
    }
}
