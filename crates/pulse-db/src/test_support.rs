//! Shared test utilities for pulse-db unit tests.

#[cfg(test)]
pub(crate) mod helpers {
    use chrono::NaiveDate;
    use pulse_core::entities::{NewProject, NewWeeklyUpdate};
    use pulse_core::enums::ProjectStatus;
    use tempfile::TempDir;

    use crate::{PulseDb, Session};

    /// Open a database in a fresh temp dir. Keep the `TempDir` alive for the
    /// duration of the test.
    pub async fn test_db() -> (PulseDb, TempDir) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("pulse.db");
        let db = PulseDb::open_local(path.to_str().unwrap()).await.unwrap();
        (db, dir)
    }

    /// Open a database and a session on it.
    pub async fn test_session() -> (Session, PulseDb, TempDir) {
        let (db, dir) = test_db().await;
        let session = db.session().await.unwrap();
        (session, db, dir)
    }

    /// Whether `id` looks like `{prefix}-{8 hex chars}`.
    pub fn is_generated_id(id: &str, prefix: &str) -> bool {
        id.strip_prefix(prefix)
            .and_then(|rest| rest.strip_prefix('-'))
            .is_some_and(|hex| hex.len() == 8 && hex.chars().all(|c| c.is_ascii_hexdigit()))
    }

    pub fn new_project(project_id: &str) -> NewProject {
        NewProject {
            project_id: project_id.to_string(),
            name: format!("Project {project_id}"),
            start_date: NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2026, 6, 26).unwrap(),
            methodology: "Agile".to_string(),
            teams: vec!["DEV".to_string(), "QA".to_string()],
            status: ProjectStatus::Active,
            requirements: Vec::new(),
            stakeholders: vec![
                "sponsor@example.com".to_string(),
                "lead@example.com".to_string(),
            ],
        }
    }

    pub fn new_update(project_id: &str, team: &str, hours: f64) -> NewWeeklyUpdate {
        NewWeeklyUpdate {
            project_id: project_id.to_string(),
            week: "Week 1".to_string(),
            team: team.to_string(),
            work_done: vec!["Sprint work".to_string()],
            hours_spent: hours,
            blockers: Vec::new(),
            status: "On Track".to_string(),
        }
    }
}
