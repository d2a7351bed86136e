//! Multi-step write operations.
//!
//! Each flow runs in a single transaction on the calling session: either every
//! row it writes is committed or none is. Authorization happens before a flow
//! is entered; notifications happen after it returns.

use pulse_core::entities::{
    NewArtifact, NewPulse, NewWeeklyUpdate, PlannedHours, Project, TimeTracking,
};
use pulse_core::enums::PulseStatus;
use pulse_core::responses::{RequirementsAccepted, WeeklyUpdateAccepted};
use pulse_core::role::{ROLE_BA, ROLE_DEV, ROLE_QA};
use pulse_core::rules::{
    FRD_DRAFT, INTAKE_END_WEEK, INTAKE_PULSE_ID, INTAKE_PULSE_NAME, INTAKE_START_WEEK,
};
use pulse_core::summary::requirements_document;

use crate::Session;
use crate::error::DatabaseError;

/// Result of a requirements intake: the response body plus the project as it
/// stood after the commit, so the caller can address the notice.
#[derive(Debug, Clone)]
pub struct RequirementsIntake {
    pub project: Project,
    pub accepted: RequirementsAccepted,
}

impl Session {
    /// Store a requirement list and open the intake pulse.
    ///
    /// Overwrites the project's requirements, writes an FRD draft artifact,
    /// and creates pulse 0 in progress. Pulse 0 is created on every call, even
    /// if one already exists.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if the project does not exist.
    pub async fn intake_requirements(
        &self,
        project_id: &str,
        requirements: &[String],
    ) -> Result<RequirementsIntake, DatabaseError> {
        self.begin().await?;
        let result = async {
            self.set_requirements(project_id, requirements).await?;

            let artifact = self
                .create_artifact(&NewArtifact {
                    project_id: project_id.to_string(),
                    artifact_type: FRD_DRAFT.to_string(),
                    pulse_id: INTAKE_PULSE_ID,
                    owner: ROLE_BA.to_string(),
                    visible_to: vec![ROLE_DEV.to_string(), ROLE_QA.to_string()],
                    content: requirements_document(requirements),
                })
                .await?;

            let pulse = self
                .create_pulse(&NewPulse {
                    project_id: project_id.to_string(),
                    pulse_id: INTAKE_PULSE_ID,
                    name: INTAKE_PULSE_NAME.to_string(),
                    start_week: INTAKE_START_WEEK.to_string(),
                    end_week: INTAKE_END_WEEK.to_string(),
                    status: PulseStatus::InProgress,
                })
                .await?;

            let project = self.get_project(project_id).await?;
            Ok::<_, DatabaseError>(RequirementsIntake {
                project,
                accepted: RequirementsAccepted {
                    project_id: project_id.to_string(),
                    requirement_count: requirements.len(),
                    artifact,
                    pulse,
                },
            })
        }
        .await;
        let intake = self.finish(result).await?;

        tracing::info!(
            project_id,
            requirements = requirements.len(),
            artifact_id = %intake.accepted.artifact.id,
            "requirements accepted"
        );
        Ok(intake)
    }

    /// Append a weekly update and reconcile its team's time tracking.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if the project does not exist.
    pub async fn record_weekly_update(
        &self,
        new: &NewWeeklyUpdate,
    ) -> Result<WeeklyUpdateAccepted, DatabaseError> {
        self.begin().await?;
        let result = async {
            if !self.project_exists(&new.project_id).await? {
                return Err(DatabaseError::project_not_found(&new.project_id));
            }
            let update = self.create_weekly_update(new).await?;
            let time_tracking = self
                .reconcile_time_tracking(&new.project_id, &new.team, new.hours_spent)
                .await?;
            Ok::<_, DatabaseError>(WeeklyUpdateAccepted {
                update,
                time_tracking,
            })
        }
        .await;
        let accepted = self.finish(result).await?;

        tracing::info!(
            project_id = %new.project_id,
            team = %new.team,
            hours = new.hours_spent,
            actual_hours = accepted.time_tracking.actual_hours,
            "weekly update recorded"
        );
        Ok(accepted)
    }

    /// Set planned hours for a team on a project.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if the project does not exist.
    pub async fn plan_hours(&self, plan: &PlannedHours) -> Result<TimeTracking, DatabaseError> {
        self.begin().await?;
        let result = async {
            if !self.project_exists(&plan.project_id).await? {
                return Err(DatabaseError::project_not_found(&plan.project_id));
            }
            self.upsert_planned_hours(&plan.project_id, &plan.team, plan.planned_hours)
                .await
        }
        .await;
        let tracking = self.finish(result).await?;

        tracing::info!(
            project_id = %plan.project_id,
            team = %plan.team,
            planned_hours = plan.planned_hours,
            variance = tracking.variance,
            "planned hours set"
        );
        Ok(tracking)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;
    use crate::test_support::helpers::{new_project, new_update, test_session};

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[tokio::test]
    async fn intake_writes_artifact_and_intake_pulse() {
        let (svc, _db, _dir) = test_session().await;
        svc.create_project(&new_project("PRJ-1")).await.unwrap();

        let intake = svc
            .intake_requirements("PRJ-1", &["A".into(), "B".into()])
            .await
            .unwrap();

        let artifact = &intake.accepted.artifact;
        assert_eq!(artifact.content, "Requirement 1: A\nRequirement 2: B");
        assert_eq!(artifact.artifact_type, "FRD Draft");
        assert_eq!(artifact.owner, "BA");
        assert_eq!(artifact.visible_to, vec!["DEV".to_string(), "QA".to_string()]);
        assert_eq!(artifact.pulse_id, 0);

        let pulses = svc.list_pulses("PRJ-1").await.unwrap();
        assert_eq!(pulses.len(), 1);
        assert_eq!(pulses[0].pulse_id, 0);
        assert_eq!(pulses[0].status, PulseStatus::InProgress);
        assert_eq!(pulses[0].start_week, "Week 1");
        assert_eq!(pulses[0].end_week, "Week 2");

        assert_eq!(
            intake.project.requirements,
            vec!["A".to_string(), "B".to_string()]
        );
        assert_eq!(intake.accepted.requirement_count, 2);
    }

    #[tokio::test]
    async fn intake_twice_duplicates_pulse_zero() {
        let (svc, _db, _dir) = test_session().await;
        svc.create_project(&new_project("PRJ-1")).await.unwrap();

        svc.intake_requirements("PRJ-1", &["A".into()]).await.unwrap();
        svc.intake_requirements("PRJ-1", &["B".into()]).await.unwrap();

        let pulses = svc.list_pulses("PRJ-1").await.unwrap();
        assert_eq!(pulses.len(), 2);
        assert!(pulses.iter().all(|p| p.pulse_id == 0));
        assert_eq!(svc.list_artifacts("PRJ-1").await.unwrap().len(), 2);
        assert_eq!(
            svc.get_project("PRJ-1").await.unwrap().requirements,
            vec!["B".to_string()]
        );
    }

    #[tokio::test]
    async fn intake_with_no_requirements_still_opens_pulse() {
        let (svc, _db, _dir) = test_session().await;
        svc.create_project(&new_project("PRJ-1")).await.unwrap();

        let intake = svc.intake_requirements("PRJ-1", &[]).await.unwrap();
        assert_eq!(intake.accepted.artifact.content, "");
        assert_eq!(intake.accepted.requirement_count, 0);
        assert_eq!(svc.list_pulses("PRJ-1").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn intake_for_missing_project_writes_nothing() {
        let (svc, _db, _dir) = test_session().await;
        let result = svc.intake_requirements("ghost", &["A".into()]).await;
        assert!(matches!(result, Err(DatabaseError::NotFound { .. })));

        let mut rows = svc
            .conn()
            .query("SELECT (SELECT COUNT(*) FROM artifacts) + (SELECT COUNT(*) FROM pulses)", ())
            .await
            .unwrap();
        let count = rows.next().await.unwrap().unwrap().get::<i64>(0).unwrap();
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn weekly_update_for_missing_project_is_not_found() {
        let (svc, _db, _dir) = test_session().await;
        let result = svc
            .record_weekly_update(&new_update("ghost", "DEV", 4.0))
            .await;
        assert!(matches!(result, Err(DatabaseError::NotFound { .. })));
    }

    #[rstest]
    #[case(vec![4.0, 6.5, 1.5])]
    #[case(vec![1.5, 4.0, 6.5])]
    #[case(vec![6.5, 1.5, 4.0])]
    #[tokio::test]
    async fn actual_hours_track_running_sum_in_any_order(#[case] hours: Vec<f64>) {
        let (svc, _db, _dir) = test_session().await;
        svc.create_project(&new_project("PRJ-1")).await.unwrap();

        let mut expected = 0.0;
        for h in hours {
            expected += h;
            let accepted = svc
                .record_weekly_update(&new_update("PRJ-1", "DEV", h))
                .await
                .unwrap();
            assert!(approx(accepted.time_tracking.actual_hours, expected));
            assert!(approx(accepted.time_tracking.variance, -expected));
        }
        assert!(approx(expected, 12.0));

        let tracking = svc.list_time_tracking("PRJ-1").await.unwrap();
        assert_eq!(tracking.len(), 1);
    }

    #[tokio::test]
    async fn teams_are_tracked_separately() {
        let (svc, _db, _dir) = test_session().await;
        svc.create_project(&new_project("PRJ-1")).await.unwrap();

        svc.record_weekly_update(&new_update("PRJ-1", "DEV", 10.0))
            .await
            .unwrap();
        svc.record_weekly_update(&new_update("PRJ-1", "QA", 3.0))
            .await
            .unwrap();

        let dev = svc.get_time_tracking("PRJ-1", "DEV").await.unwrap().unwrap();
        let qa = svc.get_time_tracking("PRJ-1", "QA").await.unwrap().unwrap();
        assert!(approx(dev.actual_hours, 10.0));
        assert!(approx(qa.actual_hours, 3.0));
    }

    #[tokio::test]
    async fn plan_hours_requires_project() {
        let (svc, _db, _dir) = test_session().await;
        let result = svc
            .plan_hours(&PlannedHours {
                project_id: "ghost".into(),
                team: "DEV".into(),
                planned_hours: 10.0,
            })
            .await;
        assert!(matches!(result, Err(DatabaseError::NotFound { .. })));
    }

    #[tokio::test]
    async fn plan_then_update_gives_positive_variance() {
        let (svc, _db, _dir) = test_session().await;
        svc.create_project(&new_project("PRJ-1")).await.unwrap();

        svc.plan_hours(&PlannedHours {
            project_id: "PRJ-1".into(),
            team: "DEV".into(),
            planned_hours: 20.0,
        })
        .await
        .unwrap();
        let accepted = svc
            .record_weekly_update(&new_update("PRJ-1", "DEV", 5.0))
            .await
            .unwrap();

        assert!(approx(accepted.time_tracking.planned_hours, 20.0));
        assert!(approx(accepted.time_tracking.variance, 15.0));

        let view = svc.dashboard("PRJ-1").await.unwrap();
        assert!(approx(view.time_tracking[0].variance_percentage, 75.0));
    }
}
