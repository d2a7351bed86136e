//! One pass of the weekly report over every active project.

use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

use pulse_core::entities::Project;
use pulse_core::enums::ProjectStatus;
use pulse_core::summary::{render_weekly_summary, summarize};
use pulse_db::error::DatabaseError;
use pulse_db::{PulseDb, Session};
use pulse_notify::{Delivery, Mailer, NotifyError};

/// Per-run tally. A project is counted in exactly one bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReportOutcome {
    pub delivered: usize,
    pub skipped: usize,
    pub failed: usize,
}

#[derive(Debug, Error)]
enum ProjectError {
    #[error(transparent)]
    Database(#[from] DatabaseError),
    #[error(transparent)]
    Notify(#[from] NotifyError),
}

enum ProjectResult {
    Delivered,
    Skipped,
}

/// Summarize and send every active project.
///
/// A project that fails is logged and counted; the rest still run.
///
/// # Errors
///
/// Returns `DatabaseError` only if the session or the project list cannot be
/// obtained, in which case nothing was sent.
pub async fn run_weekly_report(
    db: &PulseDb,
    mailer: &Mailer,
    week_ending: NaiveDate,
) -> Result<ReportOutcome, DatabaseError> {
    let session = db.session().await?;
    let projects = session
        .list_projects_by_status(ProjectStatus::Active)
        .await?;
    tracing::info!(projects = projects.len(), %week_ending, "weekly report started");

    let mut outcome = ReportOutcome::default();
    for project in projects {
        let project_id = project.project_id.clone();
        match report_project(&session, mailer, project, week_ending).await {
            Ok(ProjectResult::Delivered) => outcome.delivered += 1,
            Ok(ProjectResult::Skipped) => outcome.skipped += 1,
            Err(error) => {
                tracing::warn!(%project_id, %error, "weekly summary failed");
                outcome.failed += 1;
            }
        }
    }

    tracing::info!(
        delivered = outcome.delivered,
        skipped = outcome.skipped,
        failed = outcome.failed,
        "weekly report finished"
    );
    Ok(outcome)
}

async fn report_project(
    session: &Session,
    mailer: &Mailer,
    project: Project,
    week_ending: NaiveDate,
) -> Result<ProjectResult, ProjectError> {
    if project.stakeholders.is_empty() {
        tracing::info!(project_id = %project.project_id, "no stakeholders; summary skipped");
        return Ok(ProjectResult::Skipped);
    }

    let records = session.load_records_for(project).await?;
    let notice = render_weekly_summary(&summarize(&records), week_ending);

    match mailer
        .send(&records.project.stakeholders, &notice.subject, &notice.body)
        .await?
    {
        Delivery::Skipped => Ok(ProjectResult::Skipped),
        Delivery::Sent | Delivery::Logged => Ok(ProjectResult::Delivered),
    }
}
