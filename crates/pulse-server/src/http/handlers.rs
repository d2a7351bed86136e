//! Endpoint handlers.
//!
//! Each handler opens its own store session and drops it on return. Role
//! checks run before the session is touched, so a rejected caller writes
//! nothing.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use pulse_core::entities::{
    NewProject, NewWeeklyUpdate, PlannedHours, Project, RequirementsSubmission, TimeTracking,
};
use pulse_core::responses::{
    DashboardView, ProjectBrief, ProjectListing, RequirementsAccepted, RootStatus,
    WeeklyUpdateAccepted,
};
use pulse_core::summary::render_requirements_notice;

use crate::app::{AppState, ENDPOINTS};
use crate::auth::Caller;
use crate::http::error::ApiError;

pub async fn root() -> Json<RootStatus> {
    Json(RootStatus {
        service: "pulse".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        status: "ok".to_string(),
        endpoints: ENDPOINTS.iter().map(ToString::to_string).collect(),
    })
}

pub async fn list_projects(
    State(state): State<AppState>,
    _caller: Caller,
) -> Result<Json<ProjectListing>, ApiError> {
    let session = state.db().session().await?;
    let projects = session.list_projects().await?;
    Ok(Json(ProjectListing {
        count: projects.len(),
        projects: projects.iter().map(ProjectBrief::from).collect(),
    }))
}

pub async fn create_project(
    State(state): State<AppState>,
    caller: Caller,
    payload: Result<Json<NewProject>, JsonRejection>,
) -> Result<(StatusCode, Json<Project>), ApiError> {
    caller.role.require_business_analyst()?;
    let Json(new) = payload?;
    new.validate()?;

    let session = state.db().session().await?;
    let project = session.create_project(&new).await?;
    tracing::info!(project_id = %project.project_id, "project created");
    Ok((StatusCode::CREATED, Json(project)))
}

pub async fn submit_requirements(
    State(state): State<AppState>,
    caller: Caller,
    payload: Result<Json<RequirementsSubmission>, JsonRejection>,
) -> Result<Json<RequirementsAccepted>, ApiError> {
    caller.role.require_business_analyst()?;
    let Json(submission) = payload?;
    submission.validate()?;

    let session = state.db().session().await?;
    let intake = session
        .intake_requirements(&submission.project_id, &submission.requirements)
        .await?;
    drop(session);

    // Committed above; a failed notice must not undo it.
    if let Some(first) = intake.project.stakeholders.first() {
        let notice = render_requirements_notice(
            &intake.project.project_id,
            &intake.project.name,
            submission.requirements.len(),
        );
        if let Err(e) = state
            .mailer()
            .send(std::slice::from_ref(first), &notice.subject, &notice.body)
            .await
        {
            tracing::warn!(
                project_id = %intake.project.project_id,
                error = %e,
                "requirements notice failed"
            );
        }
    }

    Ok(Json(intake.accepted))
}

pub async fn submit_weekly_update(
    State(state): State<AppState>,
    caller: Caller,
    payload: Result<Json<NewWeeklyUpdate>, JsonRejection>,
) -> Result<Json<WeeklyUpdateAccepted>, ApiError> {
    let Json(update) = payload?;
    caller.role.require_team(&update.team)?;
    update.validate()?;

    let session = state.db().session().await?;
    let accepted = session.record_weekly_update(&update).await?;
    Ok(Json(accepted))
}

pub async fn dashboard(
    State(state): State<AppState>,
    _caller: Caller,
    Path(project_id): Path<String>,
) -> Result<Json<DashboardView>, ApiError> {
    let session = state.db().session().await?;
    Ok(Json(session.dashboard(&project_id).await?))
}

pub async fn plan_hours(
    State(state): State<AppState>,
    caller: Caller,
    payload: Result<Json<PlannedHours>, JsonRejection>,
) -> Result<Json<TimeTracking>, ApiError> {
    caller.role.require_business_analyst()?;
    let Json(plan) = payload?;
    plan.validate()?;

    let session = state.db().session().await?;
    Ok(Json(session.plan_hours(&plan).await?))
}
