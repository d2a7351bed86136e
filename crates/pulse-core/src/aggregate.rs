//! Dashboard aggregation.
//!
//! Everything here is a pure function of a project's loaded records. The store
//! loads a [`ProjectRecords`] and hands it to [`compute_dashboard`] or
//! [`crate::summary::summarize`].

use crate::entities::{Artifact, Project, Pulse, TimeTracking, WeeklyUpdate};
use crate::enums::PulseStatus;
use crate::responses::{DashboardStats, DashboardView, TimeTrackingView};
use crate::rules::{ARTIFACT_PREVIEW_CHARS, ELLIPSIS, TOTAL_PULSES};

/// A project together with every record it owns.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectRecords {
    pub project: Project,
    pub pulses: Vec<Pulse>,
    pub updates: Vec<WeeklyUpdate>,
    pub artifacts: Vec<Artifact>,
    pub time_tracking: Vec<TimeTracking>,
}

/// Round half away from zero to one decimal place.
#[must_use]
pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Share of the nine pulses that are completed, as a percentage.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn progress_percentage(completed_pulses: usize) -> f64 {
    round_one_decimal(completed_pulses as f64 / f64::from(TOTAL_PULSES) * 100.0)
}

/// Variance as a percentage of planned hours. Zero when nothing is planned.
#[must_use]
pub fn variance_percentage(tracking: &TimeTracking) -> f64 {
    if tracking.planned_hours > 0.0 {
        round_one_decimal(tracking.variance / tracking.planned_hours * 100.0)
    } else {
        0.0
    }
}

/// Truncate artifact content for display.
///
/// Content of at most [`ARTIFACT_PREVIEW_CHARS`] characters is returned as is.
#[must_use]
pub fn truncate_content(content: &str) -> String {
    match content.char_indices().nth(ARTIFACT_PREVIEW_CHARS) {
        Some((cut, _)) => format!("{}{ELLIPSIS}", &content[..cut]),
        None => content.to_string(),
    }
}

#[must_use]
pub fn count_pulses(pulses: &[Pulse], status: PulseStatus) -> usize {
    pulses.iter().filter(|p| p.status == status).count()
}

#[must_use]
pub fn total_hours(updates: &[WeeklyUpdate]) -> f64 {
    updates.iter().map(|u| u.hours_spent).sum()
}

#[must_use]
pub fn total_blockers(updates: &[WeeklyUpdate]) -> usize {
    updates.iter().map(|u| u.blockers.len()).sum()
}

/// Build the dashboard for a project. Stored records are not modified.
#[must_use]
pub fn compute_dashboard(records: &ProjectRecords) -> DashboardView {
    let completed_pulses = count_pulses(&records.pulses, PulseStatus::Completed);
    let in_progress_pulses = count_pulses(&records.pulses, PulseStatus::InProgress);

    let statistics = DashboardStats {
        total_pulses: TOTAL_PULSES,
        completed_pulses,
        in_progress_pulses,
        progress_percentage: progress_percentage(completed_pulses),
        total_hours: total_hours(&records.updates),
        total_blockers: total_blockers(&records.updates),
    };

    let artifacts = records
        .artifacts
        .iter()
        .map(|artifact| Artifact {
            content: truncate_content(&artifact.content),
            ..artifact.clone()
        })
        .collect();

    let time_tracking = records
        .time_tracking
        .iter()
        .map(|tracking| TimeTrackingView {
            variance_percentage: variance_percentage(tracking),
            tracking: tracking.clone(),
        })
        .collect();

    DashboardView {
        project: records.project.clone(),
        pulses: records.pulses.clone(),
        statistics,
        updates: records.updates.clone(),
        artifacts,
        time_tracking,
    }
}
