//! Notification text: the weekly project summary and the requirements notice.

use std::fmt::Write as _;

use chrono::NaiveDate;
use serde::Serialize;

use crate::aggregate::{ProjectRecords, count_pulses, progress_percentage, total_blockers, total_hours};
use crate::enums::PulseStatus;
use crate::rules::TOTAL_PULSES;

/// Subject and plain-text body of an outgoing notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub subject: String,
    pub body: String,
}

/// Weekly figures for one project.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectSummary {
    pub project_id: String,
    pub name: String,
    pub completed_pulses: usize,
    pub progress_percentage: f64,
    pub total_hours: f64,
    pub total_blockers: usize,
    pub teams: Vec<String>,
}

#[must_use]
pub fn summarize(records: &ProjectRecords) -> ProjectSummary {
    let completed_pulses = count_pulses(&records.pulses, PulseStatus::Completed);
    ProjectSummary {
        project_id: records.project.project_id.clone(),
        name: records.project.name.clone(),
        completed_pulses,
        progress_percentage: progress_percentage(completed_pulses),
        total_hours: total_hours(&records.updates),
        total_blockers: total_blockers(&records.updates),
        teams: records.project.teams.clone(),
    }
}

/// Render the weekly summary sent to every stakeholder of a project.
#[must_use]
pub fn render_weekly_summary(summary: &ProjectSummary, week_ending: NaiveDate) -> Notice {
    let subject = format!(
        "Weekly summary: {} ({}) - week ending {week_ending}",
        summary.name, summary.project_id
    );

    let teams = if summary.teams.is_empty() {
        "none".to_string()
    } else {
        summary.teams.join(", ")
    };

    let mut body = String::new();
    let _ = writeln!(body, "Project: {} ({})", summary.name, summary.project_id);
    let _ = writeln!(
        body,
        "Progress: {}/{TOTAL_PULSES} pulses completed ({:.1}%)",
        summary.completed_pulses, summary.progress_percentage
    );
    let _ = writeln!(body, "Hours logged: {:.1}", summary.total_hours);
    let _ = writeln!(body, "Open blockers: {}", summary.total_blockers);
    let _ = write!(body, "Teams: {teams}");

    Notice { subject, body }
}

/// Render the notice sent to the first stakeholder after requirements intake.
#[must_use]
pub fn render_requirements_notice(project_id: &str, project_name: &str, count: usize) -> Notice {
    let noun = if count == 1 { "requirement" } else { "requirements" };
    Notice {
        subject: format!("Requirements received: {project_name} ({project_id})"),
        body: format!(
            "{count} {noun} submitted for {project_name}. \
             An FRD draft has been generated and the intake pulse is in progress."
        ),
    }
}

/// Build the FRD draft body: one numbered line per requirement, starting at 1.
#[must_use]
pub fn requirements_document(requirements: &[String]) -> String {
    requirements
        .iter()
        .enumerate()
        .map(|(i, req)| format!("Requirement {}: {req}", i + 1))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn summary() -> ProjectSummary {
        ProjectSummary {
            project_id: "PRJ-1".into(),
            name: "Claims portal".into(),
            completed_pulses: 3,
            progress_percentage: 33.3,
            total_hours: 42.5,
            total_blockers: 2,
            teams: vec!["DEV".into(), "QA".into()],
        }
    }

    #[test]
    fn requirements_are_numbered_from_one() {
        let doc = requirements_document(&["A".into(), "B".into()]);
        assert_eq!(doc, "Requirement 1: A\nRequirement 2: B");
    }

    #[test]
    fn no_requirements_gives_empty_document() {
        assert_eq!(requirements_document(&[]), "");
    }

    #[test]
    fn weekly_summary_lists_figures() {
        let week = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
        let notice = render_weekly_summary(&summary(), week);
        assert_eq!(
            notice.subject,
            "Weekly summary: Claims portal (PRJ-1) - week ending 2026-10-16"
        );
        assert_eq!(
            notice.body,
            "Project: Claims portal (PRJ-1)\n\
             Progress: 3/9 pulses completed (33.3%)\n\
             Hours logged: 42.5\n\
             Open blockers: 2\n\
             Teams: DEV, QA"
        );
    }

    #[test]
    fn requirements_notice_mentions_count() {
        let notice = render_requirements_notice("PRJ-1", "Claims portal", 1);
        assert!(notice.body.starts_with("1 requirement submitted"));
        let notice = render_requirements_notice("PRJ-1", "Claims portal", 4);
        assert!(notice.body.starts_with("4 requirements submitted"));
    }
}
