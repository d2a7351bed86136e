//! Periodic reporter: weekly stakeholder summaries for every active project.

pub mod run;
pub mod schedule;
pub mod worker;

pub use run::{ReportOutcome, run_weekly_report};
pub use schedule::WeeklySchedule;
pub use worker::{ReportCommand, ReporterHandle, spawn_reporter, spawn_worker};
