//! Timer loop and report worker.
//!
//! The timer only decides *when*; it sends a [`ReportCommand`] over a channel
//! and a single worker performs the run. Manual runs (`pulse report`) go
//! through the same worker, so runs never overlap.

use std::sync::Arc;
use std::time::Duration;

use chrono::{Local, NaiveDate};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use pulse_db::PulseDb;
use pulse_notify::Mailer;

use super::run::{ReportOutcome, run_weekly_report};
use super::schedule::WeeklySchedule;

/// Queue depth for pending run requests.
const COMMAND_BUFFER: usize = 4;

#[derive(Debug)]
pub enum ReportCommand {
    /// Scheduled fire from the timer.
    Scheduled { week_ending: NaiveDate },
    /// Explicit request; the outcome is sent back on `reply`.
    RunNow {
        week_ending: NaiveDate,
        reply: oneshot::Sender<Option<ReportOutcome>>,
    },
}

/// Handle to the running reporter tasks.
pub struct ReporterHandle {
    commands: mpsc::Sender<ReportCommand>,
    timer: Option<JoinHandle<()>>,
    worker: JoinHandle<()>,
}

impl ReporterHandle {
    /// Queue an immediate run and wait for its outcome.
    ///
    /// Returns `None` if the worker is gone or the run could not list projects.
    pub async fn run_now(&self, week_ending: NaiveDate) -> Option<ReportOutcome> {
        let (reply, rx) = oneshot::channel();
        self.commands
            .send(ReportCommand::RunNow { week_ending, reply })
            .await
            .ok()?;
        rx.await.ok().flatten()
    }

    /// Stop the timer and the worker. An in-flight run is abandoned.
    pub fn shutdown(self) {
        if let Some(timer) = self.timer {
            timer.abort();
        }
        self.worker.abort();
    }
}

/// Start the report worker alone. Runs happen only through
/// [`ReporterHandle::run_now`].
pub fn spawn_worker(db: Arc<PulseDb>, mailer: Mailer) -> ReporterHandle {
    let (commands, rx) = mpsc::channel(COMMAND_BUFFER);
    let worker = tokio::spawn(worker_loop(db, mailer, rx));
    ReporterHandle {
        commands,
        timer: None,
        worker,
    }
}

/// Start the timer loop and the report worker.
pub fn spawn_reporter(
    db: Arc<PulseDb>,
    mailer: Mailer,
    schedule: WeeklySchedule,
    check_interval: Duration,
) -> ReporterHandle {
    let mut handle = spawn_worker(db, mailer);
    handle.timer = Some(tokio::spawn(timer_loop(
        schedule,
        check_interval,
        handle.commands.clone(),
    )));
    tracing::info!(
        weekday = %schedule.weekday,
        at = %schedule.at,
        interval_secs = check_interval.as_secs(),
        "reporter started"
    );
    handle
}

async fn timer_loop(
    schedule: WeeklySchedule,
    check_interval: Duration,
    commands: mpsc::Sender<ReportCommand>,
) {
    let mut ticker = tokio::time::interval(check_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut last_fired: Option<NaiveDate> = None;

    loop {
        ticker.tick().await;
        let now = Local::now().naive_local();
        if !schedule.is_due(now, last_fired) {
            continue;
        }
        last_fired = Some(now.date());
        let command = ReportCommand::Scheduled {
            week_ending: now.date(),
        };
        if commands.send(command).await.is_err() {
            tracing::error!("report worker stopped; timer exiting");
            return;
        }
    }
}

async fn worker_loop(db: Arc<PulseDb>, mailer: Mailer, mut rx: mpsc::Receiver<ReportCommand>) {
    while let Some(command) = rx.recv().await {
        let (week_ending, reply) = match command {
            ReportCommand::Scheduled { week_ending } => (week_ending, None),
            ReportCommand::RunNow { week_ending, reply } => (week_ending, Some(reply)),
        };

        tracing::debug!(%week_ending, manual = reply.is_some(), "report run starting");
        let outcome = match run_weekly_report(&db, &mailer, week_ending).await {
            Ok(outcome) => Some(outcome),
            Err(error) => {
                tracing::error!(%error, "weekly report could not start");
                None
            }
        };

        if let Some(reply) = reply {
            let _ = reply.send(outcome);
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveTime;
    use tempfile::TempDir;

    use pulse_core::entities::NewProject;
    use pulse_core::enums::ProjectStatus;
    use pulse_notify::Outbox;

    use super::*;

    #[tokio::test]
    async fn run_now_goes_through_the_worker() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("pulse.db");
        let db = Arc::new(PulseDb::open_local(path.to_str().unwrap()).await.unwrap());
        db.session()
            .await
            .unwrap()
            .create_project(&NewProject {
                project_id: "A".into(),
                name: "Alpha".into(),
                start_date: NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
                end_date: NaiveDate::from_ymd_opt(2026, 3, 27).unwrap(),
                methodology: "Agile".into(),
                teams: Vec::new(),
                status: ProjectStatus::Active,
                requirements: Vec::new(),
                stakeholders: vec!["sponsor@example.com".into()],
            })
            .await
            .unwrap();

        let outbox = Outbox::new();
        // Never due during the test: tomorrow, late in the evening.
        let schedule = WeeklySchedule {
            weekday: chrono::Datelike::weekday(&Local::now().date_naive()).succ(),
            at: NaiveTime::from_hms_opt(23, 59, 0).unwrap(),
        };
        let handle = spawn_reporter(
            db,
            Mailer::Recording(outbox.clone()),
            schedule,
            Duration::from_secs(3600),
        );

        let week = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
        let first = handle.run_now(week).await.unwrap();
        let second = handle.run_now(week).await.unwrap();
        assert_eq!(first.delivered, 1);
        assert_eq!(second.delivered, 1);
        assert_eq!(outbox.messages().len(), 2);

        handle.shutdown();
    }

    #[tokio::test]
    async fn worker_alone_serves_manual_runs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("pulse.db");
        let db = Arc::new(PulseDb::open_local(path.to_str().unwrap()).await.unwrap());

        let outbox = Outbox::new();
        let handle = spawn_worker(db, Mailer::Recording(outbox.clone()));
        assert!(handle.timer.is_none());

        let week = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
        let outcome = handle.run_now(week).await.unwrap();
        assert_eq!(outcome.delivered, 0);
        assert_eq!(outcome.skipped, 0);
        assert!(outbox.messages().is_empty());

        handle.shutdown();
    }
}
