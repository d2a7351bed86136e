use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tokio::net::TcpListener;

use pulse_config::PulseConfig;
use pulse_db::PulseDb;
use pulse_notify::Mailer;
use pulse_server::reporter::{WeeklySchedule, spawn_reporter, spawn_worker};
use pulse_server::{AppState, build_router};

mod cli;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("pulse error: {error:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let config = PulseConfig::load_with_dotenv(cli.config.as_deref())
        .context("failed to load configuration")?;
    if config.server.uses_default_secret() {
        tracing::warn!(
            "server.shared_secret is the built-in default; set PULSE_SERVER__SHARED_SECRET"
        );
    }

    let db = PulseDb::open_local(&config.database.path)
        .await
        .with_context(|| format!("failed to open database at {}", config.database.path))?;
    let mailer = Mailer::from_config(&config.mail).context("failed to set up mail transport")?;

    match cli.command {
        cli::Commands::Serve { bind, no_reporter } => {
            serve(config, db, mailer, bind, no_reporter).await
        }
        cli::Commands::Report => report(db, mailer).await,
    }
}

async fn serve(
    config: PulseConfig,
    db: PulseDb,
    mailer: Mailer,
    bind: Option<String>,
    no_reporter: bool,
) -> anyhow::Result<()> {
    let db = Arc::new(db);

    let reporter = if config.reporter.enabled && !no_reporter {
        let schedule = WeeklySchedule::from_config(&config.reporter)?;
        Some(spawn_reporter(
            db.clone(),
            mailer.clone(),
            schedule,
            Duration::from_secs(config.reporter.check_interval_secs),
        ))
    } else {
        tracing::info!("weekly reporter disabled");
        None
    };

    let state = AppState::new(db, mailer, &config.server.shared_secret);
    let app = build_router(state);

    let bind = bind.unwrap_or(config.server.bind);
    let listener = TcpListener::bind(&bind)
        .await
        .with_context(|| format!("failed to bind {bind}"))?;
    tracing::info!(%bind, "pulse listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server failed")?;

    if let Some(reporter) = reporter {
        reporter.shutdown();
    }
    tracing::info!("pulse stopped");
    Ok(())
}

async fn report(db: PulseDb, mailer: Mailer) -> anyhow::Result<()> {
    let today = chrono::Local::now().date_naive();
    let worker = spawn_worker(Arc::new(db), mailer);
    let outcome = worker.run_now(today).await;
    worker.shutdown();
    let outcome = outcome.context("weekly report failed")?;
    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(())
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::error!(%error, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "warn"
    } else if verbose {
        "debug"
    } else {
        "info"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("PULSE_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
