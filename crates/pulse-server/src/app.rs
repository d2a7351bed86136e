//! Shared application state and router assembly.

use std::sync::Arc;

use axum::Router;
use axum::middleware::from_fn;
use axum::routing::{get, post, put};

use pulse_db::PulseDb;
use pulse_notify::Mailer;

use crate::http::{handlers, request_log};

/// State handed to every request handler.
///
/// Cloned per request; the database handle is shared, sessions are not.
#[derive(Clone)]
pub struct AppState {
    db: Arc<PulseDb>,
    mailer: Mailer,
    shared_secret: Arc<str>,
}

impl AppState {
    #[must_use]
    pub fn new(db: Arc<PulseDb>, mailer: Mailer, shared_secret: &str) -> Self {
        Self {
            db,
            mailer,
            shared_secret: Arc::from(shared_secret),
        }
    }

    #[must_use]
    pub fn db(&self) -> &PulseDb {
        &self.db
    }

    #[must_use]
    pub const fn mailer(&self) -> &Mailer {
        &self.mailer
    }

    #[must_use]
    pub fn shared_secret(&self) -> &str {
        &self.shared_secret
    }
}

/// Paths listed by `GET /`.
pub const ENDPOINTS: [&str; 6] = [
    "/",
    "/projects",
    "/requirements",
    "/weekly-update",
    "/dashboard/{project_id}",
    "/time-tracking/plan",
];

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route(
            "/projects",
            get(handlers::list_projects).post(handlers::create_project),
        )
        .route("/requirements", post(handlers::submit_requirements))
        .route("/weekly-update", post(handlers::submit_weekly_update))
        .route("/dashboard/:project_id", get(handlers::dashboard))
        .route("/time-tracking/plan", put(handlers::plan_hours))
        .layer(from_fn(request_log::log_request))
        .with_state(state)
}
