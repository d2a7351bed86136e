//! # pulse-server
//!
//! HTTP surface and background reporter for Pulse.
//!
//! - [`app`]: shared state and the axum router
//! - [`auth`]: HTTP Basic credential check and caller roles
//! - [`http`]: endpoint handlers and the JSON error contract
//! - [`reporter`]: weekly stakeholder summaries on a timer

pub mod app;
pub mod auth;
pub mod http;
pub mod reporter;

pub use app::{AppState, build_router};
pub use http::error::ApiError;
