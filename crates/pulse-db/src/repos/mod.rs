//! Repository modules implementing storage operations for all Pulse entities.
//!
//! Each module adds methods to `Session` via `impl Session` blocks.

pub mod artifact;
pub mod project;
pub mod pulse;
pub mod time_tracking;
pub mod weekly_update;
