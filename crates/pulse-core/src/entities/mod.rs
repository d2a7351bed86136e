//! Entity structs for all Pulse domain objects.
//!
//! Each entity maps to a table in the libSQL database. Request payloads that
//! create an entity (`NewProject`, `NewWeeklyUpdate`) live next to it.

mod artifact;
mod project;
mod pulse;
mod time_tracking;
mod weekly_update;

pub use artifact::{Artifact, NewArtifact};
pub use project::{NewProject, Project, RequirementsSubmission};
pub use pulse::{NewPulse, Pulse};
pub use time_tracking::{PlannedHours, TimeTracking};
pub use weekly_update::{NewWeeklyUpdate, WeeklyUpdate};
