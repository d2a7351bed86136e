//! Fixed delivery rules.
//!
//! These are hard business rules, not configuration.

/// Every project is delivered in exactly nine pulses, indexed 0 through 8.
pub const TOTAL_PULSES: u32 = 9;

/// Artifact content longer than this many characters is truncated in dashboards.
pub const ARTIFACT_PREVIEW_CHARS: usize = 200;

/// Marker appended to truncated artifact content.
pub const ELLIPSIS: &str = "...";

pub const INTAKE_PULSE_ID: u8 = 0;
pub const INTAKE_PULSE_NAME: &str = "Intake & Business Case";
pub const INTAKE_START_WEEK: &str = "Week 1";
pub const INTAKE_END_WEEK: &str = "Week 2";

/// Artifact type synthesized from submitted requirements.
pub const FRD_DRAFT: &str = "FRD Draft";
