//! ID prefix constants.
//!
//! Projects carry caller-assigned IDs. Weekly updates and artifacts get a
//! generated `{prefix}-{8 hex chars}` ID from the store.

pub const PREFIX_UPDATE: &str = "upd";
pub const PREFIX_ARTIFACT: &str = "art";
