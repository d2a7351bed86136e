//! # pulse-core
//!
//! Core types and pure aggregation logic for Pulse.
//!
//! This crate provides the foundational types shared across all Pulse crates:
//! - Entity structs for projects, pulses, weekly updates, artifacts, and time tracking
//! - Status enums and the fixed delivery rules (nine pulses per project)
//! - Caller roles for the authorization gate
//! - Dashboard aggregation and weekly summary rendering
//! - Validation of inbound payloads
//! - Cross-cutting error types
//! - HTTP response types

pub mod aggregate;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod ids;
pub mod responses;
pub mod role;
pub mod rules;
pub mod summary;
pub mod validate;
