//! Squad wellness readiness scoring and role-based access control.
//!
//! The [`access`] module answers "may this role do that" from fixed lookup tables, while
//! [`wellness`] turns daily player questionnaires into readiness scores, trends and
//! staff-facing summaries.

pub mod access;
pub mod config;
pub mod error;
pub mod telemetry;
pub mod wellness;
