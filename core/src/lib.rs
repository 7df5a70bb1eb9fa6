//! Staff work-tracking analytics.
//!
//! Pure components over in-memory records:
//!   - `aggregate`:  daily reports -> per-staff / per-task / overall metrics
//!   - `profile`:    reports -> staff performance profiles, team views
//!   - `allocation`: profiles + target -> recommended task distribution
//!
//! `store` is the SQLite collaborator that supplies reports and users.

pub mod aggregate;
pub mod allocation;
pub mod config;
pub mod error;
pub mod fixtures;
pub mod metrics;
pub mod profile;
pub mod report;
pub mod store;
pub mod types;
