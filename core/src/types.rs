//! Shared primitive types used across the tracker.

/// Opaque identifier of a staff member (the owning user of a report).
pub type StaffId = String;

/// Opaque identifier of a stored record (report or user).
pub type RecordId = String;

/// Working days assumed per month when projecting monthly hours.
pub const WORKING_DAYS_PER_MONTH: f64 = 22.0;

/// Load ratio the allocation engine aims for.
pub const OPTIMAL_LOAD: f64 = 0.75;
