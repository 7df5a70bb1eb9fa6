use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Roster is empty: nothing to allocate")]
    EmptyRoster,

    #[error("Target task count must be positive")]
    InvalidTarget,

    #[error("Invalid profile for staff '{staff_id}': {reason}")]
    InvalidProfile { staff_id: String, reason: String },

    #[error("No allocation possible: combined roster score is zero")]
    NoAllocationPossible,

    #[error("Report '{id}' not found")]
    ReportNotFound { id: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type TrackerResult<T> = Result<T, TrackerError>;
