//! SQLite persistence for users and daily reports.
//!
//! RULE: Only the store talks to the database.
//! Aggregation and simulation never see a connection; callers fetch
//! reports here and hand plain values to the pure components.

mod daily_report;
mod user;

pub use user::{User, UserRole};

use crate::error::TrackerResult;
use rusqlite::Connection;

pub struct ReportStore {
    conn: Connection,
}

impl ReportStore {
    /// Open (or create) the tracker database at `path`.
    pub fn open(path: &str) -> TrackerResult<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        Ok(Self { conn })
    }

    /// Open an in-memory database (used in tests).
    pub fn in_memory() -> TrackerResult<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self { conn })
    }

    /// Create tables if they do not exist.
    pub fn migrate(&self) -> TrackerResult<()> {
        self.conn
            .execute_batch(include_str!("../migrations/001_reports.sql"))?;
        Ok(())
    }
}
