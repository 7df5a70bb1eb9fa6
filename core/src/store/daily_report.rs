//! Store methods for daily reports.
//!
//! Tasks are kept as a JSON payload column. Deletion is logical: deleted
//! rows stay in the table but are never returned.

use crate::{
    error::{TrackerError, TrackerResult},
    report::{DailyReport, ReportFilter, TaskRecord},
    types::RecordId,
};
use chrono::NaiveDate;
use rusqlite::{params, OptionalExtension, Row};

use super::ReportStore;

const DATE_FORMAT: &str = "%Y-%m-%d";

const SELECT_REPORT: &str = "SELECT report_id, staff_id, report_date, tasks, learnings,
        own_research_hours, own_research_notes,
        competitor_research_hours, competitor_research_notes
     FROM daily_report";

struct ReportRow {
    id: String,
    staff_id: String,
    date: String,
    tasks: String,
    learnings: String,
    own_research_hours: f64,
    own_research_notes: String,
    competitor_research_hours: f64,
    competitor_research_notes: String,
}

impl ReportRow {
    fn read(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            staff_id: row.get(1)?,
            date: row.get(2)?,
            tasks: row.get(3)?,
            learnings: row.get(4)?,
            own_research_hours: row.get(5)?,
            own_research_notes: row.get(6)?,
            competitor_research_hours: row.get(7)?,
            competitor_research_notes: row.get(8)?,
        })
    }

    fn into_report(self) -> TrackerResult<DailyReport> {
        let date = NaiveDate::parse_from_str(&self.date, DATE_FORMAT).map_err(|e| {
            anyhow::anyhow!("report {}: bad date '{}': {e}", self.id, self.date)
        })?;
        let tasks: Vec<TaskRecord> = serde_json::from_str(&self.tasks)?;
        Ok(DailyReport {
            id: self.id,
            staff_id: self.staff_id,
            date,
            tasks,
            learnings: self.learnings,
            own_research_hours: self.own_research_hours,
            own_research_notes: self.own_research_notes,
            competitor_research_hours: self.competitor_research_hours,
            competitor_research_notes: self.competitor_research_notes,
        })
    }
}

fn date_key(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

impl ReportStore {
    /// Persist a new report. An empty id is replaced with a fresh UUID.
    /// Returns the stored id.
    pub fn insert_report(&self, report: &DailyReport) -> TrackerResult<RecordId> {
        let id = if report.id.is_empty() {
            uuid::Uuid::new_v4().to_string()
        } else {
            report.id.clone()
        };

        self.conn.execute(
            "INSERT INTO daily_report (
                report_id, staff_id, report_date, tasks, learnings,
                own_research_hours, own_research_notes,
                competitor_research_hours, competitor_research_notes
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                id,
                report.staff_id,
                date_key(report.date),
                serde_json::to_string(&report.tasks)?,
                report.learnings,
                report.own_research_hours,
                report.own_research_notes,
                report.competitor_research_hours,
                report.competitor_research_notes,
            ],
        )?;
        log::debug!("stored report {id} for {} on {}", report.staff_id, report.date);
        Ok(id)
    }

    /// Replace the contents of an existing, non-deleted report.
    pub fn update_report(&self, report: &DailyReport) -> TrackerResult<()> {
        let changed = self.conn.execute(
            "UPDATE daily_report SET
                staff_id = ?2, report_date = ?3, tasks = ?4, learnings = ?5,
                own_research_hours = ?6, own_research_notes = ?7,
                competitor_research_hours = ?8, competitor_research_notes = ?9
             WHERE report_id = ?1 AND deleted = 0",
            params![
                report.id,
                report.staff_id,
                date_key(report.date),
                serde_json::to_string(&report.tasks)?,
                report.learnings,
                report.own_research_hours,
                report.own_research_notes,
                report.competitor_research_hours,
                report.competitor_research_notes,
            ],
        )?;
        if changed == 0 {
            return Err(TrackerError::ReportNotFound { id: report.id.clone() });
        }
        Ok(())
    }

    /// Mark a report deleted. It disappears from every query.
    pub fn delete_report(&self, report_id: &str) -> TrackerResult<()> {
        let changed = self.conn.execute(
            "UPDATE daily_report SET deleted = 1 WHERE report_id = ?1 AND deleted = 0",
            params![report_id],
        )?;
        if changed == 0 {
            return Err(TrackerError::ReportNotFound { id: report_id.to_string() });
        }
        log::debug!("deleted report {report_id}");
        Ok(())
    }

    pub fn report(&self, report_id: &str) -> TrackerResult<Option<DailyReport>> {
        let row = self
            .conn
            .query_row(
                &format!("{SELECT_REPORT} WHERE report_id = ?1 AND deleted = 0"),
                params![report_id],
                ReportRow::read,
            )
            .optional()?;
        row.map(ReportRow::into_report).transpose()
    }

    /// Reports matching `filter`, ordered by date then id.
    ///
    /// Staff and date bounds are applied in SQL; the task-name constraint
    /// needs the decoded task list and is applied afterwards.
    pub fn reports(&self, filter: &ReportFilter) -> TrackerResult<Vec<DailyReport>> {
        let mut stmt = self.conn.prepare(&format!(
            "{SELECT_REPORT}
             WHERE deleted = 0
               AND (?1 IS NULL OR staff_id = ?1)
               AND (?2 IS NULL OR report_date >= ?2)
               AND (?3 IS NULL OR report_date <= ?3)
             ORDER BY report_date, report_id"
        ))?;

        let rows = stmt
            .query_map(
                params![
                    filter.staff_id,
                    filter.start_date.map(date_key),
                    filter.end_date.map(date_key),
                ],
                ReportRow::read,
            )?
            .collect::<Result<Vec<_>, _>>()?;

        let mut reports = Vec::with_capacity(rows.len());
        for row in rows {
            let report = row.into_report()?;
            if filter.matches(&report) {
                reports.push(report);
            }
        }
        Ok(reports)
    }

    /// Number of live (non-deleted) reports.
    pub fn report_count(&self) -> TrackerResult<i64> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM daily_report WHERE deleted = 0",
            [],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}
