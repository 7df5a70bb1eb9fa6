//! Daily task reports as submitted by staff.
//!
//! A report belongs to exactly one staff member and carries the tasks worked
//! that day. Nothing in this crate mutates a report after it is built; updates
//! and deletion go through the store.

use crate::types::{RecordId, StaffId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

// ── Task category ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TaskCategory {
    Create,
    Fix,
    Correction,
}

impl TaskCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create     => "create",
            Self::Fix        => "fix",
            Self::Correction => "correction",
        }
    }
}

impl fmt::Display for TaskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Quality score ────────────────────────────────────────────────────────────

/// Reviewer grade for a task: 1 (worst) to 5 (best), or not yet graded.
///
/// On the wire a grade is a bare integer and the ungraded marker is `"-"`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(try_from = "RawQuality", into = "RawQuality")]
pub enum QualityScore {
    #[default]
    Ungraded,
    Graded(u8),
}

pub const UNGRADED_MARKER: &str = "-";

impl QualityScore {
    /// Build a graded score, rejecting values outside 1..=5.
    pub fn graded(score: u8) -> Option<Self> {
        (1..=5).contains(&score).then_some(Self::Graded(score))
    }

    /// Numeric value, if graded.
    pub fn value(&self) -> Option<f64> {
        match self {
            Self::Graded(s) => Some(f64::from(*s)),
            Self::Ungraded  => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum RawQuality {
    Score(u8),
    Marker(String),
}

impl TryFrom<RawQuality> for QualityScore {
    type Error = String;

    fn try_from(raw: RawQuality) -> Result<Self, Self::Error> {
        match raw {
            RawQuality::Score(s) => {
                QualityScore::graded(s).ok_or_else(|| format!("quality score {s} outside 1..=5"))
            }
            RawQuality::Marker(m) if m == UNGRADED_MARKER => Ok(QualityScore::Ungraded),
            RawQuality::Marker(m) => Err(format!("unknown quality marker '{m}'")),
        }
    }
}

impl From<QualityScore> for RawQuality {
    fn from(q: QualityScore) -> Self {
        match q {
            QualityScore::Graded(s) => RawQuality::Score(s),
            QualityScore::Ungraded  => RawQuality::Marker(UNGRADED_MARKER.into()),
        }
    }
}

// ── Task record ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TaskRecord {
    #[serde(default)]
    pub task_name: String,
    pub category: TaskCategory,
    /// Hours spent. Not validated here; negative values are summed as-is.
    pub duration_hours: f64,
    #[serde(default)]
    pub quality: QualityScore,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub account_name: Option<String>,
    #[serde(default)]
    pub revision_workload: Option<String>,
    #[serde(default)]
    pub special_notes: Option<String>,
}

impl TaskRecord {
    pub fn new(task_name: impl Into<String>, category: TaskCategory, duration_hours: f64) -> Self {
        Self {
            task_name: task_name.into(),
            category,
            duration_hours,
            quality: QualityScore::Ungraded,
            completed: false,
            account_name: None,
            revision_workload: None,
            special_notes: None,
        }
    }

    pub fn with_quality(mut self, quality: QualityScore) -> Self {
        self.quality = quality;
        self
    }

    pub fn completed(mut self) -> Self {
        self.completed = true;
        self
    }

    pub fn for_account(mut self, account: impl Into<String>) -> Self {
        self.account_name = Some(account.into());
        self
    }
}

// ── Daily report ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailyReport {
    #[serde(default)]
    pub id: RecordId,
    pub staff_id: StaffId,
    pub date: NaiveDate,
    #[serde(default)]
    pub tasks: Vec<TaskRecord>,
    #[serde(default)]
    pub learnings: String,
    #[serde(default)]
    pub own_research_hours: f64,
    #[serde(default)]
    pub own_research_notes: String,
    #[serde(default)]
    pub competitor_research_hours: f64,
    #[serde(default)]
    pub competitor_research_notes: String,
}

impl DailyReport {
    /// New report with a freshly generated id.
    pub fn new(staff_id: impl Into<StaffId>, date: NaiveDate, tasks: Vec<TaskRecord>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            staff_id: staff_id.into(),
            date,
            tasks,
            learnings: String::new(),
            own_research_hours: 0.0,
            own_research_notes: String::new(),
            competitor_research_hours: 0.0,
            competitor_research_notes: String::new(),
        }
    }

    /// Sum of task durations in this report.
    pub fn total_hours(&self) -> f64 {
        self.tasks.iter().map(|t| t.duration_hours).sum()
    }
}

// ── Filtering ────────────────────────────────────────────────────────────────

/// Optional constraints for selecting reports. Date bounds are inclusive.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ReportFilter {
    pub start_date: Option<NaiveDate>,
    pub end_date:   Option<NaiveDate>,
    pub staff_id:   Option<StaffId>,
    /// Keeps reports containing at least one task with this name.
    pub task_name:  Option<String>,
}

impl ReportFilter {
    pub fn for_staff(staff_id: impl Into<StaffId>) -> Self {
        Self {
            staff_id: Some(staff_id.into()),
            ..Self::default()
        }
    }

    pub fn between(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start_date = Some(start);
        self.end_date = Some(end);
        self
    }

    pub fn matches(&self, report: &DailyReport) -> bool {
        if let Some(start) = self.start_date {
            if report.date < start {
                return false;
            }
        }
        if let Some(end) = self.end_date {
            if report.date > end {
                return false;
            }
        }
        if let Some(staff) = &self.staff_id {
            if &report.staff_id != staff {
                return false;
            }
        }
        if let Some(name) = &self.task_name {
            if !report.tasks.iter().any(|t| &t.task_name == name) {
                return false;
            }
        }
        true
    }

    pub fn apply<'a>(&self, reports: &'a [DailyReport]) -> Vec<&'a DailyReport> {
        reports.iter().filter(|r| self.matches(r)).collect()
    }
}
