//! Report aggregation into hours per category and average graded quality.
//!
//! Three views over the same accumulator:
//!   1. per staff member (`analyze_by_staff`)
//!   2. per task name    (`analyze_by_task`)
//!   3. overall          (`summarize`)
//!
//! Sums are accumulated at full precision and rounded to one decimal only
//! when converted to `AnalyticsData`. Every function accepts any iterator of
//! report references, so filtered selections can be passed without cloning.

use crate::{
    metrics::round1,
    report::{DailyReport, TaskCategory, TaskRecord},
    types::StaffId,
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

pub const UNKNOWN_TASK: &str = "Unknown task";

// ── Public types ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AnalyticsData {
    pub total_hours: f64,
    pub create_hours: f64,
    pub fix_hours: f64,
    pub correction_hours: f64,
    /// Mean over graded tasks only; 0 when nothing is graded.
    pub average_quality: f64,
    pub task_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StaffAnalytics {
    pub staff_id: StaffId,
    pub staff_name: String,
    #[serde(flatten)]
    pub metrics: AnalyticsData,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TaskAnalytics {
    pub task_name: String,
    #[serde(flatten)]
    pub metrics: AnalyticsData,
}

// ── Accumulator ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default)]
struct MetricAccumulator {
    total_hours: f64,
    create_hours: f64,
    fix_hours: f64,
    correction_hours: f64,
    quality_sum: f64,
    quality_count: usize,
    task_count: usize,
}

impl MetricAccumulator {
    fn add(&mut self, task: &TaskRecord) {
        let duration = task.duration_hours;
        self.total_hours += duration;

        match task.category {
            TaskCategory::Create     => self.create_hours += duration,
            TaskCategory::Fix        => self.fix_hours += duration,
            TaskCategory::Correction => self.correction_hours += duration,
        }

        if let Some(score) = task.quality.value() {
            self.quality_sum += score;
            self.quality_count += 1;
        }

        self.task_count += 1;
    }

    fn finish(&self) -> AnalyticsData {
        let average_quality = if self.quality_count > 0 {
            round1(self.quality_sum / self.quality_count as f64)
        } else {
            0.0
        };

        AnalyticsData {
            total_hours: round1(self.total_hours),
            create_hours: round1(self.create_hours),
            fix_hours: round1(self.fix_hours),
            correction_hours: round1(self.correction_hours),
            average_quality,
            task_count: self.task_count,
        }
    }
}

// ── Aggregations ─────────────────────────────────────────────────────────────

/// Display label used when no directory name is known for a staff id.
pub fn default_staff_name(staff_id: &str) -> String {
    let short: String = staff_id.chars().take(8).collect();
    format!("Staff {short}")
}

/// One record per distinct staff id, sorted by staff id.
pub fn analyze_by_staff<'a, I>(reports: I) -> Vec<StaffAnalytics>
where
    I: IntoIterator<Item = &'a DailyReport>,
{
    analyze_by_staff_named(reports, &HashMap::new())
}

/// Like `analyze_by_staff`, taking display names from `names` when present.
pub fn analyze_by_staff_named<'a, I>(
    reports: I,
    names: &HashMap<StaffId, String>,
) -> Vec<StaffAnalytics>
where
    I: IntoIterator<Item = &'a DailyReport>,
{
    let mut by_staff: BTreeMap<&str, MetricAccumulator> = BTreeMap::new();

    for report in reports {
        let acc = by_staff.entry(report.staff_id.as_str()).or_default();
        for task in &report.tasks {
            acc.add(task);
        }
    }

    by_staff
        .into_iter()
        .map(|(staff_id, acc)| StaffAnalytics {
            staff_id: staff_id.to_string(),
            staff_name: names
                .get(staff_id)
                .cloned()
                .unwrap_or_else(|| default_staff_name(staff_id)),
            metrics: acc.finish(),
        })
        .collect()
}

/// One record per distinct task name, sorted by name.
/// Tasks with an empty name share the `UNKNOWN_TASK` bucket.
pub fn analyze_by_task<'a, I>(reports: I) -> Vec<TaskAnalytics>
where
    I: IntoIterator<Item = &'a DailyReport>,
{
    let mut by_task: BTreeMap<&str, MetricAccumulator> = BTreeMap::new();

    for task in reports.into_iter().flat_map(|r| r.tasks.iter()) {
        let name = if task.task_name.is_empty() {
            UNKNOWN_TASK
        } else {
            task.task_name.as_str()
        };
        by_task.entry(name).or_default().add(task);
    }

    by_task
        .into_iter()
        .map(|(task_name, acc)| TaskAnalytics {
            task_name: task_name.to_string(),
            metrics: acc.finish(),
        })
        .collect()
}

/// Metrics over every task of every report. Empty input yields all zeros.
pub fn summarize<'a, I>(reports: I) -> AnalyticsData
where
    I: IntoIterator<Item = &'a DailyReport>,
{
    let mut acc = MetricAccumulator::default();
    for task in reports.into_iter().flat_map(|r| r.tasks.iter()) {
        acc.add(task);
    }
    acc.finish()
}
