//! Staff performance profiles: capacity and track record snapshots.
//!
//! A profile is either derived from a staff member's reports by
//! `ProfileBuilder` or supplied directly (see `fixtures`). The simulator only
//! reads profiles; composite scores are computed on demand and never stored.

use crate::{
    config::ProfileConfig,
    metrics::{clamp_score, clamp_unit, mean, ratio_or, std_dev},
    report::{DailyReport, TaskCategory},
    types::{StaffId, OPTIMAL_LOAD, WORKING_DAYS_PER_MONTH},
};
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

pub const SPECIALTY_NEW_PRODUCTION: &str = "New production";
pub const SPECIALTY_REVISION: &str = "Revision work";
pub const SPECIALTY_MULTITASKING: &str = "Multitasking";
pub const GENERIC_SPECIALTIES: [&str; 3] = ["Production", "Task execution", "General duties"];

/// Stability score given to a staff member with no working days on record.
const NEUTRAL_STABILITY: f64 = 50.0;

// ── Profile ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StaffPerformanceProfile {
    pub staff_id: StaffId,
    pub staff_name: String,
    /// Hours per calendar day, oldest first, zero-filled.
    pub daily_hours: Vec<f64>,
    pub daily_work_hours: f64,
    /// Capacity ceiling in hours per month.
    pub monthly_hours_available: f64,
    pub monthly_deliveries: u32,
    pub avg_time_per_task: f64,
    /// 1–5 scale.
    pub avg_quality: f64,
    /// Fraction of attempted tasks completed, [0, 1].
    pub efficiency: f64,
    /// Fraction of working days above the high-workload mark, [0, 1].
    pub fatigue_index: f64,
    pub specialties: Vec<String>,
}

impl StaffPerformanceProfile {
    /// Hours currently worked per month at the average daily rate.
    pub fn current_monthly_hours(&self) -> f64 {
        self.daily_work_hours * WORKING_DAYS_PER_MONTH
    }

    /// Current monthly hours as a fraction of capacity.
    pub fn current_load(&self) -> f64 {
        self.current_monthly_hours() / self.monthly_hours_available
    }

    /// Capacity hours not yet used this month.
    pub fn capacity_remaining(&self) -> f64 {
        self.monthly_hours_available - self.current_monthly_hours()
    }

    /// Tasks the staff member could finish at full capacity and current efficiency.
    pub fn potential_max_tasks(&self) -> u32 {
        ((self.monthly_hours_available * self.efficiency) / self.avg_time_per_task)
            .floor()
            .max(0.0) as u32
    }

    /// Faster average task time scores higher; 2 h per task and below is 100.
    pub fn speed_score(&self) -> f64 {
        clamp_score((10.0 / self.avg_time_per_task) * 20.0)
    }

    pub fn quality_score(&self) -> f64 {
        clamp_score((self.avg_quality / 5.0) * 100.0)
    }

    /// Lower spread of daily hours on working days scores higher.
    pub fn stability_score(&self) -> f64 {
        let working: Vec<f64> = self.daily_hours.iter().copied().filter(|h| *h > 0.0).collect();
        match std_dev(&working) {
            Some(sd) => clamp_score(100.0 - sd * 15.0),
            None     => NEUTRAL_STABILITY,
        }
    }

    pub fn efficiency_score(&self) -> f64 {
        clamp_score(self.efficiency * 100.0)
    }

    pub fn top_specialty(&self) -> Option<&str> {
        self.specialties.first().map(String::as_str)
    }
}

// ── Builder ──────────────────────────────────────────────────────────────────

pub struct ProfileBuilder {
    config: ProfileConfig,
}

impl Default for ProfileBuilder {
    fn default() -> Self {
        Self::new(ProfileConfig::default())
    }
}

impl ProfileBuilder {
    pub fn new(config: ProfileConfig) -> Self {
        Self { config }
    }

    /// Derive one staff member's profile from their reports.
    ///
    /// `reports` should already be restricted to this staff member; the
    /// daily series covers the `window_days` days ending on `as_of`.
    pub fn build<'a, I>(
        &self,
        staff_id: &str,
        staff_name: &str,
        reports: I,
        as_of: NaiveDate,
    ) -> StaffPerformanceProfile
    where
        I: IntoIterator<Item = &'a DailyReport>,
    {
        let cfg = &self.config;
        let mut reports: Vec<&DailyReport> = reports.into_iter().collect();
        // Newest first: when two reports share a date, the first one wins.
        reports.sort_by(|a, b| b.date.cmp(&a.date));

        let mut hours_by_date: HashMap<NaiveDate, f64> = HashMap::new();
        for report in &reports {
            hours_by_date.entry(report.date).or_insert_with(|| report.total_hours());
        }

        let daily_hours: Vec<f64> = (0..cfg.window_days)
            .rev()
            .map(|back| {
                let day = as_of - Duration::days(back as i64);
                hours_by_date.get(&day).copied().unwrap_or(0.0)
            })
            .collect();

        let tasks: Vec<_> = reports.iter().flat_map(|r| r.tasks.iter()).collect();
        let total_tasks = tasks.len();
        let total_hours: f64 = tasks.iter().map(|t| t.duration_hours).sum();
        let completed = tasks.iter().filter(|t| t.completed).count();

        let graded: Vec<f64> = tasks.iter().filter_map(|t| t.quality.value()).collect();
        let avg_quality = mean(&graded).unwrap_or(cfg.default_quality);

        let avg_time_per_task =
            ratio_or(total_hours, total_tasks as f64, cfg.default_time_per_task);
        let efficiency = clamp_unit(ratio_or(
            completed as f64,
            total_tasks as f64,
            cfg.default_efficiency,
        ));

        let work_days = daily_hours.iter().filter(|h| **h > 0.0).count();
        let high_days = daily_hours
            .iter()
            .filter(|h| **h > cfg.high_workload_hours)
            .count();
        let fatigue_index = clamp_unit(ratio_or(
            high_days as f64,
            work_days as f64,
            cfg.default_fatigue_index,
        ));

        let daily_work_hours = if cfg.window_days == 0 {
            0.0
        } else {
            total_hours / cfg.window_days as f64
        };

        let profile = StaffPerformanceProfile {
            staff_id: staff_id.to_string(),
            staff_name: staff_name.to_string(),
            daily_hours,
            daily_work_hours,
            monthly_hours_available: cfg.monthly_hours_available,
            monthly_deliveries: completed as u32,
            avg_time_per_task,
            avg_quality,
            efficiency,
            fatigue_index,
            specialties: self.specialties(&reports),
        };

        log::debug!(
            "profile {staff_id}: tasks={total_tasks} hours={total_hours:.1} \
             efficiency={efficiency:.2} fatigue={fatigue_index:.2}"
        );
        profile
    }

    /// Group reports by staff id and build one profile per staff member,
    /// sorted by staff id. Names fall back to the staff id.
    pub fn build_roster<'a, I>(
        &self,
        reports: I,
        names: &HashMap<StaffId, String>,
        as_of: NaiveDate,
    ) -> Vec<StaffPerformanceProfile>
    where
        I: IntoIterator<Item = &'a DailyReport>,
    {
        let mut by_staff: BTreeMap<&str, Vec<&DailyReport>> = BTreeMap::new();
        for report in reports {
            by_staff.entry(report.staff_id.as_str()).or_default().push(report);
        }

        by_staff
            .into_iter()
            .map(|(staff_id, reports)| {
                let name = names.get(staff_id).map(String::as_str).unwrap_or(staff_id);
                self.build(staff_id, name, reports, as_of)
            })
            .collect()
    }

    /// Most frequent category label, then the most frequent task names,
    /// padded to the configured minimum. Ties keep first-seen order.
    fn specialties(&self, reports: &[&DailyReport]) -> Vec<String> {
        let mut category_counts: Vec<(&str, usize)> = Vec::new();
        let mut name_counts: Vec<(&str, usize)> = Vec::new();

        for task in reports.iter().flat_map(|r| r.tasks.iter()) {
            let label = match task.category {
                TaskCategory::Create => SPECIALTY_NEW_PRODUCTION,
                _                    => SPECIALTY_REVISION,
            };
            bump(&mut category_counts, label);
            if !task.task_name.is_empty() {
                bump(&mut name_counts, &task.task_name);
            }
        }

        // Stable sorts: equal counts keep insertion order.
        category_counts.sort_by(|a, b| b.1.cmp(&a.1));
        name_counts.sort_by(|a, b| b.1.cmp(&a.1));

        let mut specialties: Vec<String> = Vec::new();
        if let Some((label, _)) = category_counts.first() {
            specialties.push((*label).to_string());
        }
        specialties.extend(
            name_counts
                .iter()
                .take(self.config.top_task_names)
                .map(|(name, _)| (*name).to_string()),
        );

        if specialties.is_empty() {
            specialties.extend(GENERIC_SPECIALTIES.iter().map(|s| s.to_string()));
        } else if specialties.len() < self.config.min_specialties {
            specialties.push(SPECIALTY_MULTITASKING.to_string());
        }
        specialties
    }
}

fn bump<'a>(counts: &mut Vec<(&'a str, usize)>, key: &'a str) {
    match counts.iter_mut().find(|(k, _)| *k == key) {
        Some((_, n)) => *n += 1,
        None         => counts.push((key, 1)),
    }
}

// ── Team views ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TeamSummary {
    pub total_staff: usize,
    pub total_monthly_capacity: f64,
    /// Current monthly hours over total capacity; 0 when there is no capacity.
    pub current_utilization: f64,
    pub average_quality: f64,
    pub total_monthly_deliveries: u32,
}

pub fn team_summary(roster: &[StaffPerformanceProfile]) -> TeamSummary {
    let total_monthly_capacity: f64 = roster.iter().map(|s| s.monthly_hours_available).sum();
    let current_hours: f64 = roster.iter().map(|s| s.current_monthly_hours()).sum();
    let qualities: Vec<f64> = roster.iter().map(|s| s.avg_quality).collect();

    TeamSummary {
        total_staff: roster.len(),
        total_monthly_capacity,
        current_utilization: ratio_or(current_hours, total_monthly_capacity, 0.0),
        average_quality: mean(&qualities).unwrap_or(0.0),
        total_monthly_deliveries: roster.iter().map(|s| s.monthly_deliveries).sum(),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StaffDetailAnalysis {
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    pub optimal_tasks_per_month: u32,
}

/// Strengths, improvement areas and the task count that puts the staff
/// member at the optimal load.
pub fn detail_analysis(profile: &StaffPerformanceProfile) -> StaffDetailAnalysis {
    let mut strengths = Vec::new();
    let mut improvements = Vec::new();

    if profile.avg_quality >= 4.3 {
        strengths.push("Consistently delivers high-quality work".to_string());
    }
    if profile.efficiency >= 0.85 {
        strengths.push("Very high production efficiency".to_string());
    }
    if profile.monthly_deliveries >= 40 {
        strengths.push("High delivery count".to_string());
    }
    if profile.specialties.len() >= 3 {
        strengths.push(format!("Broad skill set: {}", profile.specialties.join(", ")));
    }

    if profile.current_load() < 0.6 {
        improvements.push("Room to take on more tasks".to_string());
    }
    if profile.avg_quality < 4.0 {
        improvements.push("Consider quality training".to_string());
    }
    if profile.efficiency < 0.8 {
        improvements.push("Consider support for working more efficiently".to_string());
    }
    if profile.avg_time_per_task > 4.0 {
        improvements.push("Process tuning could shorten production time".to_string());
    }

    let optimal_hours = profile.monthly_hours_available * OPTIMAL_LOAD;
    let optimal_tasks_per_month = if profile.avg_time_per_task > 0.0 {
        (optimal_hours / profile.avg_time_per_task).round().max(0.0) as u32
    } else {
        0
    };

    StaffDetailAnalysis {
        strengths,
        improvements,
        optimal_tasks_per_month,
    }
}
