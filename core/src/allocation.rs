//! Allocation simulator that spreads a monthly task target across staff.
//!
//! Per staff member:
//!   1. potential      = monthly hours / avg time per task × efficiency
//!   2. quality factor = avg quality / 5
//!   3. fatigue factor = 1 − fatigue index
//!   4. score          = potential × quality factor × fatigue factor
//!   5. tasks          = round(target × score / Σ score)
//!   6. hours          = tasks × avg time per task
//!   7. projected load = (current monthly hours + hours) / monthly hours
//!   8. confidence     = max(0, 1 − 2 × |projected load − 0.75|)
//!
//! Each staff member is rounded independently, so Σ tasks may differ from
//! the target by up to one task per staff member. That drift is kept.
//!
//! Degenerate rosters are rejected up front with a `TrackerError` rather
//! than producing NaN or infinite allocations. Efficiency and fatigue must
//! lie in [0, 1] and quality in [0, 5], so no score is negative.

use crate::{
    config::SimulationPolicy,
    error::{TrackerError, TrackerResult},
    metrics::pct,
    profile::StaffPerformanceProfile,
    types::{StaffId, OPTIMAL_LOAD},
};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

// ── Public types ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Scenario {
    Balanced,
    QualityFocused,
    SpeedFocused,
}

impl Scenario {
    pub const ALL: [Scenario; 3] = [
        Scenario::Balanced,
        Scenario::QualityFocused,
        Scenario::SpeedFocused,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Balanced       => "balanced",
            Self::QualityFocused => "quality-focused",
            Self::SpeedFocused   => "speed-focused",
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scenario {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Scenario::ALL
            .into_iter()
            .find(|sc| sc.as_str() == s)
            .ok_or_else(|| anyhow::anyhow!("unknown scenario '{s}'"))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AllocationRecommendation {
    pub staff_id: StaffId,
    pub staff_name: String,
    /// Load before this allocation.
    pub current_load: f64,
    /// Load after this allocation.
    pub projected_load: f64,
    pub recommended_tasks: u32,
    pub recommended_hours: f64,
    pub capacity_remaining: f64,
    /// 1.0 at the optimal load, falling to 0 at ±0.5 from it.
    pub confidence: f64,
    pub rationale: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimulationResult {
    pub scenario: Scenario,
    pub allocations: Vec<AllocationRecommendation>,
    pub team_utilization: f64,
    pub estimated_quality: f64,
    pub estimated_deliveries: u32,
    pub risks: Vec<String>,
    pub recommendations: Vec<String>,
}

// ── Simulator ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct AllocationSimulator {
    policy: SimulationPolicy,
}

struct Scored<'a> {
    staff: &'a StaffPerformanceProfile,
    score: f64,
    quality_factor: f64,
}

impl AllocationSimulator {
    pub fn new(policy: SimulationPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &SimulationPolicy {
        &self.policy
    }

    /// Core allocation over the roster as given, without scenario weighting.
    pub fn recommend(
        &self,
        roster: &[StaffPerformanceProfile],
        target_tasks: u32,
    ) -> TrackerResult<Vec<AllocationRecommendation>> {
        validate(roster, target_tasks)?;

        let scored: Vec<Scored<'_>> = roster
            .iter()
            .map(|staff| {
                let potential =
                    (staff.monthly_hours_available / staff.avg_time_per_task) * staff.efficiency;
                let quality_factor = staff.avg_quality / 5.0;
                let fatigue_factor = 1.0 - staff.fatigue_index;
                Scored {
                    staff,
                    score: (potential * quality_factor * fatigue_factor).max(0.0),
                    quality_factor,
                }
            })
            .collect();

        let total_score: f64 = scored.iter().map(|s| s.score).sum();
        if !(total_score.is_finite() && total_score > 0.0) {
            log::warn!("allocation: combined score {total_score} over {} staff", roster.len());
            return Err(TrackerError::NoAllocationPossible);
        }

        let allocations = scored
            .iter()
            .map(|s| self.allocate_one(s, total_score, target_tasks))
            .collect();
        Ok(allocations)
    }

    fn allocate_one(
        &self,
        scored: &Scored<'_>,
        total_score: f64,
        target_tasks: u32,
    ) -> AllocationRecommendation {
        let staff = scored.staff;
        let share = scored.score / total_score;
        let recommended_tasks = (share * f64::from(target_tasks)).round() as u32;
        let recommended_hours = f64::from(recommended_tasks) * staff.avg_time_per_task;

        let projected_load = (staff.current_monthly_hours() + recommended_hours)
            / staff.monthly_hours_available;

        AllocationRecommendation {
            staff_id: staff.staff_id.clone(),
            staff_name: staff.staff_name.clone(),
            current_load: staff.current_load(),
            projected_load,
            recommended_tasks,
            recommended_hours,
            capacity_remaining: staff.capacity_remaining(),
            confidence: confidence(projected_load),
            rationale: self.rationale(staff, projected_load, scored.quality_factor),
        }
    }

    fn rationale(
        &self,
        staff: &StaffPerformanceProfile,
        load: f64,
        quality_factor: f64,
    ) -> String {
        if load >= self.policy.overload_rationale {
            format!(
                "Projected load {}% is very high; adjustment recommended. Fatigue index {}%",
                pct(load),
                pct(staff.fatigue_index)
            )
        } else if load < self.policy.underload_rationale {
            format!(
                "Projected load {}% leaves spare capacity; more tasks can be assigned. Quality factor {}%",
                pct(load),
                pct(quality_factor)
            )
        } else {
            format!(
                "Projected load {}% is well balanced. Efficiency {}%, strongest at: {}",
                pct(load),
                pct(staff.efficiency),
                staff.top_specialty().unwrap_or("-")
            )
        }
    }

    /// Run a named scenario: weight the roster, allocate, then project
    /// team-level outcomes and collect risks and recommendations.
    pub fn simulate(
        &self,
        roster: &[StaffPerformanceProfile],
        target_tasks: u32,
        scenario: Scenario,
    ) -> TrackerResult<SimulationResult> {
        let weighted = weight_roster(roster, scenario);
        let allocations = self.recommend(&weighted, target_tasks)?;

        let mut risks: Vec<String> = Vec::new();
        let mut recommendations: Vec<String> = Vec::new();

        match scenario {
            Scenario::Balanced => {
                recommendations.push(
                    "Balanced allocation reflecting each staff member's strengths and efficiency"
                        .into(),
                );
                recommendations.push("Quality and speed are kept in balance".into());
            }
            Scenario::QualityFocused => {
                recommendations.push("High-quality staff are prioritised".into());
                recommendations.push("Overall output quality is expected to improve".into());
                risks.push("Some staff may carry a heavier load".into());
            }
            Scenario::SpeedFocused => {
                recommendations.push("Work is concentrated on the most efficient staff".into());
                recommendations.push("Shorter delivery times are expected".into());
                risks.push("Quality may vary more between deliveries".into());
                risks.push("Watch for increased burden on specific staff".into());
            }
        }

        // Projections use the roster as submitted, not the weighted copy.
        let team_utilization = allocations
            .iter()
            .zip(roster)
            .map(|(a, staff)| {
                (a.recommended_hours + staff.current_monthly_hours())
                    / staff.monthly_hours_available
            })
            .sum::<f64>()
            / roster.len() as f64;

        let estimated_quality = allocations
            .iter()
            .zip(roster)
            .map(|(a, staff)| {
                let load_impact = if a.current_load > self.policy.quality_penalty_load {
                    self.policy.quality_penalty_factor
                } else {
                    1.0
                };
                staff.avg_quality
                    * load_impact
                    * (f64::from(a.recommended_tasks) / f64::from(target_tasks))
            })
            .sum::<f64>();

        let estimated_deliveries: u32 = allocations.iter().map(|a| a.recommended_tasks).sum();

        let overloaded: Vec<&str> = allocations
            .iter()
            .filter(|a| a.projected_load > self.policy.overload_warning)
            .map(|a| a.staff_name.as_str())
            .collect();
        if !overloaded.is_empty() {
            risks.push(format!("High load for: {}", overloaded.join(", ")));
        }

        let underused: Vec<&str> = allocations
            .iter()
            .filter(|a| a.projected_load < self.policy.underload_warning)
            .map(|a| a.staff_name.as_str())
            .collect();
        if !underused.is_empty() {
            recommendations.push(format!("Can take more tasks: {}", underused.join(", ")));
        }

        log::info!(
            "simulate {scenario}: staff={} target={target_tasks} deliveries={estimated_deliveries} \
             utilization={team_utilization:.2} quality={estimated_quality:.2} risks={}",
            roster.len(),
            risks.len()
        );

        Ok(SimulationResult {
            scenario,
            allocations,
            team_utilization,
            estimated_quality,
            estimated_deliveries,
            risks,
            recommendations,
        })
    }
}

/// Confidence that a projected load is sustainable.
pub fn confidence(projected_load: f64) -> f64 {
    (1.0 - 2.0 * (projected_load - OPTIMAL_LOAD).abs()).max(0.0)
}

/// Scenario pre-weighting applied before scoring.
pub fn weight_roster(
    roster: &[StaffPerformanceProfile],
    scenario: Scenario,
) -> Vec<StaffPerformanceProfile> {
    roster
        .iter()
        .cloned()
        .map(|mut staff| {
            match scenario {
                Scenario::Balanced => {}
                Scenario::QualityFocused => {
                    staff.efficiency *= staff.avg_quality / 5.0;
                }
                Scenario::SpeedFocused => {
                    staff.monthly_hours_available *= staff.efficiency;
                }
            }
            staff
        })
        .collect()
}

fn validate(roster: &[StaffPerformanceProfile], target_tasks: u32) -> TrackerResult<()> {
    if roster.is_empty() {
        return Err(TrackerError::EmptyRoster);
    }
    if target_tasks == 0 {
        return Err(TrackerError::InvalidTarget);
    }
    for staff in roster {
        let reason = if !(staff.avg_time_per_task.is_finite() && staff.avg_time_per_task > 0.0) {
            Some(format!("average time per task must be positive, got {}", staff.avg_time_per_task))
        } else if !(staff.monthly_hours_available.is_finite() && staff.monthly_hours_available > 0.0) {
            Some(format!(
                "monthly hours available must be positive, got {}",
                staff.monthly_hours_available
            ))
        } else if !(0.0..=1.0).contains(&staff.efficiency) {
            Some(format!("efficiency must be within [0, 1], got {}", staff.efficiency))
        } else if !(0.0..=1.0).contains(&staff.fatigue_index) {
            Some(format!("fatigue index must be within [0, 1], got {}", staff.fatigue_index))
        } else if !(0.0..=5.0).contains(&staff.avg_quality) {
            Some(format!("average quality must be within [0, 5], got {}", staff.avg_quality))
        } else {
            None
        };

        if let Some(reason) = reason {
            log::warn!("allocation: rejecting profile {}: {reason}", staff.staff_id);
            return Err(TrackerError::InvalidProfile {
                staff_id: staff.staff_id.clone(),
                reason,
            });
        }
    }
    Ok(())
}
