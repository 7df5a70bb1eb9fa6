use serde::{Deserialize, Serialize};

/// Parameters for deriving performance profiles from reports.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ProfileConfig {
    /// Length of the daily-hours series, ending on the as-of date.
    pub window_days: usize,
    /// Capacity ceiling assigned to derived profiles (22 days × 8 h).
    pub monthly_hours_available: f64,
    /// A day above this many hours counts toward the fatigue index.
    pub high_workload_hours: f64,
    /// Fallbacks when a staff member has no usable history.
    pub default_quality: f64,
    pub default_time_per_task: f64,
    pub default_efficiency: f64,
    pub default_fatigue_index: f64,
    /// Number of task names listed as specialties after the category label.
    pub top_task_names: usize,
    /// Minimum number of specialty labels on a profile.
    pub min_specialties: usize,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            window_days: 31,
            monthly_hours_available: 176.0,
            high_workload_hours: 8.0,
            default_quality: 3.0,
            default_time_per_task: 4.0,
            default_efficiency: 0.8,
            default_fatigue_index: 0.1,
            top_task_names: 2,
            min_specialties: 3,
        }
    }
}

/// Thresholds that shape simulation narratives and team projections.
///
/// Working days per month and the optimal load are fixed constants in
/// `types`, not policy.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SimulationPolicy {
    /// Projected load at or above which the rationale flags overload.
    pub overload_rationale: f64,
    /// Projected load below which the rationale flags spare capacity.
    pub underload_rationale: f64,
    /// Projected load above which a staff member is listed as a risk.
    pub overload_warning: f64,
    /// Projected load below which a staff member is listed as able to take more.
    pub underload_warning: f64,
    /// Current load above which estimated quality is penalised.
    pub quality_penalty_load: f64,
    /// Multiplier applied to quality under that penalty.
    pub quality_penalty_factor: f64,
}

impl Default for SimulationPolicy {
    fn default() -> Self {
        Self {
            overload_rationale: 0.95,
            underload_rationale: 0.70,
            overload_warning: 0.85,
            underload_warning: 0.5,
            quality_penalty_load: 0.9,
            quality_penalty_factor: 0.9,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TrackerConfig {
    pub profile: ProfileConfig,
    pub simulation: SimulationPolicy,
}

impl TrackerConfig {
    /// Load from a JSON file. Missing sections and fields take their defaults.
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config: TrackerConfig = serde_json::from_str(&content)?;
        log::debug!("Loaded tracker config from {path}");
        Ok(config)
    }

    /// Parse from a JSON string.
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
