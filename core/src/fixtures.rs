//! Seed roster for demo dashboards and tests.
//!
//! Passed to the simulator explicitly; nothing here is global state.

use crate::profile::StaffPerformanceProfile;

#[rustfmt::skip]
const DAILY_HOURS: [[f64; 31]; 5] = [
    [6.2, 6.8, 6.5, 6.3, 7.0, 6.1, 6.9, 6.4, 6.7, 6.5, 6.3, 6.8, 6.6, 6.2, 7.1, 6.4, 6.5, 6.9, 6.3, 6.7, 6.5, 6.4, 6.8, 6.2, 6.6, 7.0, 6.3, 6.5, 6.7, 6.4, 6.6],
    [7.1, 6.9, 7.2, 7.0, 6.8, 7.3, 6.9, 7.1, 7.0, 6.9, 7.2, 7.0, 6.8, 7.1, 7.3, 6.9, 7.0, 7.1, 6.8, 7.2, 7.0, 6.9, 7.1, 7.3, 6.8, 7.0, 7.2, 6.9, 7.1, 7.0, 6.9],
    [5.8, 4.9, 5.3, 6.2, 5.1, 5.9, 4.8, 5.5, 6.0, 5.3, 5.7, 4.9, 6.1, 5.4, 5.2, 5.8, 5.0, 5.6, 5.3, 5.9, 5.1, 5.5, 6.2, 5.0, 5.4, 5.8, 5.2, 5.6, 5.3, 5.7, 5.4],
    [6.2, 5.8, 6.1, 6.3, 5.9, 6.0, 6.2, 5.7, 6.4, 6.0, 5.9, 6.3, 6.1, 5.8, 6.2, 6.0, 6.1, 6.3, 5.9, 6.2, 6.0, 5.8, 6.4, 6.1, 5.9, 6.2, 6.0, 6.3, 5.8, 6.1, 6.0],
    [6.9, 6.7, 7.0, 6.8, 6.6, 7.1, 6.7, 6.9, 7.0, 6.8, 6.7, 6.9, 7.1, 6.6, 7.0, 6.8, 6.9, 6.7, 7.0, 6.8, 6.7, 6.9, 7.1, 6.6, 6.8, 7.0, 6.7, 6.9, 6.8, 7.0, 6.8],
];

struct Seed {
    id: &'static str,
    name: &'static str,
    daily_work_hours: f64,
    monthly_hours_available: f64,
    monthly_deliveries: u32,
    avg_time_per_task: f64,
    avg_quality: f64,
    efficiency: f64,
    fatigue_index: f64,
    specialties: [&'static str; 3],
}

const SEEDS: [Seed; 5] = [
    Seed {
        id: "1", name: "Taro Tanaka",
        daily_work_hours: 6.5, monthly_hours_available: 160.0, monthly_deliveries: 45,
        avg_time_per_task: 3.5, avg_quality: 4.2, efficiency: 0.85, fatigue_index: 0.15,
        specialties: ["New production", "Video editing", "Image retouching"],
    },
    Seed {
        id: "2", name: "Hanako Sato",
        daily_work_hours: 7.0, monthly_hours_available: 170.0, monthly_deliveries: 38,
        avg_time_per_task: 4.2, avg_quality: 4.5, efficiency: 0.88, fatigue_index: 0.12,
        specialties: ["New production", "Reels", "Effects"],
    },
    Seed {
        id: "3", name: "Ichiro Suzuki",
        daily_work_hours: 5.5, monthly_hours_available: 140.0, monthly_deliveries: 32,
        avg_time_per_task: 3.8, avg_quality: 3.9, efficiency: 0.78, fatigue_index: 0.22,
        specialties: ["Revision work", "Copywriting", "Research"],
    },
    Seed {
        id: "4", name: "Misaki Takahashi",
        daily_work_hours: 6.0, monthly_hours_available: 150.0, monthly_deliveries: 40,
        avg_time_per_task: 3.2, avg_quality: 4.0, efficiency: 0.82, fatigue_index: 0.18,
        specialties: ["New production", "Image editing", "Design"],
    },
    Seed {
        id: "5", name: "Kenta Yamada",
        daily_work_hours: 6.8, monthly_hours_available: 165.0, monthly_deliveries: 42,
        avg_time_per_task: 3.6, avg_quality: 4.3, efficiency: 0.86, fatigue_index: 0.14,
        specialties: ["New production", "Story editing", "Trend analysis"],
    },
];

/// Five-person demo roster with fixed 31-day hour series.
pub fn sample_roster() -> Vec<StaffPerformanceProfile> {
    SEEDS
        .iter()
        .zip(DAILY_HOURS.iter())
        .map(|(seed, hours)| StaffPerformanceProfile {
            staff_id: seed.id.to_string(),
            staff_name: seed.name.to_string(),
            daily_hours: hours.to_vec(),
            daily_work_hours: seed.daily_work_hours,
            monthly_hours_available: seed.monthly_hours_available,
            monthly_deliveries: seed.monthly_deliveries,
            avg_time_per_task: seed.avg_time_per_task,
            avg_quality: seed.avg_quality,
            efficiency: seed.efficiency,
            fatigue_index: seed.fatigue_index,
            specialties: seed.specialties.iter().map(|s| s.to_string()).collect(),
        })
        .collect()
}
