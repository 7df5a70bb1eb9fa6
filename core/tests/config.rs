use staff_tracker_core::{
    allocation::{AllocationSimulator, Scenario},
    config::{ProfileConfig, SimulationPolicy, TrackerConfig},
    fixtures::sample_roster,
};

#[test]
fn partial_json_keeps_defaults() {
    let config = TrackerConfig::from_json(
        r#"{ "simulation": { "overload_warning": 0.7 }, "profile": { "window_days": 14 } }"#,
    )
    .unwrap();

    assert_eq!(config.simulation.overload_warning, 0.7);
    assert_eq!(config.simulation.underload_warning, SimulationPolicy::default().underload_warning);
    assert_eq!(config.profile.window_days, 14);
    assert_eq!(config.profile.monthly_hours_available, ProfileConfig::default().monthly_hours_available);
}

#[test]
fn empty_json_is_the_default_config() {
    assert_eq!(TrackerConfig::from_json("{}").unwrap(), TrackerConfig::default());
}

#[test]
fn load_reads_config_file() {
    let path = std::env::temp_dir().join(format!("tracker-config-{}.json", std::process::id()));
    std::fs::write(&path, r#"{ "profile": { "high_workload_hours": 9.5 } }"#).unwrap();

    let config = TrackerConfig::load(path.to_str().unwrap()).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(config.profile.high_workload_hours, 9.5);
}

#[test]
fn load_reports_missing_file() {
    let err = TrackerConfig::load("/definitely/not/here.json").unwrap_err();
    assert!(err.to_string().contains("Cannot read"), "got {err}");
}

#[test]
fn stricter_policy_flags_more_staff() {
    let roster = sample_roster();
    let lenient = AllocationSimulator::default()
        .simulate(&roster, 150, Scenario::Balanced)
        .unwrap();

    let strict = AllocationSimulator::new(SimulationPolicy {
        overload_warning: 0.0,
        ..SimulationPolicy::default()
    })
    .simulate(&roster, 150, Scenario::Balanced)
    .unwrap();

    let named = |risks: &[String]| {
        roster
            .iter()
            .filter(|s| risks.iter().any(|r| r.contains(&s.staff_name)))
            .count()
    };
    assert_eq!(named(&strict.risks), roster.len());
    assert!(named(&lenient.risks) <= named(&strict.risks));
}
