//! staff-tracker: command-line front end for the tracker analytics.
//!
//! Usage:
//!   staff-tracker --db tracker.db --import reports.json
//!   staff-tracker --db tracker.db --report staff --from 2025-01-01 --to 2025-01-31
//!   staff-tracker --sample-roster --report simulate --target 120 --scenario quality-focused
//!   staff-tracker --db tracker.db --report profiles --as-of 2025-01-31 --json

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use staff_tracker_core::{
    aggregate::{analyze_by_staff_named, analyze_by_task, summarize, AnalyticsData},
    allocation::{AllocationSimulator, Scenario, SimulationResult},
    config::TrackerConfig,
    fixtures::sample_roster,
    profile::{detail_analysis, team_summary, ProfileBuilder, StaffPerformanceProfile},
    report::{DailyReport, ReportFilter},
    store::{ReportStore, User},
    types::StaffId,
};
use std::collections::HashMap;
use std::env;

#[derive(serde::Deserialize)]
struct ImportFile {
    #[serde(default)]
    users: Vec<User>,
    #[serde(default)]
    reports: Vec<DailyReport>,
}

struct Options {
    db: String,
    import: Option<String>,
    config: Option<String>,
    report: String,
    filter: ReportFilter,
    as_of: NaiveDate,
    target: u32,
    scenario: Scenario,
    sample_roster: bool,
    json: bool,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let opts = parse_options(&args)?;

    let config = match &opts.config {
        Some(path) => TrackerConfig::load(path)?,
        None => TrackerConfig::default(),
    };

    let store = ReportStore::open(&opts.db)?;
    store.migrate()?;

    if let Some(path) = &opts.import {
        import(&store, path)?;
    }

    let names: HashMap<StaffId, String> = store
        .users()?
        .into_iter()
        .map(|u| (u.id, u.name))
        .collect();

    match opts.report.as_str() {
        "summary" => {
            let reports = store.reports(&opts.filter)?;
            let summary = summarize(&reports);
            if opts.json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                println!("=== SUMMARY ({} reports) ===", reports.len());
                print_metrics("all", &summary);
            }
        }
        "staff" => {
            let reports = store.reports(&opts.filter)?;
            let rows = analyze_by_staff_named(&reports, &names);
            if opts.json {
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else {
                println!("=== BY STAFF ===");
                for row in &rows {
                    print_metrics(&row.staff_name, &row.metrics);
                }
            }
        }
        "tasks" => {
            let reports = store.reports(&opts.filter)?;
            let rows = analyze_by_task(&reports);
            if opts.json {
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else {
                println!("=== BY TASK ===");
                for row in &rows {
                    print_metrics(&row.task_name, &row.metrics);
                }
            }
        }
        "profiles" => {
            let roster = load_roster(&store, &opts, &config, &names)?;
            if opts.json {
                println!("{}", serde_json::to_string_pretty(&roster)?);
            } else {
                print_profiles(&roster);
            }
        }
        "simulate" => {
            let roster = load_roster(&store, &opts, &config, &names)?;
            let simulator = AllocationSimulator::new(config.simulation.clone());
            let result = simulator.simulate(&roster, opts.target, opts.scenario)?;
            if opts.json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print_simulation(&result, opts.target);
            }
        }
        other => bail!("unknown report '{other}' (summary|staff|tasks|profiles|simulate)"),
    }

    Ok(())
}

fn parse_options(args: &[String]) -> Result<Options> {
    let mut filter = ReportFilter {
        staff_id: find_arg(args, "--staff").map(str::to_string),
        task_name: find_arg(args, "--task").map(str::to_string),
        ..ReportFilter::default()
    };
    if let Some(from) = find_arg(args, "--from") {
        filter.start_date = Some(parse_date(from)?);
    }
    if let Some(to) = find_arg(args, "--to") {
        filter.end_date = Some(parse_date(to)?);
    }

    let as_of = match find_arg(args, "--as-of") {
        Some(d) => parse_date(d)?,
        None => chrono::Local::now().date_naive(),
    };
    let scenario = match find_arg(args, "--scenario") {
        Some(s) => s.parse()?,
        None => Scenario::Balanced,
    };

    Ok(Options {
        db: find_arg(args, "--db").unwrap_or(":memory:").to_string(),
        import: find_arg(args, "--import").map(str::to_string),
        config: find_arg(args, "--config").map(str::to_string),
        report: find_arg(args, "--report").unwrap_or("summary").to_string(),
        filter,
        as_of,
        target: parse_arg(args, "--target", 100u32)?,
        scenario,
        sample_roster: has_flag(args, "--sample-roster"),
        json: has_flag(args, "--json"),
    })
}

fn import(store: &ReportStore, path: &str) -> Result<()> {
    let content = std::fs::read_to_string(path).with_context(|| format!("Cannot read {path}"))?;
    let file: ImportFile = serde_json::from_str(&content)?;
    for user in &file.users {
        store.insert_user(user)?;
    }
    for report in &file.reports {
        store.insert_report(report)?;
    }
    log::info!(
        "imported {} users and {} reports from {path}",
        file.users.len(),
        file.reports.len()
    );
    Ok(())
}

fn load_roster(
    store: &ReportStore,
    opts: &Options,
    config: &TrackerConfig,
    names: &HashMap<StaffId, String>,
) -> Result<Vec<StaffPerformanceProfile>> {
    if opts.sample_roster {
        return Ok(sample_roster());
    }
    let reports = store.reports(&opts.filter)?;
    let builder = ProfileBuilder::new(config.profile.clone());
    let roster = builder.build_roster(&reports, names, opts.as_of);
    if roster.is_empty() {
        bail!("no reports match; import reports or pass --sample-roster");
    }
    Ok(roster)
}

fn print_metrics(label: &str, m: &AnalyticsData) {
    println!(
        "  {label:<24} total {:>6.1}h | create {:>5.1}h | fix {:>5.1}h | correction {:>5.1}h | quality {:.1} | tasks {}",
        m.total_hours, m.create_hours, m.fix_hours, m.correction_hours, m.average_quality, m.task_count
    );
}

fn print_profiles(roster: &[StaffPerformanceProfile]) {
    let team = team_summary(roster);
    println!("=== TEAM ===");
    println!("  staff:        {}", team.total_staff);
    println!("  capacity:     {:.0}h/month", team.total_monthly_capacity);
    println!("  utilization:  {:.0}%", team.current_utilization * 100.0);
    println!("  quality:      {:.2}", team.average_quality);
    println!("  deliveries:   {}", team.total_monthly_deliveries);
    println!();

    for p in roster {
        let detail = detail_analysis(p);
        println!("=== {} ({}) ===", p.staff_name, p.staff_id);
        println!(
            "  speed {:.0} | quality {:.0} | stability {:.0} | efficiency {:.0}",
            p.speed_score(),
            p.quality_score(),
            p.stability_score(),
            p.efficiency_score()
        );
        println!("  load {:.0}% | optimal tasks/month {}", p.current_load() * 100.0, detail.optimal_tasks_per_month);
        println!("  specialties:  {}", p.specialties.join(", "));
        for s in &detail.strengths {
            println!("  + {s}");
        }
        for i in &detail.improvements {
            println!("  - {i}");
        }
    }
}

fn print_simulation(result: &SimulationResult, target: u32) {
    println!("=== SIMULATION: {} (target {target}) ===", result.scenario);
    for a in &result.allocations {
        println!(
            "  {:<20} tasks {:>3} | hours {:>6.1} | load {:>3.0}% -> {:>3.0}% | confidence {:.2}",
            a.staff_name,
            a.recommended_tasks,
            a.recommended_hours,
            a.current_load * 100.0,
            a.projected_load * 100.0,
            a.confidence
        );
        println!("      {}", a.rationale);
    }
    println!();
    println!("  team utilization:   {:.0}%", result.team_utilization * 100.0);
    println!("  estimated quality:  {:.2}", result.estimated_quality);
    println!("  deliveries:         {}", result.estimated_deliveries);
    for r in &result.risks {
        println!("  ! {r}");
    }
    for r in &result.recommendations {
        println!("  > {r}");
    }
}

fn find_arg<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

fn has_flag(args: &[String], flag: &str) -> bool {
    args.iter().any(|a| a == flag)
}

/// Parse a flag's value, or `default` when the flag is absent.
/// A value that does not parse is an error, never the default.
fn parse_arg<T>(args: &[String], flag: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match find_arg(args, flag) {
        Some(v) => v
            .parse()
            .with_context(|| format!("invalid value '{v}' for {flag}")),
        None => Ok(default),
    }
}

fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").with_context(|| format!("invalid date '{s}', expected YYYY-MM-DD"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("staff-tracker")
            .chain(list.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn target_defaults_to_one_hundred() {
        let opts = parse_options(&args(&["--report", "simulate"])).unwrap();
        assert_eq!(opts.target, 100);
    }

    #[test]
    fn target_is_read_from_flag() {
        let opts = parse_options(&args(&["--target", "120"])).unwrap();
        assert_eq!(opts.target, 120);
    }

    #[test]
    fn unparseable_target_is_an_error() {
        for bad in ["abc", "-5", "12.5"] {
            let err = parse_options(&args(&["--target", bad])).err().expect("should fail");
            assert!(err.to_string().contains("--target"), "{bad}: {err}");
        }
    }

    #[test]
    fn bad_dates_and_scenarios_are_errors() {
        assert!(parse_options(&args(&["--from", "2025-13-01"])).is_err());
        assert!(parse_options(&args(&["--scenario", "fastest"])).is_err());
    }
}
