use chrono::NaiveDate;
use staff_tracker_core::{
    aggregate::analyze_by_staff,
    error::TrackerError,
    report::{DailyReport, QualityScore, ReportFilter, TaskCategory, TaskRecord},
    store::{ReportStore, User, UserRole},
};

// ── Helpers ──────────────────────────────────────────────────────────────────

fn make_store() -> ReportStore {
    let store = ReportStore::in_memory().expect("in-memory store");
    store.migrate().expect("migration");
    store
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn report(staff: &str, day: u32, task_name: &str, hours: f64) -> DailyReport {
    let mut r = DailyReport::new(
        staff,
        date(2025, 1, day),
        vec![TaskRecord::new(task_name, TaskCategory::Create, hours)
            .with_quality(QualityScore::Graded(4))
            .for_account("Saki AI")
            .completed()],
    );
    r.learnings = format!("notes for day {day}");
    r
}

// ── Reports ──────────────────────────────────────────────────────────────────

#[test]
fn inserted_report_reads_back_identically() {
    let store = make_store();
    let mut original = report("user1", 1, "Reel", 2.5);
    original.own_research_hours = 0.5;
    original.tasks.push(TaskRecord::new("Caption", TaskCategory::Fix, 1.0));

    let id = store.insert_report(&original).unwrap();
    assert_eq!(id, original.id);

    let loaded = store.report(&id).unwrap().expect("report present");
    assert_eq!(loaded, original);
}

#[test]
fn empty_id_gets_a_generated_one() {
    let store = make_store();
    let mut r = report("user1", 1, "Reel", 2.5);
    r.id = String::new();

    let id = store.insert_report(&r).unwrap();
    assert!(!id.is_empty());
    assert!(store.report(&id).unwrap().is_some());
}

#[test]
fn reports_filter_by_staff_and_date() {
    let store = make_store();
    for (staff, day) in [("user1", 1), ("user1", 5), ("user2", 3), ("user2", 9)] {
        store.insert_report(&report(staff, day, "Reel", 1.0)).unwrap();
    }

    let all = store.reports(&ReportFilter::default()).unwrap();
    assert_eq!(all.len(), 4);
    let dates: Vec<u32> = all.iter().map(|r| r.date.format("%d").to_string().parse().unwrap()).collect();
    assert_eq!(dates, vec![1, 3, 5, 9], "ordered by date");

    let user2 = store.reports(&ReportFilter::for_staff("user2")).unwrap();
    assert_eq!(user2.len(), 2);
    assert!(user2.iter().all(|r| r.staff_id == "user2"));

    let window = store
        .reports(&ReportFilter::default().between(date(2025, 1, 3), date(2025, 1, 5)))
        .unwrap();
    assert_eq!(window.len(), 2, "bounds are inclusive");

    let both = store
        .reports(&ReportFilter::for_staff("user1").between(date(2025, 1, 2), date(2025, 1, 31)))
        .unwrap();
    assert_eq!(both.len(), 1);
}

#[test]
fn reports_filter_by_task_name() {
    let store = make_store();
    store.insert_report(&report("user1", 1, "Reel", 1.0)).unwrap();
    store.insert_report(&report("user1", 2, "Story", 1.0)).unwrap();

    let filter = ReportFilter {
        task_name: Some("Story".into()),
        ..ReportFilter::default()
    };
    let found = store.reports(&filter).unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].tasks[0].task_name, "Story");
}

#[test]
fn update_replaces_report_contents() {
    let store = make_store();
    let mut r = report("user1", 1, "Reel", 1.0);
    store.insert_report(&r).unwrap();

    r.tasks[0].duration_hours = 3.0;
    r.learnings = "revised".into();
    store.update_report(&r).unwrap();

    let loaded = store.report(&r.id).unwrap().unwrap();
    assert_eq!(loaded.tasks[0].duration_hours, 3.0);
    assert_eq!(loaded.learnings, "revised");
}

#[test]
fn deleted_reports_disappear_from_queries() {
    let store = make_store();
    let keep = report("user1", 1, "Reel", 1.0);
    let gone = report("user2", 2, "Reel", 1.0);
    store.insert_report(&keep).unwrap();
    store.insert_report(&gone).unwrap();

    store.delete_report(&gone.id).unwrap();

    assert_eq!(store.report_count().unwrap(), 1);
    assert!(store.report(&gone.id).unwrap().is_none());

    let staff = analyze_by_staff(&store.reports(&ReportFilter::default()).unwrap());
    assert_eq!(staff.len(), 1);
    assert_eq!(staff[0].staff_id, "user1");
}

#[test]
fn missing_reports_are_reported() {
    let store = make_store();
    let ghost = report("user1", 1, "Reel", 1.0);

    let err = store.update_report(&ghost).unwrap_err();
    assert!(matches!(err, TrackerError::ReportNotFound { .. }), "got {err:?}");

    store.insert_report(&ghost).unwrap();
    store.delete_report(&ghost.id).unwrap();
    let err = store.delete_report(&ghost.id).unwrap_err();
    assert!(matches!(err, TrackerError::ReportNotFound { .. }), "second delete: {err:?}");
}

// ── Users ────────────────────────────────────────────────────────────────────

#[test]
fn users_round_trip() {
    let store = make_store();
    let director = User {
        id: "d1".into(),
        name: "Director".into(),
        role: UserRole::Director,
        email: "director@example.com".into(),
        daily_available_hours: None,
    };
    let staff = User {
        id: "s1".into(),
        name: "Taro Tanaka".into(),
        role: UserRole::Staff,
        email: "taro@example.com".into(),
        daily_available_hours: Some(6.5),
    };
    store.insert_user(&staff).unwrap();
    store.insert_user(&director).unwrap();

    assert_eq!(store.users().unwrap(), vec![director.clone(), staff.clone()]);
    assert_eq!(store.user("s1").unwrap(), Some(staff));
    assert_eq!(store.user("nobody").unwrap(), None);
}

#[test]
fn user_roles_parse_from_their_names() {
    for role in [UserRole::Staff, UserRole::Director, UserRole::Admin] {
        assert_eq!(role.as_str().parse::<UserRole>().unwrap(), role);
    }
    assert!("owner".parse::<UserRole>().is_err());
}
