use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use serde_json::Value;

mod common;
use common::{
    ADMIN, ALICE, BOB, add_hours, init_db_with_roster, init_db_with_week, rts, run_as,
    setup_test_db,
};

fn metrics_json(db: &str, args: &[&str]) -> Value {
    let out = rts()
        .args(["--db", db, "--as", ADMIN])
        .args(args)
        .output()
        .expect("run metrics");
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    serde_json::from_slice(&out.stdout).expect("valid json")
}

#[test]
fn test_metrics_for_explicit_week() {
    let db = setup_test_db("metrics_week");
    init_db_with_week(&db);

    let m = metrics_json(
        &db,
        &["metrics", "--start", "2024-03-04", "--end", "2024-03-10", "--json"],
    );

    assert_eq!(m["period"]["start"], "2024-03-04");
    assert_eq!(m["period"]["end"], "2024-03-10");
    assert_eq!(m["period"]["weekdays"], 5);
    assert_eq!(m["period"]["expectedHoursPerEmployee"], 35);

    let s = &m["summary"];
    assert_eq!(s["totalEmployees"], 2);
    assert_eq!(s["completeEmployees"], 1);
    assert_eq!(s["incompleteEmployees"], 1);
    assert_eq!(s["completionRate"], 50);
    assert_eq!(s["totalHoursLogged"], 55);
    assert_eq!(s["averageHoursPerEmployee"], 28);

    let list = m["incompleteEmployeesList"].as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["email"], BOB);
    assert_eq!(list[0]["totalHours"], 20);
    assert_eq!(list[0]["completionPercentage"], 57);
    assert_eq!(list[0]["severity"], "moderate");

    let codes = m["chargeCodeBreakdown"].as_array().unwrap();
    assert_eq!(codes[0]["code"], "PROJ-001");
    assert_eq!(codes[0]["totalHours"], 55);
}

#[test]
fn test_metrics_default_period_uses_today() {
    let db = setup_test_db("metrics_default");
    init_db_with_week(&db);

    let m = metrics_json(&db, &["--today", "2024-03-10", "metrics", "--json"]);

    assert_eq!(m["period"]["start"], "2024-03-01");
    assert_eq!(m["period"]["end"], "2024-03-15");
    assert_eq!(m["period"]["expectedHoursPerEmployee"], 77);
    assert_eq!(m["summary"]["completionRate"], 0);
    // worst first: Bob (20h) before Alice (35h)
    let list = m["incompleteEmployeesList"].as_array().unwrap();
    assert_eq!(list[0]["email"], BOB);
    assert_eq!(list[1]["email"], ALICE);
    // 2024-02-01..2024-02-15 is empty for both
    assert_eq!(m["stalePeriod"]["start"], "2024-02-01");
    assert_eq!(m["summary"]["staleIncompleteCount"], 2);
}

#[test]
fn test_metrics_text_report() {
    let db = setup_test_db("metrics_text");
    init_db_with_week(&db);

    run_as(
        &db,
        ADMIN,
        &["metrics", "--start", "2024-03-04", "--end", "2024-03-10"],
    )
    .success()
    .stdout(contains("Incomplete timesheets"))
    .stdout(contains("bob@example.com").and(contains("moderate")))
    .stdout(contains("PROJ-001"));
}

#[test]
fn test_metrics_require_admin() {
    let db = setup_test_db("metrics_unauthorized");
    init_db_with_week(&db);

    run_as(&db, ALICE, &["metrics", "--json"])
        .failure()
        .stderr(contains("Unauthorized"));

    run_as(&db, ALICE, &["dashboard"])
        .failure()
        .stderr(contains("Unauthorized"));
}

#[test]
fn test_metrics_without_actor_fails() {
    let db = setup_test_db("metrics_no_actor");
    init_db_with_week(&db);

    rts()
        .args(["--db", &db, "metrics"])
        .assert()
        .failure()
        .stderr(contains("no acting user"));

    run_as(&db, "ghost@example.com", &["metrics"])
        .failure()
        .stderr(contains("unknown user"));
}

#[test]
fn test_metrics_with_empty_roster() {
    let db = setup_test_db("metrics_empty");
    common::init_db(&db);
    rts()
        .args(["--db", &db, "user", "add", ADMIN, "--role", "admin"])
        .assert()
        .success();

    let m = metrics_json(&db, &["--today", "2024-03-10", "metrics", "--json"]);
    assert_eq!(m["summary"]["totalEmployees"], 0);
    assert_eq!(m["summary"]["completionRate"], 0);
    assert_eq!(m["summary"]["averageHoursPerEmployee"], 0);
}

#[test]
fn test_dashboard_rolling_two_weeks() {
    let db = setup_test_db("dashboard");
    init_db_with_roster(&db);

    // 2024-03-13 → current 2024-03-11..2024-03-24, older 2024-02-12..2024-02-25
    for day in [
        "2024-02-12", "2024-02-13", "2024-02-14", "2024-02-15", "2024-02-16", "2024-02-19",
        "2024-02-20", "2024-02-21", "2024-02-22", "2024-02-23",
    ] {
        add_hours(&db, ALICE, day, "PROJ-001", "7");
    }
    add_hours(&db, BOB, "2024-02-12", "ADMIN-001", "7");
    add_hours(&db, BOB, "2024-03-11", "PROJ-001", "6");

    let d = metrics_json(&db, &["--today", "2024-03-13", "dashboard", "--json"]);

    assert_eq!(d["currentPeriod"]["start"], "2024-03-11");
    assert_eq!(d["currentPeriod"]["end"], "2024-03-24");
    assert_eq!(d["currentPeriod"]["expectedHours"], 70);
    assert_eq!(d["totalEmployees"], 2);
    assert_eq!(d["completeTimesheetCount"], 0);
    assert_eq!(d["averageHoursPerEmployee"], 3);

    let old = d["incompleteOldTimesheets"].as_array().unwrap();
    assert_eq!(old.len(), 1);
    assert_eq!(old[0]["userEmail"], BOB);
    assert_eq!(old[0]["periodStart"], "2024-02-12");
    assert_eq!(old[0]["periodEnd"], "2024-02-25");
    assert_eq!(old[0]["hoursLogged"], 7);
    assert_eq!(old[0]["expectedHours"], 70);
}
