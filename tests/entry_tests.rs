use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

mod common;
use common::{ADMIN, ALICE, BOB, add_hours, init_db_with_roster, init_db_with_week, run_as, setup_test_db};

#[test]
fn test_add_rejects_hours_out_of_range() {
    let db = setup_test_db("entry_hours_range");
    init_db_with_roster(&db);

    run_as(&db, ALICE, &["add", "2024-03-04", "PROJ-001", "8"])
        .failure()
        .stderr(contains("hours must be between 1 and 7"));

    run_as(&db, ALICE, &["add", "2024-03-04", "PROJ-001", "0"])
        .failure()
        .stderr(contains("Invalid hours value 0"));

    run_as(&db, ALICE, &["add", "2024-03-04", "PROJ-001", "-2"]).failure();
}

#[test]
fn test_add_rejects_bad_date_and_unknown_code() {
    let db = setup_test_db("entry_bad_input");
    init_db_with_roster(&db);

    run_as(&db, ALICE, &["add", "2024-13-04", "PROJ-001", "3"])
        .failure()
        .stderr(contains("Invalid date format"));

    run_as(&db, ALICE, &["add", "2024-03-04", "NOPE-999", "3"])
        .failure()
        .stderr(contains("Unknown charge code: NOPE-999"));
}

#[test]
fn test_add_same_day_and_code_replaces_hours() {
    let db = setup_test_db("entry_upsert");
    init_db_with_roster(&db);

    add_hours(&db, ALICE, "2024-03-04", "PROJ-001", "3");
    add_hours(&db, ALICE, "2024-03-04", "PROJ-001", "7");
    add_hours(&db, ALICE, "2024-03-04", "ADMIN-001", "2");

    run_as(&db, ALICE, &["list", "--period", "2024-03-04"])
        .success()
        .stdout(contains("PROJ-001 7h"))
        .stdout(contains("ADMIN-001 2h"))
        .stdout(contains("9h"))
        .stdout(contains("PROJ-001 3h").not());
}

#[test]
fn test_inactive_code_rejects_new_hours() {
    let db = setup_test_db("entry_inactive_code");
    init_db_with_roster(&db);

    run_as(&db, ADMIN, &["code", "update", "PROJ-001", "--inactive"]).success();

    run_as(&db, ALICE, &["add", "2024-03-04", "PROJ-001", "4"])
        .failure()
        .stderr(contains("inactive"));

    run_as(&db, ADMIN, &["code", "update", "PROJ-001", "--active"]).success();
    add_hours(&db, ALICE, "2024-03-04", "PROJ-001", "4");
}

#[test]
fn test_delete_own_entry() {
    let db = setup_test_db("entry_delete_own");
    init_db_with_roster(&db);
    add_hours(&db, ALICE, "2024-03-04", "PROJ-001", "5");

    run_as(&db, ALICE, &["del", "2024-03-04", "PROJ-001"])
        .success()
        .stdout(contains("Deleted PROJ-001 entry"));

    run_as(&db, ALICE, &["del", "2024-03-04", "PROJ-001"])
        .failure()
        .stderr(contains("No time entry for PROJ-001 on 2024-03-04"));
}

#[test]
fn test_delete_other_users_entry_needs_admin() {
    let db = setup_test_db("entry_delete_other");
    init_db_with_roster(&db);
    add_hours(&db, BOB, "2024-03-04", "PROJ-001", "5");

    run_as(&db, ALICE, &["del", "2024-03-04", "PROJ-001", "--user", BOB])
        .failure()
        .stderr(contains("Unauthorized"));

    run_as(&db, ADMIN, &["del", "2024-03-04", "PROJ-001", "--user", BOB]).success();
}

#[test]
fn test_remove_charge_code_from_period() {
    let db = setup_test_db("entry_bulk_delete");
    init_db_with_week(&db);
    add_hours(&db, ALICE, "2024-03-05", "ADMIN-001", "1");

    run_as(&db, ALICE, &["del", "--code", "PROJ-001", "--period", "2024-03"])
        .success()
        .stdout(contains("Removed 5 PROJ-001 entries"));

    // Bob's entries are untouched
    run_as(&db, BOB, &["list", "--period", "2024-03-04:2024-03-08"])
        .success()
        .stdout(contains("PROJ-001 5h"));

    run_as(&db, ALICE, &["list", "--period", "2024-03-04:2024-03-08"])
        .success()
        .stdout(contains("PROJ-001").not())
        .stdout(contains("ADMIN-001 1h"));

    run_as(&db, ALICE, &["del", "--code", "PROJ-001", "--period", "2024-03"])
        .success()
        .stderr(contains("No PROJ-001 entries"));
}

#[test]
fn test_del_requires_a_target() {
    let db = setup_test_db("entry_del_args");
    init_db_with_roster(&db);

    run_as(&db, ALICE, &["del"]).failure();
    run_as(&db, ALICE, &["del", "--code", "PROJ-001"]).failure();
}

#[test]
fn test_list_shows_day_status() {
    let db = setup_test_db("entry_list_status");
    init_db_with_week(&db);

    run_as(&db, ALICE, &["list", "--period", "2024-03-04:2024-03-08"])
        .success()
        .stdout(contains("complete"))
        .stdout(contains("35h / 35h"));

    run_as(&db, BOB, &["list", "--period", "2024-03-04:2024-03-08"])
        .success()
        .stdout(contains("partial"))
        .stdout(contains("empty"))
        .stdout(contains("incomplete"));
}

#[test]
fn test_list_other_user_needs_admin() {
    let db = setup_test_db("entry_list_other");
    init_db_with_week(&db);

    run_as(&db, BOB, &["list", "--user", ALICE, "--period", "2024-03"])
        .failure()
        .stderr(contains("Unauthorized"));

    run_as(&db, ADMIN, &["list", "--user", ALICE, "--period", "2024-03-04:2024-03-08"])
        .success()
        .stdout(contains("Alice Smith"));
}

#[test]
fn test_actions_are_audited() {
    let db = setup_test_db("entry_audit");
    init_db_with_roster(&db);
    add_hours(&db, ALICE, "2024-03-04", "PROJ-001", "5");
    run_as(&db, ALICE, &["del", "2024-03-04", "PROJ-001"]).success();

    run_as(&db, ADMIN, &["log", "--print"])
        .success()
        .stdout(contains("user_add"))
        .stdout(contains("code_add"))
        .stdout(contains("alice@example.com logged 5h on 2024-03-04"))
        .stdout(contains("del"))
        .stdout(contains("migration_applied"));
}
