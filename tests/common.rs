#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

pub const ADMIN: &str = "admin@example.com";
pub const ALICE: &str = "alice@example.com";
pub const BOB: &str = "bob@example.com";

/// Config directory shared by the test binaries, never the real home.
fn test_config_dir() -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push("rtimesheet_test_config");
    path.to_string_lossy().to_string()
}

pub fn rts() -> Command {
    let mut cmd = cargo_bin_cmd!("rtimesheet");
    cmd.env("RTIMESHEET_CONFIG_DIR", test_config_dir());
    cmd
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rtimesheet.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

pub fn init_db(db_path: &str) {
    rts()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

/// Run a command as `actor` against `db_path`.
pub fn run_as(db_path: &str, actor: &str, args: &[&str]) -> assert_cmd::assert::Assert {
    rts()
        .args(["--db", db_path, "--as", actor])
        .args(args)
        .assert()
}

/// Admin, two employees (Alice, Bob) and two charge codes.
pub fn init_db_with_roster(db_path: &str) {
    init_db(db_path);

    rts()
        .args(["--db", db_path, "user", "add", ADMIN, "--role", "admin"])
        .assert()
        .success();

    run_as(db_path, ADMIN, &["user", "add", ALICE, "--name", "Alice Smith"]).success();
    run_as(db_path, ADMIN, &["user", "add", BOB, "--name", "Bob Jones", "--role", "employee"])
        .success();

    run_as(db_path, ADMIN, &["code", "add", "PROJ-001", "Client alpha"]).success();
    run_as(db_path, ADMIN, &["code", "add", "ADMIN-001", "Internal administration"]).success();
}

pub fn add_hours(db_path: &str, actor: &str, date: &str, code: &str, hours: &str) {
    run_as(db_path, actor, &["add", date, code, hours]).success();
}

/// Week of 2024-03-04: Alice logs 7h on each weekday (35h), Bob 5h on
/// Monday..Thursday (20h).
pub fn init_db_with_week(db_path: &str) {
    init_db_with_roster(db_path);

    for day in ["2024-03-04", "2024-03-05", "2024-03-06", "2024-03-07", "2024-03-08"] {
        add_hours(db_path, ALICE, day, "PROJ-001", "7");
    }
    for day in ["2024-03-04", "2024-03-05", "2024-03-06", "2024-03-07"] {
        add_hours(db_path, BOB, day, "PROJ-001", "5");
    }
}
