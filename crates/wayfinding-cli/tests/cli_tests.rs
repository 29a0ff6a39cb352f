//! Integration tests for the inventory and snapshot commands.
//!
//! These tests use `assert_cmd` to verify CLI behavior including:
//! - doors and stats listings in text and JSON
//! - map checks
//! - writing a snapshot and routing from it

use std::fs;
use std::path::PathBuf;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Path to the test fixture plan.
fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures/two_floor_plan.json")
}

fn cli() -> Command {
    let mut cmd = cargo_bin_cmd!("wayfinding-cli");
    cmd.env_remove("WAYFINDING_PLAN")
        .env_remove("WAYFINDING_SNAPSHOT")
        .env("RUST_LOG", "error");
    cmd
}

#[test]
fn doors_are_listed_sorted() {
    cli()
        .arg("--plan")
        .arg(fixture_path())
        .arg("doors")
        .assert()
        .success()
        .stdout("Lobby\nR101\nR201\nStorage\n");
}

#[test]
fn stats_report_counts() {
    cli()
        .arg("--plan")
        .arg(fixture_path())
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("Floors: 2 (floor1, floor2)"))
        .stdout(predicate::str::contains("Segments: 10"))
        .stdout(predicate::str::contains("Portals: 2 (1 accessible)"));
}

#[test]
fn stats_json_flattens_counts() {
    let output = cli()
        .arg("--plan")
        .arg(fixture_path())
        .args(["--format", "json", "stats"])
        .output()
        .expect("runs");
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid json");
    assert_eq!(json["floors"], 2);
    assert_eq!(json["doors"], 4);
    assert_eq!(json["default_floor"], "floor1");
}

#[test]
fn check_reports_isolated_room() {
    cli()
        .arg("--plan")
        .arg(fixture_path())
        .args(["check", "--from", "Lobby"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Unreachable door: Storage"))
        .stdout(predicate::str::contains(
            "Unreachable path: floor floor2 segment 4",
        ));
}

#[test]
fn snapshot_round_trip_through_cli() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let snapshot = temp_dir.path().join("building.wfgs");

    cli()
        .arg("--plan")
        .arg(fixture_path())
        .arg("snapshot")
        .arg("--output")
        .arg(&snapshot)
        .assert()
        .success()
        .stdout(predicate::str::contains("Snapshot written to"));
    assert!(snapshot.exists());

    cli()
        .arg("--snapshot")
        .arg(&snapshot)
        .args(["route", "--from", "Lobby", "--to", "R201"])
        .assert()
        .success()
        .stdout(predicate::str::contains("length 54.00"));
}

#[test]
fn corrupted_snapshot_is_rejected() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let snapshot = temp_dir.path().join("broken.wfgs");
    fs::write(&snapshot, b"WFGS not really a snapshot, just some padding bytes here")
        .expect("write file");

    cli()
        .arg("--snapshot")
        .arg(&snapshot)
        .arg("doors")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load snapshot"));
}

#[test]
fn plan_and_snapshot_flags_conflict() {
    cli()
        .arg("--plan")
        .arg(fixture_path())
        .args(["--snapshot", "other.wfgs", "doors"])
        .assert()
        .failure();
}
