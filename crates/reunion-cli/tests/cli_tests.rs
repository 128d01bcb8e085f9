//! Integration tests for the `reunion` CLI binary.
//!
//! These exercise the schedule and availability subcommands through the
//! actual binary, including stdin/stdout piping, file I/O, and error
//! handling.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;

/// Helper: path to the snapshot.json fixture.
fn snapshot_path() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/snapshot.json")
}

/// Helper: read the snapshot.json fixture as a string.
fn snapshot_json() -> String {
    std::fs::read_to_string(snapshot_path()).expect("snapshot.json fixture must exist")
}

// ─────────────────────────────────────────────────────────────────────────────
// Schedule subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn schedule_stdin_to_stdout() {
    Command::cargo_bin("reunion")
        .unwrap()
        .args(["schedule", "--start", "2026-12-01", "--days", "60"])
        .write_stdin(snapshot_json())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"meetings\""))
        .stdout(predicate::str::contains("2026-12-11"))
        .stdout(predicate::str::contains("\"a\""))
        .stdout(predicate::str::contains("\"b\""));
}

#[test]
fn schedule_file_to_file() {
    let output_path = "/tmp/reunion-test-schedule-output.json";
    let _ = std::fs::remove_file(output_path);

    Command::cargo_bin("reunion")
        .unwrap()
        .args([
            "schedule",
            "-i",
            snapshot_path(),
            "-o",
            output_path,
            "--start",
            "2026-12-01",
            "--days",
            "60",
        ])
        .assert()
        .success();

    let content = std::fs::read_to_string(output_path).expect("output file must exist");
    assert!(content.contains("\"meetings\""));
    assert!(content.contains("2026-12-11"));
}

#[test]
fn schedule_is_reproducible_for_a_fixed_seed() {
    let run = || {
        Command::cargo_bin("reunion")
            .unwrap()
            .args([
                "schedule", "--start", "2026-12-01", "--days", "60", "--seed", "9",
            ])
            .write_stdin(snapshot_json())
            .output()
            .unwrap()
    };
    assert_eq!(run().stdout, run().stdout);
}

#[test]
fn schedule_rejects_malformed_json() {
    Command::cargo_bin("reunion")
        .unwrap()
        .arg("schedule")
        .write_stdin("{not json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("snapshot"));
}

#[test]
fn schedule_rejects_a_reversed_window() {
    Command::cargo_bin("reunion")
        .unwrap()
        .args(["schedule", "--start", "2026-12-01", "--days=-10"])
        .write_stdin(snapshot_json())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid scheduling window"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Availability subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn availability_lists_resolved_dates() {
    Command::cargo_bin("reunion")
        .unwrap()
        .args([
            "availability",
            "-i",
            snapshot_path(),
            "--name",
            "Alice",
            "--start",
            "2026-11-01",
            "--days",
            "60",
        ])
        .assert()
        .success()
        // The Thanksgiving holiday rule and the December range both land.
        .stdout(predicate::str::contains("2026-11-26"))
        .stdout(predicate::str::contains("2026-12-11"))
        .stdout(predicate::str::contains("2026-12-25"));
}

#[test]
fn availability_rejects_unknown_participant() {
    Command::cargo_bin("reunion")
        .unwrap()
        .args(["availability", "-i", snapshot_path(), "--name", "Mallory"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Mallory"));
}
