//! CLI smoke tests
//!
//! Drives the dayline_cli binary end to end over a seeded slot file.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::fs;
use std::process::Command;

#[test]
fn test_cli_prints_day_summaries() {
    let dir = std::env::temp_dir().join("dayline_cli_test");
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join("slots.json");
    fs::write(
        &path,
        r#"[
            {"id": "s1", "date": "2025-08-15", "start_time": "07:00", "end_time": "09:00",
             "capacity": 40, "remaining": 30},
            {"id": "s2", "date": "2025-08-16", "capacity": 10, "remaining": 1, "blackout": true}
        ]"#,
    )
    .unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_dayline_cli"))
        .arg(&path)
        .args(["--from", "2025-08-15", "--days", "3"])
        .output()
        .unwrap();

    assert!(output.status.success(), "CLI should exit cleanly");
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("2025-08-15"), "requested range is printed");
    assert!(stdout.contains("2025-08-17"), "empty days are printed too");
    assert!(stdout.contains("green"), "75% remaining renders green");
    assert!(stdout.contains("grey"), "blackout day renders grey");
    assert!(stdout.contains("07:00"), "first slot time is shown");
}

#[test]
fn test_cli_rejects_missing_file() {
    let output = Command::new(env!("CARGO_BIN_EXE_dayline_cli"))
        .arg("/nonexistent/slots.json")
        .output()
        .unwrap();
    assert!(!output.status.success());
}

#[test]
fn test_cli_rejects_bad_date() {
    let dir = std::env::temp_dir().join("dayline_cli_test");
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join("empty.json");
    fs::write(&path, "[]").unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_dayline_cli"))
        .arg(&path)
        .args(["--from", "2025-99-99"])
        .output()
        .unwrap();
    assert!(!output.status.success());
}
