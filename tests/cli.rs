//! End-to-end tests for the focusflow binary.
//!
//! Each test points `FOCUSFLOW_HOME` at its own temporary directory so state
//! never leaks between tests or into the user's home.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn focusflow(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("focusflow").unwrap();
    cmd.env("FOCUSFLOW_HOME", home.path())
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1");
    cmd
}

fn quiet_home() -> TempDir {
    let home = TempDir::new().unwrap();
    std::fs::write(home.path().join("config.yaml"), "sound:\n  enabled: false\n").unwrap();
    home
}

fn status_json(home: &TempDir) -> serde_json::Value {
    let output = focusflow(home)
        .args(["status", "-o", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn test_help_lists_commands() {
    let home = quiet_home();
    focusflow(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("status"))
        .stdout(predicate::str::contains("stopwatch"));
}

#[test]
fn test_fresh_status() {
    let home = quiet_home();
    let status = status_json(&home);

    assert_eq!(status["active_mode"], "timer");
    assert_eq!(status["phase"], "focus");
    assert_eq!(status["current_round"], 1);
    assert_eq!(status["remaining_seconds"], 1500);
    assert_eq!(status["is_running"], false);
}

#[test]
fn test_pretty_status() {
    let home = quiet_home();
    focusflow(&home)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("25:00"))
        .stdout(predicate::str::contains("round 1/4"));
}

#[test]
fn test_start_tick_pause_persists() {
    let home = quiet_home();

    focusflow(&home).arg("start").assert().success();
    focusflow(&home)
        .args(["tick", "-n", "90"])
        .assert()
        .success()
        .stdout(predicate::str::contains("23:30"));
    focusflow(&home).arg("pause").assert().success();

    let status = status_json(&home);
    assert_eq!(status["remaining_seconds"], 1410);
    assert_eq!(status["is_running"], false);
    assert_eq!(status["today"]["seconds"], 90);
}

#[test]
fn test_full_focus_phase_moves_to_short_break() {
    let home = quiet_home();

    focusflow(&home).arg("start").assert().success();
    focusflow(&home)
        .args(["tick", "--for", "25m"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Focus complete, Short Break next"));

    let status = status_json(&home);
    assert_eq!(status["phase"], "short");
    assert_eq!(status["current_round"], 2);
    assert_eq!(status["remaining_seconds"], 300);
    assert_eq!(status["today"]["sessions"], 1);
}

#[test]
fn test_phase_switch() {
    let home = quiet_home();

    focusflow(&home).args(["phase", "long"]).assert().success();

    let status = status_json(&home);
    assert_eq!(status["phase"], "long");
    assert_eq!(status["remaining_seconds"], 900);
}

#[test]
fn test_stopwatch_keeps_timer_progress() {
    let home = quiet_home();

    focusflow(&home).arg("start").assert().success();
    focusflow(&home).args(["tick", "-n", "5"]).assert().success();
    focusflow(&home).arg("pause").assert().success();
    focusflow(&home).args(["mode", "stopwatch"]).assert().success();
    focusflow(&home).arg("start").assert().success();
    focusflow(&home).args(["tick", "-n", "7"]).assert().success();
    focusflow(&home).arg("stop").assert().success();

    let status = status_json(&home);
    assert_eq!(status["active_mode"], "stopwatch");
    assert_eq!(status["remaining_seconds"], 1495);
    assert_eq!(status["stopwatch_elapsed_seconds"], 0);
    assert_eq!(status["today"]["seconds"], 12);
    assert_eq!(status["today"]["sessions"], 1);
}

#[test]
fn test_config_set_changes_idle_timer() {
    let home = quiet_home();

    focusflow(&home)
        .args(["config", "set", "focus_minutes", "50"])
        .assert()
        .success();

    let status = status_json(&home);
    assert_eq!(status["remaining_seconds"], 3000);
}

#[test]
fn test_config_set_rejects_out_of_range() {
    let home = quiet_home();

    focusflow(&home)
        .args(["config", "set", "focus_minutes", "0"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("error"));

    let status = status_json(&home);
    assert_eq!(status["remaining_seconds"], 1500);
}

#[test]
fn test_config_set_unknown_key() {
    let home = quiet_home();

    focusflow(&home)
        .args(["config", "set", "volume", "11"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("volume"));
}

#[test]
fn test_invalid_tick_duration() {
    let home = quiet_home();

    focusflow(&home)
        .args(["tick", "--for", "soon"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid duration"));
}

#[test]
fn test_tick_duration_too_large() {
    let home = quiet_home();

    for span in ["9223372036854775807", "5000000000000000h"] {
        focusflow(&home)
            .args(["tick", "--for", span])
            .assert()
            .failure()
            .code(1)
            .stderr(predicate::str::contains("Invalid duration"));
    }
}

#[test]
fn test_config_commands_repair_out_of_range_file() {
    let home = TempDir::new().unwrap();
    std::fs::write(
        home.path().join("config.yaml"),
        "sound:\n  enabled: false\ntimer:\n  focus_minutes: 0\n",
    )
    .unwrap();

    focusflow(&home)
        .arg("status")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("focus_minutes"));

    focusflow(&home)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.yaml"));

    focusflow(&home)
        .args(["config", "set", "focus", "25"])
        .assert()
        .success();

    let status = status_json(&home);
    assert_eq!(status["remaining_seconds"], 1500);
}

#[test]
fn test_hand_edited_config_resyncs_idle_timer() {
    let home = quiet_home();
    focusflow(&home).arg("reset").assert().success();

    std::fs::write(
        home.path().join("config.yaml"),
        "sound:\n  enabled: false\ntimer:\n  focus_minutes: 40\n",
    )
    .unwrap();

    let status = status_json(&home);
    assert_eq!(status["remaining_seconds"], 2400);
}

#[test]
fn test_stats_json() {
    let home = quiet_home();

    focusflow(&home).arg("start").assert().success();
    focusflow(&home).args(["tick", "-n", "60"]).assert().success();

    let output = focusflow(&home)
        .args(["stats", "-d", "3", "-o", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stats: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(stats["count"], 3);
    assert_eq!(stats["total_seconds"], 60);
}
