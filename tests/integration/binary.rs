use std::fs;

use serde_json::Value;

use crate::common::{read_log_contents, run_in, stdout_json, stdout_text, workspace};

#[test]
fn profile_show_prints_default_template_without_writing() {
    let dir = workspace();
    let output = run_in(dir.path(), &["profile"]);

    let profile = stdout_json(&output);
    assert_eq!(profile["work_hours"]["start"], "09:00");
    assert_eq!(profile["preferences"]["prefer_morning_for"], "complex");
    assert!(dir.path().join("data").is_dir());
    assert!(!dir.path().join("data/personal_profile.json").exists());
}

#[test]
fn task_scenario_persists_between_invocations() {
    let dir = workspace();

    let added = stdout_json(&run_in(
        dir.path(),
        &["task", "add", "Write report", "", "", "3", "high"],
    ));
    assert_eq!(added["id"], 1);
    assert_eq!(added["status"], "pending");

    let done = stdout_json(&run_in(dir.path(), &["task", "status", "1", "completed"]));
    assert_eq!(done["status"], "completed");
    assert!(done["completed_at"].is_string());
    assert_eq!(done["actual_hours"], 0.0);

    let stored: Value =
        serde_json::from_str(&fs::read_to_string(dir.path().join("data/tasks.json")).unwrap())
            .unwrap();
    assert_eq!(stored["next_id"], 2);
    assert_eq!(stored["tasks"][0]["status"], "completed");

    let summary = stdout_json(&run_in(dir.path(), &["tasks", "summary"]));
    assert_eq!(summary["total"], 1);
    assert_eq!(summary["high_priority_pending"], 0);
}

#[test]
fn unknown_task_id_prints_null() {
    let dir = workspace();
    let output = run_in(dir.path(), &["task", "status", "42", "completed"]);
    assert_eq!(stdout_json(&output), Value::Null);
}

#[test]
fn missing_arguments_print_usage_and_touch_nothing() {
    let dir = workspace();
    let output = run_in(dir.path(), &["schedule", "add", "2025-01-01", "09:00"]);

    assert!(output.status.success());
    let stdout = stdout_text(&output);
    assert!(stdout.contains("Missing argument <end>"));
    assert!(stdout.contains("schedule add <date> <start> <end> <name>"));
    assert!(!dir.path().join("data/schedules/schedule_2025-01-01.json").exists());
}

#[test]
fn no_command_and_unknown_command_print_overview() {
    let dir = workspace();

    let bare = run_in(dir.path(), &[]);
    assert!(bare.status.success());
    assert!(stdout_text(&bare).contains("Commands:"));

    let unknown = run_in(dir.path(), &["frobnicate"]);
    assert!(unknown.status.success());
    let stdout = stdout_text(&unknown);
    assert!(stdout.contains("Unknown command: 'frobnicate'"));
    assert!(stdout.contains("Commands:"));
}

#[test]
fn bad_global_flag_prints_usage() {
    let dir = workspace();
    let output = run_in(dir.path(), &["--verbose", "now"]);
    assert!(output.status.success());
    assert!(stdout_text(&output).contains("Unknown argument: --verbose"));
}

#[test]
fn corrupt_task_file_fails_with_error_on_stderr() {
    let dir = workspace();
    fs::create_dir_all(dir.path().join("data")).unwrap();
    fs::write(dir.path().join("data/tasks.json"), "{ broken").unwrap();

    let output = run_in(dir.path(), &["task", "list"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Corrupt data file"));
    assert_eq!(
        fs::read_to_string(dir.path().join("data/tasks.json")).unwrap(),
        "{ broken"
    );
}

#[test]
fn broken_config_fails_before_any_command() {
    let dir = workspace();
    fs::write(dir.path().join("config.json"), "nope").unwrap();

    let output = run_in(dir.path(), &["profile"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Config error"));
}

#[test]
fn data_flag_redirects_every_store() {
    let dir = workspace();
    let data = dir.path().join("alt");
    let data_arg = data.to_string_lossy().into_owned();

    stdout_json(&run_in(dir.path(), &["--data", &data_arg, "task", "add", "x"]));
    stdout_json(&run_in(
        dir.path(),
        &["--data", &data_arg, "schedule", "summary", "2025-01-01", "ok"],
    ));
    stdout_json(&run_in(dir.path(), &["--data", &data_arg, "profile", "init"]));

    assert!(data.join("tasks.json").exists());
    assert!(data.join("schedules/schedule_2025-01-01.json").exists());
    assert!(data.join("personal_profile.json").exists());
    assert!(!dir.path().join("data").exists());
}

#[test]
fn config_file_sets_data_dir_relative_to_itself() {
    let dir = workspace();
    let conf_dir = dir.path().join("conf");
    fs::create_dir_all(&conf_dir).unwrap();
    let config = conf_dir.join("daybook.json");
    let config_arg = config.to_string_lossy().into_owned();

    stdout_json(&run_in(
        dir.path(),
        &["--config", &config_arg, "config", "set", "DATA_DIR", "records"],
    ));
    stdout_json(&run_in(dir.path(), &["--config", &config_arg, "task", "add", "x"]));

    assert!(conf_dir.join("records/tasks.json").exists());
}

#[test]
fn now_prints_unescaped_weekday() {
    let dir = workspace();
    let output = run_in(dir.path(), &["now"]);
    let now = stdout_json(&output);
    assert!(now["timestamp"].is_f64());
    assert!(stdout_text(&output).contains('周'));
}

#[test]
fn mutations_append_to_daily_log_file() {
    let dir = workspace();
    stdout_json(&run_in(dir.path(), &["task", "add", "first"]));
    stdout_json(&run_in(dir.path(), &["task", "add", "second"]));

    let logs = dir.path().join("data/logs");
    let entries: Vec<_> = fs::read_dir(&logs).unwrap().collect();
    assert_eq!(entries.len(), 1);

    let log = read_log_contents(&dir.path().join("data")).unwrap();
    assert!(log.contains("Added task 1"));
    assert!(log.contains("Added task 2"));
}

#[test]
fn file_logging_can_be_disabled() {
    let dir = workspace();
    stdout_json(&run_in(
        dir.path(),
        &["config", "set", "FILE_LOGGING_ENABLED", "False"],
    ));
    stdout_json(&run_in(dir.path(), &["task", "add", "quiet"]));
    assert!(!dir.path().join("data/logs").exists());
}
