use serde_json::json;

use daybook::command::commands::Reply;
use daybook::core::types::Date;

use crate::common::{build_context, dispatch_json, workspace};

#[test]
fn planning_a_day_links_tasks_and_slots() {
    let dir = workspace();
    let mut ctx = build_context(dir.path());

    let task = dispatch_json(&mut ctx, &["task", "add", "Deep work", "", "", "2"]);
    let id = task["id"].to_string();

    dispatch_json(
        &mut ctx,
        &["schedule", "add", "2025-01-01", "13:00", "15:00", "Deep work", &id],
    );
    dispatch_json(
        &mut ctx,
        &["schedule", "add", "2025-01-01", "12:00", "13:00", "Lunch", "", "break"],
    );
    let day = dispatch_json(
        &mut ctx,
        &["schedule", "status", "2025-01-01", "13:00", "partial", "ran long"],
    );

    let slots = day["time_slots"].as_array().unwrap();
    assert_eq!(slots.len(), 2);
    assert_eq!(slots[0]["task_name"], "Lunch");
    assert_eq!(slots[1]["task_id"], 1);
    assert_eq!(slots[1]["status"], "partial");

    let progressed = dispatch_json(&mut ctx, &["task", "progress", &id, "2.5", "ran long"]);
    assert_eq!(progressed["actual_hours"], 2.5);
    assert_eq!(progressed["status"], "pending");
}

#[test]
fn create_then_summarize_keeps_single_file_per_date() {
    let dir = workspace();
    let mut ctx = build_context(dir.path());

    dispatch_json(&mut ctx, &["schedule", "summary", "2025-01-02", "first"]);
    dispatch_json(&mut ctx, &["schedule", "summary", "2025-01-01", "second"]);
    dispatch_json(&mut ctx, &["schedule", "summary", "2025-01-02", "rewritten"]);

    assert_eq!(
        dispatch_json(&mut ctx, &["schedule", "list"]),
        json!(["2025-01-02", "2025-01-01"])
    );
    let day = dispatch_json(&mut ctx, &["schedule", "date", "2025-01-02"]);
    assert_eq!(day["daily_summary"]["content"], "rewritten");
}

#[test]
fn recent_schedules_only_include_existing_days() {
    let dir = workspace();
    let mut ctx = build_context(dir.path());
    let today = Date::today();
    let two_back = today.days_back(2).to_string();

    dispatch_json(&mut ctx, &["schedule", "summary", &today.to_string(), "t"]);
    dispatch_json(&mut ctx, &["schedule", "summary", &two_back, "t-2"]);
    dispatch_json(&mut ctx, &["schedule", "summary", &today.days_back(9).to_string(), "old"]);

    let recent = dispatch_json(&mut ctx, &["schedule", "recent"]);
    let dates: Vec<&str> = recent
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["date"].as_str().unwrap())
        .collect();
    assert_eq!(dates, vec![today.to_string(), two_back.clone()]);

    let narrow = dispatch_json(&mut ctx, &["schedule", "recent", "2"]);
    assert_eq!(narrow.as_array().unwrap().len(), 1);
}

#[test]
fn profile_updates_survive_a_fresh_context() {
    let dir = workspace();
    {
        let mut ctx = build_context(dir.path());
        dispatch_json(&mut ctx, &["profile", "set", "name", "Sam"]);
        dispatch_json(&mut ctx, &["profile", "hours", "08:00", "16:00", "11:30"]);
        dispatch_json(&mut ctx, &["profile", "remind", "Timesheet", "", "true"]);
    }

    let mut ctx = build_context(dir.path());
    let profile = dispatch_json(&mut ctx, &["profile", "show"]);
    assert_eq!(profile["name"], "Sam");
    assert_eq!(profile["work_hours"]["lunch_start"], "11:30");
    assert_eq!(profile["work_hours"]["lunch_end"], "13:00");
    assert_eq!(profile["reminders"][0]["recurring"], true);
    assert_eq!(profile["next_reminder_id"], 2);

    let reset = dispatch_json(&mut ctx, &["profile", "init"]);
    assert_eq!(reset["name"], "");
    assert_eq!(reset["reminders"], json!([]));
}

#[test]
fn empty_word_list_is_overview_usage() {
    let dir = workspace();
    let mut ctx = build_context(dir.path());
    match daybook::dispatch(&mut ctx, &[]).unwrap() {
        Reply::Usage(text) => assert!(text.contains("Commands:")),
        Reply::Json(v) => panic!("expected usage, got {v}"),
    }
}

#[test]
fn corrupt_profile_surfaces_as_error() {
    let dir = workspace();
    let mut ctx = build_context(dir.path());
    std::fs::create_dir_all(&ctx.data_dir).unwrap();
    std::fs::write(ctx.profiles.path(), "{ not json").unwrap();

    let words = vec!["profile".to_string()];
    let err = daybook::dispatch(&mut ctx, &words).unwrap_err();
    assert!(err.to_string().starts_with("Corrupt data file"));
    assert!(!err.is_usage());
}
