use super::{
    cli::CliPaths,
    clock::{DateTimeInfo, schedule_filename, today_filename},
    context::AppContext,
    models::{BaseEntity, EntityId, Profile, Reminder, Schedule, Task, TimeSlot},
    persist::{load_document, save_document},
    repository::Repository,
    types::{
        Bool, ClockTime, Date, GlobalCommand, Priority, ProfileAction, SlotStatus, SlotType,
        TaskStatus, WeekdayLocale,
    },
};
use crate::errors::Error;
use chrono::{Datelike, Local, NaiveDate, TimeZone};
use serde_json::json;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn words(raw: &[&str]) -> Vec<String> {
    raw.iter().map(|s| s.to_string()).collect()
}

// ---------- types.rs ----------
#[test]
fn parses_command_words_and_actions() {
    assert_eq!(GlobalCommand::try_from("tasks").unwrap(), GlobalCommand::Task);
    assert_eq!(GlobalCommand::try_from("NOW").unwrap(), GlobalCommand::Now);
    assert!(matches!(
        GlobalCommand::try_from("nope"),
        Err(Error::UnknownCommand(_))
    ));

    assert_eq!(
        ProfileAction::try_from(" Reminder ").unwrap(),
        ProfileAction::Remind
    );
    assert!(matches!(
        ProfileAction::try_from("delete"),
        Err(Error::Parse(_))
    ));
}

#[test]
fn domain_enums_use_wire_names() {
    assert_eq!(TaskStatus::try_from("IN_PROGRESS").unwrap(), TaskStatus::InProgress);
    assert_eq!(TaskStatus::InProgress.to_string(), "in_progress");
    assert_eq!(
        serde_json::to_value(TaskStatus::InProgress).unwrap(),
        json!("in_progress")
    );
    assert_eq!(Priority::default(), Priority::Medium);
    assert_eq!(SlotStatus::default(), SlotStatus::Planned);
    assert_eq!(WeekdayLocale::try_from("EN").unwrap(), WeekdayLocale::En);
    assert!(TaskStatus::Pending.is_open());
    assert!(TaskStatus::InProgress.is_open());
    assert!(!TaskStatus::Cancelled.is_open());
}

#[test]
fn slot_type_keeps_free_text_kinds() {
    assert_eq!(SlotType::parse(" Meeting "), SlotType::Meeting);
    assert_eq!(SlotType::parse("errand"), SlotType::Other("errand".into()));
    assert_eq!(serde_json::to_value(SlotType::Break).unwrap(), json!("break"));
    let parsed: SlotType = serde_json::from_value(json!("focus")).unwrap();
    assert_eq!(parsed.as_str(), "focus");
}

#[test]
fn date_accepts_multiple_formats_and_defaults_year() {
    let d = Date::try_from_str("2025-01-01").unwrap();
    assert_eq!(d.to_string(), "2025-01-01");

    let d1 = Date::try_from_str("12-31").unwrap();
    assert_eq!(d1.0.month(), 12);
    assert_eq!(d1.0.day(), 31);
    assert_eq!(d1.0.year(), Local::now().year());

    let d2 = Date::try_from_str("01/02/2025").unwrap();
    assert_eq!(d2.to_string(), "2025-01-02");
    assert_eq!(Date::try_from_str("2025.3.4").unwrap().to_string(), "2025-03-04");

    assert!(Date::try_from_str("13/40").is_err());
    assert!(Date::try_from_str("../../etc").is_err());
}

#[test]
fn days_back_crosses_month_boundaries() {
    let d = Date(NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());
    assert_eq!(d.days_back(0), d);
    assert_eq!(d.days_back(1).to_string(), "2025-02-28");
}

#[test]
fn days_back_saturates_at_the_earliest_date() {
    let floor = Date(NaiveDate::MIN);
    assert_eq!(floor.days_back(1), floor);
    let d = Date(NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());
    assert_eq!(d.days_back(u32::MAX), floor);
}

#[test]
fn clock_time_normalizes_to_padded_hours() {
    assert_eq!(ClockTime::try_from_str("9:05").unwrap().to_string(), "09:05");
    assert_eq!(ClockTime::try_from_str("17:30:00").unwrap().to_string(), "17:30");
    match ClockTime::try_from_str("25:00") {
        Err(Error::Parse(msg)) => assert!(msg.contains("Invalid time: '25:00'")),
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[test]
fn parses_bool_words() {
    assert_eq!(Bool::try_from_str("yes").unwrap(), Bool(true));
    assert_eq!(Bool::try_from_str("FALSE").unwrap(), Bool(false));
    assert!(Bool::try_from_str("maybe").is_err());
    assert_eq!(Bool(true).to_string(), "True");
}

// ---------- clock.rs ----------
#[test]
fn datetime_info_formats_fields() {
    let at = Local.with_ymd_and_hms(2025, 1, 6, 8, 5, 9).unwrap();

    let info = DateTimeInfo::at(at, WeekdayLocale::Zh);
    assert_eq!(info.date, "2025-01-06");
    assert_eq!(info.time, "08:05:09");
    assert_eq!(info.weekday, "周一");
    assert_eq!(info.datetime, "2025-01-06 08:05:09");
    assert_eq!(info.timestamp, at.timestamp() as f64);

    let en = DateTimeInfo::at(at, WeekdayLocale::En);
    assert_eq!(en.weekday, "Monday");
}

#[test]
fn schedule_filenames_embed_the_date() {
    assert_eq!(schedule_filename("2025-01-01"), "schedule_2025-01-01.json");
    assert_eq!(today_filename(), schedule_filename(&Date::today().to_string()));
}

// ---------- models.rs ----------
#[test]
fn default_profile_matches_template() {
    let profile = Profile::default();
    assert_eq!(profile.work_hours.start, "09:00");
    assert_eq!(profile.work_hours.lunch_end, "13:00");
    assert_eq!(profile.preferences.focus_duration_minutes, 50);
    assert_eq!(profile.preferences.prefer_afternoon_for, "meetings");
    assert!(profile.reminders.is_empty());
    assert_eq!(profile.next_reminder_id, 1);
    assert_eq!(profile.created_at, profile.updated_at);
}

#[test]
fn task_status_change_stamps_completion_only_when_completed() {
    let mut task = Task::new("a", "", "", 1.0, Priority::Low);
    task.set_status(TaskStatus::InProgress);
    assert!(task.completed_at.is_none());
    task.set_status(TaskStatus::Completed);
    assert!(task.completed_at.is_some());

    task.push_note("");
    assert!(task.progress_notes.is_empty());
    task.push_note("halfway");
    assert_eq!(task.progress_notes[0].note, "halfway");
}

#[test]
fn schedule_serializes_updated_at_only_after_save() {
    let mut schedule = Schedule::empty("2025-01-01");
    let doc = serde_json::to_value(&schedule).unwrap();
    assert!(doc.get("updated_at").is_none());
    assert_eq!(doc["daily_summary"], serde_json::Value::Null);

    schedule.updated_at = Some("2025-01-01 10:00:00".into());
    let doc = serde_json::to_value(&schedule).unwrap();
    assert_eq!(doc["updated_at"], "2025-01-01 10:00:00");
}

#[test]
fn time_slot_uses_type_key_on_the_wire() {
    let slot = TimeSlot::planned("09:00", "10:00", "Standup", Some(3), SlotType::Meeting);
    let doc = serde_json::to_value(&slot).unwrap();
    assert_eq!(doc["type"], "meeting");
    assert_eq!(doc["status"], "planned");
    assert_eq!(doc["task_id"], 3);
    assert_eq!(slot.to_string(), "09:00-10:00 'Standup' (meeting, planned)");
}

// ---------- repository.rs ----------
#[test]
fn repository_inserts_and_gets_entities() {
    let mut repo = Repository::<Task>::new();
    let t1_id = repo.insert(Task::new("a", "", "", 1.0, Priority::High)).unwrap().id;
    let t2_id = repo.insert(Task::new("b", "", "", 2.0, Priority::Low)).unwrap().id;
    assert_eq!(t1_id, 1);
    assert_eq!(t2_id, 2);
    assert_eq!(repo.peek_next_id(), 3);

    assert_eq!(repo.get(t1_id).unwrap().name, "a");
    assert!(repo.get(99).is_none());
    repo.get_mut(t2_id).unwrap().name = "renamed".into();
    assert_eq!(repo.get(t2_id).unwrap().name, "renamed");
}

#[test]
fn repository_restore_raises_stale_counter() {
    let mut reminder = Reminder::new("x", None, false);
    reminder.set_id(4);

    let repo = Repository::restore(vec![reminder.clone()], 2).unwrap();
    assert_eq!(repo.peek_next_id(), 5);

    let repo = Repository::restore(vec![reminder], 10).unwrap();
    assert_eq!(repo.peek_next_id(), 10);

    let empty = Repository::<Reminder>::restore(Vec::new(), 0).unwrap();
    assert_eq!(empty.peek_next_id(), 1);
    assert!(empty.is_empty());
}

#[test]
fn repository_never_wraps_the_id_counter() {
    let mut reminder = Reminder::new("x", None, false);
    reminder.set_id(EntityId::MAX);
    assert!(Repository::restore(vec![reminder], 1).is_none());

    let mut repo = Repository::<Reminder>::restore(Vec::new(), EntityId::MAX).unwrap();
    assert!(repo.insert(Reminder::new("y", None, false)).is_none());
    assert!(repo.is_empty());
    assert_eq!(repo.peek_next_id(), EntityId::MAX);
}

#[test]
fn repository_query_filters_in_insertion_order() {
    let mut repo = Repository::<Task>::new();
    repo.insert(Task::new("a", "", "", 1.0, Priority::High)).unwrap();
    repo.insert(Task::new("b", "", "", 2.0, Priority::Low)).unwrap();
    repo.insert(Task::new("c", "", "", 3.0, Priority::High)).unwrap();

    let high = repo
        .query()
        .r#where(|t| t.priority == Priority::High)
        .collect();
    let names: Vec<&str> = high.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["a", "c"]);

    let count = repo
        .query()
        .r#where(|t| t.priority == Priority::High)
        .r#where(|t| t.estimated_hours > 2.0)
        .count();
    assert_eq!(count, 1);
    assert_eq!(repo.query().count(), repo.len());
}

#[test]
fn repository_into_parts_keeps_counter() {
    let mut repo = Repository::<Reminder>::new();
    repo.insert(Reminder::new("a", None, false)).unwrap();
    let (items, next) = repo.into_parts();
    assert_eq!(items.len(), 1);
    assert_eq!(next, 2);
}

// ---------- persist.rs ----------
#[test]
fn load_document_reports_missing_file_as_none() {
    let dir = TempDir::new().unwrap();
    let loaded = load_document::<Profile>(&dir.path().join("absent.json")).unwrap();
    assert!(loaded.is_none());
}

#[test]
fn save_document_writes_pretty_utf8_and_leaves_no_temp_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("doc.json");
    let doc = json!({ "weekday": "周一", "n": 1 });

    save_document(&path, &doc).unwrap();
    let text = fs::read_to_string(&path).unwrap();
    assert!(text.contains("周一"));
    assert!(text.contains("\n  \"n\": 1"));

    let names: Vec<String> = fs::read_dir(path.parent().unwrap())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["doc.json"]);

    let back: serde_json::Value = load_document(&path).unwrap().unwrap();
    assert_eq!(back, doc);
}

#[test]
fn load_document_reports_corrupt_file_with_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tasks.json");
    fs::write(&path, "{ nope").unwrap();

    match load_document::<serde_json::Value>(&path) {
        Err(Error::CorruptDataFile { path: p, reason }) => {
            assert_eq!(p, path);
            assert!(!reason.is_empty());
        }
        other => panic!("expected corrupt data file, got {other:?}"),
    }
}

// ---------- cli.rs ----------
#[test]
fn cli_paths_defaults_without_flags() {
    let paths = CliPaths::from_args(words(&["task", "list"])).unwrap();
    assert_eq!(paths.config_path, PathBuf::from("config.json"));
    assert_eq!(paths.data_dir, None);
    assert_eq!(paths.logs_dir, None);
    assert_eq!(paths.command, words(&["task", "list"]));
}

#[test]
fn cli_paths_reads_flags_before_command_only() {
    let paths = CliPaths::from_args(words(&[
        "--config", "c.json", "--data", "d", "--logs", "l", "profile", "set", "note", "--data",
    ]))
    .unwrap();
    assert_eq!(paths.config_path, PathBuf::from("c.json"));
    assert_eq!(paths.data_dir, Some(PathBuf::from("d")));
    assert_eq!(paths.logs_dir, Some(PathBuf::from("l")));
    assert_eq!(paths.command, words(&["profile", "set", "note", "--data"]));
}

#[test]
fn cli_paths_rejects_unknown_or_incomplete_flags() {
    match CliPaths::from_args(words(&["--bogus"])) {
        Err(Error::Parse(msg)) => assert!(msg.starts_with("Unknown argument: --bogus")),
        other => panic!("expected parse error, got {other:?}"),
    }
    match CliPaths::from_args(words(&["--data"])) {
        Err(Error::Parse(msg)) => assert!(msg.starts_with("Missing value for --data")),
        other => panic!("expected parse error, got {other:?}"),
    }
    let help = CliPaths::from_args(words(&["--help"])).unwrap();
    assert_eq!(help.command, words(&["--help"]));
}

// ---------- context.rs ----------
#[test]
fn context_resolves_data_and_log_dirs_from_config() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config.json");
    fs::write(
        &config,
        r#"{ "data_dir": { "value": "store", "description": "d" },
             "file_logging_enabled": { "value": "False", "description": "f" } }"#,
    )
    .unwrap();

    let ctx = AppContext::new_with_paths(&config, None, None).unwrap();
    assert_eq!(ctx.data_dir, dir.path().join("store"));
    assert_eq!(ctx.logs_dir, dir.path().join("store").join("logs"));
    assert_eq!(ctx.tasks.path(), dir.path().join("store").join("tasks.json"));
    assert!(!ctx.logger.file_logging_enabled());
}

#[test]
fn context_data_flag_overrides_config() {
    let dir = TempDir::new().unwrap();
    let data = dir.path().join("elsewhere");
    let ctx =
        AppContext::new_with_paths(&dir.path().join("config.json"), Some(&data), None).unwrap();
    assert_eq!(ctx.data_dir, data);
    assert_eq!(ctx.profiles.path(), data.join("personal_profile.json"));
    assert_eq!(ctx.schedules.dir(), data.join("schedules"));
}

#[test]
fn context_fails_on_broken_config() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config.json");
    fs::write(&config, "[").unwrap();
    assert!(matches!(
        AppContext::new_with_paths(&config, None, None),
        Err(Error::Config(_))
    ));
}
