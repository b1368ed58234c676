use crate::command::policies::flag_policy::{FlagDecision, FlagPolicy, MaxArgs};
use crate::command::positional::Positional;
use crate::core::clock::current_datetime;
use crate::core::context::AppContext;
use crate::core::models::{EntityId, Task};
use crate::core::types::{
    Bool, ClockTime, ConfigAction, Date, Priority, ProfileAction, ScheduleAction, SlotStatus,
    SlotType, TaskAction, TaskStatus,
};
use crate::errors::{Error, Result};
use crate::logging::LogTarget;
use serde::Serialize;
use serde_json::{Map, Value, json};

/// What a command hands back to the entry point for printing.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// A document printed as indented JSON on stdout.
    Json(Value),
    /// Usage text printed on stdout; nothing was read or written.
    Usage(String),
}

impl Reply {
    pub fn json<T: Serialize>(value: &T) -> Result<Self> {
        Ok(Reply::Json(serde_json::to_value(value)?))
    }
}

pub struct CommandCore<'a> {
    pub args: &'a [String],
    pub flag_policy: FlagPolicy,
}
impl<'a> CommandCore<'a> {
    pub fn new(args: &'a [String], flag_policy: FlagPolicy) -> Self {
        Self { args, flag_policy }
    }
}

mod sealed {
    use super::CommandCore;

    pub trait Sealed<'a> {
        fn core(&self) -> &CommandCore<'a>;
    }
}

pub trait Command<'a>: sealed::Sealed<'a> {
    fn usage(&self) -> String;
    fn perform(&self, ctx: &mut AppContext) -> Result<Reply>;

    /// Runs the command. Flag short-circuits and argument errors come back as
    /// `Reply::Usage`; only storage failures surface as `Err`.
    fn execute(&self, ctx: &mut AppContext) -> Result<Reply> {
        let core = self.core();
        let outcome = match core.flag_policy.evaluate(core.args) {
            FlagDecision::ShortCircuitUsage => return Ok(Reply::Usage(self.usage())),
            FlagDecision::Continue => self.perform(ctx),
            FlagDecision::Error(e) => Err(e),
        };
        match outcome {
            Err(e) if e.is_usage() => Ok(Reply::Usage(format!("{e}\n{}", self.usage()))),
            other => other,
        }
    }
}

pub type CommandDyn<'a> = Box<dyn Command<'a> + 'a>;

/// Splits `<action> [args...]`, falling back to `default` when no action word
/// is given.
fn split_action<'a, A>(
    args: &'a [String],
    default: A,
    parse: impl Fn(&str) -> Result<A>,
) -> Result<(A, Positional<'a>)> {
    match args.split_first() {
        None => Ok((default, Positional::new(&[]))),
        Some((word, rest)) => Ok((parse(word)?, Positional::new(rest))),
    }
}

fn clock_time(raw: &str) -> Result<String> {
    Ok(ClockTime::try_from_str(raw)?.to_string())
}

fn normalized_date(raw: &str) -> Result<String> {
    Ok(Date::try_from_str(raw)?.to_string())
}

// ====
// Now
// ====

pub struct NowCommand<'a> {
    core: CommandCore<'a>,
}

impl<'a> NowCommand<'a> {
    pub fn new(args: &'a [String]) -> Self {
        let policy = FlagPolicy::help_within(1).with(MaxArgs(0));
        Self {
            core: CommandCore::new(args, policy),
        }
    }
}

impl<'a> sealed::Sealed<'a> for NowCommand<'a> {
    fn core(&self) -> &CommandCore<'a> {
        &self.core
    }
}

impl<'a> Command<'a> for NowCommand<'a> {
    fn usage(&self) -> String {
        "Usage: now   # Current local date, time and weekday".into()
    }

    fn perform(&self, ctx: &mut AppContext) -> Result<Reply> {
        Reply::json(&current_datetime(ctx.config.weekday_locale()))
    }
}

// =======
// Profile
// =======

pub struct ProfileCommand<'a> {
    core: CommandCore<'a>,
}

impl<'a> ProfileCommand<'a> {
    pub fn new(args: &'a [String]) -> Self {
        Self {
            core: CommandCore::new(args, FlagPolicy::help_within(2)),
        }
    }

    /// JSON objects and arrays are merged as structured values; anything
    /// else is stored as the literal string typed.
    fn patch_value(raw: &str) -> Value {
        match serde_json::from_str::<Value>(raw) {
            Ok(v @ (Value::Object(_) | Value::Array(_))) => v,
            _ => Value::String(raw.to_string()),
        }
    }
}

impl<'a> sealed::Sealed<'a> for ProfileCommand<'a> {
    fn core(&self) -> &CommandCore<'a> {
        &self.core
    }
}

impl<'a> Command<'a> for ProfileCommand<'a> {
    fn usage(&self) -> String {
        [
            "Usage: profile [show]",
            "       profile init",
            "       profile set <field> <value>",
            "       profile hours <start> <end> [lunch_start] [lunch_end]",
            "       profile preferences",
            "       profile remind <content> [time] [recurring]",
        ]
        .join("\n")
    }

    fn perform(&self, ctx: &mut AppContext) -> Result<Reply> {
        let (action, args) =
            split_action(self.core.args, ProfileAction::Show, ProfileAction::try_from)?;
        let store = &ctx.profiles;
        match action {
            ProfileAction::Show => Reply::json(&store.load()?),
            ProfileAction::Init => {
                let profile = store.init()?;
                ctx.logger
                    .info("Initialized profile with defaults", LogTarget::FileOnly);
                Reply::json(&profile)
            }
            ProfileAction::Set => {
                let field = args.required(0, "field")?.trim();
                let raw = args.required(1, "value")?;
                if field.is_empty() {
                    return Err(Error::parse("Field name cannot be empty."));
                }
                let mut patch = Map::new();
                patch.insert(field.to_string(), Self::patch_value(raw));
                let profile = store.update(patch)?;
                ctx.logger
                    .info(format!("Set profile field '{field}'"), LogTarget::FileOnly);
                Reply::json(&profile)
            }
            ProfileAction::Hours => {
                let start = clock_time(args.required(0, "start")?)?;
                let end = clock_time(args.required(1, "end")?)?;
                let lunch_start = args.non_blank(2).map(clock_time).transpose()?;
                let lunch_end = args.non_blank(3).map(clock_time).transpose()?;
                let profile = store.set_work_hours(
                    &start,
                    &end,
                    lunch_start.as_deref(),
                    lunch_end.as_deref(),
                )?;
                ctx.logger.info(
                    format!("Set work hours {start}-{end}"),
                    LogTarget::FileOnly,
                );
                Reply::json(&profile)
            }
            ProfileAction::Preferences => Reply::json(&store.get_work_preferences()?),
            ProfileAction::Remind => {
                let content = args.required(0, "content")?;
                let time = args.non_blank(1).map(str::to_string);
                let recurring = args
                    .non_blank(2)
                    .map(Bool::try_from_str)
                    .transpose()?
                    .is_some_and(|b| b.0);
                let reminder = store.add_reminder(content, time, recurring)?;
                ctx.logger.info(
                    format!("Added reminder {}: {}", reminder.id, reminder.content),
                    LogTarget::FileOnly,
                );
                Reply::json(&reminder)
            }
        }
    }
}

// ========
// Schedule
// ========

pub struct ScheduleCommand<'a> {
    core: CommandCore<'a>,
}

impl<'a> ScheduleCommand<'a> {
    pub fn new(args: &'a [String]) -> Self {
        Self {
            core: CommandCore::new(args, FlagPolicy::help_within(2)),
        }
    }
}

impl<'a> sealed::Sealed<'a> for ScheduleCommand<'a> {
    fn core(&self) -> &CommandCore<'a> {
        &self.core
    }
}

impl<'a> Command<'a> for ScheduleCommand<'a> {
    fn usage(&self) -> String {
        [
            "Usage: schedule [today]",
            "       schedule date <date>",
            "       schedule recent [days]",
            "       schedule list",
            "       schedule add <date> <start> <end> <name> [task_id] [type]",
            "       schedule status <date> <start> <planned|completed|skipped|partial> [notes]",
            "       schedule summary <date> <text>",
        ]
        .join("\n")
    }

    fn perform(&self, ctx: &mut AppContext) -> Result<Reply> {
        let (action, args) =
            split_action(self.core.args, ScheduleAction::Today, ScheduleAction::try_from)?;
        let store = &ctx.schedules;
        match action {
            ScheduleAction::Today => Reply::json(&store.load(None)?),
            ScheduleAction::Date => Reply::json(&store.load(Some(args.required(0, "date")?))?),
            ScheduleAction::Recent => {
                let days = args
                    .parsed::<u32>(0, "day count")?
                    .unwrap_or_else(|| ctx.config.recent_days());
                Reply::json(&store.get_recent_schedules(days)?)
            }
            ScheduleAction::List => Reply::json(&store.list_all_schedules()?),
            ScheduleAction::Add => {
                let date = normalized_date(args.required(0, "date")?)?;
                let start = clock_time(args.required(1, "start")?)?;
                let end = clock_time(args.required(2, "end")?)?;
                let name = args.required(3, "name")?;
                let task_id = args.parsed::<EntityId>(4, "task id")?;
                let slot_type = args.non_blank(5).map(SlotType::parse).unwrap_or_default();
                let schedule =
                    store.add_time_slot(&date, &start, &end, name, task_id, slot_type)?;
                ctx.logger.info(
                    format!("Added slot {start}-{end} '{name}' on {date}"),
                    LogTarget::FileOnly,
                );
                Reply::json(&schedule)
            }
            ScheduleAction::Status => {
                let date = normalized_date(args.required(0, "date")?)?;
                let start = clock_time(args.required(1, "start")?)?;
                let status = SlotStatus::try_from(args.required(2, "status")?)?;
                let notes = args.get(3).unwrap_or_default();
                let schedule = store.update_slot_status(&date, &start, status, notes)?;
                match schedule.time_slots.iter().find(|s| s.start == start) {
                    Some(slot) => ctx.logger.info(
                        format!("Marked slot {slot} on {date}"),
                        LogTarget::FileOnly,
                    ),
                    None => ctx.logger.warn(
                        format!("No slot starts at {start} on {date}; schedule unchanged"),
                        LogTarget::FileOnly,
                    ),
                }
                Reply::json(&schedule)
            }
            ScheduleAction::Summary => {
                let date = normalized_date(args.required(0, "date")?)?;
                let text = args.required(1, "text")?;
                let schedule = store.add_daily_summary(&date, text)?;
                ctx.logger
                    .info(format!("Wrote summary for {date}"), LogTarget::FileOnly);
                Reply::json(&schedule)
            }
        }
    }
}

// ====
// Task
// ====

pub struct TaskCommand<'a> {
    core: CommandCore<'a>,
}

impl<'a> TaskCommand<'a> {
    pub fn new(args: &'a [String]) -> Self {
        Self {
            core: CommandCore::new(args, FlagPolicy::help_within(2)),
        }
    }

    fn updated(ctx: &AppContext, id: EntityId, task: Option<Task>, what: &str) -> Result<Reply> {
        match &task {
            Some(t) => ctx
                .logger
                .info(format!("Updated {what} of task {id}: {t}"), LogTarget::FileOnly),
            None => ctx
                .logger
                .warn(format!("No task with id {id}"), LogTarget::FileOnly),
        }
        Reply::json(&task)
    }
}

impl<'a> sealed::Sealed<'a> for TaskCommand<'a> {
    fn core(&self) -> &CommandCore<'a> {
        &self.core
    }
}

impl<'a> Command<'a> for TaskCommand<'a> {
    fn usage(&self) -> String {
        [
            "Usage: task [summary]",
            "       task list [status]",
            "       task pending",
            "       task add <name> [description] [deadline] [hours] [high|medium|low]",
            "       task status <id> <pending|in_progress|completed|cancelled> [note]",
            "       task progress <id> <actual_hours> [note]",
        ]
        .join("\n")
    }

    fn perform(&self, ctx: &mut AppContext) -> Result<Reply> {
        let (action, args) =
            split_action(self.core.args, TaskAction::Summary, TaskAction::try_from)?;
        let store = &ctx.tasks;
        match action {
            TaskAction::Summary => Reply::json(&store.get_tasks_summary()?),
            TaskAction::List => match args.non_blank(0) {
                Some(raw) => Reply::json(&store.get_tasks_by_status(TaskStatus::try_from(raw)?)?),
                None => Reply::json(&store.get_all_tasks()?),
            },
            TaskAction::Pending => Reply::json(&store.get_pending_tasks()?),
            TaskAction::Add => {
                let name = args.required(0, "name")?;
                let description = args.get(1).unwrap_or_default();
                let deadline = args
                    .non_blank(2)
                    .map(normalized_date)
                    .transpose()?
                    .unwrap_or_default();
                let hours = args.parsed::<f64>(3, "hours")?.unwrap_or(0.0);
                let priority = args
                    .non_blank(4)
                    .map(Priority::try_from)
                    .transpose()?
                    .unwrap_or_default();
                let task = store.add_task(name, description, &deadline, hours, priority)?;
                ctx.logger
                    .info(format!("Added task {}: {task}", task.id), LogTarget::FileOnly);
                Reply::json(&task)
            }
            TaskAction::Status => {
                let id = args.required_parsed::<EntityId>(0, "id")?;
                let status = TaskStatus::try_from(args.required(1, "status")?)?;
                let note = args.get(2).unwrap_or_default();
                let task = store.update_task_status(id, status, note)?;
                Self::updated(ctx, id, task, "status")
            }
            TaskAction::Progress => {
                let id = args.required_parsed::<EntityId>(0, "id")?;
                let hours = args.required_parsed::<f64>(1, "actual_hours")?;
                let note = args.get(2).unwrap_or_default();
                let task = store.update_task_progress(id, hours, note)?;
                Self::updated(ctx, id, task, "progress")
            }
        }
    }
}

// ======
// Config
// ======

pub struct ConfigCommand<'a> {
    core: CommandCore<'a>,
}

impl<'a> ConfigCommand<'a> {
    pub fn new(args: &'a [String]) -> Self {
        Self {
            core: CommandCore::new(args, FlagPolicy::help_within(2)),
        }
    }

    fn rows(ctx: &AppContext) -> Value {
        Value::Array(
            ctx.config
                .rows()
                .iter()
                .map(|(key, description, value)| {
                    json!({ "key": key, "description": description, "value": value })
                })
                .collect(),
        )
    }
}

impl<'a> sealed::Sealed<'a> for ConfigCommand<'a> {
    fn core(&self) -> &CommandCore<'a> {
        &self.core
    }
}

impl<'a> Command<'a> for ConfigCommand<'a> {
    fn usage(&self) -> String {
        [
            "Usage: config [show]",
            "       config set <KEY> <value>",
        ]
        .join("\n")
    }

    fn perform(&self, ctx: &mut AppContext) -> Result<Reply> {
        let (action, args) =
            split_action(self.core.args, ConfigAction::Show, ConfigAction::try_from)?;
        match action {
            ConfigAction::Show => Ok(Reply::Json(Self::rows(ctx))),
            ConfigAction::Set => {
                let key = args.required(0, "KEY")?;
                let value = args.required(1, "value")?;
                ctx.config.set(key, value)?;
                ctx.logger
                    .set_file_logging_enabled(ctx.config.file_logging_enabled());
                match ctx.config.take_last_change() {
                    Some(change) => {
                        ctx.logger.info(
                            format!(
                                "Config {} changed from '{}' to '{}'",
                                change.key, change.old, change.new
                            ),
                            LogTarget::FileOnly,
                        );
                        Reply::json(&change)
                    }
                    None => Ok(Reply::Json(Self::rows(ctx))),
                }
            }
        }
    }
}

// ====
// Help
// ====

pub struct HelpCommand<'a> {
    core: CommandCore<'a>,
}

impl<'a> HelpCommand<'a> {
    pub fn new(args: &'a [String]) -> Self {
        Self {
            core: CommandCore::new(args, FlagPolicy::none()),
        }
    }
}

impl<'a> sealed::Sealed<'a> for HelpCommand<'a> {
    fn core(&self) -> &CommandCore<'a> {
        &self.core
    }
}

impl<'a> Command<'a> for HelpCommand<'a> {
    fn usage(&self) -> String {
        overview()
    }

    fn perform(&self, _ctx: &mut AppContext) -> Result<Reply> {
        Ok(Reply::Usage(self.usage()))
    }
}

/// The top-level usage listing every command word.
pub fn overview() -> String {
    [
        crate::core::cli::USAGE,
        "",
        "Commands:",
        "  now        Current local date, time and weekday",
        "  profile    Personal profile, work hours and reminders",
        "  schedule   Per-day time slots and summaries",
        "  task       Task list, status and progress",
        "  config     Show or change configuration",
        "",
        "Run '<command> -h' for details.",
    ]
    .join("\n")
}
