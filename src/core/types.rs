use crate::errors::{Error, Result};
use crate::extensions::enums::{parse_variant, valid_csv};
use crate::extensions::string::StrExt;
use chrono::{Datelike, Days, Local, NaiveDate, NaiveTime};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, Display, EnumIter as EnumIterDerive, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display, AsRefStr, EnumIterDerive)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
pub enum GlobalCommand {
    #[strum(serialize = "now", to_string = "now")]
    Now,
    #[strum(serialize = "profile", to_string = "profile")]
    Profile,
    #[strum(serialize = "schedule", to_string = "schedule")]
    Schedule,
    #[strum(serialize = "task", serialize = "tasks", to_string = "task")]
    Task,
    #[strum(serialize = "config", to_string = "config")]
    Config,
}

impl GlobalCommand {
    pub fn try_from(s: &str) -> Result<Self> {
        Self::from_str(s).map_err(|_| {
            Error::UnknownCommand(format!(
                "'{}'. Valid commands: {}",
                s.trim(),
                valid_csv::<GlobalCommand>()
            ))
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display, AsRefStr, EnumIterDerive)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
pub enum ProfileAction {
    Show,
    Init,
    Set,
    Hours,
    Preferences,
    #[strum(serialize = "remind", serialize = "reminder", to_string = "remind")]
    Remind,
}
impl ProfileAction {
    pub fn try_from(s: &str) -> Result<Self> {
        parse_variant(s, "profile action")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display, AsRefStr, EnumIterDerive)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
pub enum ScheduleAction {
    Today,
    Date,
    Recent,
    List,
    Add,
    Status,
    Summary,
}
impl ScheduleAction {
    pub fn try_from(s: &str) -> Result<Self> {
        parse_variant(s, "schedule action")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display, AsRefStr, EnumIterDerive)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
pub enum TaskAction {
    Summary,
    List,
    Pending,
    Add,
    Status,
    Progress,
}
impl TaskAction {
    pub fn try_from(s: &str) -> Result<Self> {
        parse_variant(s, "task action")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display, AsRefStr, EnumIterDerive)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
pub enum ConfigAction {
    Show,
    Set,
}
impl ConfigAction {
    pub fn try_from(s: &str) -> Result<Self> {
        parse_variant(s, "config action")
    }
}

// ---- Domain enums -----------------------------------------------------------

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    EnumString,
    Display,
    AsRefStr,
    EnumIterDerive,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive, serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

impl TaskStatus {
    /// Pending and in-progress tasks still need work.
    pub fn is_open(self) -> bool {
        matches!(self, TaskStatus::Pending | TaskStatus::InProgress)
    }

    pub fn try_from(s: &str) -> Result<Self> {
        parse_variant(s, "task status")
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    EnumString,
    Display,
    AsRefStr,
    EnumIterDerive,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    pub fn try_from(s: &str) -> Result<Self> {
        parse_variant(s, "priority")
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    EnumString,
    Display,
    AsRefStr,
    EnumIterDerive,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SlotStatus {
    #[default]
    Planned,
    Completed,
    Skipped,
    Partial,
}

impl SlotStatus {
    pub fn try_from(s: &str) -> Result<Self> {
        parse_variant(s, "slot status")
    }
}

/// Kind of a time slot. The three well-known kinds are matched
/// case-insensitively; anything else is kept as typed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SlotType {
    #[default]
    Work,
    Break,
    Meeting,
    Other(String),
}

impl SlotType {
    pub fn parse(s: &str) -> Self {
        let trimmed = s.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "work" => SlotType::Work,
            "break" => SlotType::Break,
            "meeting" => SlotType::Meeting,
            _ => SlotType::Other(trimmed.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            SlotType::Work => "work",
            SlotType::Break => "break",
            SlotType::Meeting => "meeting",
            SlotType::Other(s) => s,
        }
    }
}

impl fmt::Display for SlotType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for SlotType {
    fn serialize<S: Serializer>(
        &self,
        serializer: S,
    ) -> std::result::Result<<S as Serializer>::Ok, <S as Serializer>::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for SlotType {
    fn deserialize<D: Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<SlotType, <D as Deserializer<'de>>::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(SlotType::parse(&s))
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    EnumString,
    Display,
    AsRefStr,
    EnumIterDerive,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum WeekdayLocale {
    #[default]
    Zh,
    En,
}

impl WeekdayLocale {
    pub fn try_from(s: &str) -> Result<Self> {
        parse_variant(s, "weekday locale")
    }
}

// ---- Dates and times --------------------------------------------------------

/// A calendar date rendered as `YYYY-MM-DD`; the schedule file key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Date(pub NaiveDate);

#[derive(Copy, Clone, Debug, EnumIterDerive, AsRefStr, EnumString)]
pub enum DateFormat {
    #[strum(serialize = "%Y-%m-%d")]
    YmdDash,
    #[strum(serialize = "%m-%d-%Y")]
    MdYDash,
    #[strum(serialize = "%m-%d")]
    MdDash,
}

impl DateFormat {
    fn build_input(self, input: &str) -> (String, &'static str) {
        match self {
            DateFormat::YmdDash => (input.to_owned(), "%Y-%m-%d"),
            DateFormat::MdYDash => (input.to_owned(), "%m-%d-%Y"),
            DateFormat::MdDash => {
                let current_year = Local::now().date_naive().year();
                (format!("{current_year}-{input}"), "%Y-%m-%d")
            }
        }
    }
}

impl Date {
    pub fn today() -> Self {
        Date(Local::now().date_naive())
    }

    pub fn usage() -> String {
        let today = Local::now().date_naive();
        let formats = DateFormat::iter()
            .map(|df| today.format(df.as_ref()).to_string())
            .collect::<Vec<_>>()
            .join(", ");
        format!("Supported formats: {}", formats)
    }

    pub fn try_from_str(input: &str) -> Result<Self> {
        let input = input.to_dash_separators();

        for f in DateFormat::iter() {
            let (candidate, pattern) = f.build_input(&input);
            if let Ok(date) = NaiveDate::parse_from_str(&candidate, pattern) {
                return Ok(Date(date));
            }
        }

        Err(Error::Parse(format!(
            "Invalid date: '{}'. {}",
            input,
            Self::usage()
        )))
    }

    /// The date `days` days before this one, saturating at the earliest
    /// date chrono can represent.
    pub fn days_back(self, days: u32) -> Self {
        self.0
            .checked_sub_days(Days::new(u64::from(days)))
            .map_or(Date(NaiveDate::MIN), Date)
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

/// A wall-clock time normalized to zero-padded `HH:MM`, so string order
/// equals chronological order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ClockTime(pub NaiveTime);

impl ClockTime {
    pub fn try_from_str(input: &str) -> Result<Self> {
        let input = input.trim();
        ["%H:%M", "%H:%M:%S"]
            .iter()
            .find_map(|f| NaiveTime::parse_from_str(input, f).ok())
            .map(ClockTime)
            .ok_or_else(|| {
                Error::Parse(format!(
                    "Invalid time: '{}'. Expected 24-hour HH:MM, e.g. 09:30.",
                    input
                ))
            })
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%H:%M"))
    }
}

// ---- Scalars ----------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display, AsRefStr, EnumIterDerive)]
#[strum(ascii_case_insensitive)]
pub enum BoolFormat {
    #[strum(serialize = "true", serialize = "yes", to_string = "True")]
    TextTrue,

    #[strum(serialize = "false", serialize = "no", to_string = "False")]
    TextFalse,
}

impl BoolFormat {
    #[inline]
    fn to_bool(self) -> bool {
        matches!(self, BoolFormat::TextTrue)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bool(pub bool);

impl Bool {
    pub fn try_from_str(s: &str) -> Result<Self> {
        match BoolFormat::from_str(s.trim()) {
            Ok(fmt) => Ok(Bool(fmt.to_bool())),
            Err(_) => Err(Error::Parse(format!(
                "Invalid string value for boolean: '{}'. Valid values: {}",
                s,
                valid_csv::<BoolFormat>()
            ))),
        }
    }
}

impl fmt::Display for Bool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", if self.0 { "True" } else { "False" })
    }
}

impl Serialize for Bool {
    fn serialize<S: Serializer>(
        &self,
        serializer: S,
    ) -> std::result::Result<<S as Serializer>::Ok, <S as Serializer>::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Bool {
    fn deserialize<D: Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Bool, <D as Deserializer<'de>>::Error> {
        let b = String::deserialize(deserializer)?;
        Bool::try_from_str(&b).map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display, AsRefStr, EnumIterDerive)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
pub enum Flag {
    #[strum(serialize = "-h", serialize = "--help", to_string = "-h")]
    Help,
}

impl Flag {
    pub fn try_from(s: &str) -> Result<Self> {
        parse_variant(s, "flag")
    }
}
