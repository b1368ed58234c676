use crate::core::types::{Date, WeekdayLocale};
use crate::extensions::chrono::WeekdayExt;
use chrono::{DateTime, Datelike, Local};
use serde::{Deserialize, Serialize};

pub const STAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Snapshot of the local clock as reported by `daybook now`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateTimeInfo {
    pub date: String,
    pub time: String,
    pub weekday: String,
    pub datetime: String,
    pub timestamp: f64,
}

impl DateTimeInfo {
    pub fn at(now: DateTime<Local>, locale: WeekdayLocale) -> Self {
        Self {
            date: now.format("%Y-%m-%d").to_string(),
            time: now.format("%H:%M:%S").to_string(),
            weekday: now.weekday().localized_name(locale).to_string(),
            datetime: now.format(STAMP_FORMAT).to_string(),
            timestamp: now.timestamp_micros() as f64 / 1_000_000.0,
        }
    }
}

pub fn current_datetime(locale: WeekdayLocale) -> DateTimeInfo {
    DateTimeInfo::at(Local::now(), locale)
}

/// Local timestamp string stamped into every persisted document.
pub fn now_stamp() -> String {
    Local::now().format(STAMP_FORMAT).to_string()
}

pub fn schedule_filename(date: &str) -> String {
    format!("schedule_{date}.json")
}

pub fn today_filename() -> String {
    schedule_filename(&Date::today().to_string())
}
