use crate::core::clock::{now_stamp, schedule_filename};
use crate::core::models::{DailySummary, EntityId, Schedule, TimeSlot};
use crate::core::persist::{ensure_dir, load_document, save_document};
use crate::core::types::{Date, SlotStatus, SlotType};
use crate::errors::Result;
use std::fs;
use std::path::{Path, PathBuf};

pub const SCHEDULES_DIR: &str = "schedules";
const FILE_PREFIX: &str = "schedule_";
const FILE_SUFFIX: &str = ".json";

/// One JSON document per calendar date under `<data>/schedules/`.
///
/// Every date argument is normalized to `YYYY-MM-DD` before it becomes part of
/// a file name; `None` means today.
#[derive(Debug, Clone)]
pub struct ScheduleStore {
    dir: PathBuf,
}

impl ScheduleStore {
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            dir: data_dir.as_ref().join(SCHEDULES_DIR),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, date: &str) -> Result<PathBuf> {
        Ok(self.dir.join(schedule_filename(&date_key(Some(date))?)))
    }

    /// The stored schedule for `date`, or a fresh empty one. Never fails for
    /// a missing file.
    pub fn load(&self, date: Option<&str>) -> Result<Schedule> {
        ensure_dir(&self.dir)?;
        let key = date_key(date)?;
        let path = self.dir.join(schedule_filename(&key));
        Ok(load_document(&path)?.unwrap_or_else(|| Schedule::empty(key)))
    }

    /// Writes to `date` when given, otherwise to the document's own date.
    pub fn save(&self, schedule: &mut Schedule, date: Option<&str>) -> Result<()> {
        let key = date_key(Some(date.unwrap_or(&schedule.date)))?;
        schedule.updated_at = Some(now_stamp());
        save_document(&self.dir.join(schedule_filename(&key)), schedule)
    }

    /// Replace the whole document for `date`, dropping any earlier summary.
    pub fn create_daily_schedule(
        &self,
        date: &str,
        time_slots: Vec<TimeSlot>,
        notes: &str,
    ) -> Result<Schedule> {
        let key = date_key(Some(date))?;
        let mut schedule = Schedule::with_slots(key.as_str(), time_slots, notes);
        self.save(&mut schedule, Some(key.as_str()))?;
        Ok(schedule)
    }

    /// Append a planned slot and keep slots ordered by start. Overlaps are
    /// accepted as-is.
    pub fn add_time_slot(
        &self,
        date: &str,
        start: &str,
        end: &str,
        task_name: &str,
        task_id: Option<EntityId>,
        slot_type: SlotType,
    ) -> Result<Schedule> {
        let mut schedule = self.load(Some(date))?;
        schedule
            .time_slots
            .push(TimeSlot::planned(start, end, task_name, task_id, slot_type));
        schedule.sort_slots();
        self.save(&mut schedule, Some(date))?;
        Ok(schedule)
    }

    /// Update the first slot starting at `start_time`. With no match the
    /// schedule is saved back unchanged.
    pub fn update_slot_status(
        &self,
        date: &str,
        start_time: &str,
        status: SlotStatus,
        notes: &str,
    ) -> Result<Schedule> {
        let mut schedule = self.load(Some(date))?;
        if let Some(slot) = schedule
            .time_slots
            .iter_mut()
            .find(|slot| slot.start == start_time)
        {
            slot.status = status;
            slot.actual_notes = notes.to_string();
        }
        self.save(&mut schedule, Some(date))?;
        Ok(schedule)
    }

    pub fn add_daily_summary(&self, date: &str, summary: &str) -> Result<Schedule> {
        let mut schedule = self.load(Some(date))?;
        schedule.daily_summary = Some(DailySummary {
            content: summary.to_string(),
            created_at: now_stamp(),
        });
        self.save(&mut schedule, Some(date))?;
        Ok(schedule)
    }

    pub fn get_recent_schedules(&self, days: u32) -> Result<Vec<Schedule>> {
        self.recent_schedules_from(Date::today(), days)
    }

    /// Stored schedules for `today` and the `days - 1` days before it, newest
    /// first. Dates without a file are skipped.
    ///
    /// Walks the stored files rather than the calendar, so a wide window
    /// costs one directory listing.
    pub fn recent_schedules_from(&self, today: Date, days: u32) -> Result<Vec<Schedule>> {
        let Some(span) = days.checked_sub(1) else {
            return Ok(Vec::new());
        };
        let oldest = today.days_back(span);
        let mut found = Vec::new();
        for key in self.list_all_schedules()? {
            let Ok(date) = Date::try_from_str(&key) else {
                continue;
            };
            if date.to_string() != key || date > today || date < oldest {
                continue;
            }
            if let Some(schedule) = load_document(&self.dir.join(schedule_filename(&key)))? {
                found.push(schedule);
            }
        }
        Ok(found)
    }

    /// Date keys of every stored schedule, newest first.
    pub fn list_all_schedules(&self) -> Result<Vec<String>> {
        ensure_dir(&self.dir)?;
        let mut keys = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                continue;
            };
            if let Some(key) = name
                .strip_prefix(FILE_PREFIX)
                .and_then(|rest| rest.strip_suffix(FILE_SUFFIX))
            {
                keys.push(key.to_string());
            }
        }
        keys.sort_by(|a, b| b.cmp(a));
        Ok(keys)
    }
}

fn date_key(date: Option<&str>) -> Result<String> {
    match date {
        Some(raw) => Ok(Date::try_from_str(raw)?.to_string()),
        None => Ok(Date::today().to_string()),
    }
}
