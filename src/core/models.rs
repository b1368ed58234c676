use crate::core::clock::now_stamp;
use crate::core::types::{Priority, SlotStatus, SlotType, TaskStatus};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

pub type EntityId = u32;

pub trait BaseEntity {
    fn id(&self) -> EntityId;
    fn set_id(&mut self, id: EntityId);
}

// =======
// Profile
// =======

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkHours {
    pub start: String,
    pub end: String,
    pub lunch_start: String,
    pub lunch_end: String,
}

impl Default for WorkHours {
    fn default() -> Self {
        Self {
            start: "09:00".into(),
            end: "18:00".into(),
            lunch_start: "12:00".into(),
            lunch_end: "13:00".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub focus_duration_minutes: u32,
    pub break_duration_minutes: u32,
    /// Free-text tag, e.g. "complex" or "simple".
    pub prefer_morning_for: String,
    pub prefer_afternoon_for: String,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            focus_duration_minutes: 50,
            break_duration_minutes: 10,
            prefer_morning_for: "complex".into(),
            prefer_afternoon_for: "meetings".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reminder {
    pub id: EntityId,
    pub content: String,
    pub time: Option<String>,
    pub recurring: bool,
    pub created_at: String,
}

impl Reminder {
    pub fn new(content: impl Into<String>, time: Option<String>, recurring: bool) -> Self {
        Self {
            id: 0,
            content: content.into(),
            time,
            recurring,
            created_at: now_stamp(),
        }
    }
}

impl BaseEntity for Reminder {
    fn id(&self) -> EntityId {
        self.id
    }
    fn set_id(&mut self, id: EntityId) {
        self.id = id;
    }
}

/// The single persisted document describing the user.
///
/// Unknown top-level keys written through `profile set` are kept in `extra`
/// and round-trip untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub name: String,
    pub role: String,
    pub organization: String,
    pub work_hours: WorkHours,
    pub preferences: Preferences,
    pub reminders: Vec<Reminder>,
    pub next_reminder_id: EntityId,
    pub created_at: String,
    pub updated_at: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for Profile {
    fn default() -> Self {
        let now = now_stamp();
        Self {
            name: String::new(),
            role: String::new(),
            organization: String::new(),
            work_hours: WorkHours::default(),
            preferences: Preferences::default(),
            reminders: Vec::new(),
            next_reminder_id: 1,
            created_at: now.clone(),
            updated_at: now,
            extra: Map::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkPreferences {
    pub work_hours: WorkHours,
    pub preferences: Preferences,
}

// ========
// Schedule
// ========

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub start: String,
    pub end: String,
    pub task_id: Option<EntityId>,
    pub task_name: String,
    #[serde(rename = "type", default)]
    pub slot_type: SlotType,
    #[serde(default)]
    pub status: SlotStatus,
    #[serde(default)]
    pub actual_notes: String,
}

impl TimeSlot {
    pub fn planned(
        start: impl Into<String>,
        end: impl Into<String>,
        task_name: impl Into<String>,
        task_id: Option<EntityId>,
        slot_type: SlotType,
    ) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
            task_id,
            task_name: task_name.into(),
            slot_type,
            status: SlotStatus::Planned,
            actual_notes: String::new(),
        }
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{} '{}' ({}, {})",
            self.start, self.end, self.task_name, self.slot_type, self.status
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySummary {
    pub content: String,
    pub created_at: String,
}

/// One calendar day's plan, stored as `schedule_<date>.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    pub date: String,
    pub created_at: String,
    #[serde(default)]
    pub time_slots: Vec<TimeSlot>,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub daily_summary: Option<DailySummary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl Schedule {
    pub fn empty(date: impl Into<String>) -> Self {
        Self::with_slots(date, Vec::new(), "")
    }

    pub fn with_slots(
        date: impl Into<String>,
        time_slots: Vec<TimeSlot>,
        notes: impl Into<String>,
    ) -> Self {
        Self {
            date: date.into(),
            created_at: now_stamp(),
            time_slots,
            notes: notes.into(),
            daily_summary: None,
            updated_at: None,
        }
    }

    /// Stable sort by `start` string; equal starts keep insertion order.
    pub fn sort_slots(&mut self) {
        self.time_slots.sort_by(|a, b| a.start.cmp(&b.start));
    }
}

// ====
// Task
// ====

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressNote {
    pub time: String,
    pub note: String,
}

impl ProgressNote {
    pub fn now(note: impl Into<String>) -> Self {
        Self {
            time: now_stamp(),
            note: note.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// `YYYY-MM-DD`, or empty when the task has no deadline.
    #[serde(default)]
    pub deadline: String,
    #[serde(default)]
    pub estimated_hours: f64,
    #[serde(default)]
    pub actual_hours: f64,
    #[serde(default)]
    pub priority: Priority,
    pub status: TaskStatus,
    pub created_at: String,
    pub updated_at: String,
    #[serde(default)]
    pub completed_at: Option<String>,
    #[serde(default)]
    pub progress_notes: Vec<ProgressNote>,
}

impl Task {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        deadline: impl Into<String>,
        estimated_hours: f64,
        priority: Priority,
    ) -> Self {
        let now = now_stamp();
        Self {
            id: 0,
            name: name.into(),
            description: description.into(),
            deadline: deadline.into(),
            estimated_hours,
            actual_hours: 0.0,
            priority,
            status: TaskStatus::Pending,
            created_at: now.clone(),
            updated_at: now,
            completed_at: None,
            progress_notes: Vec::new(),
        }
    }

    pub fn set_status(&mut self, status: TaskStatus) {
        let now = now_stamp();
        if status == TaskStatus::Completed {
            self.completed_at = Some(now.clone());
        }
        self.status = status;
        self.updated_at = now;
    }

    pub fn set_actual_hours(&mut self, hours: f64) {
        self.actual_hours = hours;
        self.updated_at = now_stamp();
    }

    /// Blank notes are not recorded.
    pub fn push_note(&mut self, note: &str) {
        if !note.is_empty() {
            self.progress_notes.push(ProgressNote::now(note));
        }
    }
}

impl BaseEntity for Task {
    fn id(&self) -> EntityId {
        self.id
    }
    fn set_id(&mut self, id: EntityId) {
        self.id = id;
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Task(id={}, name='{}', status={}, priority={}, estimated_hours={})",
            self.id, self.name, self.status, self.priority, self.estimated_hours
        )
    }
}

/// Counts over the whole task collection. Hours and high-priority counts only
/// consider open (pending or in-progress) tasks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskSummary {
    pub total: usize,
    pub pending: usize,
    pub in_progress: usize,
    pub completed: usize,
    pub cancelled: usize,
    pub total_estimated_hours: f64,
    pub high_priority_pending: usize,
}
