use crate::core::clock::now_stamp;
use crate::core::models::{Profile, Reminder, WorkPreferences};
use crate::core::persist::{ensure_dir, load_document, save_document};
use crate::core::repository::Repository;
use crate::errors::{Error, Result};
use crate::extensions::string::StrExt;
use crate::store::ID_OVERFLOW;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

pub const PROFILE_FILE: &str = "personal_profile.json";

#[derive(Debug, Clone)]
pub struct ProfileStore {
    data_dir: PathBuf,
    path: PathBuf,
}

impl ProfileStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        let path = data_dir.join(PROFILE_FILE);
        Self { data_dir, path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The persisted profile, or the default template when none is saved yet.
    pub fn load(&self) -> Result<Profile> {
        ensure_dir(&self.data_dir)?;
        Ok(load_document(&self.path)?.unwrap_or_default())
    }

    pub fn save(&self, profile: &mut Profile) -> Result<()> {
        profile.updated_at = now_stamp();
        save_document(&self.path, profile)
    }

    /// Overwrite whatever is stored with a fresh default profile.
    pub fn init(&self) -> Result<Profile> {
        let mut profile = Profile::default();
        self.save(&mut profile)?;
        Ok(profile)
    }

    /// Apply `patch` key by key: two objects merge one level deep, anything
    /// else replaces the stored value. A patch that leaves a known field with
    /// the wrong shape is rejected before anything is written.
    pub fn update(&self, patch: Map<String, Value>) -> Result<Profile> {
        let current = self.load()?;
        let Value::Object(mut doc) = serde_json::to_value(&current)? else {
            return Err(Error::Domain("profile did not serialize to an object".into()));
        };
        merge_shallow(&mut doc, patch);

        let mut profile: Profile = serde_json::from_value(Value::Object(doc))
            .map_err(|e| Error::parse(format!("Invalid profile update: {e}")))?;
        self.save(&mut profile)?;
        Ok(profile)
    }

    /// Lunch bounds are only replaced when given a non-blank value.
    pub fn set_work_hours(
        &self,
        start: &str,
        end: &str,
        lunch_start: Option<&str>,
        lunch_end: Option<&str>,
    ) -> Result<Profile> {
        let mut profile = self.load()?;
        let hours = &mut profile.work_hours;
        hours.start = start.to_string();
        hours.end = end.to_string();
        if let Some(v) = lunch_start.and_then(|v| v.non_blank()) {
            hours.lunch_start = v.to_string();
        }
        if let Some(v) = lunch_end.and_then(|v| v.non_blank()) {
            hours.lunch_end = v.to_string();
        }
        self.save(&mut profile)?;
        Ok(profile)
    }

    pub fn add_reminder(
        &self,
        content: &str,
        time: Option<String>,
        recurring: bool,
    ) -> Result<Reminder> {
        let mut profile = self.load()?;
        let mut reminders = Repository::restore(
            std::mem::take(&mut profile.reminders),
            profile.next_reminder_id,
        )
        .ok_or_else(|| Error::corrupt(&self.path, ID_OVERFLOW))?;
        let reminder = reminders
            .insert(Reminder::new(content, time, recurring))
            .ok_or_else(|| Error::corrupt(&self.path, ID_OVERFLOW))?
            .clone();
        (profile.reminders, profile.next_reminder_id) = reminders.into_parts();

        self.save(&mut profile)?;
        Ok(reminder)
    }

    pub fn get_work_preferences(&self) -> Result<WorkPreferences> {
        let profile = self.load()?;
        Ok(WorkPreferences {
            work_hours: profile.work_hours,
            preferences: profile.preferences,
        })
    }
}

fn merge_shallow(doc: &mut Map<String, Value>, patch: Map<String, Value>) {
    for (key, value) in patch {
        if let (Value::Object(incoming), Some(Value::Object(existing))) =
            (&value, doc.get_mut(&key))
        {
            existing.extend(incoming.clone());
            continue;
        }
        doc.insert(key, value);
    }
}
