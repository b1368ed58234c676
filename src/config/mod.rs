pub mod models;

use std::fs;
use std::ops::Index;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, Display, EnumIter as EnumIterDerive, EnumString};

use crate::config::models::{
    ConfigItem, DataDirConfigItem, FileLoggingConfigItem, RecentDaysConfigItem,
    WeekdayLocaleConfigItem,
};
use crate::core::persist::save_document;
use crate::core::types::WeekdayLocale;
use crate::errors::{Error, Result};
use crate::extensions::enums::valid_csv;

pub const DEFAULT_CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIterDerive, EnumString, Display, AsRefStr)]
#[strum(ascii_case_insensitive, serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ConfigKey {
    DataDir,
    FileLoggingEnabled,
    WeekdayLocale,
    RecentDays,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    pub data_dir: DataDirConfigItem,
    pub file_logging_enabled: FileLoggingConfigItem,
    pub weekday_locale: WeekdayLocaleConfigItem,
    pub recent_days: RecentDaysConfigItem,
}

/// One applied `set`: key, old value, new value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigChange {
    pub key: String,
    pub old: String,
    pub new: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    path: PathBuf,
    data: ConfigFile,
    data_dir_override: Option<PathBuf>,
    last_change: Option<ConfigChange>,
}

/// `(key, description, value)` for every config item, in key order.
#[derive(Debug, Clone)]
pub struct ConfigRows(Vec<(String, String, String)>);

impl ConfigRows {
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    pub fn iter(&self) -> impl Iterator<Item = &(String, String, String)> {
        self.0.iter()
    }
}

impl Index<usize> for ConfigRows {
    type Output = (String, String, String);
    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl Config {
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if !path.exists() {
            return Err(Error::config(format!(
                "Configuration file '{}' not found.",
                path.display()
            )));
        }
        let text = fs::read_to_string(&path)
            .map_err(|e| Error::config(format!("Failed to read {}: {}", path.display(), e)))?;
        let data: ConfigFile = serde_json::from_str(&text)
            .map_err(|e| Error::config(format!("Invalid JSON in '{}': {}", path.display(), e)))?;
        Ok(Self {
            path,
            data,
            data_dir_override: None,
            last_change: None,
        })
    }

    /// Like `load_from`, but an absent file yields the built-in defaults. The
    /// file is only written once a value is set.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            return Self::load_from(path);
        }
        Ok(Self {
            path: path.to_path_buf(),
            data: ConfigFile::default(),
            data_dir_override: None,
            last_change: None,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn view(&self) -> &ConfigFile {
        &self.data
    }

    /// `DATA_DIR`, with a relative value resolved against the directory that
    /// holds the config file. A run-time override wins and is used as given.
    pub fn data_dir(&self) -> PathBuf {
        if let Some(dir) = &self.data_dir_override {
            return dir.clone();
        }
        let raw = Path::new(self.data.data_dir.get_value());
        if raw.is_absolute() {
            return raw.to_path_buf();
        }
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.join(raw),
            _ => raw.to_path_buf(),
        }
    }

    pub fn file_logging_enabled(&self) -> bool {
        self.data.file_logging_enabled.get_value().0
    }

    pub fn weekday_locale(&self) -> WeekdayLocale {
        *self.data.weekday_locale.get_value()
    }

    pub fn recent_days(&self) -> u32 {
        *self.data.recent_days.get_value()
    }

    pub fn rows(&self) -> ConfigRows {
        ConfigRows(
            ConfigKey::iter()
                .map(|key| {
                    (
                        key.to_string(),
                        self.description_of(key).to_string(),
                        self.value_of(key),
                    )
                })
                .collect(),
        )
    }

    pub fn set(&mut self, key_str: &str, new_value: &str) -> Result<()> {
        let key = ConfigKey::from_str(key_str.trim()).map_err(|_| {
            Error::Parse(format!(
                "Unknown configuration key '{}'. Valid keys: {}",
                key_str.trim(),
                valid_csv::<ConfigKey>()
            ))
        })?;
        self.set_key(key, new_value)
    }

    /// Validate, apply and save one value. Nothing changes on a bad value.
    pub fn set_key(&mut self, key: ConfigKey, new_value: &str) -> Result<()> {
        let old = self.value_of(key);
        let mut data = self.data.clone();
        match key {
            ConfigKey::DataDir => data.data_dir.set_value(new_value)?,
            ConfigKey::FileLoggingEnabled => data.file_logging_enabled.set_value(new_value)?,
            ConfigKey::WeekdayLocale => data.weekday_locale.set_value(new_value)?,
            ConfigKey::RecentDays => data.recent_days.set_value(new_value)?,
        }
        save_document(&self.path, &data)?;
        self.data = data;

        self.last_change = Some(ConfigChange {
            key: key.to_string(),
            old,
            new: self.value_of(key),
        });
        Ok(())
    }

    pub fn take_last_change(&mut self) -> Option<ConfigChange> {
        self.last_change.take()
    }

    /// Point `DATA_DIR` elsewhere for this run without touching the file.
    pub fn override_data_dir(&mut self, dir: impl Into<PathBuf>) {
        self.data_dir_override = Some(dir.into());
    }

    fn value_of(&self, key: ConfigKey) -> String {
        match key {
            ConfigKey::DataDir => self.data.data_dir.get_value().clone(),
            ConfigKey::FileLoggingEnabled => self.data.file_logging_enabled.get_value().to_string(),
            ConfigKey::WeekdayLocale => self.data.weekday_locale.get_value().to_string(),
            ConfigKey::RecentDays => self.data.recent_days.get_value().to_string(),
        }
    }

    fn description_of(&self, key: ConfigKey) -> &str {
        match key {
            ConfigKey::DataDir => self.data.data_dir.description(),
            ConfigKey::FileLoggingEnabled => self.data.file_logging_enabled.description(),
            ConfigKey::WeekdayLocale => self.data.weekday_locale.description(),
            ConfigKey::RecentDays => self.data.recent_days.description(),
        }
    }
}
