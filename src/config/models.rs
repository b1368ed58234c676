use crate::core::types::{Bool, WeekdayLocale};
use crate::errors::Error;
use serde::{Deserialize, Serialize};

pub trait ConfigItem<T> {
    fn get_value(&self) -> &T;
    fn set_value(&mut self, new_value: &str) -> Result<(), Error>;
    fn description(&self) -> &str;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataDirConfigItem {
    pub value: String,
    pub description: String,
}

impl Default for DataDirConfigItem {
    fn default() -> Self {
        Self {
            value: "data".into(),
            description: "Directory holding profile, schedules and tasks.".into(),
        }
    }
}

impl ConfigItem<String> for DataDirConfigItem {
    fn get_value(&self) -> &String {
        &self.value
    }
    fn set_value(&mut self, new_value: &str) -> Result<(), Error> {
        let trimmed = new_value.trim();
        if trimmed.is_empty() {
            return Err(Error::Parse("Data directory cannot be empty.".into()));
        }
        self.value = trimmed.to_string();
        Ok(())
    }
    fn description(&self) -> &str {
        &self.description
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileLoggingConfigItem {
    pub value: Bool,
    pub description: String,
}

impl Default for FileLoggingConfigItem {
    fn default() -> Self {
        Self {
            value: Bool(true),
            description: "Enable writing log messages to file.".into(),
        }
    }
}

impl ConfigItem<Bool> for FileLoggingConfigItem {
    fn get_value(&self) -> &Bool {
        &self.value
    }
    fn set_value(&mut self, new_value: &str) -> Result<(), Error> {
        self.value = Bool::try_from_str(new_value)?;
        Ok(())
    }
    fn description(&self) -> &str {
        &self.description
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekdayLocaleConfigItem {
    pub value: WeekdayLocale,
    pub description: String,
}

impl Default for WeekdayLocaleConfigItem {
    fn default() -> Self {
        Self {
            value: WeekdayLocale::default(),
            description: "Language of weekday names reported by `now`.".into(),
        }
    }
}

impl ConfigItem<WeekdayLocale> for WeekdayLocaleConfigItem {
    fn get_value(&self) -> &WeekdayLocale {
        &self.value
    }
    fn set_value(&mut self, new_value: &str) -> Result<(), Error> {
        self.value = WeekdayLocale::try_from(new_value)?;
        Ok(())
    }
    fn description(&self) -> &str {
        &self.description
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentDaysConfigItem {
    pub value: u32,
    pub description: String,
}

impl Default for RecentDaysConfigItem {
    fn default() -> Self {
        Self {
            value: 7,
            description: "Days covered by `schedule recent` when no count is given.".into(),
        }
    }
}

impl ConfigItem<u32> for RecentDaysConfigItem {
    fn get_value(&self) -> &u32 {
        &self.value
    }
    fn set_value(&mut self, new_value: &str) -> Result<(), Error> {
        self.value = new_value.trim().parse().map_err(|_| {
            Error::Parse(format!(
                "Invalid day count: '{}'. Expected a whole number, e.g. 7.",
                new_value.trim()
            ))
        })?;
        Ok(())
    }
    fn description(&self) -> &str {
        &self.description
    }
}
