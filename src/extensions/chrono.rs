use crate::core::types::WeekdayLocale;
use chrono::Weekday;

const WEEKDAYS_ZH: [&str; 7] = ["周一", "周二", "周三", "周四", "周五", "周六", "周日"];
const WEEKDAYS_EN: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

pub trait WeekdayExt {
    /// Day name from the locale's fixed table, indexed Monday = 0.
    fn localized_name(self, locale: WeekdayLocale) -> &'static str;
}

impl WeekdayExt for Weekday {
    fn localized_name(self, locale: WeekdayLocale) -> &'static str {
        let table = match locale {
            WeekdayLocale::Zh => &WEEKDAYS_ZH,
            WeekdayLocale::En => &WEEKDAYS_EN,
        };
        table[self.num_days_from_monday() as usize]
    }
}
