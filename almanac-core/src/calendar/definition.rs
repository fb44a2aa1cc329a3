//! Calendars described by data rather than code.
//!
//! A `CalendarDefinition` is what a user writes in TOML: month names and
//! lengths, a leap-year rule, the week, the length of a day, and any moons.
//! `ConfiguredCalendar` validates it once and answers adapter queries with
//! closed-form arithmetic, so converting a date in year 10 000 costs the same
//! as one in year 1.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{CalendarAdapter, MoonPhase};
use crate::date::{Date, DateComponents};
use crate::error::{AlmanacError, AlmanacResult};

fn default_hours_per_day() -> u32 {
    24
}

fn default_minutes_per_hour() -> u32 {
    60
}

fn default_seconds_per_minute() -> u32 {
    60
}

/// A calendar as written in a definition file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarDefinition {
    pub name: String,
    pub months: Vec<MonthDefinition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leap_year: Option<LeapYearRule>,
    pub weekdays: Vec<String>,
    /// Weekday index of the epoch day (year 0, first month, day 1).
    #[serde(default)]
    pub epoch_weekday: u32,
    #[serde(default = "default_hours_per_day")]
    pub hours_per_day: u32,
    #[serde(default = "default_minutes_per_hour")]
    pub minutes_per_hour: u32,
    #[serde(default = "default_seconds_per_minute")]
    pub seconds_per_minute: u32,
    #[serde(default)]
    pub moons: Vec<MoonDefinition>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthDefinition {
    pub name: String,
    pub days: u32,
    /// Extra days this month gains in a leap year.
    #[serde(default)]
    pub leap_days: u32,
}

/// A year is a leap year when `(year - offset)` is a multiple of `interval`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LeapYearRule {
    pub interval: u32,
    #[serde(default)]
    pub offset: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoonDefinition {
    pub name: String,
    /// Length of one full cycle, in days.
    pub cycle_length: f64,
    /// Day number (days since the epoch day) of any new moon.
    #[serde(default)]
    pub new_moon_offset: f64,
}

impl CalendarDefinition {
    pub fn from_toml_str(content: &str) -> AlmanacResult<Self> {
        toml::from_str(content).map_err(|e| AlmanacError::Parse(e.to_string()))
    }

    pub fn load(path: &Path) -> AlmanacResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    fn validate(&self) -> AlmanacResult<()> {
        let fail = |reason: String| Err(AlmanacError::Calendar(format!("{}: {}", self.name, reason)));

        if self.months.is_empty() {
            return fail("at least one month is required".into());
        }
        if let Some(month) = self.months.iter().find(|m| m.days == 0) {
            return fail(format!("month '{}' has no days", month.name));
        }
        if self.weekdays.is_empty() {
            return fail("at least one weekday is required".into());
        }
        if self.epoch_weekday as usize >= self.weekdays.len() {
            return fail(format!(
                "epoch_weekday {} is outside a {}-day week",
                self.epoch_weekday,
                self.weekdays.len()
            ));
        }
        if self.leap_year.is_some_and(|rule| rule.interval == 0) {
            return fail("leap_year.interval must be at least 1".into());
        }
        if self.hours_per_day == 0 || self.minutes_per_hour == 0 || self.seconds_per_minute == 0 {
            return fail("day, hour and minute lengths must be non-zero".into());
        }
        if let Some(moon) = self
            .moons
            .iter()
            .find(|m| !(m.cycle_length.is_finite() && m.cycle_length > 0.0))
        {
            return fail(format!("moon '{}' needs a positive cycle_length", moon.name));
        }
        Ok(())
    }
}

/// A validated [`CalendarDefinition`] ready to answer adapter queries.
#[derive(Debug, Clone)]
pub struct ConfiguredCalendar {
    definition: CalendarDefinition,
    common_year_days: i64,
    leap_extra_days: i64,
}

impl ConfiguredCalendar {
    pub fn new(definition: CalendarDefinition) -> AlmanacResult<Self> {
        definition.validate()?;

        let common_year_days = definition.months.iter().map(|m| i64::from(m.days)).sum();
        let leap_extra_days = match definition.leap_year {
            Some(_) => definition.months.iter().map(|m| i64::from(m.leap_days)).sum(),
            None => 0,
        };

        Ok(ConfiguredCalendar {
            definition,
            common_year_days,
            leap_extra_days,
        })
    }

    pub fn load(path: &Path) -> AlmanacResult<Self> {
        Self::new(CalendarDefinition::load(path)?)
    }

    pub fn definition(&self) -> &CalendarDefinition {
        &self.definition
    }

    pub fn is_leap_year(&self, year: i32) -> bool {
        match self.definition.leap_year {
            Some(rule) => (i64::from(year) - i64::from(rule.offset))
                .rem_euclid(i64::from(rule.interval))
                == 0,
            None => false,
        }
    }

    /// Signed count of leap years in `[0, year)`; negative for years before 0.
    fn leap_years_before(&self, year: i64) -> i64 {
        let Some(rule) = self.definition.leap_year else {
            return 0;
        };
        let interval = i64::from(rule.interval);
        let offset = i64::from(rule.offset);
        (year - 1 - offset).div_euclid(interval) - (-1 - offset).div_euclid(interval)
    }

    fn days_before_year(&self, year: i64) -> i64 {
        year * self.common_year_days + self.leap_years_before(year) * self.leap_extra_days
    }

    /// Days since the epoch day for the day part of `date`.
    fn day_number(&self, date: &Date) -> Option<i64> {
        let month_count = self.definition.months.len() as u32;
        if date.month >= month_count || date.day == 0 {
            return None;
        }
        if date.day > self.days_in_month(date.month, date.year) {
            return None;
        }

        let before_month: i64 = (0..date.month)
            .map(|m| i64::from(self.days_in_month(m, date.year)))
            .sum();

        Some(
            self.days_before_year(i64::from(date.year))
                + before_month
                + i64::from(date.day)
                - 1,
        )
    }

    fn date_of_day_number(&self, day_number: i64) -> Option<Date> {
        let average = self.common_year_days as f64
            + match self.definition.leap_year {
                Some(rule) => self.leap_extra_days as f64 / f64::from(rule.interval),
                None => 0.0,
            };

        // The estimate lands within a year or two; walk to the exact one.
        let mut year = (day_number as f64 / average).floor() as i64;
        while self.days_before_year(year) > day_number {
            year -= 1;
        }
        while self.days_before_year(year + 1) <= day_number {
            year += 1;
        }
        let year = i32::try_from(year).ok()?;

        let mut remaining = day_number - self.days_before_year(i64::from(year));
        for month in 0..self.definition.months.len() as u32 {
            let length = i64::from(self.days_in_month(month, year));
            if remaining < length {
                return Some(Date::new(year, month, remaining as u32 + 1));
            }
            remaining -= length;
        }
        None
    }

    fn seconds_per_hour(&self) -> i64 {
        i64::from(self.definition.minutes_per_hour) * i64::from(self.definition.seconds_per_minute)
    }
}

impl CalendarAdapter for ConfiguredCalendar {
    fn date_to_seconds(&self, date: &Date) -> Option<i64> {
        let day_number = self.day_number(date)?;
        let hour = date.hour.unwrap_or(0);
        let minute = date.minute.unwrap_or(0);
        if hour >= self.definition.hours_per_day || minute >= self.definition.minutes_per_hour {
            return None;
        }

        Some(
            day_number * self.seconds_per_day()
                + i64::from(hour) * self.seconds_per_hour()
                + i64::from(minute) * i64::from(self.definition.seconds_per_minute),
        )
    }

    fn seconds_to_components(&self, seconds: i64) -> Option<DateComponents> {
        let day_number = seconds.div_euclid(self.seconds_per_day());
        let within_day = seconds.rem_euclid(self.seconds_per_day());
        let date = self.date_of_day_number(day_number)?;

        let day_of_week = (day_number + i64::from(self.definition.epoch_weekday))
            .rem_euclid(i64::from(self.week_length())) as u32;

        Some(DateComponents {
            year: date.year,
            month: date.month,
            day: date.day,
            hour: (within_day / self.seconds_per_hour()) as u32,
            minute: (within_day % self.seconds_per_hour()
                / i64::from(self.definition.seconds_per_minute)) as u32,
            day_of_week,
        })
    }

    fn days_in_month(&self, month: u32, year: i32) -> u32 {
        match self.definition.months.get(month as usize) {
            Some(m) if self.is_leap_year(year) => m.days + m.leap_days,
            Some(m) => m.days,
            None => 0,
        }
    }

    fn week_length(&self) -> u32 {
        self.definition.weekdays.len() as u32
    }

    fn months_per_year(&self) -> u32 {
        self.definition.months.len() as u32
    }

    fn moon_phase(&self, moon_index: usize, date: &Date) -> Option<MoonPhase> {
        let moon = self.definition.moons.get(moon_index)?;
        let day_number = self.day_number(date)? as f64;

        let position = ((day_number - moon.new_moon_offset) / moon.cycle_length).rem_euclid(1.0);
        // rem_euclid can round up to exactly 1.0 for tiny negative inputs
        let position = if position >= 1.0 { 0.0 } else { position };

        Some(MoonPhase { position })
    }

    fn seconds_per_day(&self) -> i64 {
        i64::from(self.definition.hours_per_day) * self.seconds_per_hour()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixture_calendar;

    #[test]
    fn test_leap_years_follow_rule() {
        let calendar = fixture_calendar();
        assert!(calendar.is_leap_year(1492));
        assert!(!calendar.is_leap_year(1493));
        assert!(calendar.is_leap_year(0));
        assert!(calendar.is_leap_year(-4));
        assert!(!calendar.is_leap_year(-1));
        assert_eq!(calendar.days_in_month(1, 1492), 29);
        assert_eq!(calendar.days_in_month(1, 1493), 28);
        assert_eq!(calendar.days_in_month(12, 1493), 0);
    }

    #[test]
    fn test_year_boundaries_are_contiguous() {
        let calendar = fixture_calendar();
        for year in [-9, -4, -1, 0, 1, 3, 4, 5, 1491, 1492, 1493] {
            let last = Date::new(year, 11, 31);
            let next = Date::new(year + 1, 0, 1);
            let last_secs = calendar.date_to_seconds(&last).unwrap();
            let next_secs = calendar.date_to_seconds(&next).unwrap();
            assert_eq!(next_secs - last_secs, 86_400, "year {year}");
        }
    }

    #[test]
    fn test_seconds_round_trip_keeps_components() {
        let calendar = fixture_calendar();
        for date in [
            Date::new(1492, 1, 29).with_time(13, 45),
            Date::new(-7, 11, 31),
            Date::new(0, 0, 1),
            Date::new(2024, 6, 4).with_time(0, 59),
        ] {
            let secs = calendar.date_to_seconds(&date).unwrap();
            let parts = calendar.seconds_to_components(secs).unwrap();
            assert_eq!(parts.date(), date.start_of_day());
            assert_eq!(Some(parts.hour), date.hour.or(Some(0)));
            assert_eq!(Some(parts.minute), date.minute.or(Some(0)));
        }
    }

    #[test]
    fn test_nonexistent_dates_do_not_convert() {
        let calendar = fixture_calendar();
        assert_eq!(calendar.date_to_seconds(&Date::new(1493, 1, 29)), None);
        assert_eq!(calendar.date_to_seconds(&Date::new(1493, 12, 1)), None);
        assert_eq!(calendar.date_to_seconds(&Date::new(1493, 0, 0)), None);
        assert_eq!(
            calendar.date_to_seconds(&Date::new(1493, 0, 1).with_time(24, 0)),
            None
        );
    }

    #[test]
    fn test_weekday_advances_by_one_per_day() {
        let calendar = fixture_calendar();
        let epoch = calendar.date_to_seconds(&Date::new(0, 0, 1)).unwrap();
        let parts = calendar.seconds_to_components(epoch).unwrap();
        assert_eq!(parts.day_of_week, 0);

        let next = calendar.seconds_to_components(epoch + 86_400).unwrap();
        assert_eq!(next.day_of_week, 1);

        let before = calendar.seconds_to_components(epoch - 86_400).unwrap();
        assert_eq!(before.day_of_week, 6);
    }

    #[test]
    fn test_moon_phase_cycles() {
        let calendar = fixture_calendar();
        let new_moon = calendar.moon_phase(0, &Date::new(0, 0, 1)).unwrap();
        assert_eq!(new_moon.position, 0.0);

        let full_moon = calendar.moon_phase(0, &Date::new(0, 0, 15)).unwrap();
        assert!((full_moon.position - 0.5).abs() < 1e-9);

        let next_new = calendar.moon_phase(0, &Date::new(0, 0, 29)).unwrap();
        assert_eq!(next_new.position, 0.0);

        assert_eq!(calendar.moon_phase(3, &Date::new(0, 0, 1)), None);
    }

    #[test]
    fn test_definition_from_toml() {
        let toml = r#"
name = "Tiny"
weekdays = ["Sun", "Moon", "Star"]
hours_per_day = 20

[leap_year]
interval = 3

[[months]]
name = "Thaw"
days = 10

[[months]]
name = "Frost"
days = 9
leap_days = 1

[[moons]]
name = "Pale"
cycle_length = 6.5
"#;
        let calendar = ConfiguredCalendar::new(CalendarDefinition::from_toml_str(toml).unwrap())
            .unwrap();
        assert_eq!(calendar.months_per_year(), 2);
        assert_eq!(calendar.week_length(), 3);
        assert_eq!(calendar.seconds_per_day(), 20 * 3600);
        assert_eq!(calendar.days_in_month(1, 3), 10);
        assert_eq!(calendar.days_in_month(1, 4), 9);
        assert!(calendar.moon_phase(0, &Date::new(1, 1, 2)).is_some());
    }

    #[test]
    fn test_invalid_definitions_are_rejected() {
        let mut definition = fixture_calendar().definition().clone();
        definition.weekdays.clear();
        assert!(matches!(
            ConfiguredCalendar::new(definition),
            Err(AlmanacError::Calendar(_))
        ));

        let mut definition = fixture_calendar().definition().clone();
        definition.moons[0].cycle_length = 0.0;
        assert!(ConfiguredCalendar::new(definition).is_err());

        let mut definition = fixture_calendar().definition().clone();
        definition.leap_year = Some(LeapYearRule {
            interval: 0,
            offset: 0,
        });
        assert!(ConfiguredCalendar::new(definition).is_err());
    }
}
