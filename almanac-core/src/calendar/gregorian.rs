//! The proleptic Gregorian calendar, backed by chrono.

use chrono::{DateTime, Datelike, NaiveDate, Timelike};

use super::{CalendarAdapter, MoonPhase};
use crate::date::{Date, DateComponents};

/// Mean synodic month in days.
const SYNODIC_MONTH: f64 = 29.530_588_853;

/// 2000-01-06 18:14 UTC, a new moon, as Unix seconds.
const REFERENCE_NEW_MOON: i64 = 947_182_440;

/// Real-world calendar with a single moon. Weeks start on Monday
/// (`day_of_week` 0) and seconds count from the Unix epoch.
#[derive(Debug, Clone, Copy, Default)]
pub struct GregorianCalendar;

impl GregorianCalendar {
    fn naive_date(date: &Date) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(date.year, date.month + 1, date.day)
    }
}

impl CalendarAdapter for GregorianCalendar {
    fn date_to_seconds(&self, date: &Date) -> Option<i64> {
        let datetime = Self::naive_date(date)?
            .and_hms_opt(date.hour.unwrap_or(0), date.minute.unwrap_or(0), 0)?;
        Some(datetime.and_utc().timestamp())
    }

    fn seconds_to_components(&self, seconds: i64) -> Option<DateComponents> {
        let datetime = DateTime::from_timestamp(seconds, 0)?.naive_utc();
        Some(DateComponents {
            year: datetime.year(),
            month: datetime.month0(),
            day: datetime.day(),
            hour: datetime.hour(),
            minute: datetime.minute(),
            day_of_week: datetime.weekday().num_days_from_monday(),
        })
    }

    fn days_in_month(&self, month: u32, year: i32) -> u32 {
        if month >= 12 {
            return 0;
        }
        let first = NaiveDate::from_ymd_opt(year, month + 1, 1);
        let next = if month == 11 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(year, month + 2, 1)
        };
        match (first, next) {
            (Some(first), Some(next)) => (next - first).num_days() as u32,
            _ => 0,
        }
    }

    fn week_length(&self) -> u32 {
        7
    }

    fn months_per_year(&self) -> u32 {
        12
    }

    fn moon_phase(&self, moon_index: usize, date: &Date) -> Option<MoonPhase> {
        if moon_index != 0 {
            return None;
        }
        // Phase at noon so the whole day shares one reading
        let noon = self.date_to_seconds(&date.start_of_day().with_time(12, 0))?;
        let days = (noon - REFERENCE_NEW_MOON) as f64 / 86_400.0;
        let position = (days / SYNODIC_MONTH).rem_euclid(1.0);

        Some(MoonPhase {
            position: if position >= 1.0 { 0.0 } else { position },
        })
    }
}
