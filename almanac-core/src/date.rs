//! Calendar-local date values.
//!
//! A `Date` is a plain tuple of calendar components. It carries no timezone
//! and knows nothing about month lengths; anything that depends on the shape
//! of the calendar (weekday, day of year, validity) goes through a
//! [`CalendarAdapter`](crate::calendar::CalendarAdapter).

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{AlmanacError, AlmanacResult};

/// A calendar-local date with optional time of day.
///
/// `month` is 0-indexed and `day` is 1-indexed, so the first day of the
/// year is `Date::new(year, 0, 1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Date {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hour: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minute: Option<u32>,
}

impl Date {
    pub const fn new(year: i32, month: u32, day: u32) -> Self {
        Date {
            year,
            month,
            day,
            hour: None,
            minute: None,
        }
    }

    pub const fn with_time(self, hour: u32, minute: u32) -> Self {
        Date {
            hour: Some(hour),
            minute: Some(minute),
            ..self
        }
    }

    /// The same day with the time of day removed.
    pub const fn start_of_day(self) -> Self {
        Date::new(self.year, self.month, self.day)
    }

    /// Ordering by (year, month, day), ignoring time of day.
    pub fn cmp_day(&self, other: &Date) -> Ordering {
        (self.year, self.month, self.day).cmp(&(other.year, other.month, other.day))
    }

    pub fn is_same_day(&self, other: &Date) -> bool {
        self.cmp_day(other) == Ordering::Equal
    }
}

/// Formats as `YEAR-MONTH-DAY` with a 1-based month number, the same form
/// accepted by [`FromStr`].
impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}-{:02}-{:02}", self.year, self.month + 1, self.day)?;
        if let (Some(hour), Some(minute)) = (self.hour, self.minute) {
            write!(f, " {:02}:{:02}", hour, minute)?;
        }
        Ok(())
    }
}

/// Parses `YEAR-MONTH-DAY` (1-based month), optionally followed by
/// `HH:MM` separated by a space or `T`. Years may be negative.
impl FromStr for Date {
    type Err = AlmanacError;

    fn from_str(s: &str) -> AlmanacResult<Self> {
        let s = s.trim();
        let invalid = || {
            AlmanacError::InvalidDate(format!(
                "'{}'. Expected YEAR-MONTH-DAY, e.g. 1492-03-15",
                s
            ))
        };

        let (date_part, time_part) = match s.find([' ', 'T']) {
            Some(idx) => (&s[..idx], Some(s[idx + 1..].trim())),
            None => (s, None),
        };

        // A leading '-' belongs to the year, not a separator
        let (negative, body) = match date_part.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, date_part),
        };

        let mut parts = body.split('-');
        let (Some(year), Some(month), Some(day), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(invalid());
        };

        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        let day: u32 = day.parse().map_err(|_| invalid())?;

        if month == 0 || day == 0 {
            return Err(invalid());
        }

        let date = Date::new(if negative { -year } else { year }, month - 1, day);

        match time_part {
            None => Ok(date),
            Some(time) => {
                let (hour, minute) = time.split_once(':').ok_or_else(invalid)?;
                let hour: u32 = hour.parse().map_err(|_| invalid())?;
                let minute: u32 = minute.parse().map_err(|_| invalid())?;
                Ok(date.with_time(hour, minute))
            }
        }
    }
}

/// Everything a calendar reports about an absolute instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateComponents {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    /// 0-based index into the calendar's week.
    pub day_of_week: u32,
}

impl DateComponents {
    pub fn date(&self) -> Date {
        Date::new(self.year, self.month, self.day)
    }
}
