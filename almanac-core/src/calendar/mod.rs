//! Calendar adapters.
//!
//! The engine never assumes a month has 30 days or a week has 7. Every
//! question about the shape of time goes through [`CalendarAdapter`], so the
//! same recurrence rules work on the Gregorian calendar and on any invented
//! one.

mod definition;
mod gregorian;

pub use definition::{
    CalendarDefinition, ConfiguredCalendar, LeapYearRule, MonthDefinition, MoonDefinition,
};
pub use gregorian::GregorianCalendar;

use crate::date::{Date, DateComponents};

/// Where a moon is in its cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoonPhase {
    /// Fraction of the cycle elapsed, in `[0, 1)`. 0 is new moon.
    pub position: f64,
}

/// Date/time conversion and moon oracle for one calendar.
///
/// Conversions return `None` for dates the calendar cannot represent; the
/// engine treats that as "does not occur".
pub trait CalendarAdapter {
    /// Absolute seconds since the calendar's epoch.
    fn date_to_seconds(&self, date: &Date) -> Option<i64>;

    fn seconds_to_components(&self, seconds: i64) -> Option<DateComponents>;

    /// Days in `month` (0-indexed) of `year`; 0 if the month does not exist.
    fn days_in_month(&self, month: u32, year: i32) -> u32;

    fn week_length(&self) -> u32;

    fn months_per_year(&self) -> u32;

    fn moon_phase(&self, moon_index: usize, date: &Date) -> Option<MoonPhase>;

    fn seconds_per_day(&self) -> i64 {
        86_400
    }
}
