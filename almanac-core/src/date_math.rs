//! Date arithmetic over an arbitrary calendar.
//!
//! Everything here is expressed through [`CalendarAdapter`]: day deltas go
//! through an absolute-seconds round trip, month and year steps clamp the day
//! to the target month's length. Operations that touch the adapter return
//! `None` when the calendar cannot represent an input or a result.

use std::cmp::Ordering;

use crate::calendar::CalendarAdapter;
use crate::date::Date;

/// Compare by (year, month, day), ignoring time of day.
pub fn compare_days(a: &Date, b: &Date) -> Ordering {
    a.cmp_day(b)
}

pub fn is_same_day(a: &Date, b: &Date) -> bool {
    a.is_same_day(b)
}

/// Signed number of whole days from `a` to `b`.
pub fn days_between(calendar: &dyn CalendarAdapter, a: &Date, b: &Date) -> Option<i64> {
    let from = calendar.date_to_seconds(&a.start_of_day())?;
    let to = calendar.date_to_seconds(&b.start_of_day())?;
    Some((to - from).div_euclid(calendar.seconds_per_day()))
}

/// Signed number of month boundaries from `a` to `b`; the day is ignored.
pub fn months_between(calendar: &dyn CalendarAdapter, a: &Date, b: &Date) -> i64 {
    (i64::from(b.year) - i64::from(a.year)) * i64::from(calendar.months_per_year())
        + (i64::from(b.month) - i64::from(a.month))
}

pub fn day_of_week(calendar: &dyn CalendarAdapter, date: &Date) -> Option<u32> {
    let seconds = calendar.date_to_seconds(&date.start_of_day())?;
    calendar
        .seconds_to_components(seconds)
        .map(|parts| parts.day_of_week)
}

/// 1-based position of the day within its year.
pub fn day_of_year(calendar: &dyn CalendarAdapter, date: &Date) -> Option<u32> {
    let first = Date::new(date.year, 0, 1);
    let offset = days_between(calendar, &first, date)?;
    u32::try_from(offset + 1).ok()
}

/// Move `days` days forward (or back, if negative), keeping time of day.
pub fn add_days(calendar: &dyn CalendarAdapter, date: &Date, days: i64) -> Option<Date> {
    let seconds = calendar.date_to_seconds(&date.start_of_day())?;
    let shifted = seconds.checked_add(days.checked_mul(calendar.seconds_per_day())?)?;
    let parts = calendar.seconds_to_components(shifted)?;

    Some(Date {
        hour: date.hour,
        minute: date.minute,
        ..parts.date()
    })
}

/// Move `months` months, clamping the day to the target month's length.
pub fn add_months(calendar: &dyn CalendarAdapter, date: &Date, months: i64) -> Option<Date> {
    let per_year = i64::from(calendar.months_per_year());
    if per_year == 0 {
        return None;
    }

    let total = i64::from(date.year) * per_year + i64::from(date.month) + months;
    let year = i32::try_from(total.div_euclid(per_year)).ok()?;
    let month = total.rem_euclid(per_year) as u32;

    clamp_to_month(calendar, date, year, month)
}

/// Move `years` years, clamping the day to the target month's length.
pub fn add_years(calendar: &dyn CalendarAdapter, date: &Date, years: i64) -> Option<Date> {
    let year = i32::try_from(i64::from(date.year) + years).ok()?;
    clamp_to_month(calendar, date, year, date.month)
}

fn clamp_to_month(calendar: &dyn CalendarAdapter, date: &Date, year: i32, month: u32) -> Option<Date> {
    let length = calendar.days_in_month(month, year);
    if length == 0 {
        return None;
    }

    Some(Date {
        year,
        month,
        day: date.day.min(length),
        ..*date
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixture_calendar;

    #[test]
    fn test_compare_days_ignores_time() {
        let morning = Date::new(1492, 5, 1).with_time(6, 0);
        let evening = Date::new(1492, 5, 1).with_time(21, 0);
        assert_eq!(compare_days(&morning, &evening), Ordering::Equal);
        assert!(is_same_day(&morning, &evening));
        assert_eq!(compare_days(&Date::new(1492, 4, 31), &morning), Ordering::Less);
        assert_eq!(compare_days(&Date::new(1493, 0, 1), &morning), Ordering::Greater);
    }

    #[test]
    fn test_days_between_is_signed_and_spans_leap_days() {
        let calendar = fixture_calendar();
        let a = Date::new(1492, 0, 1);
        let b = Date::new(1493, 0, 1);
        assert_eq!(days_between(&calendar, &a, &b), Some(366));
        assert_eq!(days_between(&calendar, &b, &a), Some(-366));
        assert_eq!(
            days_between(&calendar, &Date::new(1493, 0, 1), &Date::new(1494, 0, 1)),
            Some(365)
        );
    }

    #[test]
    fn test_days_between_ignores_time_of_day() {
        let calendar = fixture_calendar();
        let late = Date::new(1492, 0, 1).with_time(23, 0);
        let early = Date::new(1492, 0, 2).with_time(1, 0);
        assert_eq!(days_between(&calendar, &late, &early), Some(1));
    }

    #[test]
    fn test_months_between_counts_boundaries() {
        let calendar = fixture_calendar();
        assert_eq!(
            months_between(&calendar, &Date::new(1492, 10, 30), &Date::new(1493, 1, 1)),
            3
        );
        assert_eq!(
            months_between(&calendar, &Date::new(1493, 1, 1), &Date::new(1492, 10, 30)),
            -3
        );
    }

    #[test]
    fn test_add_days_crosses_year_and_keeps_time() {
        let calendar = fixture_calendar();
        let date = Date::new(1492, 11, 30).with_time(9, 15);
        assert_eq!(
            add_days(&calendar, &date, 3),
            Some(Date::new(1493, 0, 2).with_time(9, 15))
        );
        assert_eq!(
            add_days(&calendar, &Date::new(1492, 2, 1), -1),
            Some(Date::new(1492, 1, 29))
        );
    }

    #[test]
    fn test_add_months_clamps_to_month_end() {
        let calendar = fixture_calendar();
        let jan_31 = Date::new(1493, 0, 31);
        assert_eq!(add_months(&calendar, &jan_31, 1), Some(Date::new(1493, 1, 28)));
        assert_eq!(add_months(&calendar, &jan_31, 3), Some(Date::new(1493, 3, 30)));
        assert_eq!(add_months(&calendar, &jan_31, 13), Some(Date::new(1494, 1, 28)));
        assert_eq!(add_months(&calendar, &jan_31, -1), Some(Date::new(1492, 11, 31)));
    }

    #[test]
    fn test_add_years_clamps_leap_day() {
        let calendar = fixture_calendar();
        let leap_day = Date::new(1492, 1, 29);
        assert_eq!(add_years(&calendar, &leap_day, 1), Some(Date::new(1493, 1, 28)));
        assert_eq!(add_years(&calendar, &leap_day, 4), Some(Date::new(1496, 1, 29)));
    }

    #[test]
    fn test_day_of_week_and_year() {
        let calendar = fixture_calendar();
        let date = Date::new(1492, 2, 1);
        assert_eq!(day_of_year(&calendar, &date), Some(31 + 29 + 1));

        let dow = day_of_week(&calendar, &date).unwrap();
        let week_later = add_days(&calendar, &date, 7).unwrap();
        assert_eq!(day_of_week(&calendar, &week_later), Some(dow));
        let next_day = add_days(&calendar, &date, 1).unwrap();
        assert_eq!(day_of_week(&calendar, &next_day), Some((dow + 1) % 7));
    }
}
