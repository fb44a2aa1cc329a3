//! Shared fixtures for unit tests.

use crate::calendar::{
    CalendarDefinition, ConfiguredCalendar, LeapYearRule, MonthDefinition, MoonDefinition,
};

/// A Julian-style calendar: twelve months, a leap day in the second month
/// every fourth year, a seven-day week starting on the epoch day, and one
/// moon with a 28-day cycle whose new moon falls on the epoch day.
pub fn fixture_calendar() -> ConfiguredCalendar {
    let months = [
        ("Hammer", 31, 0),
        ("Alturiak", 28, 1),
        ("Ches", 31, 0),
        ("Tarsakh", 30, 0),
        ("Mirtul", 31, 0),
        ("Kythorn", 30, 0),
        ("Flamerule", 31, 0),
        ("Eleasis", 31, 0),
        ("Eleint", 30, 0),
        ("Marpenoth", 31, 0),
        ("Uktar", 30, 0),
        ("Nightal", 31, 0),
    ];

    let definition = CalendarDefinition {
        name: "Fixture".to_string(),
        months: months
            .iter()
            .map(|(name, days, leap_days)| MonthDefinition {
                name: name.to_string(),
                days: *days,
                leap_days: *leap_days,
            })
            .collect(),
        leap_year: Some(LeapYearRule {
            interval: 4,
            offset: 0,
        }),
        weekdays: ["First", "Second", "Third", "Fourth", "Fifth", "Sixth", "Seventh"]
            .iter()
            .map(|d| d.to_string())
            .collect(),
        epoch_weekday: 0,
        hours_per_day: 24,
        minutes_per_hour: 60,
        seconds_per_minute: 60,
        moons: vec![MoonDefinition {
            name: "Selune".to_string(),
            cycle_length: 28.0,
            new_moon_offset: 0.0,
        }],
    };

    ConfiguredCalendar::new(definition).expect("fixture calendar is valid")
}
