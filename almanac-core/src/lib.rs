//! Core types for the almanac ecosystem.
//!
//! This crate answers recurrence questions for events on arbitrary calendars:
//! - `calendar` adapters that describe the shape of time (Gregorian or defined in TOML)
//! - `descriptor` for the schedule of a single event
//! - `engine` for `occurs_on`, `occurrences_in_range` and `ordinal_up_to`
//! - `store` for looking up linked events
//!
//! Month numbers are 0-indexed everywhere in this crate.

pub mod calendar;
pub mod config;
pub mod constants;
pub mod date;
pub mod date_math;
pub mod descriptor;
pub mod engine;
pub mod error;
pub mod random;
pub mod range_pattern;
pub mod store;

#[cfg(test)]
mod testing;

pub use calendar::{CalendarAdapter, ConfiguredCalendar, GregorianCalendar, MoonPhase};
pub use date::Date;
pub use descriptor::{LinkedEvent, MoonCondition, RecurrenceDescriptor, RepeatKind};
pub use engine::{AgendaEntry, RecurrenceEngine};
pub use error::{AlmanacError, AlmanacResult};
pub use store::{EventStore, InMemoryEventStore};
