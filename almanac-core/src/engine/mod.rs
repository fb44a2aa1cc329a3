//! The recurrence engine.
//!
//! Three questions, answered without side effects for any descriptor:
//!
//! - [`RecurrenceEngine::occurs_on`]: does the event occur on this day?
//! - [`RecurrenceEngine::occurrences_in_range`]: on which days in a range?
//! - [`RecurrenceEngine::ordinal_up_to`]: how many occurrences so far?
//!
//! The single-day test in `evaluate` is the definition; enumeration either
//! scans days through it or strides through candidate days and confirms each
//! one with it, so both always agree. Every loop is capped by
//! [`EngineLimits`], and hitting a cap quietly returns what was found.

mod enumerate;
mod evaluate;
mod linked;
mod ordinal;
mod queries;

pub use queries::AgendaEntry;

use crate::calendar::CalendarAdapter;
use crate::config::EngineLimits;
use crate::date::Date;
use crate::descriptor::RecurrenceDescriptor;
use crate::store::EventStore;

use linked::LinkTrail;

/// Evaluates recurrence descriptors against one calendar and event store.
///
/// Holds only shared references, so it is cheap to build per request and
/// can be used from several threads when the calendar and store allow it.
#[derive(Clone, Copy)]
pub struct RecurrenceEngine<'a> {
    calendar: &'a dyn CalendarAdapter,
    store: &'a dyn EventStore,
    limits: EngineLimits,
}

impl<'a> RecurrenceEngine<'a> {
    pub fn new(calendar: &'a dyn CalendarAdapter, store: &'a dyn EventStore) -> Self {
        RecurrenceEngine {
            calendar,
            store,
            limits: EngineLimits::default(),
        }
    }

    pub fn with_limits(mut self, limits: EngineLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn calendar(&self) -> &'a dyn CalendarAdapter {
        self.calendar
    }

    pub fn limits(&self) -> &EngineLimits {
        &self.limits
    }

    /// Whether the event occurs on `target`'s day.
    pub fn occurs_on(&self, descriptor: &RecurrenceDescriptor, target: &Date) -> bool {
        self.occurs(descriptor, target, &mut LinkTrail::default())
    }

    /// Occurrences between `range_start` and `range_end` (inclusive, by
    /// day), in order, at most `cap` of them.
    pub fn occurrences_in_range(
        &self,
        descriptor: &RecurrenceDescriptor,
        range_start: &Date,
        range_end: &Date,
        cap: usize,
    ) -> Vec<Date> {
        self.occurrences(
            descriptor,
            range_start,
            range_end,
            cap,
            &mut LinkTrail::default(),
        )
    }

    /// Number of occurrences from the start date up to and including
    /// `target`. The start date is occurrence 1. Day-scanned kinds report
    /// `u32::MAX` when `target` lies beyond their scan ceiling.
    pub fn ordinal_up_to(&self, descriptor: &RecurrenceDescriptor, target: &Date) -> u32 {
        self.ordinal(descriptor, target, &mut LinkTrail::default())
    }
}
