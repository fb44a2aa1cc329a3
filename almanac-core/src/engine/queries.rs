//! Queries built on top of enumeration.

use serde::Serialize;

use super::RecurrenceEngine;
use super::linked::LinkTrail;
use crate::date::Date;
use crate::date_math;
use crate::descriptor::{RecurrenceDescriptor, RepeatKind};

/// One line of an agenda.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgendaEntry {
    pub date: Date,
    pub event_id: String,
}

impl RecurrenceEngine<'_> {
    /// First occurrence strictly after `after`'s day, looking no further
    /// than the configured lookahead.
    pub fn next_occurrence(&self, descriptor: &RecurrenceDescriptor, after: &Date) -> Option<Date> {
        let from = date_math::add_days(self.calendar, after, 1)?;
        let to = date_math::add_days(self.calendar, after, self.limits.lookahead_days)?;
        self.occurrences_in_range(descriptor, &from, &to, 1)
            .into_iter()
            .next()
    }

    /// Days a random event picks from its start date through `until`, ready
    /// to be stored as `cached_random_occurrences`.
    ///
    /// Any existing cache, link and occurrence limit are ignored; the limit
    /// is applied again when the cache is read. `None` without a
    /// `random_config`.
    pub fn random_cache(&self, descriptor: &RecurrenceDescriptor, until: &Date) -> Option<Vec<Date>> {
        descriptor.random_config.as_ref()?;

        let lazy = RecurrenceDescriptor {
            repeat: RepeatKind::Random,
            max_occurrences: 0,
            cached_random_occurrences: None,
            linked_event: None,
            ..descriptor.clone()
        };
        Some(self.occurrences(
            &lazy,
            &lazy.start_date,
            until,
            usize::MAX,
            &mut LinkTrail::default(),
        ))
    }

    /// Occurrences of several events in `[from, to]`, ordered by day and
    /// then by event id.
    pub fn agenda<'e>(
        &self,
        events: impl IntoIterator<Item = (&'e str, &'e RecurrenceDescriptor)>,
        from: &Date,
        to: &Date,
        cap_per_event: usize,
    ) -> Vec<AgendaEntry> {
        let mut entries: Vec<AgendaEntry> = events
            .into_iter()
            .flat_map(|(event_id, descriptor)| {
                self.occurrences_in_range(descriptor, from, to, cap_per_event)
                    .into_iter()
                    .map(move |date| AgendaEntry {
                        date,
                        event_id: event_id.to_string(),
                    })
            })
            .collect();

        entries.sort_by(|a, b| {
            a.date
                .cmp_day(&b.date)
                .then_with(|| a.event_id.cmp(&b.event_id))
        });
        entries
    }
}
