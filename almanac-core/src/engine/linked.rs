//! Events scheduled relative to another event.

use super::RecurrenceEngine;
use crate::date::Date;
use crate::date_math;
use crate::descriptor::{LinkedEvent, RecurrenceDescriptor};

/// Event ids currently being resolved, outermost first.
///
/// Resolving a link pushes the target id; reaching an id already on the
/// trail, or going deeper than the configured limit, stops resolution.
#[derive(Debug, Default)]
pub(super) struct LinkTrail {
    visited: Vec<String>,
}

impl LinkTrail {
    fn enter(&mut self, event_id: &str, max_depth: usize) -> bool {
        if self.visited.len() >= max_depth {
            tracing::warn!(
                event_id,
                depth = self.visited.len(),
                "link chain too deep, treating as no occurrence"
            );
            return false;
        }
        if self.visited.iter().any(|id| id == event_id) {
            tracing::debug!(event_id, trail = ?self.visited, "link cycle, treating as no occurrence");
            return false;
        }
        self.visited.push(event_id.to_string());
        true
    }

    fn leave(&mut self) {
        self.visited.pop();
    }
}

impl RecurrenceEngine<'_> {
    /// Run `f` against the linked descriptor with the link entered on the
    /// trail. `None` if the link cannot be followed.
    fn follow<T>(
        &self,
        link: &LinkedEvent,
        trail: &mut LinkTrail,
        f: impl FnOnce(&Self, &RecurrenceDescriptor, &mut LinkTrail) -> T,
    ) -> Option<T> {
        let Some(target) = self.store.descriptor(&link.event_id) else {
            tracing::debug!(event_id = %link.event_id, "linked event not found");
            return None;
        };
        if !trail.enter(&link.event_id, self.limits.max_link_depth) {
            return None;
        }
        let result = f(self, target, trail);
        trail.leave();
        Some(result)
    }

    pub(super) fn linked_occurs(
        &self,
        link: &LinkedEvent,
        target: &Date,
        trail: &mut LinkTrail,
    ) -> bool {
        let Some(shifted) = date_math::add_days(self.calendar, target, -link.offset_days) else {
            return false;
        };
        self.follow(link, trail, |engine, linked, trail| {
            engine.occurs(linked, &shifted, trail)
        })
        .unwrap_or(false)
    }

    pub(super) fn linked_ordinal(
        &self,
        link: &LinkedEvent,
        target: &Date,
        trail: &mut LinkTrail,
    ) -> u32 {
        let Some(shifted) = date_math::add_days(self.calendar, target, -link.offset_days) else {
            return 0;
        };
        self.follow(link, trail, |engine, linked, trail| {
            engine.ordinal(linked, &shifted, trail)
        })
        .unwrap_or(0)
    }

    /// Occurrences of `descriptor`, which carries `link`, in `[from, to]`.
    /// The window is already clamped to the descriptor's own bounds.
    pub(super) fn linked_occurrences(
        &self,
        descriptor: &RecurrenceDescriptor,
        link: &LinkedEvent,
        from: &Date,
        to: &Date,
        cap: usize,
        trail: &mut LinkTrail,
    ) -> Vec<Date> {
        let calendar = self.calendar;
        let shift = |date: &Date, days: i64| date_math::add_days(calendar, date, days);
        let (Some(linked_from), Some(linked_to)) =
            (shift(from, -link.offset_days), shift(to, -link.offset_days))
        else {
            return Vec::new();
        };

        self.follow(link, trail, |engine, linked, trail| {
            engine
                .occurrences(linked, &linked_from, &linked_to, cap, trail)
                .iter()
                .filter_map(|date| shift(date, link.offset_days))
                .map(|date| Date {
                    hour: descriptor.start_date.hour,
                    minute: descriptor.start_date.minute,
                    ..date
                })
                .collect()
        })
        .unwrap_or_default()
    }
}
