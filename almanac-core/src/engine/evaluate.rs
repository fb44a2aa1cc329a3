//! Single-day decision: does a descriptor occur on a date?

use super::RecurrenceEngine;
use super::linked::LinkTrail;
use super::ordinal::cached_days;
use crate::date::Date;
use crate::date_math;
use crate::descriptor::{RecurrenceDescriptor, RepeatKind};
use crate::random;

/// Outcome of a descriptor's rule for one day, before the occurrence limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Verdict {
    Miss,
    /// Occurs regardless of `max_occurrences`: the start date of a one-off
    /// event, or a day inside the initial multi-day span.
    Covered,
    /// Occurs if the occurrence limit allows the occurrence starting on the
    /// carried day: the target itself, or the stride point whose span
    /// reaches it.
    Hit(Date),
}

impl Verdict {
    pub(super) fn is_match(self) -> bool {
        self != Verdict::Miss
    }
}

impl RecurrenceEngine<'_> {
    pub(super) fn occurs(
        &self,
        descriptor: &RecurrenceDescriptor,
        target: &Date,
        trail: &mut LinkTrail,
    ) -> bool {
        if let Some(link) = &descriptor.linked_event {
            return descriptor.within_bounds(target) && self.linked_occurs(link, target, trail);
        }

        match self.verdict(descriptor, target) {
            Verdict::Miss => false,
            Verdict::Covered => true,
            Verdict::Hit(anchor) => {
                descriptor.max_occurrences == 0
                    || self.ordinal(descriptor, &anchor, trail) <= descriptor.max_occurrences
            }
        }
    }

    /// The descriptor's own rule for `target`, ignoring any link.
    pub(super) fn verdict(&self, descriptor: &RecurrenceDescriptor, target: &Date) -> Verdict {
        let hit = |matched: bool| if matched { Verdict::Hit(*target) } else { Verdict::Miss };

        match descriptor.repeat {
            RepeatKind::None => {
                if descriptor.start_date.is_same_day(target) && self.moon_allows(descriptor, target)
                {
                    Verdict::Covered
                } else {
                    Verdict::Miss
                }
            }
            RepeatKind::Unrecognized => {
                tracing::trace!("unrecognized repeat kind never occurs");
                Verdict::Miss
            }
            _ if !descriptor.within_bounds(target) => Verdict::Miss,
            RepeatKind::Random => hit(self.random_matches(descriptor, target)),
            RepeatKind::Moon => {
                if descriptor.moon_conditions.is_empty() {
                    tracing::trace!("moon event without conditions never occurs");
                    return Verdict::Miss;
                }
                hit(self.any_moon_condition(descriptor, target))
            }
            RepeatKind::Range => {
                if in_initial_span(descriptor, target) {
                    return Verdict::Covered;
                }
                hit(self.moon_allows(descriptor, target) && self.kind_matches(descriptor, target))
            }
            RepeatKind::Daily | RepeatKind::Weekly | RepeatKind::Monthly | RepeatKind::Yearly => {
                if in_initial_span(descriptor, target) {
                    return Verdict::Covered;
                }
                match self.span_days(descriptor) {
                    Some(span) => self
                        .spanning_stride_point(descriptor, target, span)
                        .map_or(Verdict::Miss, Verdict::Hit),
                    None => hit(
                        self.moon_allows(descriptor, target) && self.kind_matches(descriptor, target),
                    ),
                }
            }
        }
    }

    /// Days from the start date to `end_date`, for events spanning more
    /// than one day.
    pub(super) fn span_days(&self, descriptor: &RecurrenceDescriptor) -> Option<i64> {
        let end = descriptor.span_end()?;
        date_math::days_between(self.calendar, &descriptor.start_date, end).filter(|days| *days > 0)
    }

    /// The latest stride point after the start date whose span of `span`
    /// days reaches `target` and which passes the moon filter.
    fn spanning_stride_point(
        &self,
        descriptor: &RecurrenceDescriptor,
        target: &Date,
        span: i64,
    ) -> Option<Date> {
        let mut k = self.stride_index_at(descriptor, target);
        for _ in 0..self.limits.stride_ceiling {
            if k < 1 {
                return None;
            }
            let point = self.stride_point(descriptor, k)?;
            k -= 1;
            if point.cmp_day(target).is_gt() {
                continue;
            }
            if date_math::days_between(self.calendar, &point, target)? > span {
                return None;
            }
            if self.moon_allows(descriptor, &point) {
                return Some(point);
            }
        }
        None
    }

    fn random_matches(&self, descriptor: &RecurrenceDescriptor, target: &Date) -> bool {
        if descriptor.cached_random_occurrences.is_some() {
            return cached_days(descriptor)
                .iter()
                .any(|date| date.is_same_day(target));
        }
        match &descriptor.random_config {
            Some(config) => {
                random::matches_random(self.calendar, config, target, &descriptor.start_date)
            }
            None => {
                tracing::trace!("random event without config never occurs");
                false
            }
        }
    }

    /// No moon conditions, or at least one holds.
    fn moon_allows(&self, descriptor: &RecurrenceDescriptor, target: &Date) -> bool {
        descriptor.moon_conditions.is_empty() || self.any_moon_condition(descriptor, target)
    }

    fn any_moon_condition(&self, descriptor: &RecurrenceDescriptor, target: &Date) -> bool {
        descriptor
            .moon_conditions
            .iter()
            .any(|condition| condition.holds_on(self.calendar, target))
    }

    /// Stride and pattern tests for the calendar-relative kinds.
    fn kind_matches(&self, descriptor: &RecurrenceDescriptor, target: &Date) -> bool {
        let calendar = self.calendar;
        let start = &descriptor.start_date;
        let interval = i64::from(descriptor.effective_interval());

        match descriptor.repeat {
            RepeatKind::Daily => date_math::days_between(calendar, start, target)
                .is_some_and(|days| days >= 0 && days % interval == 0),
            RepeatKind::Weekly => {
                let week = i64::from(calendar.week_length().max(1));
                let same_weekday = date_math::day_of_week(calendar, target)
                    .is_some_and(|dow| Some(dow) == date_math::day_of_week(calendar, start));
                same_weekday
                    && date_math::days_between(calendar, start, target)
                        .is_some_and(|days| days >= 0 && (days / week) % interval == 0)
            }
            RepeatKind::Monthly => {
                let months = date_math::months_between(calendar, start, target);
                months >= 0
                    && months % interval == 0
                    && target.day == clamped_day(self, start, target)
            }
            RepeatKind::Yearly => {
                let years = i64::from(target.year) - i64::from(start.year);
                years >= 0
                    && years % interval == 0
                    && target.month == start.month
                    && target.day == clamped_day(self, start, target)
            }
            RepeatKind::Range => descriptor
                .range_pattern
                .as_ref()
                .is_some_and(|pattern| pattern.matches(target)),
            RepeatKind::None | RepeatKind::Moon | RepeatKind::Random | RepeatKind::Unrecognized => {
                false
            }
        }
    }
}

/// The start date's day of month as it lands in `target`'s month.
fn clamped_day(engine: &RecurrenceEngine, start: &Date, target: &Date) -> u32 {
    start
        .day
        .min(engine.calendar.days_in_month(target.month, target.year))
}

/// Inside `[start_date, end_date]` of an event that spans several days.
fn in_initial_span(descriptor: &RecurrenceDescriptor, target: &Date) -> bool {
    descriptor.span_end().is_some_and(|end| {
        target.cmp_day(&descriptor.start_date).is_ge() && target.cmp_day(end).is_le()
    })
}
