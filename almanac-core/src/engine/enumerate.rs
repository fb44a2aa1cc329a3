//! Listing the occurrences that fall inside a window.

use super::RecurrenceEngine;
use super::evaluate::Verdict;
use super::linked::LinkTrail;
use super::ordinal::cached_days;
use crate::date::Date;
use crate::date_math;
use crate::descriptor::{RecurrenceDescriptor, RepeatKind};

impl RecurrenceEngine<'_> {
    pub(super) fn occurrences(
        &self,
        descriptor: &RecurrenceDescriptor,
        range_start: &Date,
        range_end: &Date,
        cap: usize,
        trail: &mut LinkTrail,
    ) -> Vec<Date> {
        if cap == 0 {
            return Vec::new();
        }

        let start = descriptor.start_date;
        if descriptor.repeat == RepeatKind::None && descriptor.linked_event.is_none() {
            let in_window =
                start.cmp_day(range_start).is_ge() && start.cmp_day(range_end).is_le();
            let occurs = in_window && self.verdict(descriptor, &start).is_match();
            return if occurs { vec![start] } else { Vec::new() };
        }

        // Occurrences carry the start date's time of day
        let from = if range_start.cmp_day(&start).is_lt() {
            start
        } else {
            Date {
                hour: start.hour,
                minute: start.minute,
                ..*range_start
            }
        };
        let to = match &descriptor.repeat_end_date {
            Some(end) if end.cmp_day(range_end).is_lt() => end,
            _ => range_end,
        };
        if from.cmp_day(to).is_gt() {
            return Vec::new();
        }

        if let Some(link) = &descriptor.linked_event {
            return self.linked_occurrences(descriptor, link, &from, to, cap, trail);
        }

        match descriptor.repeat {
            RepeatKind::None | RepeatKind::Unrecognized => Vec::new(),
            RepeatKind::Random if descriptor.cached_random_occurrences.is_some() => {
                cached_days(descriptor)
                    .into_iter()
                    .filter(|date| date.cmp_day(&from).is_ge() && date.cmp_day(to).is_le())
                    .take(cap)
                    .collect()
            }
            RepeatKind::Random => {
                self.scan(descriptor, &from, to, cap, self.limits.random_scan_ceiling)
            }
            RepeatKind::Moon | RepeatKind::Range => {
                self.scan(descriptor, &from, to, cap, self.limits.scan_ceiling)
            }
            RepeatKind::Daily | RepeatKind::Weekly | RepeatKind::Monthly | RepeatKind::Yearly
                if self.span_days(descriptor).is_some() =>
            {
                self.walk(descriptor, &from, to, cap, trail)
            }
            RepeatKind::Daily | RepeatKind::Weekly | RepeatKind::Monthly | RepeatKind::Yearly => {
                self.stride(descriptor, &from, to, cap, trail)
            }
        }
    }

    /// Day-by-day walk for kinds without a fixed stride.
    ///
    /// With an occurrence limit the walk starts at the start date so that
    /// the running count matches the ordinal.
    fn scan(
        &self,
        descriptor: &RecurrenceDescriptor,
        from: &Date,
        to: &Date,
        cap: usize,
        ceiling: usize,
    ) -> Vec<Date> {
        let max = descriptor.max_occurrences;
        let limited = max > 0;
        let mut day = if limited { descriptor.start_date } else { *from };
        let mut count: u32 = 0;
        let mut found = Vec::new();

        for _ in 0..ceiling {
            if day.cmp_day(to).is_gt() {
                return found;
            }

            let verdict = self.verdict(descriptor, &day);
            if verdict.is_match() {
                count = count.saturating_add(1);
            }
            if limited && matches!(verdict, Verdict::Hit(_)) && count > max {
                return found;
            }
            if verdict.is_match() && day.cmp_day(from).is_ge() {
                found.push(day);
                if found.len() >= cap {
                    return found;
                }
            }

            match date_math::add_days(self.calendar, &day, 1) {
                Some(next) => day = next,
                None => return found,
            }
        }

        tracing::debug!(ceiling, found = found.len(), "enumeration stopped at scan ceiling");
        found
    }

    /// Every day of the window through the single-day test, for stride
    /// kinds whose occurrences span several days.
    fn walk(
        &self,
        descriptor: &RecurrenceDescriptor,
        from: &Date,
        to: &Date,
        cap: usize,
        trail: &mut LinkTrail,
    ) -> Vec<Date> {
        let ceiling = self.limits.stride_ceiling;
        let mut found = Vec::new();
        let mut day = *from;

        for _ in 0..ceiling {
            if day.cmp_day(to).is_gt() || found.len() >= cap {
                return found;
            }
            if self.occurs(descriptor, &day, trail) {
                found.push(day);
            }
            match date_math::add_days(self.calendar, &day, 1) {
                Some(next) => day = next,
                None => return found,
            }
        }

        tracing::debug!(ceiling, found = found.len(), "enumeration stopped at stride ceiling");
        found
    }

    /// Jump between stride points for daily, weekly, monthly and yearly
    /// events.
    fn stride(
        &self,
        descriptor: &RecurrenceDescriptor,
        from: &Date,
        to: &Date,
        cap: usize,
        trail: &mut LinkTrail,
    ) -> Vec<Date> {
        let ceiling = self.limits.stride_ceiling;
        let mut found = Vec::new();

        let max = i64::from(descriptor.max_occurrences);
        let mut k = self.stride_index_at(descriptor, from);
        for _ in 0..ceiling {
            if found.len() >= cap || (max > 0 && k + 1 > max) {
                return found;
            }
            let Some(point) = self.stride_point(descriptor, k) else {
                return found;
            };
            if point.cmp_day(to).is_gt() {
                return found;
            }
            k += 1;

            if point.cmp_day(from).is_lt() {
                continue;
            }
            if self.occurs(descriptor, &point, trail) {
                found.push(point);
            }
        }

        tracing::debug!(ceiling, found = found.len(), "enumeration stopped at stride ceiling");
        found
    }
}
