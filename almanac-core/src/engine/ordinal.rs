//! Counting occurrences from the start date up to a target day.

use super::RecurrenceEngine;
use super::linked::LinkTrail;
use crate::date::Date;
use crate::date_math;
use crate::descriptor::{RecurrenceDescriptor, RepeatKind};

impl RecurrenceEngine<'_> {
    pub(super) fn ordinal(
        &self,
        descriptor: &RecurrenceDescriptor,
        target: &Date,
        trail: &mut LinkTrail,
    ) -> u32 {
        if let Some(link) = &descriptor.linked_event {
            return self.linked_ordinal(link, target, trail);
        }

        let start = &descriptor.start_date;
        let target = match &descriptor.repeat_end_date {
            Some(end) if target.cmp_day(end).is_gt() => end,
            _ => target,
        };
        if target.cmp_day(start).is_lt() {
            return 0;
        }

        let interval = i64::from(descriptor.effective_interval());
        let calendar = self.calendar;

        let count = match descriptor.repeat {
            RepeatKind::None => 1,
            RepeatKind::Daily => {
                date_math::days_between(calendar, start, target).map_or(0, |days| days / interval + 1)
            }
            RepeatKind::Weekly => {
                let week = i64::from(calendar.week_length().max(1));
                date_math::days_between(calendar, start, target)
                    .map_or(0, |days| days / (interval * week) + 1)
            }
            RepeatKind::Monthly => {
                let months = date_math::months_between(calendar, start, target);
                self.stride_count(descriptor, target, months / interval)
            }
            RepeatKind::Yearly => {
                let years = i64::from(target.year) - i64::from(start.year);
                self.stride_count(descriptor, target, years / interval)
            }
            RepeatKind::Random if descriptor.cached_random_occurrences.is_some() => {
                cached_days(descriptor)
                    .iter()
                    .filter(|date| date.cmp_day(target).is_le())
                    .count() as i64
            }
            RepeatKind::Random => {
                return self.count_by_scan(descriptor, target, self.limits.random_scan_ceiling);
            }
            RepeatKind::Moon | RepeatKind::Range => {
                return self.count_by_scan(descriptor, target, self.limits.scan_ceiling);
            }
            RepeatKind::Unrecognized => 0,
        };

        u32::try_from(count).unwrap_or(u32::MAX)
    }

    /// Occurrences through stride point `k` for month and year strides,
    /// where `k` is the whole number of intervals between start and target.
    /// Point `k` itself may fall after the target because of day clamping.
    fn stride_count(&self, descriptor: &RecurrenceDescriptor, target: &Date, k: i64) -> i64 {
        match self.stride_point(descriptor, k) {
            Some(point) if point.cmp_day(target).is_gt() => k,
            Some(_) => k + 1,
            None => k,
        }
    }

    /// Count matching days from the start date through `target`, one day at
    /// a time. Saturates at `u32::MAX` when `target` lies beyond the scan
    /// ceiling, so an occurrence limit never admits an uncounted day.
    fn count_by_scan(&self, descriptor: &RecurrenceDescriptor, target: &Date, ceiling: usize) -> u32 {
        let mut count: u32 = 0;
        let mut day = descriptor.start_date;
        for _ in 0..ceiling {
            if day.cmp_day(target).is_gt() {
                return count;
            }
            if self.verdict(descriptor, &day).is_match() {
                count = count.saturating_add(1);
            }
            match date_math::add_days(self.calendar, &day, 1) {
                Some(next) => day = next,
                None => return count,
            }
        }
        if day.cmp_day(target).is_gt() {
            return count;
        }
        tracing::debug!(ceiling, %target, "occurrence count passed the scan ceiling");
        u32::MAX
    }

    /// The `k`-th stride point after the start date, for stride kinds.
    pub(super) fn stride_point(&self, descriptor: &RecurrenceDescriptor, k: i64) -> Option<Date> {
        let calendar = self.calendar;
        let start = &descriptor.start_date;
        let steps = k.checked_mul(i64::from(descriptor.effective_interval()))?;

        match descriptor.repeat {
            RepeatKind::Daily => date_math::add_days(calendar, start, steps),
            RepeatKind::Weekly => {
                let days = steps.checked_mul(i64::from(calendar.week_length().max(1)))?;
                date_math::add_days(calendar, start, days)
            }
            RepeatKind::Monthly => date_math::add_months(calendar, start, steps),
            RepeatKind::Yearly => date_math::add_years(calendar, start, steps),
            _ => None,
        }
    }

    /// Index of the last stride point on or before `date` (0 for dates
    /// before the start). Day clamping can put that point after `date`.
    pub(super) fn stride_index_at(&self, descriptor: &RecurrenceDescriptor, date: &Date) -> i64 {
        let calendar = self.calendar;
        let start = &descriptor.start_date;
        let interval = i64::from(descriptor.effective_interval());

        let units = match descriptor.repeat {
            RepeatKind::Daily => date_math::days_between(calendar, start, date).unwrap_or(0),
            RepeatKind::Weekly => {
                date_math::days_between(calendar, start, date).unwrap_or(0)
                    / i64::from(calendar.week_length().max(1))
            }
            RepeatKind::Monthly => date_math::months_between(calendar, start, date),
            RepeatKind::Yearly => i64::from(date.year) - i64::from(start.year),
            _ => 0,
        };
        (units / interval).max(0)
    }
}

/// Cached random days inside the descriptor's bounds: sorted, one per day,
/// and cut to `max_occurrences`.
pub(super) fn cached_days(descriptor: &RecurrenceDescriptor) -> Vec<Date> {
    let mut days: Vec<Date> = descriptor
        .cached_random_occurrences
        .iter()
        .flatten()
        .filter(|date| descriptor.within_bounds(date))
        .copied()
        .collect();
    days.sort_by(|a, b| a.cmp_day(b));
    days.dedup_by(|a, b| a.is_same_day(b));
    if descriptor.max_occurrences > 0 {
        days.truncate(descriptor.max_occurrences as usize);
    }
    days
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryEventStore;
    use crate::testing::fixture_calendar;
    use pretty_assertions::assert_eq;

    fn ordinal(descriptor: &RecurrenceDescriptor, target: Date) -> u32 {
        let calendar = fixture_calendar();
        let store = InMemoryEventStore::new();
        RecurrenceEngine::new(&calendar, &store).ordinal_up_to(descriptor, &target)
    }

    #[test]
    fn test_daily_and_weekly_counts() {
        let daily = RecurrenceDescriptor::new(Date::new(1492, 0, 1), RepeatKind::Daily).every(2);
        assert_eq!(ordinal(&daily, Date::new(1491, 11, 31)), 0);
        assert_eq!(ordinal(&daily, Date::new(1492, 0, 1)), 1);
        assert_eq!(ordinal(&daily, Date::new(1492, 0, 2)), 1);
        assert_eq!(ordinal(&daily, Date::new(1492, 0, 5)), 3);

        let weekly = RecurrenceDescriptor::new(Date::new(1492, 0, 1), RepeatKind::Weekly);
        assert_eq!(ordinal(&weekly, Date::new(1492, 0, 7)), 1);
        assert_eq!(ordinal(&weekly, Date::new(1492, 0, 8)), 2);
        assert_eq!(ordinal(&weekly, Date::new(1492, 0, 29)), 5);
    }

    #[test]
    fn test_monthly_count_handles_clamped_days() {
        let monthly = RecurrenceDescriptor::new(Date::new(1493, 0, 31), RepeatKind::Monthly);
        assert_eq!(ordinal(&monthly, Date::new(1493, 0, 31)), 1);
        assert_eq!(ordinal(&monthly, Date::new(1493, 1, 27)), 1);
        assert_eq!(ordinal(&monthly, Date::new(1493, 1, 28)), 2);
        assert_eq!(ordinal(&monthly, Date::new(1493, 2, 30)), 2);
        assert_eq!(ordinal(&monthly, Date::new(1493, 2, 31)), 3);
    }

    #[test]
    fn test_count_stops_at_repeat_end() {
        let descriptor = RecurrenceDescriptor::new(Date::new(1492, 0, 1), RepeatKind::Yearly)
            .until(Date::new(1495, 6, 1));
        assert_eq!(ordinal(&descriptor, Date::new(1495, 0, 1)), 4);
        assert_eq!(ordinal(&descriptor, Date::new(1600, 0, 1)), 4);
    }

    #[test]
    fn test_none_counts_one_from_start() {
        let once = RecurrenceDescriptor::once(Date::new(1492, 4, 4));
        assert_eq!(ordinal(&once, Date::new(1492, 4, 3)), 0);
        assert_eq!(ordinal(&once, Date::new(1492, 4, 4)), 1);
        assert_eq!(ordinal(&once, Date::new(1500, 0, 1)), 1);
    }

    #[test]
    fn test_cached_days_are_bounded_sorted_and_unique() {
        let mut descriptor =
            RecurrenceDescriptor::new(Date::new(1492, 0, 10), RepeatKind::Random).limited_to(2);
        descriptor.cached_random_occurrences = Some(vec![
            Date::new(1492, 5, 1),
            Date::new(1492, 0, 1),
            Date::new(1492, 2, 1),
            Date::new(1492, 2, 1).with_time(8, 0),
            Date::new(1492, 6, 1),
        ]);
        assert_eq!(
            cached_days(&descriptor),
            vec![Date::new(1492, 2, 1), Date::new(1492, 5, 1)]
        );
        assert_eq!(ordinal(&descriptor, Date::new(1492, 3, 1)), 1);
        assert_eq!(ordinal(&descriptor, Date::new(1493, 0, 1)), 2);
    }

    #[test]
    fn test_range_count_scans() {
        let descriptor = RecurrenceDescriptor::new(Date::new(1492, 0, 1), RepeatKind::Range)
            .with_range_pattern(crate::range_pattern::RangePattern {
                year: None,
                month: None,
                day: Some(crate::range_pattern::RangeBit::Exact(1)),
            });
        assert_eq!(ordinal(&descriptor, Date::new(1492, 11, 31)), 12);
    }
}
