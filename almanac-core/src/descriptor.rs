//! Recurrence descriptors: the full schedule of one event.

use serde::{Deserialize, Serialize};

use crate::calendar::{CalendarAdapter, MoonPhase};
use crate::date::Date;
use crate::error::{AlmanacError, AlmanacResult};
use crate::random::RandomConfig;
use crate::range_pattern::RangePattern;

/// How an event repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepeatKind {
    /// A single occurrence on the start date.
    #[default]
    None,
    Daily,
    Weekly,
    Monthly,
    Yearly,
    /// Days matching the descriptor's range pattern.
    Range,
    /// Days on which any moon condition holds.
    Moon,
    /// Days picked by the seeded scorer.
    Random,
    /// A kind this version does not know; never occurs.
    #[serde(other)]
    Unrecognized,
}

/// A window over one moon's phase. When `phase_start > phase_end` the window
/// wraps through new moon.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MoonCondition {
    pub moon_index: usize,
    pub phase_start: f64,
    pub phase_end: f64,
}

impl MoonCondition {
    pub fn contains(&self, phase: MoonPhase) -> bool {
        let position = phase.position;
        if self.phase_start <= self.phase_end {
            position >= self.phase_start && position <= self.phase_end
        } else {
            position >= self.phase_start || position <= self.phase_end
        }
    }

    pub fn holds_on(&self, calendar: &dyn CalendarAdapter, date: &Date) -> bool {
        calendar
            .moon_phase(self.moon_index, date)
            .is_some_and(|phase| self.contains(phase))
    }
}

/// Occurs a fixed number of days after (or before, if negative) another event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkedEvent {
    pub event_id: String,
    #[serde(default)]
    pub offset_days: i64,
}

fn default_interval() -> u32 {
    1
}

/// Everything needed to decide whether an event occurs on a given day.
///
/// Descriptors are owned by whoever stores events; the engine only reads
/// them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecurrenceDescriptor {
    #[serde(default)]
    pub repeat: RepeatKind,
    #[serde(default = "default_interval")]
    pub interval: u32,
    /// 0 for unlimited; otherwise the ordinal of the last allowed occurrence.
    #[serde(default)]
    pub max_occurrences: u32,
    pub start_date: Date,
    /// When set and different from `start_date`, every occurrence spans
    /// this many days.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<Date>,
    /// Last day (inclusive) on which the event may occur.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repeat_end_date: Option<Date>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub moon_conditions: Vec<MoonCondition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub random_config: Option<RandomConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cached_random_occurrences: Option<Vec<Date>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linked_event: Option<LinkedEvent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range_pattern: Option<RangePattern>,
}

impl RecurrenceDescriptor {
    pub fn new(start_date: Date, repeat: RepeatKind) -> Self {
        RecurrenceDescriptor {
            start_date,
            end_date: None,
            repeat,
            interval: 1,
            repeat_end_date: None,
            max_occurrences: 0,
            moon_conditions: Vec::new(),
            random_config: None,
            cached_random_occurrences: None,
            linked_event: None,
            range_pattern: None,
        }
    }

    /// A single-day event.
    pub fn once(date: Date) -> Self {
        Self::new(date, RepeatKind::None)
    }

    pub fn every(mut self, interval: u32) -> Self {
        self.interval = interval;
        self
    }

    pub fn spanning_until(mut self, end_date: Date) -> Self {
        self.end_date = Some(end_date);
        self
    }

    pub fn until(mut self, repeat_end_date: Date) -> Self {
        self.repeat_end_date = Some(repeat_end_date);
        self
    }

    pub fn limited_to(mut self, max_occurrences: u32) -> Self {
        self.max_occurrences = max_occurrences;
        self
    }

    pub fn with_moon_condition(mut self, condition: MoonCondition) -> Self {
        self.moon_conditions.push(condition);
        self
    }

    pub fn with_random(mut self, config: RandomConfig) -> Self {
        self.random_config = Some(config);
        self
    }

    pub fn with_range_pattern(mut self, pattern: RangePattern) -> Self {
        self.range_pattern = Some(pattern);
        self
    }

    pub fn linked_to(mut self, event_id: impl Into<String>, offset_days: i64) -> Self {
        self.linked_event = Some(LinkedEvent {
            event_id: event_id.into(),
            offset_days,
        });
        self
    }

    /// Stride, never less than 1.
    pub fn effective_interval(&self) -> u32 {
        self.interval.max(1)
    }

    /// End of the initial multi-day span, if the event has one.
    pub fn span_end(&self) -> Option<&Date> {
        self.end_date
            .as_ref()
            .filter(|end| !end.is_same_day(&self.start_date))
    }

    /// Whether `date` lies between `start_date` and `repeat_end_date`.
    pub fn within_bounds(&self, date: &Date) -> bool {
        date.cmp_day(&self.start_date).is_ge()
            && self
                .repeat_end_date
                .as_ref()
                .is_none_or(|end| date.cmp_day(end).is_le())
    }

    /// Check a descriptor before it is stored. The engine tolerates
    /// everything rejected here; this catches mistakes at the point of
    /// creation.
    pub fn validate(&self, event_id: &str, calendar: &dyn CalendarAdapter) -> AlmanacResult<()> {
        let fail = |reason: String| Err(AlmanacError::descriptor(event_id, reason));

        let mut dates = vec![("start_date", &self.start_date)];
        if let Some(end) = &self.end_date {
            dates.push(("end_date", end));
        }
        if let Some(end) = &self.repeat_end_date {
            dates.push(("repeat_end_date", end));
        }
        for cached in self.cached_random_occurrences.iter().flatten() {
            dates.push(("cached_random_occurrences", cached));
        }
        for (field, date) in dates {
            if calendar.date_to_seconds(date).is_none() {
                return fail(format!("{} {} does not exist in this calendar", field, date));
            }
        }

        if self.end_date.is_some_and(|end| end.cmp_day(&self.start_date).is_lt()) {
            return fail("end_date is before start_date".into());
        }
        if self
            .repeat_end_date
            .is_some_and(|end| end.cmp_day(&self.start_date).is_lt())
        {
            return fail("repeat_end_date is before start_date".into());
        }
        if self.interval == 0 {
            return fail("interval must be at least 1".into());
        }

        for condition in &self.moon_conditions {
            let in_unit = |p: f64| (0.0..1.0).contains(&p);
            if !in_unit(condition.phase_start) || !in_unit(condition.phase_end) {
                return fail(format!(
                    "moon phase window {}..{} must lie within [0, 1)",
                    condition.phase_start, condition.phase_end
                ));
            }
        }

        if let Some(config) = &self.random_config
            && !(0.0..=100.0).contains(&config.probability)
        {
            return fail(format!(
                "probability {} must be between 0 and 100",
                config.probability
            ));
        }

        if let Some(link) = &self.linked_event {
            if link.event_id == event_id {
                return fail("event is linked to itself".into());
            }
            return Ok(());
        }

        match self.repeat {
            RepeatKind::Random
                if self.random_config.is_none() && self.cached_random_occurrences.is_none() =>
            {
                fail("random events need random_config".into())
            }
            RepeatKind::Moon if self.moon_conditions.is_empty() => {
                fail("moon events need at least one moon condition".into())
            }
            RepeatKind::Range if self.range_pattern.is_none() => {
                fail("range events need a range_pattern".into())
            }
            RepeatKind::Unrecognized => fail("unrecognized repeat kind".into()),
            _ => Ok(()),
        }
    }
}
