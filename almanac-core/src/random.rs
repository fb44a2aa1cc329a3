//! Deterministic "random" occurrences.
//!
//! A random event rolls a die for each eligible day, but the die is a hash
//! of `(seed, year, day of year)`. The same event therefore lands on the
//! same days in every process, on every machine, forever.

use serde::{Deserialize, Serialize};

use crate::calendar::CalendarAdapter;
use crate::date::Date;
use crate::date_math;

/// Which days are eligible for a roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckInterval {
    /// Every day.
    #[default]
    Daily,
    /// Only days on the start date's weekday.
    Weekly,
    /// Only days on the start date's day of the month.
    Monthly,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomConfig {
    pub seed: i64,
    /// Chance of occurring on an eligible day, in percent.
    pub probability: f64,
    #[serde(default)]
    pub check_interval: CheckInterval,
}

/// Score in `[0, 100)` for one day. Stable across versions and platforms.
pub fn score(seed: i64, year: i32, day_of_year: u32) -> f64 {
    let mut hash = (seed as u64) ^ 0x9E37_79B9_7F4A_7C15;
    hash = hash.wrapping_add((i64::from(year) as u64).wrapping_mul(0xBF58_476D_1CE4_E5B9));
    hash = hash.wrapping_add(u64::from(day_of_year).wrapping_mul(0x94D0_49BB_1331_11EB));

    // splitmix64 finalizer
    hash ^= hash >> 30;
    hash = hash.wrapping_mul(0xBF58_476D_1CE4_E5B9);
    hash ^= hash >> 27;
    hash = hash.wrapping_mul(0x94D0_49BB_1331_11EB);
    hash ^= hash >> 31;

    // Top 53 bits fill an f64 mantissa exactly
    (hash >> 11) as f64 / (1u64 << 53) as f64 * 100.0
}

/// Whether the roll for `target` succeeds. Start and repeat bounds are the
/// caller's concern.
pub fn matches_random(
    calendar: &dyn CalendarAdapter,
    config: &RandomConfig,
    target: &Date,
    start: &Date,
) -> bool {
    let eligible = match config.check_interval {
        CheckInterval::Daily => true,
        CheckInterval::Weekly => {
            let target_dow = date_math::day_of_week(calendar, target);
            target_dow.is_some() && target_dow == date_math::day_of_week(calendar, start)
        }
        CheckInterval::Monthly => target.day == start.day,
    };
    if !eligible {
        return false;
    }

    match date_math::day_of_year(calendar, target) {
        Some(day_of_year) => score(config.seed, target.year, day_of_year) < config.probability,
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixture_calendar;

    #[test]
    fn test_score_is_deterministic() {
        let first = score(42, 1492, 100);
        let second = score(42, 1492, 100);
        assert_eq!(first.to_bits(), second.to_bits());
        assert!((0.0..100.0).contains(&first));
    }

    #[test]
    fn test_score_depends_on_every_input() {
        let base = score(42, 1492, 100);
        assert_ne!(base, score(43, 1492, 100));
        assert_ne!(base, score(42, 1493, 100));
        assert_ne!(base, score(42, 1492, 101));
    }

    #[test]
    fn test_score_is_roughly_uniform() {
        let mut buckets = [0usize; 10];
        for year in 0..40 {
            for day in 1..=250 {
                let s = score(7, year, day);
                buckets[(s / 10.0) as usize] += 1;
            }
        }
        // 10 000 samples, 1 000 expected per bucket
        for (i, count) in buckets.iter().enumerate() {
            assert!((850..1150).contains(count), "bucket {i} has {count}");
        }
    }

    #[test]
    fn test_probability_bounds() {
        let calendar = fixture_calendar();
        let start = Date::new(1492, 0, 1);
        let always = RandomConfig {
            seed: 1,
            probability: 100.0,
            check_interval: CheckInterval::Daily,
        };
        let never = RandomConfig {
            probability: 0.0,
            ..always.clone()
        };

        for day in 1..=31 {
            let target = Date::new(1492, 0, day);
            assert!(matches_random(&calendar, &always, &target, &start));
            assert!(!matches_random(&calendar, &never, &target, &start));
        }
    }

    #[test]
    fn test_weekly_and_monthly_eligibility() {
        let calendar = fixture_calendar();
        let start = Date::new(1492, 0, 3);
        let weekly = RandomConfig {
            seed: 9,
            probability: 100.0,
            check_interval: CheckInterval::Weekly,
        };
        assert!(matches_random(&calendar, &weekly, &Date::new(1492, 0, 10), &start));
        assert!(!matches_random(&calendar, &weekly, &Date::new(1492, 0, 11), &start));

        let monthly = RandomConfig {
            check_interval: CheckInterval::Monthly,
            ..weekly
        };
        assert!(matches_random(&calendar, &monthly, &Date::new(1492, 4, 3), &start));
        assert!(!matches_random(&calendar, &monthly, &Date::new(1492, 4, 4), &start));
    }
}
