//! Year/month/day patterns with wildcards and inclusive ranges.

use serde::{Deserialize, Serialize};

use crate::date::Date;

/// Constraint on one date component. A missing bit (`None`) is a wildcard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RangeBitRepr", into = "RangeBitRepr")]
pub enum RangeBit {
    Exact(i64),
    /// Inclusive bounds; `None` leaves that side open.
    Between(Option<i64>, Option<i64>),
}

/// Accepted spellings: `5`, `[10, 20]`, or `{ min = 10 }` / `{ max = 20 }`
/// for open-ended ranges in formats without a null.
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RangeBitRepr {
    Exact(i64),
    Pair(Option<i64>, Option<i64>),
    Bounds {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<i64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<i64>,
    },
}

impl From<RangeBitRepr> for RangeBit {
    fn from(repr: RangeBitRepr) -> Self {
        match repr {
            RangeBitRepr::Exact(value) => RangeBit::Exact(value),
            RangeBitRepr::Pair(min, max) | RangeBitRepr::Bounds { min, max } => {
                RangeBit::Between(min, max)
            }
        }
    }
}

impl From<RangeBit> for RangeBitRepr {
    fn from(bit: RangeBit) -> Self {
        match bit {
            RangeBit::Exact(value) => RangeBitRepr::Exact(value),
            RangeBit::Between(min, max) => RangeBitRepr::Bounds { min, max },
        }
    }
}

impl RangeBit {
    pub fn matches(&self, value: i64) -> bool {
        match *self {
            RangeBit::Exact(expected) => value == expected,
            RangeBit::Between(min, max) => {
                min.is_none_or(|min| value >= min) && max.is_none_or(|max| value <= max)
            }
        }
    }
}

/// `None` always matches.
pub fn matches_bit(bit: Option<&RangeBit>, value: i64) -> bool {
    bit.is_none_or(|bit| bit.matches(value))
}

/// Independent constraints on year, month (0-indexed) and day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RangePattern {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<RangeBit>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month: Option<RangeBit>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day: Option<RangeBit>,
}

impl RangePattern {
    pub fn matches(&self, date: &Date) -> bool {
        matches_bit(self.year.as_ref(), i64::from(date.year))
            && matches_bit(self.month.as_ref(), i64::from(date.month))
            && matches_bit(self.day.as_ref(), i64::from(date.day))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_wildcard_composition() {
        let pattern = RangePattern {
            year: None,
            month: Some(RangeBit::Exact(5)),
            day: Some(RangeBit::Between(Some(10), Some(20))),
        };
        for year in [-300, 0, 1492, 9999] {
            assert!(pattern.matches(&Date::new(year, 5, 10)));
            assert!(pattern.matches(&Date::new(year, 5, 20)));
            assert!(!pattern.matches(&Date::new(year, 5, 21)));
            assert!(!pattern.matches(&Date::new(year, 6, 15)));
        }
    }

    #[test]
    fn test_open_bounds() {
        assert!(RangeBit::Between(None, None).matches(i64::MIN));
        assert!(RangeBit::Between(Some(3), None).matches(1_000_000));
        assert!(!RangeBit::Between(Some(3), None).matches(2));
        assert!(RangeBit::Between(None, Some(3)).matches(-5));
        assert!(!RangeBit::Between(None, Some(3)).matches(4));
        assert!(matches_bit(None, 42));
    }

    #[test]
    fn test_deserialize_all_spellings() {
        let pattern: RangePattern = serde_json::from_str(
            r#"{ "year": [1400, null], "month": 5, "day": { "max": 7 } }"#,
        )
        .unwrap();
        assert_eq!(
            pattern,
            RangePattern {
                year: Some(RangeBit::Between(Some(1400), None)),
                month: Some(RangeBit::Exact(5)),
                day: Some(RangeBit::Between(None, Some(7))),
            }
        );

        let from_toml: RangePattern = toml::from_str("day = [10, 20]").unwrap();
        assert_eq!(from_toml.day, Some(RangeBit::Between(Some(10), Some(20))));
        assert_eq!(from_toml.year, None);
    }

    #[test]
    fn test_serialize_round_trips_through_toml() {
        let pattern = RangePattern {
            year: Some(RangeBit::Exact(1492)),
            month: None,
            day: Some(RangeBit::Between(None, Some(15))),
        };
        let text = toml::to_string(&pattern).unwrap();
        let back: RangePattern = toml::from_str(&text).unwrap();
        assert_eq!(back, pattern);
    }
}
