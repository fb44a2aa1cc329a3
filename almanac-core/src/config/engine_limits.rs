//! Work limits for the recurrence engine.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_LOOKAHEAD_DAYS, DEFAULT_MAX_LINK_DEPTH, DEFAULT_RANDOM_SCAN_CEILING,
    DEFAULT_SCAN_CEILING, DEFAULT_STRIDE_CEILING,
};

fn default_scan_ceiling() -> usize {
    DEFAULT_SCAN_CEILING
}

fn default_random_scan_ceiling() -> usize {
    DEFAULT_RANDOM_SCAN_CEILING
}

fn default_stride_ceiling() -> usize {
    DEFAULT_STRIDE_CEILING
}

fn default_max_link_depth() -> usize {
    DEFAULT_MAX_LINK_DEPTH
}

fn default_lookahead_days() -> i64 {
    DEFAULT_LOOKAHEAD_DAYS
}

/// Hard stops that keep any single query bounded, whatever the descriptor.
/// Hitting one is silent: the query returns what it has so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineLimits {
    /// Days examined one by one for moon and range events.
    #[serde(default = "default_scan_ceiling")]
    pub scan_ceiling: usize,
    /// Days examined one by one for random events without a cache.
    #[serde(default = "default_random_scan_ceiling")]
    pub random_scan_ceiling: usize,
    /// Strides taken for daily, weekly, monthly and yearly events.
    #[serde(default = "default_stride_ceiling")]
    pub stride_ceiling: usize,
    /// Linked-event hops followed before giving up.
    #[serde(default = "default_max_link_depth")]
    pub max_link_depth: usize,
    /// Search horizon for the next occurrence, in days.
    #[serde(default = "default_lookahead_days")]
    pub lookahead_days: i64,
}

impl Default for EngineLimits {
    fn default() -> Self {
        EngineLimits {
            scan_ceiling: DEFAULT_SCAN_CEILING,
            random_scan_ceiling: DEFAULT_RANDOM_SCAN_CEILING,
            stride_ceiling: DEFAULT_STRIDE_CEILING,
            max_link_depth: DEFAULT_MAX_LINK_DEPTH,
            lookahead_days: DEFAULT_LOOKAHEAD_DAYS,
        }
    }
}
