/// Day-by-day scan limit for kinds with no closed-form stride (moon, range).
pub const DEFAULT_SCAN_CEILING: usize = 10_000;

/// Day-by-day scan limit for random events evaluated without a cache.
pub const DEFAULT_RANDOM_SCAN_CEILING: usize = 50_000;

/// Step limit for daily/weekly/monthly/yearly striding.
pub const DEFAULT_STRIDE_CEILING: usize = 100_000;

/// How many linked-event hops a query may follow before failing closed.
pub const DEFAULT_MAX_LINK_DEPTH: usize = 8;

/// How far ahead `next_occurrence` searches, in days.
pub const DEFAULT_LOOKAHEAD_DAYS: i64 = 3_650;

/// Default result cap used by the CLI when none is given.
pub const DEFAULT_RESULT_CAP: usize = 500;
