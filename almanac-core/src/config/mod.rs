//! Configuration types for almanac.

mod almanac_config;
mod engine_limits;

pub use almanac_config::AlmanacConfig;
pub use engine_limits::EngineLimits;
