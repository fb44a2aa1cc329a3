pub mod agenda;
pub mod cache_random;
pub mod check;
pub mod config;
pub mod next;
pub mod occurs;
pub mod ordinal;
pub mod range;
