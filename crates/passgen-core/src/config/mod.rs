//! Tunable limits for the rate limiter and the password generator.
//!
//! Both structs deserialize from TOML tables with per-field defaults, so an
//! embedding service can override any subset of them.

pub mod settings;

pub use settings::{GeneratorLimits, LimiterConfig};
