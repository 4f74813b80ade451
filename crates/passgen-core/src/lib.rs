//! passgen core library: admission control and password generation.
//!
//! `passgen-core` holds the two pieces of the passgen service that carry real
//! invariants. It knows nothing about HTTP; the `passgen-web` crate wires it
//! into an axum router.
//!
//! # Modules
//!
//! - [`limiter`]: per-client sliding-window [`RateLimiter`] with standard and trusted [`Tier`]s.
//! - [`generator`]: [`generate`] and [`generate_many`] over a closed [`ClassSet`].
//! - [`config`]: [`LimiterConfig`] and [`GeneratorLimits`], deserializable from TOML.
//! - [`error`]: unified error type ([`CoreError`]) and result alias ([`CoreResult`]).

pub mod config;
pub mod error;
pub mod generator;
pub mod limiter;

pub use config::{GeneratorLimits, LimiterConfig};
pub use error::{CoreError, CoreResult};
pub use generator::{generate, generate_many, CharClass, ClassSet, GenerationRequest};
pub use limiter::{unix_now, RateLimitDecision, RateLimiter, Tier};
