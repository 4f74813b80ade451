//! Error types for `passgen-core`.
//!
//! All fallible operations in the core library return [`CoreResult<T>`],
//! which is an alias for `Result<T, CoreError>`.

/// Unified error type for all core operations.
///
/// Every variant is recoverable: it describes why a single call could not be
/// served and never affects other callers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    /// Requested length is outside the configured bounds, or too short to
    /// hold one representative of every active character class.
    #[error("invalid length: {0}")]
    InvalidLength(String),

    /// Requested count could not be interpreted as a number.
    #[error("invalid count: {0}")]
    InvalidCount(String),

    /// No character class is active, so the alphabet would be empty.
    #[error("invalid composition: no character class is active")]
    InvalidComposition,

    /// The caller exhausted its sliding-window budget.
    #[error("rate limit exceeded, retry after {retry_after_seconds}s")]
    RateLimitExceeded { retry_after_seconds: u64 },

    /// Configuration values are inconsistent (zero window, inverted bounds, ...).
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

impl CoreError {
    /// Stable, machine-readable identifier for the error kind.
    pub fn reason(&self) -> &'static str {
        match self {
            CoreError::InvalidLength(_) => "invalid_length",
            CoreError::InvalidCount(_) => "invalid_count",
            CoreError::InvalidComposition => "invalid_composition",
            CoreError::RateLimitExceeded { .. } => "rate_limit_exceeded",
            CoreError::InvalidConfig(_) => "invalid_config",
        }
    }
}

/// Convenience alias used throughout `passgen-core`.
pub type CoreResult<T> = Result<T, CoreError>;
