//! Rate limit and generator settings.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Sliding-window rate limit settings.
///
/// Defaults: 60 requests per 60 seconds for standard callers, 300 for
/// trusted ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LimiterConfig {
    #[serde(default = "default_window_seconds")]
    pub window_seconds: u64,
    #[serde(default = "default_standard_limit")]
    pub standard_limit: usize,
    #[serde(default = "default_trusted_limit")]
    pub trusted_limit: usize,
    /// How often idle client buckets are swept out of memory.
    #[serde(default = "default_sweep_interval_seconds")]
    pub sweep_interval_seconds: u64,
}

impl Default for LimiterConfig {
    fn default() -> Self {
        Self {
            window_seconds: default_window_seconds(),
            standard_limit: default_standard_limit(),
            trusted_limit: default_trusted_limit(),
            sweep_interval_seconds: default_sweep_interval_seconds(),
        }
    }
}

impl LimiterConfig {
    /// Rejects settings under which the limiter would admit nothing or
    /// never expire anything.
    pub fn validate(&self) -> CoreResult<()> {
        if self.window_seconds == 0 {
            return Err(CoreError::InvalidConfig(
                "rate_limit.window_seconds must be positive".to_string(),
            ));
        }
        if self.standard_limit == 0 || self.trusted_limit == 0 {
            return Err(CoreError::InvalidConfig(
                "rate_limit limits must be positive".to_string(),
            ));
        }
        if self.sweep_interval_seconds == 0 {
            return Err(CoreError::InvalidConfig(
                "rate_limit.sweep_interval_seconds must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Bounds applied to incoming generation requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorLimits {
    #[serde(default = "default_min_length")]
    pub min_length: usize,
    #[serde(default = "default_max_length")]
    pub max_length: usize,
    #[serde(default = "default_max_count")]
    pub max_count: usize,
    /// Length used when a request does not specify one.
    #[serde(default = "default_length")]
    pub default_length: usize,
}

impl Default for GeneratorLimits {
    fn default() -> Self {
        Self {
            min_length: default_min_length(),
            max_length: default_max_length(),
            max_count: default_max_count(),
            default_length: default_length(),
        }
    }
}

impl GeneratorLimits {
    pub fn validate(&self) -> CoreResult<()> {
        if self.min_length == 0 || self.min_length > self.max_length {
            return Err(CoreError::InvalidConfig(format!(
                "generator length bounds are inconsistent: min={} max={}",
                self.min_length, self.max_length
            )));
        }
        if self.max_count == 0 {
            return Err(CoreError::InvalidConfig(
                "generator.max_count must be positive".to_string(),
            ));
        }
        if !(self.min_length..=self.max_length).contains(&self.default_length) {
            return Err(CoreError::InvalidConfig(format!(
                "generator.default_length {} is outside [{}, {}]",
                self.default_length, self.min_length, self.max_length
            )));
        }
        Ok(())
    }
}

fn default_window_seconds() -> u64 {
    60
}

fn default_standard_limit() -> usize {
    60
}

fn default_trusted_limit() -> usize {
    300
}

fn default_sweep_interval_seconds() -> u64 {
    60
}

fn default_min_length() -> usize {
    8
}

fn default_max_length() -> usize {
    128
}

fn default_max_count() -> usize {
    100
}

fn default_length() -> usize {
    16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_limiter_config() {
        let config = LimiterConfig::default();

        assert_eq!(config.window_seconds, 60);
        assert_eq!(config.standard_limit, 60);
        assert_eq!(config.trusted_limit, 300);
        assert_eq!(config.sweep_interval_seconds, 60);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn default_generator_limits() {
        let limits = GeneratorLimits::default();

        assert_eq!(limits.min_length, 8);
        assert_eq!(limits.max_length, 128);
        assert_eq!(limits.max_count, 100);
        assert_eq!(limits.default_length, 16);
        assert!(limits.validate().is_ok());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config: LimiterConfig = toml::from_str("trusted_limit = 1000").unwrap();

        assert_eq!(config.trusted_limit, 1000);
        assert_eq!(config.window_seconds, 60);
        assert_eq!(config.standard_limit, 60);
    }

    #[test]
    fn empty_toml_is_default() {
        let limits: GeneratorLimits = toml::from_str("").unwrap();
        assert_eq!(limits, GeneratorLimits::default());
    }

    #[test]
    fn zero_window_is_rejected() {
        let config = LimiterConfig {
            window_seconds: 0,
            ..LimiterConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(CoreError::InvalidConfig(_))
        ));
    }

    #[test]
    fn zero_limit_is_rejected() {
        let config = LimiterConfig {
            standard_limit: 0,
            ..LimiterConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn inverted_length_bounds_are_rejected() {
        let limits = GeneratorLimits {
            min_length: 64,
            max_length: 32,
            ..GeneratorLimits::default()
        };
        assert!(matches!(
            limits.validate(),
            Err(CoreError::InvalidConfig(_))
        ));
    }

    #[test]
    fn default_length_outside_bounds_is_rejected() {
        let limits = GeneratorLimits {
            default_length: 4,
            ..GeneratorLimits::default()
        };
        assert!(limits.validate().is_err());
    }
}
