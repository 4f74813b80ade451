//! Validated generation requests.

use crate::config::GeneratorLimits;
use crate::error::{CoreError, CoreResult};

use super::charset::{CharClass, ClassSet};

/// A generation request that passed validation against [`GeneratorLimits`].
///
/// Length outside the configured bounds is rejected. Count is clamped to
/// `[1, max_count]` instead. Limits that fail [`GeneratorLimits::validate`]
/// are reported as [`CoreError::InvalidConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationRequest {
    length: usize,
    classes: ClassSet,
    count: usize,
}

impl GenerationRequest {
    pub fn new(
        length: i64,
        classes: ClassSet,
        count: i64,
        limits: &GeneratorLimits,
    ) -> CoreResult<Self> {
        limits.validate()?;

        let in_range = usize::try_from(length)
            .ok()
            .filter(|l| (limits.min_length..=limits.max_length).contains(l));
        let Some(length) = in_range else {
            return Err(CoreError::InvalidLength(format!(
                "length must be between {} and {}",
                limits.min_length, limits.max_length
            )));
        };

        let max_count = i64::try_from(limits.max_count).unwrap_or(i64::MAX);
        let count = count.clamp(1, max_count) as usize;

        Ok(Self {
            length,
            classes,
            count,
        })
    }

    /// Same as [`new`](Self::new), with lowercase plus the flagged classes.
    pub fn from_flags(
        length: i64,
        include_upper: bool,
        include_digits: bool,
        include_special: bool,
        count: i64,
        limits: &GeneratorLimits,
    ) -> CoreResult<Self> {
        let classes = ClassSet::from_flags(include_upper, include_digits, include_special);
        Self::new(length, classes, count, limits)
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn classes(&self) -> &ClassSet {
        &self.classes
    }

    pub fn include_upper(&self) -> bool {
        self.classes.contains(CharClass::Uppercase)
    }

    pub fn include_digits(&self) -> bool {
        self.classes.contains(CharClass::Digits)
    }

    pub fn include_special(&self) -> bool {
        self.classes.contains(CharClass::Special)
    }
}
