use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Upper bound on the values of a single axis
pub const MAX_AXIS_VALUES: usize = 100_000;

/// One independent variable of the sweep, stepped from `min` by `step`.
///
/// The number of values is `ceil((max - min) / step) + 1`. When the span is
/// not a whole multiple of `step` the last value overshoots `max`
/// (mach 0.01..5 by 0.5 ends at 5.01); that matches the grids the legacy
/// tables were produced on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Axis {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl Axis {
    pub const fn new(min: f64, max: f64, step: f64) -> Self {
        Self { min, max, step }
    }

    /// A single fixed value
    pub const fn fixed(value: f64) -> Self {
        Self {
            min: value,
            max: value,
            step: 1.0,
        }
    }

    pub fn validate(&self, axis: &'static str) -> Result<(), ConfigError> {
        if !self.step.is_finite() || self.step <= 0.0 {
            return Err(ConfigError::InvalidStep {
                axis,
                step: self.step,
            });
        }
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(ConfigError::NonFiniteBounds {
                axis,
                min: self.min,
                max: self.max,
            });
        }
        if self.max < self.min {
            return Err(ConfigError::InvertedBounds {
                axis,
                min: self.min,
                max: self.max,
            });
        }
        if self.count().is_none() {
            return Err(ConfigError::TooManyValues {
                axis,
                min: self.min,
                max: self.max,
                step: self.step,
                limit: MAX_AXIS_VALUES,
            });
        }
        Ok(())
    }

    /// Number of values, or None when it is not finite, negative or above
    /// [`MAX_AXIS_VALUES`]
    pub fn count(&self) -> Option<usize> {
        let steps = ((self.max - self.min) / self.step).ceil();
        if !steps.is_finite() || steps < 0.0 || steps >= MAX_AXIS_VALUES as f64 {
            return None;
        }
        (steps as usize).checked_add(1)
    }

    /// Axis values; empty for an axis that fails [`Axis::validate`]
    pub fn values(&self) -> Vec<f64> {
        let count = self.count().unwrap_or(0);
        (0..count)
            .map(|i| self.step * i as f64 + self.min)
            .collect()
    }
}
