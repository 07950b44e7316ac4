//! Sweep grids
//!
//! A grid is the Cartesian product of the configured axes. Points are visited
//! with alpha outermost, then mach, then xcg, then delta innermost.

mod axis;
mod point;

pub use axis::{Axis, MAX_AXIS_VALUES};
pub use point::GridPoint;

use crate::config::{SweepConfig, Variant};
use crate::error::ConfigError;

/// Upper bound on the points of one sweep; each point is one solver run
pub const MAX_GRID_POINTS: usize = 1_000_000;

/// Materialised axis values for one sweep
#[derive(Debug, Clone, PartialEq)]
pub struct SweepGrid {
    variant: Variant,
    axes: Vec<Vec<f64>>,
}

impl SweepGrid {
    pub fn from_config(config: &SweepConfig) -> Result<Self, ConfigError> {
        let axes = &config.axes;
        axes.alpha.validate("alpha")?;
        axes.mach.validate("mach")?;

        let mut values = vec![axes.alpha.values(), axes.mach.values()];
        if config.variant == Variant::FourAxis {
            axes.xcg.validate("xcg")?;
            axes.delta.validate("delta")?;
            values.push(axes.xcg.values());
            values.push(axes.delta.values());
        }

        match point_count(&values) {
            Some(points) if points <= MAX_GRID_POINTS => {}
            _ => {
                return Err(ConfigError::TooManyPoints {
                    limit: MAX_GRID_POINTS,
                });
            }
        }

        Ok(Self {
            variant: config.variant,
            axes: values,
        })
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn alpha_values(&self) -> &[f64] {
        &self.axes[0]
    }

    pub fn mach_values(&self) -> &[f64] {
        &self.axes[1]
    }

    pub fn xcg_values(&self) -> &[f64] {
        self.axes.get(2).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn delta_values(&self) -> &[f64] {
        self.axes.get(3).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        point_count(&self.axes).unwrap_or(usize::MAX)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All points in visitation order
    pub fn points(&self) -> Vec<GridPoint> {
        cartesian_product(&self.axes)
            .into_iter()
            .map(|values| {
                let point = GridPoint::new(values[0], values[1]);
                match self.variant {
                    Variant::TwoAxis => point,
                    Variant::FourAxis => point.with_xcg(values[2]).with_delta(values[3]),
                }
            })
            .collect()
    }
}

fn point_count(axes: &[Vec<f64>]) -> Option<usize> {
    axes.iter()
        .try_fold(1usize, |total, values| total.checked_mul(values.len()))
}

/// Every combination of axis values, last axis varying fastest
fn cartesian_product(axes: &[Vec<f64>]) -> Vec<Vec<f64>> {
    if axes.is_empty() {
        return vec![vec![]];
    }
    if axes.iter().any(Vec::is_empty) {
        return vec![];
    }

    let mut points = Vec::new();
    let mut indices = vec![0usize; axes.len()];

    loop {
        let point: Vec<f64> = indices
            .iter()
            .zip(axes)
            .map(|(&idx, values)| values[idx])
            .collect();
        points.push(point);

        // Odometer increment from the innermost axis
        let mut carry = true;
        for (index, values) in indices.iter_mut().zip(axes).rev() {
            if !carry {
                break;
            }
            *index += 1;
            if *index >= values.len() {
                *index = 0;
            } else {
                carry = false;
            }
        }

        // Wrapped all the way around
        if carry {
            break;
        }
    }

    points
}
