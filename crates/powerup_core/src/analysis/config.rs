//! Sweep specification and result types

use serde::{Deserialize, Serialize};

use crate::error::{PowerError, Result};
use crate::model::{Mode, Param};

/// One swept parameter over a closed range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepSpec {
    pub parameter: Param,
    pub min_value: f64,
    pub max_value: f64,
    /// Number of points, both ends included
    pub step_count: usize,
}

impl SweepSpec {
    #[must_use]
    pub fn new(parameter: Param, min_value: f64, max_value: f64, step_count: usize) -> Self {
        Self {
            parameter,
            min_value,
            max_value,
            step_count,
        }
    }

    /// Generate the sweep values
    ///
    /// Whole-number parameters are snapped to the nearest integer.
    pub fn sweep_values(&self) -> Vec<f64> {
        let snap = |v: f64| {
            if self.parameter.is_count() {
                v.round()
            } else {
                v
            }
        };
        if self.step_count <= 1 {
            return vec![snap(self.min_value)];
        }
        let step_size = (self.max_value - self.min_value) / (self.step_count - 1) as f64;
        (0..self.step_count)
            .map(|i| {
                // Land exactly on the upper end
                if i == self.step_count - 1 {
                    snap(self.max_value)
                } else {
                    snap(self.min_value + step_size * i as f64)
                }
            })
            .collect()
    }

    /// Get a descriptive label for display
    pub fn label(&self) -> String {
        format!("{} ({})", self.parameter.key(), self.parameter.label())
    }

    pub(crate) fn check(&self) -> Result<()> {
        if self.step_count == 0 {
            return Err(PowerError::InvalidParameter {
                name: "steps",
                value: 0.0,
                reason: "a sweep needs at least one point",
            });
        }
        for value in [self.min_value, self.max_value] {
            if !value.is_finite() {
                return Err(PowerError::invalid(
                    self.parameter,
                    value,
                    "sweep range must be finite",
                ));
            }
        }
        Ok(())
    }
}

/// One evaluated point
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SweepPoint {
    /// Swept parameter value
    pub value: f64,
    /// Calculated outcome at that value
    pub outcome: f64,
}

/// Ordered outcome curve
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SweepResult {
    pub design: &'static str,
    pub mode: Mode,
    pub parameter: Param,
    pub points: Vec<SweepPoint>,
}

impl SweepResult {
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.value)
    }

    pub fn outcomes(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.outcome)
    }
}
