//! Sample-size solver settings

use serde::{Deserialize, Serialize};

use crate::error::{PowerError, Result};

/// How the converged (fractional) sample size becomes a whole number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Rounding {
    /// Next integer up, so power is never overstated
    #[default]
    Up,
    /// Nearest integer, as the reference workbook reports
    Nearest,
}

impl Rounding {
    pub fn apply(self, size: f64) -> f64 {
        match self {
            Rounding::Up => size.ceil(),
            Rounding::Nearest => size.round(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Stop once successive sample-size estimates differ by less than this
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,

    /// Hard cap on fixed-point iterations
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,

    #[serde(default)]
    pub rounding: Rounding,
}

fn default_tolerance() -> f64 {
    0.005
}

fn default_max_iterations() -> usize {
    100
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: default_tolerance(),
            max_iterations: default_max_iterations(),
            rounding: Rounding::default(),
        }
    }
}

impl SolverConfig {
    /// Settings that reproduce the reference workbook's published sample sizes
    #[must_use]
    pub fn workbook() -> Self {
        Self {
            rounding: Rounding::Nearest,
            ..Self::default()
        }
    }

    pub(crate) fn check(&self) -> Result<()> {
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(PowerError::InvalidParameter {
                name: "tolerance",
                value: self.tolerance,
                reason: "must be finite and positive",
            });
        }
        if self.max_iterations == 0 {
            return Err(PowerError::InvalidParameter {
                name: "max_iterations",
                value: 0.0,
                reason: "must be at least 1",
            });
        }
        Ok(())
    }
}
