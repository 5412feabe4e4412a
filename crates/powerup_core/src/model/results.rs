//! Calculation modes and result records

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::params::Param;

/// Which quantity a calculation solves for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Minimum detectable effect size
    Mdes,
    /// Minimum required sample size at the design's target level
    Mrss,
    /// Statistical power for a given effect size
    Power,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::Mdes, Mode::Mrss, Mode::Power];

    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Mdes => "mdes",
            Mode::Mrss => "mrss",
            Mode::Power => "power",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mode::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown mode '{s}' (expected mdes, mrss or power)"))
    }
}

/// Outcome of a single calculation plus its diagnostic intermediates
///
/// `multiplier = t1 + t2` in every mode. In power mode `t2` is solved from the
/// effect size and `noncentrality` carries `λ = es / SE`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CalculationResult {
    pub design: &'static str,
    pub mode: Mode,
    /// Effect size, sample size, or power depending on `mode`
    pub value: f64,
    /// Parameter solved for in MRSS mode
    pub solved_for: Option<Param>,
    pub multiplier: f64,
    pub t1: f64,
    pub t2: f64,
    /// `es / SE`, present in power mode only
    pub noncentrality: Option<f64>,
    pub df: f64,
    /// Standard error of the standardized impact estimate
    pub standard_error: f64,
}
