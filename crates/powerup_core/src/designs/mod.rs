//! Design variant descriptors and their formula tables
//!
//! Each variant is a static descriptor carrying plain function pointers for
//! its degrees-of-freedom and variance formulas. Callers never branch on the
//! design category; they go through the descriptor.
//!
//! Every variance is the sampling variance of the standardized impact
//! estimate, so `MDES = M * sqrt(variance)`.

mod bcra;
mod bira;
mod catalog;
mod cra;
mod ira;
mod its;
mod rd;

use std::fmt;

use serde::Serialize;

use crate::model::{DesignInputs, Mode, Param};

pub use catalog::CATALOG;
pub use rd::{DEFAULT_DESIGN_EFFECT, design_effect_from_rho_ts};

/// Design family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Category {
    /// Individual random assignment
    Ira,
    /// Blocked individual random assignment
    Bira,
    /// Cluster random assignment
    Cra,
    /// Blocked cluster random assignment
    Bcra,
    /// Regression discontinuity
    Rd,
    /// Interrupted time series
    Its,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Ira => "IRA",
            Category::Bira => "BIRA",
            Category::Cra => "CRA",
            Category::Bcra => "BCRA",
            Category::Rd => "RD",
            Category::Its => "ITS",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the treatment effect is modelled across blocks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EffectType {
    Constant,
    Fixed,
    Random,
}

/// Formula references for one variant
#[derive(Debug, Clone, Copy)]
pub struct Formula {
    pub df: fn(&DesignInputs) -> f64,
    pub variance: fn(&DesignInputs) -> f64,
}

/// Immutable description of one design variant
#[derive(Debug, Clone, Copy)]
pub struct DesignVariant {
    pub id: &'static str,
    /// Section number in the reference workbook, e.g. "3.1"
    pub number: &'static str,
    pub title: &'static str,
    pub category: Category,
    pub levels: u8,
    pub treatment_level: u8,
    pub effect: EffectType,
    /// Design parameters, excluding alpha, tails, power and effect size
    pub parameters: &'static [Param],
    /// Sample size solved for in MRSS mode
    pub target: Param,
    /// Parameters that may be omitted, with the value substituted
    pub defaults: &'static [(Param, f64)],
    pub formula: Formula,
}

impl DesignVariant {
    pub fn df(&self, inputs: &DesignInputs) -> f64 {
        (self.formula.df)(inputs)
    }

    pub fn variance(&self, inputs: &DesignInputs) -> f64 {
        (self.formula.variance)(inputs)
    }

    /// Full parameter list for a calculation in `mode`
    pub fn required_parameters(&self, mode: Mode) -> Vec<Param> {
        let leading: &[Param] = match mode {
            Mode::Mdes => &[Param::Alpha, Param::Tails, Param::Power],
            Mode::Power => &[Param::Alpha, Param::Tails, Param::EffectSize],
            Mode::Mrss => &[Param::Alpha, Param::Tails, Param::Power, Param::EffectSize],
        };
        leading
            .iter()
            .chain(self.parameters)
            .copied()
            .filter(|p| mode != Mode::Mrss || *p != self.target)
            .collect()
    }

    pub fn default_for(&self, param: Param) -> Option<f64> {
        self.defaults
            .iter()
            .find(|(p, _)| *p == param)
            .map(|(_, v)| *v)
    }

    pub fn uses(&self, param: Param) -> bool {
        self.parameters.contains(&param)
    }
}

impl fmt::Display for DesignVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ({})", self.number, self.id, self.title)
    }
}

/// Level-1 share of variance left after the higher-level ICCs
fn residual_share(x: &DesignInputs) -> f64 {
    1.0 - x.rho2 - x.rho3 - x.rho4
}
