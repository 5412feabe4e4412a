//! Parameter names and the per-call parameter set
//!
//! `Param` is the closed vocabulary every design variant draws its inputs
//! from. `ParameterSet` is the sparse name→value map a caller supplies for a
//! single calculation; it is validated against a variant before any formula
//! runs.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ParseParamError, PowerError};

/// A named calculation input
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Param {
    #[serde(rename = "alpha")]
    Alpha,
    #[serde(rename = "tails")]
    Tails,
    #[serde(rename = "power")]
    Power,
    /// Target (minimum relevant) effect size
    #[serde(rename = "es")]
    EffectSize,
    #[serde(rename = "rho2")]
    Rho2,
    #[serde(rename = "rho3")]
    Rho3,
    #[serde(rename = "rho4")]
    Rho4,
    #[serde(rename = "omega2")]
    Omega2,
    #[serde(rename = "omega3")]
    Omega3,
    #[serde(rename = "omega4")]
    Omega4,
    /// Proportion of the sample assigned to treatment
    #[serde(rename = "p")]
    P,
    #[serde(rename = "r21")]
    R21,
    #[serde(rename = "r22")]
    R22,
    #[serde(rename = "r23")]
    R23,
    #[serde(rename = "r24")]
    R24,
    #[serde(rename = "r2t2")]
    R2T2,
    #[serde(rename = "r2t3")]
    R2T3,
    #[serde(rename = "r2t4")]
    R2T4,
    /// Covariate count at the level that governs degrees of freedom
    #[serde(rename = "g")]
    G,
    #[serde(rename = "n")]
    N,
    #[serde(rename = "J")]
    J,
    #[serde(rename = "K")]
    K,
    #[serde(rename = "L")]
    L,
    /// Regression-discontinuity design effect
    #[serde(rename = "design_effect")]
    DesignEffect,
    /// Interrupted time-series baseline years
    #[serde(rename = "T")]
    T,
    /// Interrupted time-series follow-up year of interest
    #[serde(rename = "tf")]
    Tf,
    /// Ratio of comparison units to program units
    #[serde(rename = "q")]
    Q,
}

impl Param {
    pub const ALL: [Param; 27] = [
        Param::Alpha,
        Param::Tails,
        Param::Power,
        Param::EffectSize,
        Param::Rho2,
        Param::Rho3,
        Param::Rho4,
        Param::Omega2,
        Param::Omega3,
        Param::Omega4,
        Param::P,
        Param::R21,
        Param::R22,
        Param::R23,
        Param::R24,
        Param::R2T2,
        Param::R2T3,
        Param::R2T4,
        Param::G,
        Param::N,
        Param::J,
        Param::K,
        Param::L,
        Param::DesignEffect,
        Param::T,
        Param::Tf,
        Param::Q,
    ];

    /// Stable key used for parsing and display
    pub fn key(self) -> &'static str {
        match self {
            Param::Alpha => "alpha",
            Param::Tails => "tails",
            Param::Power => "power",
            Param::EffectSize => "es",
            Param::Rho2 => "rho2",
            Param::Rho3 => "rho3",
            Param::Rho4 => "rho4",
            Param::Omega2 => "omega2",
            Param::Omega3 => "omega3",
            Param::Omega4 => "omega4",
            Param::P => "p",
            Param::R21 => "r21",
            Param::R22 => "r22",
            Param::R23 => "r23",
            Param::R24 => "r24",
            Param::R2T2 => "r2t2",
            Param::R2T3 => "r2t3",
            Param::R2T4 => "r2t4",
            Param::G => "g",
            Param::N => "n",
            Param::J => "J",
            Param::K => "K",
            Param::L => "L",
            Param::DesignEffect => "design_effect",
            Param::T => "T",
            Param::Tf => "tf",
            Param::Q => "q",
        }
    }

    /// Human-readable description
    pub fn label(self) -> &'static str {
        match self {
            Param::Alpha => "Type-I error (alpha)",
            Param::Tails => "Number of tails",
            Param::Power => "Statistical power (1 - beta)",
            Param::EffectSize => "Minimum relevant effect size",
            Param::Rho2 => "Intraclass correlation, level 2",
            Param::Rho3 => "Intraclass correlation, level 3",
            Param::Rho4 => "Intraclass correlation, level 4",
            Param::Omega2 => "Treatment effect heterogeneity, level 2",
            Param::Omega3 => "Treatment effect heterogeneity, level 3",
            Param::Omega4 => "Treatment effect heterogeneity, level 4",
            Param::P => "Proportion of units treated",
            Param::R21 => "Variance explained by covariates, level 1",
            Param::R22 => "Variance explained by covariates, level 2",
            Param::R23 => "Variance explained by covariates, level 3",
            Param::R24 => "Variance explained by covariates, level 4",
            Param::R2T2 => "Treatment effect variance explained, level 2",
            Param::R2T3 => "Treatment effect variance explained, level 3",
            Param::R2T4 => "Treatment effect variance explained, level 4",
            Param::G => "Number of covariates",
            Param::N => "Level-1 units per level-2 unit",
            Param::J => "Level-2 units per level-3 unit",
            Param::K => "Level-3 units per level-4 unit",
            Param::L => "Level-4 units",
            Param::DesignEffect => "Design effect",
            Param::T => "Baseline years",
            Param::Tf => "Follow-up year of interest",
            Param::Q => "Comparison to program unit ratio",
        }
    }

    /// Parameters that only take whole-number values
    pub fn is_count(self) -> bool {
        matches!(self, Param::G | Param::T | Param::Tf)
    }

    /// Sample-size parameters at each nesting level
    pub fn is_sample_size(self) -> bool {
        matches!(self, Param::N | Param::J | Param::K | Param::L)
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Param {
    type Err = ParseParamError;

    /// Keys are matched case-insensitively; a few long-form aliases are
    /// accepted as well.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        let alias = match lowered.as_str() {
            "effect_size" | "mres" => Some(Param::EffectSize),
            "delta" => Some(Param::DesignEffect),
            _ => None,
        };
        alias
            .or_else(|| {
                Param::ALL
                    .into_iter()
                    .find(|p| p.key().eq_ignore_ascii_case(&lowered))
            })
            .ok_or_else(|| ParseParamError(s.to_string()))
    }
}

/// One- or two-tailed hypothesis test
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Tails {
    One,
    #[default]
    Two,
}

impl Tails {
    /// Number of tails the rejection region is split across
    pub fn count(self) -> f64 {
        match self {
            Tails::One => 1.0,
            Tails::Two => 2.0,
        }
    }
}

impl TryFrom<f64> for Tails {
    type Error = PowerError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if value == 1.0 {
            Ok(Tails::One)
        } else if value == 2.0 {
            Ok(Tails::Two)
        } else {
            Err(PowerError::InvalidParameter {
                name: Param::Tails.key(),
                value,
                reason: "must be 1 or 2",
            })
        }
    }
}

/// Parameter values supplied for one calculation
///
/// Serializes as a plain `key: value` map so it can be read from parameter
/// files.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<String, f64>", into = "BTreeMap<String, f64>")]
pub struct ParameterSet {
    values: BTreeMap<Param, f64>,
}

impl ParameterSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    #[must_use]
    pub fn with(mut self, param: Param, value: f64) -> Self {
        self.values.insert(param, value);
        self
    }

    pub fn insert(&mut self, param: Param, value: f64) -> Option<f64> {
        self.values.insert(param, value)
    }

    pub fn remove(&mut self, param: Param) -> Option<f64> {
        self.values.remove(&param)
    }

    #[must_use]
    pub fn get(&self, param: Param) -> Option<f64> {
        self.values.get(&param).copied()
    }

    #[must_use]
    pub fn contains(&self, param: Param) -> bool {
        self.values.contains_key(&param)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate in `Param` order
    pub fn iter(&self) -> impl Iterator<Item = (Param, f64)> + '_ {
        self.values.iter().map(|(p, v)| (*p, *v))
    }

    /// Overlay `other` on top of this set; values in `other` win.
    pub fn merge(&mut self, other: &ParameterSet) {
        for (param, value) in other.iter() {
            self.values.insert(param, value);
        }
    }
}

impl FromIterator<(Param, f64)> for ParameterSet {
    fn from_iter<I: IntoIterator<Item = (Param, f64)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl TryFrom<BTreeMap<String, f64>> for ParameterSet {
    type Error = ParseParamError;

    fn try_from(raw: BTreeMap<String, f64>) -> Result<Self, Self::Error> {
        raw.into_iter()
            .map(|(key, value)| key.parse::<Param>().map(|p| (p, value)))
            .collect()
    }
}

impl From<ParameterSet> for BTreeMap<String, f64> {
    fn from(set: ParameterSet) -> Self {
        set.values
            .into_iter()
            .map(|(p, v)| (p.key().to_string(), v))
            .collect()
    }
}
