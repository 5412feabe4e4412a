//! Interrupted time series with cohort (school-level) panels
//!
//! Baseline years are `t = 1..=T`; the follow-up year of interest sits
//! `tf` years after the first treatment year `T + 1`. The timing factor is
//! the prediction variance of a linear baseline trend projected to that
//! year.

use crate::model::{DesignInputs, Param};

use super::{Category, DesignVariant, EffectType, Formula};

pub(super) const ITS_NOCOMPARE: DesignVariant = DesignVariant {
    id: "ITS_nocompare",
    number: "6.0",
    title: "Interrupted time series, no comparison group",
    category: Category::Its,
    levels: 3,
    treatment_level: 3,
    effect: EffectType::Constant,
    parameters: &[
        Param::Rho2,
        Param::R22,
        Param::G,
        Param::N,
        Param::K,
        Param::T,
        Param::Tf,
    ],
    target: Param::K,
    defaults: &[],
    formula: Formula {
        df: its_df,
        variance: its_variance,
    },
};

pub(super) const ITS_WCOMPARE: DesignVariant = DesignVariant {
    id: "ITS_wcompare",
    number: "6.1",
    title: "Interrupted time series with a comparison group",
    category: Category::Its,
    levels: 3,
    treatment_level: 3,
    effect: EffectType::Constant,
    parameters: &[
        Param::Rho2,
        Param::R22,
        Param::G,
        Param::N,
        Param::K,
        Param::T,
        Param::Tf,
        Param::Q,
    ],
    target: Param::K,
    defaults: &[],
    formula: Formula {
        df: its_df,
        variance: |x| its_variance(x) * (1.0 + 1.0 / x.q),
    },
};

fn its_df(x: &DesignInputs) -> f64 {
    x.k * (x.t - 2.0) - x.g
}

fn its_variance(x: &DesignInputs) -> f64 {
    let cohort = (x.rho2 * (1.0 - x.r22) + (1.0 - x.rho2) / x.n) / x.k;
    cohort * timing_factor(x.t, x.tf)
}

/// `1 + 1/T + (t* - mean)^2 / sum((t - mean)^2)` with `t* = T + 1 + tf`
fn timing_factor(t: f64, tf: f64) -> f64 {
    let mean = (t + 1.0) / 2.0;
    let spread = t * (t * t - 1.0) / 12.0;
    let offset = t + 1.0 + tf - mean;
    1.0 + 1.0 / t + offset * offset / spread
}
