//! Regression discontinuity
//!
//! Each RD variant reuses the variance of its randomized counterpart with
//! the design effect `δ` multiplying the assignment-driven component, so the
//! MDES grows by `sqrt(δ)`. Treatment heterogeneity is not inflated.

use crate::error::{PowerError, Result};
use crate::model::{DesignInputs, Param};

use super::bcra::bcra3_2f_variance;
use super::bira::{bira2_fixed_df, bira2_nonrandom_variance, bira2_random_heterogeneity};
use super::cra::{cra2_df, cra2_variance, cra3_df, cra3_variance};
use super::{Category, DesignVariant, EffectType, Formula, residual_share};

pub const DEFAULT_DESIGN_EFFECT: f64 = 2.75;

const RD_DEFAULTS: &[(Param, f64)] = &[(Param::DesignEffect, DEFAULT_DESIGN_EFFECT)];

pub(super) const RD2_1F: DesignVariant = DesignVariant {
    id: "RD2_1f",
    number: "5.1",
    title: "2-level blocked regression discontinuity, fixed effects, treatment at level 1",
    category: Category::Rd,
    levels: 2,
    treatment_level: 1,
    effect: EffectType::Fixed,
    parameters: &[
        Param::P,
        Param::R21,
        Param::G,
        Param::N,
        Param::J,
        Param::DesignEffect,
    ],
    target: Param::J,
    defaults: RD_DEFAULTS,
    formula: Formula {
        df: bira2_fixed_df,
        variance: |x| x.design_effect * bira2_nonrandom_variance(x),
    },
};

pub(super) const RD2_1R: DesignVariant = DesignVariant {
    id: "RD2_1r",
    number: "5.2",
    title: "2-level blocked regression discontinuity, random effects, treatment at level 1",
    category: Category::Rd,
    levels: 2,
    treatment_level: 1,
    effect: EffectType::Random,
    parameters: &[
        Param::Rho2,
        Param::Omega2,
        Param::P,
        Param::R21,
        Param::R2T2,
        Param::G,
        Param::N,
        Param::J,
        Param::DesignEffect,
    ],
    target: Param::J,
    defaults: RD_DEFAULTS,
    formula: Formula {
        df: |x| x.j - x.g - 1.0,
        variance: rd2_1r_variance,
    },
};

pub(super) const RDC_2R: DesignVariant = DesignVariant {
    id: "RDC_2r",
    number: "5.3",
    title: "2-level cluster regression discontinuity, treatment at level 2",
    category: Category::Rd,
    levels: 2,
    treatment_level: 2,
    effect: EffectType::Random,
    parameters: &[
        Param::Rho2,
        Param::P,
        Param::R21,
        Param::R22,
        Param::G,
        Param::N,
        Param::J,
        Param::DesignEffect,
    ],
    target: Param::J,
    defaults: RD_DEFAULTS,
    formula: Formula {
        df: cra2_df,
        variance: |x| x.design_effect * cra2_variance(x),
    },
};

pub(super) const RDC_3R: DesignVariant = DesignVariant {
    id: "RDC_3r",
    number: "5.4",
    title: "3-level cluster regression discontinuity, treatment at level 3",
    category: Category::Rd,
    levels: 3,
    treatment_level: 3,
    effect: EffectType::Random,
    parameters: &[
        Param::Rho3,
        Param::Rho2,
        Param::P,
        Param::R21,
        Param::R22,
        Param::R23,
        Param::G,
        Param::N,
        Param::J,
        Param::K,
        Param::DesignEffect,
    ],
    target: Param::K,
    defaults: RD_DEFAULTS,
    formula: Formula {
        df: cra3_df,
        variance: |x| x.design_effect * cra3_variance(x),
    },
};

pub(super) const RD3_2F: DesignVariant = DesignVariant {
    id: "RD3_2f",
    number: "5.5",
    title: "3-level blocked regression discontinuity, fixed effects, treatment at level 2",
    category: Category::Rd,
    levels: 3,
    treatment_level: 2,
    effect: EffectType::Fixed,
    parameters: &[
        Param::Rho2,
        Param::P,
        Param::R21,
        Param::R22,
        Param::G,
        Param::N,
        Param::J,
        Param::K,
        Param::DesignEffect,
    ],
    target: Param::K,
    defaults: RD_DEFAULTS,
    formula: Formula {
        df: |x| x.k * (x.j - 1.0) - x.g,
        variance: |x| x.design_effect * bcra3_2f_variance(x),
    },
};

/// Design effect implied by the correlation between treatment status and
/// the assignment score, `1 / (1 - rho_ts^2)`.
pub fn design_effect_from_rho_ts(rho_ts: f64) -> Result<f64> {
    if rho_ts > 0.0 && rho_ts < 1.0 {
        Ok(1.0 / (1.0 - rho_ts * rho_ts))
    } else {
        Err(PowerError::InvalidParameter {
            name: "rho_ts",
            value: rho_ts,
            reason: "must be strictly between 0 and 1",
        })
    }
}

fn rd2_1r_variance(x: &DesignInputs) -> f64 {
    bira2_random_heterogeneity(x)
        + x.design_effect * residual_share(x) * (1.0 - x.r21) / (x.pq() * x.j * x.n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::designs::cra::CRA2_2R;

    #[test]
    fn test_design_effect_scales_cluster_variance() {
        let x = DesignInputs {
            rho2: 0.15,
            p: 0.5,
            r21: 0.5,
            g: 1.0,
            n: 55.0,
            j: 179.0,
            design_effect: DEFAULT_DESIGN_EFFECT,
            ..Default::default()
        };
        let ratio = RDC_2R.variance(&x) / CRA2_2R.variance(&x);
        assert!((ratio - DEFAULT_DESIGN_EFFECT).abs() < 1e-12);
        assert_eq!(RDC_2R.df(&x), CRA2_2R.df(&x));
    }

    #[test]
    fn test_design_effect_from_rho_ts() {
        assert!((design_effect_from_rho_ts(0.5).unwrap() - 4.0 / 3.0).abs() < 1e-12);
        // The workbook default corresponds to rho_ts of about 0.8
        let rho = (1.0 - 1.0 / DEFAULT_DESIGN_EFFECT).sqrt();
        assert!((design_effect_from_rho_ts(rho).unwrap() - DEFAULT_DESIGN_EFFECT).abs() < 1e-12);
        assert!(design_effect_from_rho_ts(1.0).is_err());
        assert!(design_effect_from_rho_ts(0.0).is_err());
    }

    #[test]
    fn test_heterogeneity_not_inflated() {
        let x = DesignInputs {
            rho2: 0.15,
            omega2: 0.2,
            p: 0.5,
            n: 50.0,
            j: 40.0,
            design_effect: 1.0,
            ..Default::default()
        };
        let inflated = DesignInputs {
            design_effect: 3.0,
            ..x
        };
        let heterogeneity = bira2_random_heterogeneity(&x);
        let base_assignment = RD2_1R.variance(&x) - heterogeneity;
        let inflated_assignment = RD2_1R.variance(&inflated) - heterogeneity;
        assert!((inflated_assignment - 3.0 * base_assignment).abs() < 1e-15);
    }
}
