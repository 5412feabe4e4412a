//! Blocked cluster random assignment
//!
//! Clusters are randomized within blocks one level up. Fixed block effects
//! drop the block-level variance; random block effects keep it as a
//! treatment-heterogeneity term outside the assignment variance.

use crate::model::{DesignInputs, Param};

use super::{Category, DesignVariant, EffectType, Formula, residual_share};

pub(super) const BCRA3_2F: DesignVariant = DesignVariant {
    id: "BCRA3_2f",
    number: "4.1",
    title: "3-level blocked cluster random assignment, fixed effects, treatment at level 2",
    category: Category::Bcra,
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
    ],
    target: Param::K,
    defaults: &[],
    formula: Formula {
        df: |x| x.k * (x.j - 2.0) - x.g,
        variance: bcra3_2f_variance,
    },
};

pub(super) const BCRA3_2R: DesignVariant = DesignVariant {
    id: "BCRA3_2r",
    number: "4.2",
    title: "3-level blocked cluster random assignment, random effects, treatment at level 2",
    category: Category::Bcra,
    levels: 3,
    treatment_level: 2,
    effect: EffectType::Random,
    parameters: &[
        Param::Rho3,
        Param::Rho2,
        Param::Omega3,
        Param::P,
        Param::R21,
        Param::R22,
        Param::R2T3,
        Param::G,
        Param::N,
        Param::J,
        Param::K,
    ],
    target: Param::K,
    defaults: &[],
    formula: Formula {
        df: |x| x.k - x.g - 1.0,
        variance: bcra3_2r_variance,
    },
};

pub(super) const BCRA4_2R: DesignVariant = DesignVariant {
    id: "BCRA4_2r",
    number: "4.3",
    title: "4-level blocked cluster random assignment, random effects, treatment at level 2",
    category: Category::Bcra,
    levels: 4,
    treatment_level: 2,
    effect: EffectType::Random,
    parameters: &[
        Param::Rho4,
        Param::Rho3,
        Param::Rho2,
        Param::Omega4,
        Param::Omega3,
        Param::P,
        Param::R21,
        Param::R22,
        Param::R2T3,
        Param::R2T4,
        Param::G,
        Param::N,
        Param::J,
        Param::K,
        Param::L,
    ],
    target: Param::L,
    defaults: &[],
    formula: Formula {
        df: |x| x.l - x.g - 1.0,
        variance: bcra4_2r_variance,
    },
};

pub(super) const BCRA4_3F: DesignVariant = DesignVariant {
    id: "BCRA4_3f",
    number: "4.4",
    title: "4-level blocked cluster random assignment, fixed effects, treatment at level 3",
    category: Category::Bcra,
    levels: 4,
    treatment_level: 3,
    effect: EffectType::Fixed,
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
        Param::L,
    ],
    target: Param::L,
    defaults: &[],
    formula: Formula {
        df: |x| x.l * (x.k - 2.0) - x.g,
        variance: bcra4_3_assignment_variance,
    },
};

pub(super) const BCRA4_3R: DesignVariant = DesignVariant {
    id: "BCRA4_3r",
    number: "4.5",
    title: "4-level blocked cluster random assignment, random effects, treatment at level 3",
    category: Category::Bcra,
    levels: 4,
    treatment_level: 3,
    effect: EffectType::Random,
    parameters: &[
        Param::Rho4,
        Param::Rho3,
        Param::Rho2,
        Param::Omega4,
        Param::P,
        Param::R21,
        Param::R22,
        Param::R23,
        Param::R2T4,
        Param::G,
        Param::N,
        Param::J,
        Param::K,
        Param::L,
    ],
    target: Param::L,
    defaults: &[],
    formula: Formula {
        df: |x| x.l - x.g - 1.0,
        variance: bcra4_3r_variance,
    },
};

/// Within-block variance for treatment at level 2 of a 3-level design
fn bcra3_2_assignment_variance(x: &DesignInputs) -> f64 {
    (x.rho2 * (1.0 - x.r22) / (x.j * x.k) + residual_share(x) * (1.0 - x.r21) / (x.j * x.k * x.n))
        / x.pq()
}

pub(super) fn bcra3_2f_variance(x: &DesignInputs) -> f64 {
    bcra3_2_assignment_variance(x)
}

fn bcra3_2r_variance(x: &DesignInputs) -> f64 {
    x.rho3 * x.omega3 * (1.0 - x.r2t3) / x.k + bcra3_2_assignment_variance(x)
}

fn bcra4_2r_variance(x: &DesignInputs) -> f64 {
    x.rho4 * x.omega4 * (1.0 - x.r2t4) / x.l
        + x.rho3 * x.omega3 * (1.0 - x.r2t3) / (x.k * x.l)
        + (x.rho2 * (1.0 - x.r22) / (x.j * x.k * x.l)
            + residual_share(x) * (1.0 - x.r21) / (x.j * x.k * x.l * x.n))
            / x.pq()
}

fn bcra4_3_assignment_variance(x: &DesignInputs) -> f64 {
    (x.rho3 * (1.0 - x.r23) / (x.k * x.l)
        + x.rho2 * (1.0 - x.r22) / (x.j * x.k * x.l)
        + residual_share(x) * (1.0 - x.r21) / (x.j * x.k * x.l * x.n))
        / x.pq()
}

fn bcra4_3r_variance(x: &DesignInputs) -> f64 {
    x.rho4 * x.omega4 * (1.0 - x.r2t4) / x.l + bcra4_3_assignment_variance(x)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_effects_add_heterogeneity() {
        let x = DesignInputs {
            rho4: 0.05,
            rho3: 0.15,
            rho2: 0.15,
            omega4: 0.5,
            p: 0.5,
            n: 10.0,
            j: 4.0,
            k: 4.0,
            l: 20.0,
            ..Default::default()
        };
        let heterogeneity = 0.05 * 0.5 / 20.0;
        assert!(
            (BCRA4_3R.variance(&x) - bcra4_3_assignment_variance(&x) - heterogeneity).abs()
                < 1e-15
        );
    }

    #[test]
    fn test_fixed_effects_degrees_of_freedom() {
        let x = DesignInputs {
            g: 1.0,
            j: 44.0,
            k: 5.0,
            l: 15.0,
            ..Default::default()
        };
        assert_eq!(BCRA3_2F.df(&x), 5.0 * 42.0 - 1.0);
        assert_eq!(BCRA4_3F.df(&x), 15.0 * 3.0 - 1.0);
    }
}
