//! Blocked individual random assignment
//!
//! Treatment is assigned to individuals within blocks. Constant and fixed
//! block effects share a variance; random block effects add a
//! treatment-heterogeneity term at every blocking level.

use crate::model::{DesignInputs, Param};

use super::{Category, DesignVariant, EffectType, Formula, residual_share};

pub(super) const BIRA2_1C: DesignVariant = DesignVariant {
    id: "BIRA2_1c",
    number: "2.1",
    title: "2-level blocked individual random assignment, constant effects",
    category: Category::Bira,
    levels: 2,
    treatment_level: 1,
    effect: EffectType::Constant,
    parameters: &[Param::P, Param::R21, Param::G, Param::N, Param::J],
    target: Param::J,
    defaults: &[],
    formula: Formula {
        df: |x| x.j * (x.n - 1.0) - x.g - 1.0,
        variance: bira2_nonrandom_variance,
    },
};

pub(super) const BIRA2_1F: DesignVariant = DesignVariant {
    id: "BIRA2_1f",
    number: "2.2",
    title: "2-level blocked individual random assignment, fixed effects",
    category: Category::Bira,
    levels: 2,
    treatment_level: 1,
    effect: EffectType::Fixed,
    parameters: &[Param::P, Param::R21, Param::G, Param::N, Param::J],
    target: Param::J,
    defaults: &[],
    formula: Formula {
        df: bira2_fixed_df,
        variance: bira2_nonrandom_variance,
    },
};

pub(super) const BIRA2_1R: DesignVariant = DesignVariant {
    id: "BIRA2_1r",
    number: "2.3",
    title: "2-level blocked individual random assignment, random effects",
    category: Category::Bira,
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
    ],
    target: Param::J,
    defaults: &[],
    formula: Formula {
        df: |x| x.j - x.g - 1.0,
        variance: bira2_random_variance,
    },
};

pub(super) const BIRA3_1R: DesignVariant = DesignVariant {
    id: "BIRA3_1r",
    number: "2.4",
    title: "3-level blocked individual random assignment, random effects",
    category: Category::Bira,
    levels: 3,
    treatment_level: 1,
    effect: EffectType::Random,
    parameters: &[
        Param::Rho3,
        Param::Rho2,
        Param::Omega3,
        Param::Omega2,
        Param::P,
        Param::R21,
        Param::R2T2,
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
        variance: bira3_random_variance,
    },
};

pub(super) const BIRA4_1R: DesignVariant = DesignVariant {
    id: "BIRA4_1r",
    number: "2.5",
    title: "4-level blocked individual random assignment, random effects",
    category: Category::Bira,
    levels: 4,
    treatment_level: 1,
    effect: EffectType::Random,
    parameters: &[
        Param::Rho4,
        Param::Rho3,
        Param::Rho2,
        Param::Omega4,
        Param::Omega3,
        Param::Omega2,
        Param::P,
        Param::R21,
        Param::R2T2,
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
        variance: bira4_random_variance,
    },
};

pub(super) fn bira2_fixed_df(x: &DesignInputs) -> f64 {
    x.j * (x.n - 2.0) - x.g
}

pub(super) fn bira2_nonrandom_variance(x: &DesignInputs) -> f64 {
    (1.0 - x.r21) / (x.pq() * x.j * x.n)
}

pub(super) fn bira2_random_heterogeneity(x: &DesignInputs) -> f64 {
    x.rho2 * x.omega2 * (1.0 - x.r2t2) / x.j
}

fn bira2_random_variance(x: &DesignInputs) -> f64 {
    bira2_random_heterogeneity(x) + residual_share(x) * (1.0 - x.r21) / (x.pq() * x.j * x.n)
}

fn bira3_random_variance(x: &DesignInputs) -> f64 {
    x.rho3 * x.omega3 * (1.0 - x.r2t3) / x.k
        + x.rho2 * x.omega2 * (1.0 - x.r2t2) / (x.j * x.k)
        + residual_share(x) * (1.0 - x.r21) / (x.pq() * x.j * x.k * x.n)
}

fn bira4_random_variance(x: &DesignInputs) -> f64 {
    x.rho4 * x.omega4 * (1.0 - x.r2t4) / x.l
        + x.rho3 * x.omega3 * (1.0 - x.r2t3) / (x.k * x.l)
        + x.rho2 * x.omega2 * (1.0 - x.r2t2) / (x.j * x.k * x.l)
        + residual_share(x) * (1.0 - x.r21) / (x.pq() * x.j * x.k * x.l * x.n)
}
