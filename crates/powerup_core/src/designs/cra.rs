//! Simple cluster random assignment, treatment at the top level

use crate::model::{DesignInputs, Param};

use super::{Category, DesignVariant, EffectType, Formula, residual_share};

pub(super) const CRA2_2R: DesignVariant = DesignVariant {
    id: "CRA2_2r",
    number: "3.1",
    title: "2-level cluster random assignment, treatment at level 2",
    category: Category::Cra,
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
    ],
    target: Param::J,
    defaults: &[],
    formula: Formula {
        df: cra2_df,
        variance: cra2_variance,
    },
};

pub(super) const CRA3_3R: DesignVariant = DesignVariant {
    id: "CRA3_3r",
    number: "3.2",
    title: "3-level cluster random assignment, treatment at level 3",
    category: Category::Cra,
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
    ],
    target: Param::K,
    defaults: &[],
    formula: Formula {
        df: cra3_df,
        variance: cra3_variance,
    },
};

pub(super) const CRA4_4R: DesignVariant = DesignVariant {
    id: "CRA4_4r",
    number: "3.3",
    title: "4-level cluster random assignment, treatment at level 4",
    category: Category::Cra,
    levels: 4,
    treatment_level: 4,
    effect: EffectType::Random,
    parameters: &[
        Param::Rho4,
        Param::Rho3,
        Param::Rho2,
        Param::P,
        Param::R21,
        Param::R22,
        Param::R23,
        Param::R24,
        Param::G,
        Param::N,
        Param::J,
        Param::K,
        Param::L,
    ],
    target: Param::L,
    defaults: &[],
    formula: Formula {
        df: |x| x.l - x.g - 2.0,
        variance: cra4_variance,
    },
};

pub(super) fn cra2_df(x: &DesignInputs) -> f64 {
    x.j - x.g - 2.0
}

pub(super) fn cra2_variance(x: &DesignInputs) -> f64 {
    (x.rho2 * (1.0 - x.r22) / x.j + residual_share(x) * (1.0 - x.r21) / (x.j * x.n)) / x.pq()
}

pub(super) fn cra3_df(x: &DesignInputs) -> f64 {
    x.k - x.g - 2.0
}

pub(super) fn cra3_variance(x: &DesignInputs) -> f64 {
    (x.rho3 * (1.0 - x.r23) / x.k
        + x.rho2 * (1.0 - x.r22) / (x.j * x.k)
        + residual_share(x) * (1.0 - x.r21) / (x.j * x.k * x.n))
        / x.pq()
}

fn cra4_variance(x: &DesignInputs) -> f64 {
    (x.rho4 * (1.0 - x.r24) / x.l
        + x.rho3 * (1.0 - x.r23) / (x.k * x.l)
        + x.rho2 * (1.0 - x.r22) / (x.j * x.k * x.l)
        + residual_share(x) * (1.0 - x.r21) / (x.j * x.k * x.l * x.n))
        / x.pq()
}
