//! Individual random assignment

use crate::model::{DesignInputs, Param};

use super::{Category, DesignVariant, EffectType, Formula};

pub(super) const IRA: DesignVariant = DesignVariant {
    id: "IRA",
    number: "1.0",
    title: "Individual random assignment",
    category: Category::Ira,
    levels: 1,
    treatment_level: 1,
    effect: EffectType::Constant,
    parameters: &[Param::P, Param::R21, Param::G, Param::N],
    target: Param::N,
    defaults: &[],
    formula: Formula {
        df: |x| x.n - x.g - 2.0,
        variance: ira_variance,
    },
};

fn ira_variance(x: &DesignInputs) -> f64 {
    (1.0 - x.r21) / (x.pq() * x.n)
}
