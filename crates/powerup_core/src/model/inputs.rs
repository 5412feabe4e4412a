//! Resolved, typed view of a validated parameter set
//!
//! Formula functions read from `DesignInputs` rather than the sparse map so
//! they stay plain arithmetic. Parameters a variant does not use are zero.

use super::params::{Param, ParameterSet};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DesignInputs {
    pub alpha: f64,
    pub tails: f64,
    pub power: f64,
    pub es: f64,
    pub rho2: f64,
    pub rho3: f64,
    pub rho4: f64,
    pub omega2: f64,
    pub omega3: f64,
    pub omega4: f64,
    pub p: f64,
    pub r21: f64,
    pub r22: f64,
    pub r23: f64,
    pub r24: f64,
    pub r2t2: f64,
    pub r2t3: f64,
    pub r2t4: f64,
    pub g: f64,
    pub n: f64,
    pub j: f64,
    pub k: f64,
    pub l: f64,
    pub design_effect: f64,
    pub t: f64,
    pub tf: f64,
    pub q: f64,
}

impl DesignInputs {
    #[must_use]
    pub fn from_params(params: &ParameterSet) -> Self {
        let mut inputs = Self::default();
        for (param, value) in params.iter() {
            inputs.set(param, value);
        }
        inputs
    }

    #[must_use]
    pub fn get(&self, param: Param) -> f64 {
        *self.slot(param)
    }

    pub fn set(&mut self, param: Param, value: f64) {
        *self.slot_mut(param) = value;
    }

    /// Copy with one parameter replaced
    #[must_use]
    pub fn with(mut self, param: Param, value: f64) -> Self {
        self.set(param, value);
        self
    }

    /// P(1 - P), the assignment variance
    #[must_use]
    pub fn pq(&self) -> f64 {
        self.p * (1.0 - self.p)
    }

    fn slot(&self, param: Param) -> &f64 {
        match param {
            Param::Alpha => &self.alpha,
            Param::Tails => &self.tails,
            Param::Power => &self.power,
            Param::EffectSize => &self.es,
            Param::Rho2 => &self.rho2,
            Param::Rho3 => &self.rho3,
            Param::Rho4 => &self.rho4,
            Param::Omega2 => &self.omega2,
            Param::Omega3 => &self.omega3,
            Param::Omega4 => &self.omega4,
            Param::P => &self.p,
            Param::R21 => &self.r21,
            Param::R22 => &self.r22,
            Param::R23 => &self.r23,
            Param::R24 => &self.r24,
            Param::R2T2 => &self.r2t2,
            Param::R2T3 => &self.r2t3,
            Param::R2T4 => &self.r2t4,
            Param::G => &self.g,
            Param::N => &self.n,
            Param::J => &self.j,
            Param::K => &self.k,
            Param::L => &self.l,
            Param::DesignEffect => &self.design_effect,
            Param::T => &self.t,
            Param::Tf => &self.tf,
            Param::Q => &self.q,
        }
    }

    fn slot_mut(&mut self, param: Param) -> &mut f64 {
        match param {
            Param::Alpha => &mut self.alpha,
            Param::Tails => &mut self.tails,
            Param::Power => &mut self.power,
            Param::EffectSize => &mut self.es,
            Param::Rho2 => &mut self.rho2,
            Param::Rho3 => &mut self.rho3,
            Param::Rho4 => &mut self.rho4,
            Param::Omega2 => &mut self.omega2,
            Param::Omega3 => &mut self.omega3,
            Param::Omega4 => &mut self.omega4,
            Param::P => &mut self.p,
            Param::R21 => &mut self.r21,
            Param::R22 => &mut self.r22,
            Param::R23 => &mut self.r23,
            Param::R24 => &mut self.r24,
            Param::R2T2 => &mut self.r2t2,
            Param::R2T3 => &mut self.r2t3,
            Param::R2T4 => &mut self.r2t4,
            Param::G => &mut self.g,
            Param::N => &mut self.n,
            Param::J => &mut self.j,
            Param::K => &mut self.k,
            Param::L => &mut self.l,
            Param::DesignEffect => &mut self.design_effect,
            Param::T => &mut self.t,
            Param::Tf => &mut self.tf,
            Param::Q => &mut self.q,
        }
    }
}
