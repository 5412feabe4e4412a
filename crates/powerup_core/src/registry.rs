//! Design lookup and parameter-set validation
//!
//! A parameter set must name exactly the parameters the variant takes in the
//! requested mode. Named defaults fill gaps; everything else missing or
//! surplus is rejected before any formula runs.

use crate::designs::{CATALOG, DesignVariant};
use crate::error::{PowerError, Result};
use crate::model::{DesignInputs, Mode, Param, ParameterSet};

/// Every supported design, in workbook order
pub fn list_designs() -> &'static [DesignVariant] {
    &CATALOG
}

/// Find a design by identifier, ignoring ASCII case
pub fn lookup(id: &str) -> Result<&'static DesignVariant> {
    let wanted = id.trim();
    CATALOG
        .iter()
        .find(|d| d.id.eq_ignore_ascii_case(wanted))
        .ok_or_else(|| PowerError::UnknownDesign(id.to_string()))
}

/// Parameters a calculation of `id` in `mode` takes
pub fn required_parameters(id: &str, mode: Mode) -> Result<Vec<Param>> {
    Ok(lookup(id)?.required_parameters(mode))
}

/// Check that `params` is complete and in range for `id` in `mode`
pub fn validate(id: &str, mode: Mode, params: &ParameterSet) -> Result<()> {
    resolve_inputs(lookup(id)?, mode, params).map(|_| ())
}

/// Validate `params` and produce the typed inputs the formulas read
pub fn resolve_inputs(
    design: &DesignVariant,
    mode: Mode,
    params: &ParameterSet,
) -> Result<DesignInputs> {
    let required = design.required_parameters(mode);

    if let Some(param) = params.iter().map(|(p, _)| p).find(|p| !required.contains(p)) {
        return Err(PowerError::ExtraParameter {
            design: design.id,
            param,
        });
    }

    let mut resolved = params.clone();
    for &param in &required {
        if resolved.contains(param) {
            continue;
        }
        match design.default_for(param) {
            Some(value) => {
                resolved.insert(param, value);
            }
            None => {
                return Err(PowerError::MissingParameter {
                    design: design.id,
                    param,
                });
            }
        }
    }

    for (param, value) in resolved.iter() {
        check_domain(param, value)?;
    }
    let inputs = DesignInputs::from_params(&resolved);
    check_icc_sum(&inputs)?;
    Ok(inputs)
}

fn check_domain(param: Param, value: f64) -> Result<()> {
    let invalid = |reason| Err(PowerError::invalid(param, value, reason));
    match param {
        Param::Alpha | Param::Power | Param::P => {
            if !(value > 0.0 && value < 1.0) {
                return invalid("must be strictly between 0 and 1");
            }
        }
        Param::Tails => {
            if value != 1.0 && value != 2.0 {
                return invalid("must be 1 or 2");
            }
        }
        Param::Rho2
        | Param::Rho3
        | Param::Rho4
        | Param::R21
        | Param::R22
        | Param::R23
        | Param::R24
        | Param::R2T2
        | Param::R2T3
        | Param::R2T4 => {
            if !(0.0..1.0).contains(&value) {
                return invalid("must be at least 0 and below 1");
            }
        }
        Param::Omega2 | Param::Omega3 | Param::Omega4 => {
            if !(value.is_finite() && value >= 0.0) {
                return invalid("must be finite and non-negative");
            }
        }
        Param::EffectSize | Param::N | Param::J | Param::K | Param::L | Param::Q => {
            if !(value.is_finite() && value > 0.0) {
                return invalid("must be finite and positive");
            }
        }
        Param::DesignEffect => {
            if !(value.is_finite() && value >= 1.0) {
                return invalid("must be finite and at least 1");
            }
        }
        Param::G | Param::Tf => {
            if !(value.is_finite() && value >= 0.0 && value.fract() == 0.0) {
                return invalid("must be a whole number of at least 0");
            }
        }
        Param::T => {
            if !(value.is_finite() && value >= 3.0 && value.fract() == 0.0) {
                return invalid("must be a whole number of at least 3");
            }
        }
    }
    Ok(())
}

/// The ICCs partition outcome variance, so level 1 must keep a positive share.
fn check_icc_sum(inputs: &DesignInputs) -> Result<()> {
    let total = inputs.rho2 + inputs.rho3 + inputs.rho4;
    if total >= 1.0 {
        return Err(PowerError::InvalidParameter {
            name: "rho",
            value: total,
            reason: "intraclass correlations must sum to less than 1",
        });
    }
    Ok(())
}
