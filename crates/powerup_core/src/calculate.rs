//! Closed-form MDES and power calculations, and the top-level dispatcher

use tracing::trace;

use crate::designs::DesignVariant;
use crate::distribution::t_cdf;
use crate::error::{PowerError, Result};
use crate::model::{CalculationResult, DesignInputs, Mode, ParameterSet, Tails};
use crate::multiplier::{check_df, critical_value, multiplier};
use crate::registry::{lookup, resolve_inputs};
use crate::solver::{SolverConfig, solve_sample_size};

/// Run one calculation with the default solver settings
pub fn calculate(design_id: &str, mode: Mode, params: &ParameterSet) -> Result<CalculationResult> {
    calculate_with(design_id, mode, params, &SolverConfig::default())
}

/// Run one calculation
///
/// The parameter set must match the design's requirements for `mode`
/// exactly (see [`crate::registry::required_parameters`]).
pub fn calculate_with(
    design_id: &str,
    mode: Mode,
    params: &ParameterSet,
    config: &SolverConfig,
) -> Result<CalculationResult> {
    let design = lookup(design_id)?;
    let inputs = resolve_inputs(design, mode, params)?;
    evaluate(design, mode, &inputs, config)
}

/// Dispatch already-validated inputs to the calculator for `mode`
pub(crate) fn evaluate(
    design: &'static DesignVariant,
    mode: Mode,
    inputs: &DesignInputs,
    config: &SolverConfig,
) -> Result<CalculationResult> {
    match mode {
        Mode::Mdes => mdes(design, inputs),
        Mode::Power => power(design, inputs),
        Mode::Mrss => solve_sample_size(design, inputs, config),
    }
}

/// Minimum detectable effect size: `M * SE`
pub fn mdes(design: &'static DesignVariant, inputs: &DesignInputs) -> Result<CalculationResult> {
    let tails = Tails::try_from(inputs.tails)?;
    let df = design.df(inputs);
    let mult = multiplier(inputs.alpha, tails, inputs.power, df)?;
    let se = standard_error(design, inputs)?;

    Ok(CalculationResult {
        design: design.id,
        mode: Mode::Mdes,
        value: mult.m * se,
        solved_for: None,
        multiplier: mult.m,
        t1: mult.t1,
        t2: mult.t2,
        noncentrality: None,
        df,
        standard_error: se,
    })
}

/// Power to detect `inputs.es`
///
/// Degrees of freedom and `T1` come straight from the supplied sample sizes.
/// The effect size fixes `λ = es / SE`; `T2 = λ - T1` is the multiplier term
/// that MDES mode would need to report exactly `es`, so power is the central
/// t probability `F(T2; df)`. Power mode is therefore the exact inverse of
/// MDES mode.
pub fn power(design: &'static DesignVariant, inputs: &DesignInputs) -> Result<CalculationResult> {
    let tails = Tails::try_from(inputs.tails)?;
    let df = design.df(inputs);
    let t1 = critical_value(inputs.alpha, tails, df)?;
    let se = standard_error(design, inputs)?;
    let lambda = inputs.es / se;
    let t2 = lambda - t1;

    let power = t_cdf(t2, df);
    trace!(design = design.id, df, t1, t2, lambda, power, "power evaluated");

    Ok(CalculationResult {
        design: design.id,
        mode: Mode::Power,
        value: power.clamp(0.0, 1.0),
        solved_for: None,
        multiplier: t1 + t2,
        t1,
        t2,
        noncentrality: Some(lambda),
        df,
        standard_error: se,
    })
}

pub(crate) fn standard_error(design: &DesignVariant, inputs: &DesignInputs) -> Result<f64> {
    check_df(design.df(inputs))?;
    let variance = design.variance(inputs);
    if !(variance.is_finite() && variance > 0.0) {
        return Err(PowerError::InvalidParameter {
            name: "variance",
            value: variance,
            reason: "parameters imply a non-positive residual variance",
        });
    }
    Ok(variance.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Param;

    fn ira(n: f64) -> ParameterSet {
        ParameterSet::new()
            .with(Param::Alpha, 0.05)
            .with(Param::Tails, 2.0)
            .with(Param::P, 0.5)
            .with(Param::R21, 0.0)
            .with(Param::G, 0.0)
            .with(Param::N, n)
    }

    #[test]
    fn test_mdes_matches_multiplier_times_se() {
        let result = calculate("IRA", Mode::Mdes, &ira(400.0).with(Param::Power, 0.8)).unwrap();
        assert_eq!(result.df, 398.0);
        assert!((result.value - result.multiplier * result.standard_error).abs() < 1e-15);
        assert!((result.standard_error - 0.1).abs() < 1e-12);
        assert!((result.value - 0.28).abs() < 0.005);
    }

    #[test]
    fn test_power_diagnostics() {
        let result = calculate("IRA", Mode::Power, &ira(200.0).with(Param::EffectSize, 0.4)).unwrap();
        // SE = sqrt(1 / 50), so lambda = 0.4 * sqrt(50)
        let lambda = result.noncentrality.unwrap();
        assert!((lambda - 0.4 * 50f64.sqrt()).abs() < 1e-12);
        assert_eq!(result.t2, lambda - result.t1);
        assert!((result.multiplier - (result.t1 + result.t2)).abs() < 1e-12);
        assert!(result.value > 0.79 && result.value < 0.82);
    }

    #[test]
    fn test_one_tailed_power_exceeds_two_tailed() {
        let two = calculate("IRA", Mode::Power, &ira(300.0).with(Param::EffectSize, 0.25)).unwrap();
        let one = calculate(
            "IRA",
            Mode::Power,
            &ira(300.0)
                .with(Param::EffectSize, 0.25)
                .with(Param::Tails, 1.0),
        )
        .unwrap();
        assert!(one.value > two.value);
    }

    #[test]
    fn test_non_positive_df_is_invalid() {
        // n - g - 2 = 0
        let err = calculate("IRA", Mode::Mdes, &ira(2.0).with(Param::Power, 0.8)).unwrap_err();
        assert!(matches!(err, PowerError::InvalidParameter { name: "df", .. }));
    }
}
