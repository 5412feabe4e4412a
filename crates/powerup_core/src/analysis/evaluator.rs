//! Sweep evaluator - runs one calculation per swept value.

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::debug;

use crate::calculate::evaluate;
use crate::error::{PowerError, Result};
use crate::model::{Mode, ParameterSet};
use crate::registry::{lookup, resolve_inputs};
use crate::solver::SolverConfig;

use super::{SweepPoint, SweepResult, SweepSpec};

/// Sweep with the default solver settings
pub fn sweep(
    design_id: &str,
    mode: Mode,
    base: &ParameterSet,
    spec: &SweepSpec,
) -> Result<SweepResult> {
    sweep_with(design_id, mode, base, spec, &SolverConfig::default())
}

/// Evaluate `mode` at every value of `spec`
///
/// The swept parameter is inserted into `base` (replacing any value there).
/// The first failing point fails the whole sweep.
pub fn sweep_with(
    design_id: &str,
    mode: Mode,
    base: &ParameterSet,
    spec: &SweepSpec,
    config: &SolverConfig,
) -> Result<SweepResult> {
    let design = lookup(design_id)?;
    spec.check()?;
    if mode == Mode::Mrss && spec.parameter == design.target {
        return Err(PowerError::ExtraParameter {
            design: design.id,
            param: spec.parameter,
        });
    }

    let values = spec.sweep_values();
    debug!(
        design = design.id,
        mode = %mode,
        parameter = %spec.parameter,
        points = values.len(),
        "starting sweep"
    );

    let evaluate_point = |value: f64| -> Result<SweepPoint> {
        let mut params = base.clone();
        params.insert(spec.parameter, value);
        let inputs = resolve_inputs(design, mode, &params)?;
        let result = evaluate(design, mode, &inputs, config)?;
        Ok(SweepPoint {
            value,
            outcome: result.value,
        })
    };

    #[cfg(feature = "parallel")]
    let points: Result<Vec<SweepPoint>> = values.par_iter().map(|&v| evaluate_point(v)).collect();

    #[cfg(not(feature = "parallel"))]
    let points: Result<Vec<SweepPoint>> = values.iter().map(|&v| evaluate_point(v)).collect();

    let points = points?;
    debug!(design = design.id, points = points.len(), "sweep complete");

    Ok(SweepResult {
        design: design.id,
        mode,
        parameter: spec.parameter,
        points,
    })
}

/// Power across a range of the design's target sample size
pub fn power_curve(
    design_id: &str,
    base: &ParameterSet,
    min_size: f64,
    max_size: f64,
    steps: usize,
) -> Result<SweepResult> {
    let target = lookup(design_id)?.target;
    sweep(
        design_id,
        Mode::Power,
        base,
        &SweepSpec::new(target, min_size, max_size, steps),
    )
}

/// MDES across a range of the design's target sample size
pub fn mdes_curve(
    design_id: &str,
    base: &ParameterSet,
    min_size: f64,
    max_size: f64,
    steps: usize,
) -> Result<SweepResult> {
    let target = lookup(design_id)?.target;
    sweep(
        design_id,
        Mode::Mdes,
        base,
        &SweepSpec::new(target, min_size, max_size, steps),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Param;

    fn cra2_base() -> ParameterSet {
        ParameterSet::new()
            .with(Param::Alpha, 0.05)
            .with(Param::Tails, 2.0)
            .with(Param::EffectSize, 0.25)
            .with(Param::Rho2, 0.15)
            .with(Param::P, 0.5)
            .with(Param::R21, 0.0)
            .with(Param::R22, 0.0)
            .with(Param::G, 0.0)
            .with(Param::N, 20.0)
    }

    #[test]
    fn test_sweep_preserves_order() {
        let spec = SweepSpec::new(Param::J, 100.0, 10.0, 10);
        let result = sweep("CRA2_2r", Mode::Power, &cra2_base(), &spec).unwrap();
        let values: Vec<f64> = result.values().collect();
        assert_eq!(values, spec.sweep_values());
        // Descending J gives descending power
        let outcomes: Vec<f64> = result.outcomes().collect();
        assert!(outcomes.windows(2).all(|w| w[1] <= w[0]));
    }

    #[test]
    fn test_sweep_matches_single_calculations() {
        let spec = SweepSpec::new(Param::J, 20.0, 60.0, 3);
        let result = sweep("CRA2_2r", Mode::Power, &cra2_base(), &spec).unwrap();
        for point in &result.points {
            let single = crate::calculate::calculate(
                "CRA2_2r",
                Mode::Power,
                &cra2_base().with(Param::J, point.value),
            )
            .unwrap();
            assert_eq!(single.value, point.outcome);
        }
    }

    #[test]
    fn test_sweeping_mrss_target_is_rejected() {
        let mut base = cra2_base();
        base.insert(Param::Power, 0.8);
        let spec = SweepSpec::new(Param::J, 10.0, 20.0, 3);
        assert!(matches!(
            sweep("CRA2_2r", Mode::Mrss, &base, &spec),
            Err(PowerError::ExtraParameter { param: Param::J, .. })
        ));
    }

    #[test]
    fn test_failing_point_fails_sweep() {
        // J = 2 leaves zero degrees of freedom
        let spec = SweepSpec::new(Param::J, 2.0, 10.0, 5);
        assert!(matches!(
            sweep("CRA2_2r", Mode::Power, &cra2_base(), &spec),
            Err(PowerError::InvalidParameter { name: "df", .. })
        ));
    }

    #[test]
    fn test_power_curve_sweeps_target() {
        let curve = power_curve("CRA2_2r", &cra2_base(), 10.0, 100.0, 10).unwrap();
        assert_eq!(curve.parameter, Param::J);
        assert_eq!(curve.mode, Mode::Power);
        assert_eq!(curve.len(), 10);
    }
}
