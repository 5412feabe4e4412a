//! Tests for sensitivity sweeps
//!
//! These tests verify that:
//! - Power is non-decreasing across a sample-size sweep
//! - Points come back in the order of the swept values
//! - A failing point fails the sweep and invalid specs are rejected

use super::workbook_params;
use crate::analysis::{SweepSpec, mdes_curve, sweep};
use crate::error::PowerError;
use crate::model::{Mode, Param};

fn cluster_power_base() -> crate::model::ParameterSet {
    workbook_params("CRA2_2r", Mode::Power, &[(Param::EffectSize, 0.25), (Param::N, 20.0)])
}

#[test]
fn test_power_sweep_over_clusters() {
    let spec = SweepSpec::new(Param::J, 10.0, 100.0, 10);
    let result = sweep("CRA2_2r", Mode::Power, &cluster_power_base(), &spec).unwrap();

    assert_eq!(result.len(), 10);
    let values: Vec<f64> = result.values().collect();
    assert_eq!(values, vec![10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0, 80.0, 90.0, 100.0]);

    let outcomes: Vec<f64> = result.outcomes().collect();
    assert!(outcomes.windows(2).all(|w| w[1] >= w[0]));
    assert!((outcomes[0] - 0.099).abs() < 0.01);
    assert!((outcomes[9] - 0.805).abs() < 0.01);
}

#[test]
fn test_sweep_over_non_size_parameter() {
    let spec = SweepSpec::new(Param::Rho2, 0.05, 0.30, 6);
    let base = cluster_power_base().with(Param::J, 40.0);
    let result = sweep("CRA2_2r", Mode::Power, &base, &spec).unwrap();
    let outcomes: Vec<f64> = result.outcomes().collect();
    // More clustering, less power
    assert!(outcomes.windows(2).all(|w| w[1] < w[0]));
}

#[test]
fn test_sweep_adds_missing_parameter() {
    // J is absent from the base set and supplied by the sweep
    let spec = SweepSpec::new(Param::J, 20.0, 40.0, 3);
    let base = cluster_power_base();
    assert!(!base.contains(Param::J));
    let result = sweep("CRA2_2r", Mode::Power, &base, &spec).unwrap();
    assert_eq!(result.len(), 3);
}

#[test]
fn test_sweep_errors() {
    let base = cluster_power_base();

    let zero_steps = SweepSpec::new(Param::J, 10.0, 100.0, 0);
    assert!(matches!(
        sweep("CRA2_2r", Mode::Power, &base, &zero_steps),
        Err(PowerError::InvalidParameter { name: "steps", .. })
    ));

    // omega2 is not a CRA2_2r parameter
    let stray = base.clone().with(Param::Omega2, 0.1);
    let spec = SweepSpec::new(Param::J, 10.0, 20.0, 2);
    assert!(matches!(
        sweep("CRA2_2r", Mode::Power, &stray, &spec),
        Err(PowerError::ExtraParameter { param: Param::Omega2, .. })
    ));

    assert!(matches!(
        sweep("NOPE", Mode::Power, &base, &spec),
        Err(PowerError::UnknownDesign(_))
    ));
}

#[test]
fn test_mdes_curve_falls() {
    let base = workbook_params("IRA", Mode::Mdes, &[]);
    let curve = mdes_curve("IRA", &base, 100.0, 1000.0, 4).unwrap();
    assert_eq!(curve.parameter, Param::N);
    let outcomes: Vec<f64> = curve.outcomes().collect();
    assert!(outcomes.windows(2).all(|w| w[1] < w[0]));
}
