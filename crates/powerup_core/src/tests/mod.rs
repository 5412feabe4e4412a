//! Integration tests for the powerup calculation engine
//!
//! Tests are organized by topic:
//! - `parity` - Published workbook values for every design
//! - `properties` - Monotonicity, round trips, and input rejection
//! - `sweep` - Sensitivity sweeps through the public API

mod sweep;

use crate::model::{Mode, Param, ParameterSet};
use crate::registry::required_parameters;

/// Workbook defaults for everything a design takes except its sample sizes
const WORKBOOK_DEFAULTS: &[(Param, f64)] = &[
    (Param::Alpha, 0.05),
    (Param::Tails, 2.0),
    (Param::Power, 0.8),
    (Param::EffectSize, 0.2),
    (Param::P, 0.5),
    (Param::G, 0.0),
    (Param::Rho2, 0.15),
    (Param::Rho3, 0.15),
    (Param::Rho4, 0.05),
    (Param::Omega2, 0.0),
    (Param::Omega3, 0.0),
    (Param::Omega4, 0.0),
    (Param::R21, 0.0),
    (Param::R22, 0.0),
    (Param::R23, 0.0),
    (Param::R24, 0.0),
    (Param::R2T2, 0.0),
    (Param::R2T3, 0.0),
    (Param::R2T4, 0.0),
];

/// Build the exact parameter set `design_id` takes in `mode`
///
/// Overrides are inserted as given, so a stray override shows up as an
/// `ExtraParameter` failure instead of being silently dropped.
pub(crate) fn workbook_params(design_id: &str, mode: Mode, overrides: &[(Param, f64)]) -> ParameterSet {
    let mut params = ParameterSet::new();
    for param in required_parameters(design_id, mode).unwrap() {
        if let Some(&(_, value)) = WORKBOOK_DEFAULTS.iter().find(|(p, _)| *p == param) {
            params.insert(param, value);
        }
    }
    for &(param, value) in overrides {
        params.insert(param, value);
    }
    params
}
