//! Statistical power calculations for multilevel experimental and
//! quasi-experimental designs
//!
//! This crate computes, for 21 design variants:
//! - Minimum detectable effect size (MDES) from sample sizes
//! - Power to detect a given effect size
//! - Minimum required sample size (MRSS) at the design's top sample level
//! - Sensitivity sweeps of any of the above over one parameter
//!
//! Designs cover individual and cluster random assignment (blocked and
//! unblocked), regression discontinuity, and interrupted time series.
//!
//! # Example
//!
//! ```ignore
//! use powerup_core::{Mode, Param, ParameterSet, calculate};
//!
//! let params = ParameterSet::new()
//!     .with(Param::Alpha, 0.05)
//!     .with(Param::Tails, 2.0)
//!     .with(Param::Power, 0.8)
//!     .with(Param::Rho2, 0.15)
//!     .with(Param::P, 0.5)
//!     .with(Param::R21, 0.0)
//!     .with(Param::R22, 0.0)
//!     .with(Param::G, 0.0)
//!     .with(Param::N, 20.0)
//!     .with(Param::J, 40.0);
//!
//! let result = calculate("CRA2_2r", Mode::Mdes, &params)?;
//! println!("MDES = {:.3}", result.value);
//! ```

#![warn(clippy::all)]

// ============================================================================
// Core modules
// ============================================================================

pub mod analysis;
pub mod calculate;
pub mod distribution;
pub mod error;
pub mod multiplier;
pub mod registry;
pub mod solver;

// ============================================================================
// Type definition modules
// ============================================================================

pub mod designs;
pub mod model;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use analysis::{SweepPoint, SweepResult, SweepSpec, mdes_curve, power_curve, sweep, sweep_with};
pub use calculate::{calculate, calculate_with};
pub use designs::{Category, DesignVariant, EffectType};
pub use error::{ParseParamError, PowerError, Result};
pub use model::{CalculationResult, Mode, Param, ParameterSet, Tails};
pub use registry::{list_designs, lookup, required_parameters, validate};
pub use solver::{Rounding, SolverConfig};
