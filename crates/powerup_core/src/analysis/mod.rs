//! Sensitivity sweeps
//!
//! A sweep evaluates one calculation mode at evenly spaced values of a single
//! parameter, holding every other input fixed:
//!
//! ```ignore
//! use powerup_core::analysis::{SweepSpec, sweep};
//! use powerup_core::model::{Mode, Param};
//!
//! let spec = SweepSpec::new(Param::J, 10.0, 100.0, 10);
//! let curve = sweep("CRA2_2r", Mode::Power, &base_params, &spec)?;
//! for point in &curve.points {
//!     println!("{} {}", point.value, point.outcome);
//! }
//! ```
//!
//! Points are independent, so with the `parallel` feature they are evaluated
//! on the rayon pool. Results always come back in swept-value order.

mod config;
mod evaluator;

pub use config::*;
pub use evaluator::*;
