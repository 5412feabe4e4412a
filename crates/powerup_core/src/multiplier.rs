//! Critical-value multiplier
//!
//! The minimum detectable effect is `M` standard errors, where
//! `M = T1 + T2`: `T1` is the t critical value at the Type-I error level and
//! `T2` is the t quantile at the target power. Both use the design's degrees
//! of freedom.

use serde::Serialize;

use crate::distribution::t_quantile;
use crate::error::{PowerError, Result};
use crate::model::{Param, Tails};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Multiplier {
    pub m: f64,
    pub t1: f64,
    /// Signed; negative when the target power is below one half
    pub t2: f64,
}

/// `T1`, the critical value for a test at level `alpha`
pub fn critical_value(alpha: f64, tails: Tails, df: f64) -> Result<f64> {
    check_alpha(alpha)?;
    check_df(df)?;
    Ok(t_quantile(1.0 - alpha / tails.count(), df))
}

/// Multiplier for the given test level, target power, and degrees of freedom
pub fn multiplier(alpha: f64, tails: Tails, power: f64, df: f64) -> Result<Multiplier> {
    if !(power > 0.0 && power < 1.0) {
        return Err(PowerError::invalid(
            Param::Power,
            power,
            "must be strictly between 0 and 1",
        ));
    }
    let t1 = critical_value(alpha, tails, df)?;
    let t2 = t_quantile(power, df);
    Ok(Multiplier {
        m: t1 + t2,
        t1,
        t2,
    })
}

fn check_alpha(alpha: f64) -> Result<()> {
    if alpha > 0.0 && alpha < 1.0 {
        Ok(())
    } else {
        Err(PowerError::invalid(
            Param::Alpha,
            alpha,
            "must be strictly between 0 and 1",
        ))
    }
}

pub(crate) fn check_df(df: f64) -> Result<()> {
    // NaN fails the comparison too
    if df > 0.0 {
        Ok(())
    } else {
        Err(PowerError::InvalidParameter {
            name: "df",
            value: df,
            reason: "degrees of freedom must be positive",
        })
    }
}
