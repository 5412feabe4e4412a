use thiserror::Error;

use crate::model::Param;

/// Failures reported by every calculation entry point
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PowerError {
    #[error("unknown design '{0}'")]
    UnknownDesign(String),

    #[error("design {design} requires parameter '{param}'")]
    MissingParameter { design: &'static str, param: Param },

    #[error("design {design} does not take parameter '{param}' here")]
    ExtraParameter { design: &'static str, param: Param },

    #[error("invalid value {value} for '{name}': {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    /// The sample-size search did not settle. `iterations` is zero when the
    /// target effect is unreachable at any sample size.
    #[error(
        "sample size for {design} did not converge after {iterations} iterations (last estimate {last_estimate})"
    )]
    NonConvergence {
        design: &'static str,
        iterations: usize,
        last_estimate: f64,
    },
}

impl PowerError {
    pub(crate) fn invalid(param: Param, value: f64, reason: &'static str) -> Self {
        PowerError::InvalidParameter {
            name: param.key(),
            value,
            reason,
        }
    }
}

/// A parameter key that is not part of the vocabulary
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown parameter name '{0}'")]
pub struct ParseParamError(pub String);

pub type Result<T> = std::result::Result<T, PowerError>;
