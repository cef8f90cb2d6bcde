use super::{Param, ParamKind};

/// Errors raised by malformed or out-of-range parameter values
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParameterError {
    /// Text is not a number
    #[error("{param}: '{text}' is not a valid number")]
    InvalidNumber {
        /// Offending parameter
        param: Param,
        /// Text as entered
        text: String,
    },

    /// Text is not a timestamp
    #[error("{param}: '{text}' is not a valid timestamp")]
    InvalidTimestamp {
        /// Offending parameter
        param: Param,
        /// Text as entered
        text: String,
    },

    /// Start bound lies after end bound
    #[error("{start} must not be greater than {end}")]
    InvertedBounds {
        /// Start parameter of the axis
        start: Param,
        /// End parameter of the axis
        end: Param,
    },

    /// Value parses but is outside its valid domain
    #[error("{param}: {reason}")]
    OutOfRange {
        /// Offending parameter
        param: Param,
        /// What is wrong with it
        reason: String,
    },

    /// A value of the wrong kind was written
    #[error("{param} expects a {expected:?} value")]
    KindMismatch {
        /// Offending parameter
        param: Param,
        /// Kind the parameter holds
        expected: ParamKind,
    },
}

impl ParameterError {
    /// Parameter the error is about (start parameter for inverted bounds)
    pub fn param(&self) -> Param {
        match self {
            ParameterError::InvalidNumber { param, .. }
            | ParameterError::InvalidTimestamp { param, .. }
            | ParameterError::OutOfRange { param, .. }
            | ParameterError::KindMismatch { param, .. } => *param,
            ParameterError::InvertedBounds { start, .. } => *start,
        }
    }

    pub(crate) fn out_of_range(param: Param, reason: impl Into<String>) -> Self {
        ParameterError::OutOfRange {
            param,
            reason: reason.into(),
        }
    }
}
