//! Error types for the Tailrisk library.
//!
//! Two failure kinds exist inside the risk core. Both are local and
//! synchronous; nothing inside the core is transient, so nothing is retried.
//!
//! An undefined CVaR (an empty loss tail) is deliberately *not* an error;
//! it is carried as a `None` value on the metrics themselves.

use thiserror::Error;

/// A specialized Result type for Tailrisk operations.
pub type TailRiskResult<T> = Result<T, TailRiskError>;

/// The error type for the risk core.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TailRiskError {
    /// Not enough observations to compute the requested quantity.
    #[error("Insufficient data: {required} observation(s) required, {actual} available ({context})")]
    InsufficientData {
        /// Minimum number of observations needed.
        required: usize,
        /// Number of observations supplied.
        actual: usize,
        /// What was being computed.
        context: String,
    },

    /// A parameter or input value is outside its valid domain.
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter {
        /// Name of the offending parameter.
        name: String,
        /// Why the value was rejected.
        reason: String,
    },
}

impl TailRiskError {
    /// Creates an insufficient data error.
    #[must_use]
    pub fn insufficient_data(required: usize, actual: usize, context: impl Into<String>) -> Self {
        Self::InsufficientData {
            required,
            actual,
            context: context.into(),
        }
    }

    /// Creates an invalid parameter error.
    #[must_use]
    pub fn invalid_parameter(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Returns true for [`TailRiskError::InsufficientData`].
    #[must_use]
    pub fn is_insufficient_data(&self) -> bool {
        matches!(self, Self::InsufficientData { .. })
    }

    /// Returns true for [`TailRiskError::InvalidParameter`].
    #[must_use]
    pub fn is_invalid_parameter(&self) -> bool {
        matches!(self, Self::InvalidParameter { .. })
    }
}
