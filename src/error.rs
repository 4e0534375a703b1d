//! Error types for valuation operations

use thiserror::Error;

/// A specialized Result type for valuation operations
pub type ValuationResult<T> = Result<T, ValuationError>;

/// Errors surfaced by the valuation engine and its data loaders
#[derive(Error, Debug)]
pub enum ValuationError {
    /// A required financial line item could not be resolved, even after
    /// trying every fallback key
    #[error("missing financial attribute: {attribute}")]
    MissingAttribute {
        /// Primary key of the attribute that was requested
        attribute: String,
    },

    /// An input value makes the valuation arithmetic meaningless
    /// (non-positive share count, buyback rate at or above 1, discount
    /// rate at or below -1)
    #[error("invalid input: {reason}")]
    InvalidInput {
        /// Description of the offending value
        reason: String,
    },

    /// An evaluation method tag that is not part of the supported set
    #[error("<{method}> is not a valid evaluation method")]
    InvalidEvaluationMethod {
        /// The unrecognized tag, as supplied by the caller
        method: String,
    },

    /// Statement file could not be read
    #[error("statement I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Statement file could not be parsed as CSV
    #[error("statement CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl ValuationError {
    /// Create a missing-attribute error
    pub fn missing_attribute(attribute: impl Into<String>) -> Self {
        Self::MissingAttribute {
            attribute: attribute.into(),
        }
    }

    /// Create an invalid-input error
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    /// Create an invalid-method error
    pub fn invalid_method(method: impl Into<String>) -> Self {
        Self::InvalidEvaluationMethod {
            method: method.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ValuationError::missing_attribute("Shares Outstanding");
        assert!(err.to_string().contains("Shares Outstanding"));

        let err = ValuationError::invalid_method("MAGIC_EIGHT_BALL");
        assert!(err.to_string().contains("<MAGIC_EIGHT_BALL>"));
    }
}
