use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LoanCalcError {
    #[error("Incorrect parameters: {field}: {reason}")]
    InvalidParameters { field: String, reason: String },

    #[error("Computation error in {operation}: {reason}")]
    ComputationError { operation: String, reason: String },
}

impl LoanCalcError {
    pub(crate) fn invalid(field: &str, reason: impl Into<String>) -> Self {
        LoanCalcError::InvalidParameters {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn computation(operation: &str, reason: impl Into<String>) -> Self {
        LoanCalcError::ComputationError {
            operation: operation.into(),
            reason: reason.into(),
        }
    }
}
