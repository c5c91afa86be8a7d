pub mod annuity;
pub mod calculate;
pub mod classify;
pub mod differentiated;
pub mod error;
pub mod time_value;
pub mod types;

pub use calculate::{calculate, CalculationResult};
pub use classify::{classify, CalculationRequest};
pub use error::LoanCalcError;
pub use types::*;

/// Standard result type for all loan-calc operations
pub type LoanCalcResult<T> = Result<T, LoanCalcError>;
