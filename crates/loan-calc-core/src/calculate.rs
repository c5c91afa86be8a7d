use serde::{Deserialize, Serialize};

use crate::annuity::{calculate_annuity, AnnuityOutput};
use crate::classify::classify;
use crate::differentiated::{calculate_differentiated, DifferentiatedOutput};
use crate::types::{ComputationOutput, LoanParameters, PaymentMethod};
use crate::LoanCalcResult;

/// Result of one calculator run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "output", rename_all = "snake_case")]
pub enum CalculationResult {
    Annuity(ComputationOutput<AnnuityOutput>),
    Differentiated(ComputationOutput<DifferentiatedOutput>),
}

/// Classify the parameters and run the matching engine.
pub fn calculate(params: &LoanParameters) -> LoanCalcResult<CalculationResult> {
    let request = classify(params)?;
    match request.method() {
        PaymentMethod::Differentiated => {
            calculate_differentiated(&request).map(CalculationResult::Differentiated)
        }
        PaymentMethod::Annuity => calculate_annuity(&request).map(CalculationResult::Annuity),
    }
}
