use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::classify::CalculationRequest;
use crate::error::LoanCalcError;
use crate::time_value::{growth_factor, monthly_rate, overpayment};
use crate::types::*;
use crate::LoanCalcResult;

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// Which of the three annuity values was calculated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnnuityUnknown {
    Periods,
    Principal,
    Payment,
}

/// Fully populated annuity after the missing value has been solved
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnuityOutput {
    pub solved_for: AnnuityUnknown,
    pub payment: Money,
    pub principal: Money,
    pub periods: u32,
    pub overpayment: Money,
}

// ---------------------------------------------------------------------------
// Solvers
// ---------------------------------------------------------------------------

fn out_of_range(operation: &str) -> LoanCalcError {
    LoanCalcError::computation(operation, "intermediate value exceeds the decimal range")
}

/// Number of months needed to repay `principal` with a fixed `payment`,
/// rounded up.
///
/// `n = ceil(ln(A / (A - i*P)) / ln(1 + i))`. A payment that does not
/// exceed the first month's interest never amortizes the loan and is
/// reported as a `ComputationError`.
pub fn solve_periods(payment: Money, principal: Money, interest: Rate) -> LoanCalcResult<u32> {
    const OP: &str = "solve periods";
    let i = monthly_rate(interest);

    let n = if i.is_zero() {
        if payment.is_zero() {
            if principal.is_zero() {
                return Ok(0);
            }
            return Err(LoanCalcError::computation(OP, "payment must be greater than zero"));
        }
        principal
            .checked_div(payment)
            .ok_or_else(|| out_of_range(OP))?
    } else {
        let interest_share = i.checked_mul(principal).ok_or_else(|| out_of_range(OP))?;
        if payment <= interest_share {
            return Err(LoanCalcError::computation(
                OP,
                format!(
                    "payment too small to cover interest ({payment} <= {})",
                    interest_share.round_dp(2)
                ),
            ));
        }
        let ratio = payment
            .checked_div(payment - interest_share)
            .ok_or_else(|| out_of_range(OP))?;
        ratio
            .ln()
            .checked_div((Decimal::ONE + i).ln())
            .ok_or_else(|| out_of_range(OP))?
    };

    n.ceil().to_u32().ok_or_else(|| {
        LoanCalcError::computation(OP, format!("{n} periods is out of range"))
    })
}

/// Largest principal a fixed `payment` repays over `periods` months,
/// rounded down.
pub fn solve_principal(payment: Money, periods: u32, interest: Rate) -> LoanCalcResult<Money> {
    const OP: &str = "solve principal";
    let i = monthly_rate(interest);

    let principal = if i.is_zero() {
        payment.checked_mul(Decimal::from(periods))
    } else {
        let ni = growth_factor(i, periods)?;
        i.checked_mul(ni)
            .and_then(|denominator| (ni - Decimal::ONE).checked_div(denominator))
            .and_then(|discount| payment.checked_mul(discount))
    }
    .ok_or_else(|| out_of_range(OP))?;

    Ok(principal.floor())
}

/// Fixed monthly payment that repays `principal` in exactly `periods`
/// months, rounded up.
pub fn solve_payment(principal: Money, periods: u32, interest: Rate) -> LoanCalcResult<Money> {
    const OP: &str = "solve payment";
    if periods == 0 {
        return Err(LoanCalcError::computation(OP, "cannot amortize over zero periods"));
    }

    let i = monthly_rate(interest);

    let payment = if i.is_zero() {
        principal.checked_div(Decimal::from(periods))
    } else {
        let ni = growth_factor(i, periods)?;
        i.checked_mul(ni)
            .and_then(|numerator| numerator.checked_div(ni - Decimal::ONE))
            .and_then(|factor| principal.checked_mul(factor))
    }
    .ok_or_else(|| out_of_range(OP))?;

    Ok(payment.ceil())
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

/// Solve the missing annuity value and compute the overpayment.
pub fn calculate_annuity(
    request: &CalculationRequest,
) -> LoanCalcResult<ComputationOutput<AnnuityOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let (output, interest) = match *request {
        CalculationRequest::SolvePeriods {
            payment,
            principal,
            interest,
        } => {
            let periods = solve_periods(payment, principal, interest)?;
            log::debug!("solved periods = {periods}");
            let output = AnnuityOutput {
                solved_for: AnnuityUnknown::Periods,
                payment,
                principal,
                periods,
                overpayment: overpayment(payment, periods, principal)?,
            };
            (output, interest)
        }
        CalculationRequest::SolvePrincipal {
            payment,
            periods,
            interest,
        } => {
            let principal = solve_principal(payment, periods, interest)?;
            log::debug!("solved principal = {principal}");
            let output = AnnuityOutput {
                solved_for: AnnuityUnknown::Principal,
                payment,
                principal,
                periods,
                overpayment: overpayment(payment, periods, principal)?,
            };
            (output, interest)
        }
        CalculationRequest::SolvePayment {
            principal,
            periods,
            interest,
        } => {
            let payment = solve_payment(principal, periods, interest)?;
            log::debug!("solved payment = {payment}");
            let output = AnnuityOutput {
                solved_for: AnnuityUnknown::Payment,
                payment,
                principal,
                periods,
                overpayment: overpayment(payment, periods, principal)?,
            };
            (output, interest)
        }
        CalculationRequest::GenerateSchedule { .. } => {
            return Err(LoanCalcError::invalid(
                "type",
                "differentiated request passed to the annuity engine",
            ));
        }
    };

    if interest.is_zero() {
        warnings.push("Zero interest rate; payment is principal divided evenly over periods".into());
    }
    if !output.payment.fract().is_zero() || !output.principal.fract().is_zero() {
        warnings.push("Non-integer amounts are truncated when displayed".into());
    }

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Annuity (fixed payment) amortization",
        request,
        warnings,
        elapsed,
        output,
    ))
}
