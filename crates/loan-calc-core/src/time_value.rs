use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;

use crate::error::LoanCalcError;
use crate::types::{Money, Rate};
use crate::LoanCalcResult;

/// Percent-to-fraction (100) combined with annual-to-monthly (12).
const MONTHLY_RATE_DIVISOR: Decimal = dec!(1200);

/// Monthly fractional rate for a nominal annual rate given in percent.
pub fn monthly_rate(annual_percent: Rate) -> Rate {
    annual_percent / MONTHLY_RATE_DIVISOR
}

/// Compound growth factor `(1 + i)^periods`
pub fn growth_factor(monthly: Rate, periods: u32) -> LoanCalcResult<Decimal> {
    (Decimal::ONE + monthly)
        .checked_powi(i64::from(periods))
        .ok_or_else(|| {
            LoanCalcError::computation(
                "growth factor",
                format!("(1 + {monthly})^{periods} exceeds the decimal range"),
            )
        })
}

/// Total overpayment of a fixed-payment loan: `ceil(payment * periods) - principal`.
pub fn overpayment(payment: Money, periods: u32, principal: Money) -> LoanCalcResult<Money> {
    let total = payment
        .checked_mul(Decimal::from(periods))
        .ok_or_else(|| {
            LoanCalcError::computation("overpayment", "total repaid exceeds the decimal range")
        })?;
    Ok(total.ceil() - principal)
}
