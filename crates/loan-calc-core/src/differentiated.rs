use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::classify::CalculationRequest;
use crate::error::LoanCalcError;
use crate::time_value::monthly_rate;
use crate::types::*;
use crate::LoanCalcResult;

/// One month of a differentiated schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentScheduleEntry {
    /// 1-based month number
    pub month: u32,
    /// Amount due that month, rounded up
    pub payment: Money,
}

/// Output of a differentiated calculation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DifferentiatedOutput {
    pub principal: Money,
    pub periods: u32,
    pub monthly_principal: Money,
    pub schedule: Vec<PaymentScheduleEntry>,
    pub total_paid: Money,
    pub overpayment: Money,
}

/// Lazy month-by-month differentiated schedule.
///
/// Yields `ceil(pn + i * (P - pn * (m - 1)))` for `m = 1..=periods` in
/// order and keeps a running total of what it has yielded. The sequence is
/// forward-only and cannot be restarted.
#[derive(Debug, Clone)]
pub struct DifferentiatedSchedule {
    principal: Money,
    monthly_rate: Rate,
    monthly_principal: Money,
    periods: u32,
    next_month: u64,
    total_paid: Money,
}

impl DifferentiatedSchedule {
    pub fn principal(&self) -> Money {
        self.principal
    }

    pub fn periods(&self) -> u32 {
        self.periods
    }

    /// Constant principal share repaid each month (not rounded)
    pub fn monthly_principal(&self) -> Money {
        self.monthly_principal
    }

    /// Sum of the payments yielded so far
    pub fn total_paid(&self) -> Money {
        self.total_paid
    }

    /// `ceil(total_paid - principal)`; the full overpayment once the
    /// schedule has been drained.
    pub fn overpayment(&self) -> Money {
        (self.total_paid - self.principal).ceil()
    }

    fn due(&self, month: u32) -> Money {
        let repaid = self.monthly_principal * Decimal::from(month - 1);
        (self.monthly_principal + self.monthly_rate * (self.principal - repaid)).ceil()
    }
}

impl Iterator for DifferentiatedSchedule {
    type Item = PaymentScheduleEntry;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next_month > u64::from(self.periods) {
            return None;
        }
        let month = self.next_month as u32;
        let payment = self.due(month);
        self.total_paid += payment;
        self.next_month += 1;
        Some(PaymentScheduleEntry { month, payment })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (u64::from(self.periods) + 1 - self.next_month) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for DifferentiatedSchedule {}

/// Build the lazy schedule for `principal` repaid over `periods` months.
pub fn generate_schedule(
    principal: Money,
    interest: Rate,
    periods: u32,
) -> LoanCalcResult<DifferentiatedSchedule> {
    if periods == 0 {
        return Err(LoanCalcError::invalid("periods", "must be greater than zero"));
    }
    if principal < Decimal::ZERO {
        return Err(LoanCalcError::invalid("principal", "must not be negative"));
    }
    if interest < Decimal::ZERO {
        return Err(LoanCalcError::invalid("interest", "must not be negative"));
    }

    let monthly_rate = monthly_rate(interest);
    let monthly_principal = principal / Decimal::from(periods);

    // The first month carries the largest payment, so bounding it and the
    // total it implies bounds every step of the iteration.
    monthly_rate
        .checked_mul(principal)
        .and_then(|first_interest| first_interest.checked_add(monthly_principal))
        .and_then(|first| first.ceil().checked_mul(Decimal::from(periods)))
        .ok_or_else(|| {
            LoanCalcError::computation("generate schedule", "payments exceed the decimal range")
        })?;

    Ok(DifferentiatedSchedule {
        principal,
        monthly_rate,
        monthly_principal,
        periods,
        next_month: 1,
        total_paid: Decimal::ZERO,
    })
}

/// Run the full differentiated calculation for a `GenerateSchedule` request.
pub fn calculate_differentiated(
    request: &CalculationRequest,
) -> LoanCalcResult<ComputationOutput<DifferentiatedOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let CalculationRequest::GenerateSchedule {
        principal,
        periods,
        interest,
    } = *request
    else {
        return Err(LoanCalcError::invalid(
            "type",
            "annuity request passed to the differentiated engine",
        ));
    };

    let mut schedule = generate_schedule(principal, interest, periods)?;
    let entries: Vec<PaymentScheduleEntry> = schedule.by_ref().collect();
    log::debug!(
        "generated {} differentiated payments, total {}",
        entries.len(),
        schedule.total_paid()
    );

    if interest.is_zero() {
        warnings.push("Zero interest rate; every payment is the principal share".into());
    }
    if !principal.fract().is_zero() {
        warnings.push("Non-integer principal is truncated when displayed".into());
    }

    let output = DifferentiatedOutput {
        principal: schedule.principal(),
        periods: schedule.periods(),
        monthly_principal: schedule.monthly_principal(),
        schedule: entries,
        total_paid: schedule.total_paid(),
        overpayment: schedule.overpayment(),
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Differentiated (declining balance) amortization",
        request,
        warnings,
        elapsed,
        output,
    ))
}
