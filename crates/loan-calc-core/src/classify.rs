use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::LoanCalcError;
use crate::types::{LoanParameters, Money, PaymentMethod, Rate};
use crate::LoanCalcResult;

/// The single operation a set of parameters resolves to, together with
/// the known values it needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "operation", rename_all = "snake_case")]
pub enum CalculationRequest {
    /// Annuity with the number of periods missing
    SolvePeriods {
        payment: Money,
        principal: Money,
        interest: Rate,
    },
    /// Annuity with the principal missing
    SolvePrincipal {
        payment: Money,
        periods: u32,
        interest: Rate,
    },
    /// Annuity with the payment missing
    SolvePayment {
        principal: Money,
        periods: u32,
        interest: Rate,
    },
    /// Differentiated schedule
    GenerateSchedule {
        principal: Money,
        periods: u32,
        interest: Rate,
    },
}

impl CalculationRequest {
    pub fn method(&self) -> PaymentMethod {
        match self {
            CalculationRequest::GenerateSchedule { .. } => PaymentMethod::Differentiated,
            _ => PaymentMethod::Annuity,
        }
    }
}

/// Decide which calculation the parameters ask for.
///
/// Guards run in order: interest, method, signs, then the per-method
/// presence rules. Anything that does not resolve to exactly one request
/// is `InvalidParameters`.
pub fn classify(params: &LoanParameters) -> LoanCalcResult<CalculationRequest> {
    let interest = match params.interest {
        Some(rate) if rate >= Decimal::ZERO => rate,
        Some(_) => return Err(LoanCalcError::invalid("interest", "must not be negative")),
        None => return Err(LoanCalcError::invalid("interest", "interest rate is required")),
    };

    let method: PaymentMethod = params.method.parse()?;

    let payment = non_negative_money("payment", params.payment)?;
    let principal = non_negative_money("principal", params.principal)?;
    let periods = period_count(params.periods)?;

    let request = match method {
        PaymentMethod::Annuity => classify_annuity(payment, principal, periods, interest)?,
        PaymentMethod::Differentiated => {
            classify_differentiated(payment, principal, periods, interest)?
        }
    };

    log::debug!("classified {method} request: {request:?}");
    Ok(request)
}

fn classify_annuity(
    payment: Option<Money>,
    principal: Option<Money>,
    periods: Option<u32>,
    interest: Rate,
) -> LoanCalcResult<CalculationRequest> {
    match (payment, principal, periods) {
        (Some(payment), Some(principal), None) => Ok(CalculationRequest::SolvePeriods {
            payment,
            principal,
            interest,
        }),
        (Some(payment), None, Some(periods)) => Ok(CalculationRequest::SolvePrincipal {
            payment,
            periods,
            interest,
        }),
        (None, Some(principal), Some(periods)) => Ok(CalculationRequest::SolvePayment {
            principal,
            periods,
            interest,
        }),
        (Some(_), Some(_), Some(_)) => Err(LoanCalcError::invalid(
            "payment, principal, periods",
            "all three are given; leave out the one to calculate",
        )),
        _ => Err(LoanCalcError::invalid(
            "payment, principal, periods",
            "exactly two of the three must be given",
        )),
    }
}

fn classify_differentiated(
    payment: Option<Money>,
    principal: Option<Money>,
    periods: Option<u32>,
    interest: Rate,
) -> LoanCalcResult<CalculationRequest> {
    if payment.is_some() {
        return Err(LoanCalcError::invalid(
            "payment",
            "differentiated payments are calculated per month and cannot be given",
        ));
    }
    let principal =
        principal.ok_or_else(|| LoanCalcError::invalid("principal", "principal is required"))?;
    let periods = periods.ok_or_else(|| LoanCalcError::invalid("periods", "periods is required"))?;
    if periods == 0 {
        return Err(LoanCalcError::invalid("periods", "must be greater than zero"));
    }

    Ok(CalculationRequest::GenerateSchedule {
        principal,
        periods,
        interest,
    })
}

fn non_negative_money(field: &str, value: Option<Money>) -> LoanCalcResult<Option<Money>> {
    match value {
        Some(v) if v < Decimal::ZERO => Err(LoanCalcError::invalid(field, "must not be negative")),
        other => Ok(other),
    }
}

fn period_count(value: Option<i64>) -> LoanCalcResult<Option<u32>> {
    match value {
        None => Ok(None),
        Some(n) if n < 0 => Err(LoanCalcError::invalid("periods", "must not be negative")),
        Some(n) => u32::try_from(n)
            .map(Some)
            .map_err(|_| LoanCalcError::invalid("periods", format!("{n} is too large"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn annuity() -> LoanParameters {
        LoanParameters {
            interest: Some(dec!(10)),
            method: "annuity".into(),
            ..Default::default()
        }
    }

    fn assert_invalid(params: &LoanParameters, expected_field: &str) {
        match classify(params) {
            Err(LoanCalcError::InvalidParameters { field, .. }) => {
                assert_eq!(field, expected_field)
            }
            other => panic!("expected InvalidParameters on {expected_field}, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_periods_solves_periods() {
        let params = LoanParameters {
            payment: Some(dec!(23000)),
            principal: Some(dec!(500000)),
            ..annuity()
        };
        assert_eq!(
            classify(&params).unwrap(),
            CalculationRequest::SolvePeriods {
                payment: dec!(23000),
                principal: dec!(500000),
                interest: dec!(10),
            }
        );
    }

    #[test]
    fn test_missing_principal_solves_principal() {
        let params = LoanParameters {
            payment: Some(dec!(8722)),
            periods: Some(120),
            ..annuity()
        };
        assert_eq!(
            classify(&params).unwrap(),
            CalculationRequest::SolvePrincipal {
                payment: dec!(8722),
                periods: 120,
                interest: dec!(10),
            }
        );
    }

    #[test]
    fn test_missing_payment_solves_payment() {
        let params = LoanParameters {
            principal: Some(dec!(1000000)),
            periods: Some(60),
            ..annuity()
        };
        let request = classify(&params).unwrap();
        assert_eq!(request.method(), PaymentMethod::Annuity);
        assert_eq!(
            request,
            CalculationRequest::SolvePayment {
                principal: dec!(1000000),
                periods: 60,
                interest: dec!(10),
            }
        );
    }

    #[test]
    fn test_annuity_all_three_present_rejected() {
        let params = LoanParameters {
            payment: Some(dec!(5000)),
            principal: Some(dec!(100000)),
            periods: Some(10),
            ..annuity()
        };
        assert_invalid(&params, "payment, principal, periods");
    }

    #[test]
    fn test_annuity_all_three_absent_rejected() {
        assert_invalid(&annuity(), "payment, principal, periods");
    }

    #[test]
    fn test_annuity_two_absent_rejected() {
        let params = LoanParameters {
            principal: Some(dec!(100000)),
            ..annuity()
        };
        assert_invalid(&params, "payment, principal, periods");
    }

    #[test]
    fn test_interest_checked_first() {
        let params = LoanParameters {
            interest: None,
            method: "bogus".into(),
            ..Default::default()
        };
        assert_invalid(&params, "interest");

        let params = LoanParameters {
            interest: Some(dec!(-1)),
            ..annuity()
        };
        assert_invalid(&params, "interest");
    }

    #[test]
    fn test_zero_interest_accepted() {
        let params = LoanParameters {
            principal: Some(dec!(1000)),
            periods: Some(3),
            interest: Some(Decimal::ZERO),
            ..annuity()
        };
        assert!(classify(&params).is_ok());
    }

    #[test]
    fn test_unknown_or_empty_type_rejected() {
        let mut params = LoanParameters {
            principal: Some(dec!(1000)),
            periods: Some(3),
            ..annuity()
        };
        params.method = String::new();
        assert_invalid(&params, "type");
        params.method = "mortgage".into();
        assert_invalid(&params, "type");
    }

    #[test]
    fn test_negative_values_rejected() {
        let params = LoanParameters {
            payment: Some(dec!(-100)),
            principal: Some(dec!(1000)),
            ..annuity()
        };
        assert_invalid(&params, "payment");

        let params = LoanParameters {
            principal: Some(dec!(1000)),
            periods: Some(-5),
            ..annuity()
        };
        assert_invalid(&params, "periods");
    }

    #[test]
    fn test_differentiated_request() {
        let params = LoanParameters {
            principal: Some(dec!(500000)),
            periods: Some(8),
            interest: Some(dec!(7.8)),
            method: "diff".into(),
            ..Default::default()
        };
        let request = classify(&params).unwrap();
        assert_eq!(request.method(), PaymentMethod::Differentiated);
        assert_eq!(
            request,
            CalculationRequest::GenerateSchedule {
                principal: dec!(500000),
                periods: 8,
                interest: dec!(7.8),
            }
        );
    }

    #[test]
    fn test_differentiated_requires_principal_and_periods() {
        let base = LoanParameters {
            principal: Some(dec!(500000)),
            periods: Some(8),
            interest: Some(dec!(7.8)),
            method: "diff".into(),
            ..Default::default()
        };

        let params = LoanParameters {
            principal: None,
            ..base.clone()
        };
        assert_invalid(&params, "principal");

        let params = LoanParameters {
            periods: None,
            ..base.clone()
        };
        assert_invalid(&params, "periods");

        let params = LoanParameters {
            periods: Some(0),
            ..base.clone()
        };
        assert_invalid(&params, "periods");

        let params = LoanParameters {
            payment: Some(dec!(1000)),
            ..base
        };
        assert_invalid(&params, "payment");
    }
}
