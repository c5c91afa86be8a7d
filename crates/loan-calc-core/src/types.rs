use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::LoanCalcError;

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Nominal annual interest rates, expressed in percent (10 = 10%).
pub type Rate = Decimal;

/// Repayment scheme selected with `--type`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMethod {
    /// Fixed payment every period
    #[serde(rename = "annuity")]
    Annuity,
    /// Constant principal share, declining total payment
    #[serde(rename = "diff")]
    Differentiated,
}

impl FromStr for PaymentMethod {
    type Err = LoanCalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "annuity" => Ok(PaymentMethod::Annuity),
            "diff" => Ok(PaymentMethod::Differentiated),
            "" => Err(LoanCalcError::invalid("type", "payment type is required")),
            other => Err(LoanCalcError::invalid(
                "type",
                format!("unknown payment type '{other}', expected \"annuity\" or \"diff\""),
            )),
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentMethod::Annuity => write!(f, "annuity"),
            PaymentMethod::Differentiated => write!(f, "diff"),
        }
    }
}

/// Raw calculator input, exactly as supplied by the user.
///
/// Every numeric field is optional: `None` means "not supplied" and is what
/// the classifier uses to work out which value is being asked for. A
/// supplied negative value is present but invalid.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoanParameters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub principal: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub periods: Option<i64>,
    /// Nominal annual rate in percent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interest: Option<Rate>,
    /// Raw `--type` value; parsed by the classifier
    #[serde(rename = "type")]
    pub method: String,
}

impl LoanParameters {
    /// Fill every field missing from `self` with the value from `fallback`.
    ///
    /// Used to layer command-line flags over a parameter file.
    pub fn with_fallback(self, fallback: LoanParameters) -> LoanParameters {
        LoanParameters {
            payment: self.payment.or(fallback.payment),
            principal: self.principal.or(fallback.principal),
            periods: self.periods.or(fallback.periods),
            interest: self.interest.or(fallback.interest),
            method: if self.method.is_empty() {
                fallback.method
            } else {
                self.method
            },
        }
    }
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    for warning in &warnings {
        log::warn!("{methodology}: {warning}");
    }

    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}
