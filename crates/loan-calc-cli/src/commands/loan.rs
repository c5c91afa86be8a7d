use clap::Args;
use rust_decimal::Decimal;

use loan_calc_core::{calculate, CalculationResult, LoanParameters};

use crate::input;

/// Loan parameters. Leave out the one value to calculate.
#[derive(Args)]
pub struct LoanArgs {
    /// Path to a JSON or YAML parameter file, or `-` for JSON on stdin.
    /// Flags given on the command line take precedence.
    #[arg(long)]
    pub input: Option<String>,

    /// Fixed monthly payment
    #[arg(long, allow_hyphen_values = true)]
    pub payment: Option<Decimal>,

    /// Loan principal
    #[arg(long, allow_hyphen_values = true)]
    pub principal: Option<Decimal>,

    /// Number of monthly payments
    #[arg(long, allow_hyphen_values = true)]
    pub periods: Option<i64>,

    /// Nominal annual interest rate in percent (e.g. 7.8)
    #[arg(long, allow_hyphen_values = true)]
    pub interest: Option<Decimal>,

    /// Payment type: "annuity" or "diff"
    #[arg(long = "type", value_name = "TYPE")]
    pub payment_type: Option<String>,
}

impl LoanArgs {
    fn flag_parameters(&self) -> LoanParameters {
        LoanParameters {
            payment: self.payment,
            principal: self.principal,
            periods: self.periods,
            interest: self.interest,
            method: self.payment_type.clone().unwrap_or_default(),
        }
    }
}

pub fn run_loan(args: LoanArgs) -> Result<CalculationResult, Box<dyn std::error::Error>> {
    let file_params: LoanParameters = match args.input.as_deref() {
        Some("-") => input::stdin::read_parameters()?,
        Some(path) => input::file::read_parameters(path)?,
        None => LoanParameters::default(),
    };

    let params = args.flag_parameters().with_fallback(file_params);
    log::info!("calculating with {:?}", params);

    Ok(calculate(&params)?)
}
