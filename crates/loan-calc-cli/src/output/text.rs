use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use loan_calc_core::annuity::{AnnuityOutput, AnnuityUnknown};
use loan_calc_core::differentiated::DifferentiatedOutput;
use loan_calc_core::CalculationResult;

/// Print the human-readable report.
pub fn print_text(result: &CalculationResult) {
    for line in render_text(result) {
        println!("{}", line);
    }
}

pub fn render_text(result: &CalculationResult) -> Vec<String> {
    match result {
        CalculationResult::Annuity(out) => render_annuity(&out.result),
        CalculationResult::Differentiated(out) => render_schedule(&out.result),
    }
}

fn render_annuity(out: &AnnuityOutput) -> Vec<String> {
    let headline = match out.solved_for {
        AnnuityUnknown::Periods => {
            format!("It will take {} to repay this loan!", period_phrase(out.periods))
        }
        AnnuityUnknown::Principal => {
            format!("Your loan principal = {}!", display_amount(out.principal))
        }
        AnnuityUnknown::Payment => {
            format!("Your annuity payment = {}!", display_amount(out.payment))
        }
    };

    vec![
        headline,
        format!("Overpayment = {}", display_amount(out.overpayment)),
    ]
}

fn render_schedule(out: &DifferentiatedOutput) -> Vec<String> {
    let mut lines: Vec<String> = out
        .schedule
        .iter()
        .map(|entry| {
            format!(
                "Month {}: payment is {}",
                entry.month,
                display_amount(entry.payment)
            )
        })
        .collect();

    lines.push(String::new());
    lines.push(format!("Overpayment = {}", display_amount(out.overpayment)));
    lines
}

/// "2 years and 1 month", "1 year", "11 months"; "0 months" for zero.
pub fn period_phrase(months: u32) -> String {
    let years = months / 12;
    let rest = months % 12;

    let mut parts: Vec<String> = Vec::with_capacity(2);
    match years {
        0 => {}
        1 => parts.push("1 year".into()),
        n => parts.push(format!("{} years", n)),
    }
    match rest {
        0 => {}
        1 => parts.push("1 month".into()),
        n => parts.push(format!("{} months", n)),
    }

    if parts.is_empty() {
        "0 months".into()
    } else {
        parts.join(" and ")
    }
}

/// Monetary values are shown truncated to whole units.
fn display_amount(amount: Decimal) -> String {
    let whole = amount.trunc();
    whole
        .to_i128()
        .map(|v| v.to_string())
        .unwrap_or_else(|| whole.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use loan_calc_core::{calculate, LoanParameters};
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn render(params: LoanParameters) -> Vec<String> {
        render_text(&calculate(&params).unwrap())
    }

    #[test]
    fn test_period_phrase() {
        assert_eq!(period_phrase(24), "2 years");
        assert_eq!(period_phrase(12), "1 year");
        assert_eq!(period_phrase(1), "1 month");
        assert_eq!(period_phrase(11), "11 months");
        assert_eq!(period_phrase(13), "1 year and 1 month");
        assert_eq!(period_phrase(122), "10 years and 2 months");
        assert_eq!(period_phrase(0), "0 months");
    }

    #[test]
    fn test_display_truncates() {
        assert_eq!(display_amount(dec!(800018.99)), "800018");
        assert_eq!(display_amount(dec!(-0.5)), "0");
        assert_eq!(display_amount(dec!(21248)), "21248");
    }

    #[test]
    fn test_payment_report() {
        let lines = render(LoanParameters {
            principal: Some(dec!(1000000)),
            periods: Some(60),
            interest: Some(dec!(10)),
            method: "annuity".into(),
            ..Default::default()
        });
        assert_eq!(
            lines,
            vec!["Your annuity payment = 21248!", "Overpayment = 274880"]
        );
    }

    #[test]
    fn test_principal_report() {
        let lines = render(LoanParameters {
            payment: Some(dec!(8722)),
            periods: Some(120),
            interest: Some(dec!(5.6)),
            method: "annuity".into(),
            ..Default::default()
        });
        assert_eq!(
            lines,
            vec!["Your loan principal = 800018!", "Overpayment = 246622"]
        );
    }

    #[test]
    fn test_periods_report() {
        let lines = render(LoanParameters {
            payment: Some(dec!(23000)),
            principal: Some(dec!(500000)),
            interest: Some(dec!(7.8)),
            method: "annuity".into(),
            ..Default::default()
        });
        assert_eq!(
            lines,
            vec!["It will take 2 years to repay this loan!", "Overpayment = 52000"]
        );
    }

    #[test]
    fn test_schedule_report() {
        let lines = render(LoanParameters {
            principal: Some(dec!(500000)),
            periods: Some(8),
            interest: Some(dec!(7.8)),
            method: "diff".into(),
            ..Default::default()
        });
        assert_eq!(lines.len(), 10);
        assert_eq!(lines[0], "Month 1: payment is 65750");
        assert_eq!(lines[7], "Month 8: payment is 62907");
        assert_eq!(lines[8], "");
        assert_eq!(lines[9], "Overpayment = 14628");
    }
}
