use loan_calc_core::CalculationResult;

/// Render the tagged calculation result as pretty JSON.
pub fn render_json(result: &CalculationResult) -> serde_json::Result<String> {
    serde_json::to_string_pretty(result)
}

/// Pretty-print the calculation result to stdout.
pub fn print_json(result: &CalculationResult) {
    match render_json(result) {
        Ok(s) => println!("{}", s),
        Err(e) => eprintln!("JSON serialization error: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use loan_calc_core::{calculate, LoanParameters};
    use rust_decimal_macros::dec;

    #[test]
    fn test_json_keeps_method_tag_and_decimal_strings() {
        let params = LoanParameters {
            principal: Some(dec!(1000000)),
            periods: Some(60),
            interest: Some(dec!(10)),
            method: "annuity".into(),
            ..Default::default()
        };
        let rendered = render_json(&calculate(&params).unwrap()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();

        assert_eq!(value["type"], "annuity");
        assert_eq!(value["output"]["result"]["solved_for"], "payment");
        assert_eq!(value["output"]["result"]["payment"], "21248");
        assert_eq!(value["output"]["assumptions"]["operation"], "solve_payment");
        assert!(rendered.contains('\n'));
    }
}
