pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;
pub mod text;

use crate::OutputFormat;
use loan_calc_core::CalculationResult;
use serde_json::Value;

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, result: &CalculationResult) {
    match format {
        OutputFormat::Text => return text::print_text(result),
        OutputFormat::Json => return json::print_json(result),
        _ => {}
    }

    let value = match serde_json::to_value(result) {
        Ok(v) => v,
        Err(e) => {
            eprintln!("JSON serialization error: {}", e);
            return;
        }
    };

    match format {
        OutputFormat::Table => table::print_table(envelope(&value)),
        OutputFormat::Csv => csv_out::print_csv(envelope(&value)),
        OutputFormat::Minimal => minimal::print_minimal(envelope(&value)),
        OutputFormat::Text | OutputFormat::Json => unreachable!("handled above"),
    }
}

/// The computation envelope inside the tagged result.
fn envelope(value: &Value) -> &Value {
    value.get("output").unwrap_or(value)
}

/// Render a scalar JSON value without quotes.
pub(crate) fn format_scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
