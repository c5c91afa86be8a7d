use serde_json::Value;

use super::format_scalar;

/// Print just the key answer: the solved annuity value, or the overpayment
/// of a differentiated schedule.
pub fn print_minimal(envelope: &Value) {
    let result = envelope.get("result").unwrap_or(envelope);
    println!("{}", minimal_answer(result));
}

fn minimal_answer(result: &Value) -> String {
    let key = result
        .get("solved_for")
        .and_then(Value::as_str)
        .unwrap_or("overpayment");

    result
        .get(key)
        .map(format_scalar)
        .unwrap_or_else(|| format_scalar(result))
}
