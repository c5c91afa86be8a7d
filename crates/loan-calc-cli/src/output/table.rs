use serde_json::Value;
use tabled::{builder::Builder, Table};

use super::format_scalar;

/// Format output as tables using the tabled crate.
pub fn print_table(envelope: &Value) {
    let result = envelope.get("result").unwrap_or(envelope);

    if let Value::Object(res_map) = result {
        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        for (key, val) in res_map {
            if key == "schedule" {
                continue;
            }
            builder.push_record([key.clone(), format_scalar(val)]);
        }
        println!("{}", Table::from(builder));

        if let Some(Value::Array(schedule)) = res_map.get("schedule") {
            println!();
            print_schedule_table(schedule);
        }
    } else {
        println!("{}", format_scalar(result));
    }

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s);
                }
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

fn print_schedule_table(schedule: &[Value]) {
    if schedule.is_empty() {
        println!("(empty)");
        return;
    }

    let mut builder = Builder::default();
    builder.push_record(["Month", "Payment"]);
    for entry in schedule {
        builder.push_record([
            entry.get("month").map(format_scalar).unwrap_or_default(),
            entry.get("payment").map(format_scalar).unwrap_or_default(),
        ]);
    }
    println!("{}", Table::from(builder));
}
