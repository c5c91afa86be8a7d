use serde_json::Value;
use std::io;

use super::format_scalar;

/// Write output as CSV to stdout.
///
/// Annuity results are written as `field,value` rows. A differentiated
/// result is written as `month,payment` rows followed by its totals.
pub fn print_csv(envelope: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    let result = envelope.get("result").unwrap_or(envelope);
    for record in csv_records(result) {
        let _ = wtr.write_record(&record);
    }

    let _ = wtr.flush();
}

fn csv_records(result: &Value) -> Vec<[String; 2]> {
    let Value::Object(map) = result else {
        return vec![[format_scalar(result), String::new()]];
    };

    if let Some(Value::Array(schedule)) = map.get("schedule") {
        let mut records = vec![["month".to_string(), "payment".to_string()]];
        for entry in schedule {
            records.push([
                entry.get("month").map(format_scalar).unwrap_or_default(),
                entry.get("payment").map(format_scalar).unwrap_or_default(),
            ]);
        }
        for key in ["total_paid", "overpayment"] {
            if let Some(val) = map.get(key) {
                records.push([key.to_string(), format_scalar(val)]);
            }
        }
        return records;
    }

    let mut records = vec![["field".to_string(), "value".to_string()]];
    for (key, val) in map {
        records.push([key.clone(), format_scalar(val)]);
    }
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_schedule_rows() {
        let result = json!({
            "principal": "1000",
            "periods": 2,
            "schedule": [
                {"month": 1, "payment": "505"},
                {"month": 2, "payment": "503"},
            ],
            "total_paid": "1008",
            "overpayment": "8",
        });
        let records = csv_records(&result);
        assert_eq!(records[0], ["month".to_string(), "payment".to_string()]);
        assert_eq!(records[1], ["1".to_string(), "505".to_string()]);
        assert_eq!(records[2], ["2".to_string(), "503".to_string()]);
        assert_eq!(records[4], ["overpayment".to_string(), "8".to_string()]);
        assert_eq!(records.len(), 5);
    }

    #[test]
    fn test_annuity_field_rows() {
        let result = json!({"solved_for": "periods", "periods": 24});
        let records = csv_records(&result);
        assert_eq!(records[0], ["field".to_string(), "value".to_string()]);
        assert_eq!(records.len(), 3);
        assert!(records.contains(&["periods".to_string(), "24".to_string()]));
    }
}
