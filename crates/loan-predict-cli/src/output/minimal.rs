use serde_json::Value;

/// Print just the answer: installment and risk category, or the schedule
/// totals. Batch output prints one line per request.
pub fn print_minimal(value: &Value) {
    if let Value::Array(items) = value {
        for item in items {
            println!("{}", summarize(item));
        }
        return;
    }

    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);
    println!("{}", summarize(result_obj));
}

fn summarize(value: &Value) -> String {
    let Value::Object(map) = value else {
        return format_minimal(value);
    };

    if let Some(err) = map.get("error").filter(|e| !e.is_null()) {
        return format!("error: {}", format_minimal(err));
    }

    let installment = map.get("installment_amount");
    let secondary = map.get("risk_category").or_else(|| map.get("total_interest"));

    match (installment, secondary) {
        (Some(i), Some(s)) => format!("{} {}", format_minimal(i), format_minimal(s)),
        (Some(i), None) => format_minimal(i),
        _ => map
            .iter()
            .next()
            .map(|(key, val)| format!("{}: {}", key, format_minimal(val)))
            .unwrap_or_default(),
    }
}

fn format_minimal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
