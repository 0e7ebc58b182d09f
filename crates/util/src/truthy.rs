use serde_json::Value;

/// Truthiness of a JSON value: `null`, `false`, `0`, `NaN` and `""` are falsy,
/// every array and object is truthy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

pub fn is_container(value: &Value) -> bool {
    matches!(value, Value::Array(_) | Value::Object(_))
}

/// True when both are arrays or both are objects.
pub fn same_container_kind(a: &Value, b: &Value) -> bool {
    matches!(
        (a, b),
        (Value::Array(_), Value::Array(_)) | (Value::Object(_), Value::Object(_))
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn falsy_values() {
        for v in [json!(null), json!(false), json!(0), json!(0.0), json!("")] {
            assert!(!is_truthy(&v), "{v}");
        }
    }

    #[test]
    fn truthy_values() {
        for v in [json!(true), json!(1), json!(-0.5), json!("0"), json!([]), json!({})] {
            assert!(is_truthy(&v), "{v}");
        }
    }

    #[test]
    fn container_kinds() {
        assert!(is_container(&json!([])));
        assert!(!is_container(&json!("x")));
        assert!(same_container_kind(&json!({"a": 1}), &json!({})));
        assert!(!same_container_kind(&json!([]), &json!({})));
        assert!(!same_container_kind(&json!(1), &json!(1)));
    }
}
