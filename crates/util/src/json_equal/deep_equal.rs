use serde_json::{Number, Value};

/// Numeric equality across integer and float representations, so `1` and
/// `1.0` are equal.
pub fn numbers_equal(a: &Number, b: &Number) -> bool {
    if a == b {
        return true;
    }
    match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) => x == y,
        _ => false,
    }
}

/// Performs a deep equality check between two JSON values.
///
/// Arrays compare element by element, objects key by key regardless of key
/// order. Values of different kinds are never equal.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use json_store_util::deep_equal;
///
/// assert!(deep_equal(&json!({"foo": [1, 2, 3]}), &json!({"foo": [1, 2, 3]})));
/// assert!(!deep_equal(&json!({"foo": [1, 2, 3]}), &json!({"foo": [1, 2, 4]})));
/// ```
pub fn deep_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Number(a), Value::Number(b)) => numbers_equal(a, b),
        (Value::String(a), Value::String(b)) => a == b,
        (Value::Array(arr_a), Value::Array(arr_b)) => {
            arr_a.len() == arr_b.len()
                && arr_a.iter().zip(arr_b).all(|(x, y)| deep_equal(x, y))
        }
        (Value::Object(obj_a), Value::Object(obj_b)) => {
            if obj_a.len() != obj_b.len() {
                return false;
            }
            obj_a
                .iter()
                .all(|(key, val_a)| obj_b.get(key).is_some_and(|val_b| deep_equal(val_a, val_b)))
        }
        _ => false,
    }
}

/// Strict equality: same kind and same value.
///
/// Identical to [`deep_equal`] for every value; kept as a separate entry point
/// so callers state which comparison they mean.
pub fn strict_equal(a: &Value, b: &Value) -> bool {
    deep_equal(a, b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scalars() {
        assert!(deep_equal(&json!(1), &json!(1)));
        assert!(deep_equal(&json!(1), &json!(1.0)));
        assert!(!deep_equal(&json!(1), &json!(2)));
        assert!(!deep_equal(&json!(1), &json!([])));
        assert!(!deep_equal(&json!(0), &json!(null)));
        assert!(!deep_equal(&json!(""), &json!(null)));
        assert!(!deep_equal(&json!(1), &json!(true)));
        assert!(!deep_equal(&json!(0), &json!(false)));
        assert!(!deep_equal(&json!("1"), &json!(1)));
        assert!(deep_equal(&json!(null), &json!(null)));
    }

    #[test]
    fn test_objects_ignore_key_order() {
        assert!(deep_equal(&json!({"a": 1, "b": "2"}), &json!({"b": "2", "a": 1})));
        assert!(!deep_equal(
            &json!({"a": 1, "b": "2"}),
            &json!({"a": 1, "b": "2", "c": []})
        ));
        assert!(!deep_equal(&json!({"a": 1, "c": 3}), &json!({"a": 1, "d": 3})));
        assert!(!deep_equal(&json!({}), &json!([])));
    }

    #[test]
    fn test_arrays() {
        assert!(deep_equal(&json!([]), &json!([])));
        assert!(deep_equal(&json!([{"a": "a"}, {"b": "b"}]), &json!([{"a": "a"}, {"b": "b"}])));
        assert!(!deep_equal(&json!([1, 2, 3]), &json!([1, 2])));
        assert!(!deep_equal(&json!([{"a": "a"}, {"b": "b"}]), &json!([{"a": "a"}, {"b": "c"}])));
    }

    #[test]
    fn test_strict_equal_primitives() {
        assert!(strict_equal(&json!("1"), &json!("1")));
        assert!(!strict_equal(&json!("1"), &json!(1)));
        assert!(strict_equal(&json!({"key": 5}), &json!({"key": 5})));
    }

    #[test]
    fn test_big_object() {
        let a = json!({
            "prop1": "value1",
            "prop4": {
                "subProp1": "sub value1",
                "subProp2": {"subSubProp2": [1, 2, {"prop2": 1, "prop": 2}, 4, 5]}
            },
            "prop5": 1000
        });
        let b = json!({
            "prop5": 1000,
            "prop4": {
                "subProp2": {"subSubProp2": [1, 2, {"prop": 2, "prop2": 1}, 4, 5]},
                "subProp1": "sub value1"
            },
            "prop1": "value1"
        });
        assert!(deep_equal(&a, &b));
    }
}
