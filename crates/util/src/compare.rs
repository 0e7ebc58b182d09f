//! Relational comparison of JSON values.
//!
//! [`compare_values`] is partial and backs the relational filter predicates:
//! numbers compare numerically, strings lexicographically, booleans with
//! `false < true`. Anything else is unordered and every relational test on it
//! is false.
//!
//! [`sort_order`] is total and backs field sorts: absent and `null` sort
//! first, then values group by kind, then compare within their kind.

use std::cmp::Ordering;

use serde_json::Value;

pub fn compare_values(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => match (x.as_i64(), y.as_i64()) {
            (Some(x), Some(y)) => Some(x.cmp(&y)),
            _ => x.as_f64()?.partial_cmp(&y.as_f64()?),
        },
        (Value::String(x), Value::String(y)) => Some(x.cmp(y)),
        (Value::Bool(x), Value::Bool(y)) => Some(x.cmp(y)),
        _ => None,
    }
}

pub fn js_lt(a: &Value, b: &Value) -> bool {
    matches!(compare_values(a, b), Some(Ordering::Less))
}

pub fn js_lte(a: &Value, b: &Value) -> bool {
    matches!(compare_values(a, b), Some(Ordering::Less | Ordering::Equal))
}

pub fn js_gt(a: &Value, b: &Value) -> bool {
    matches!(compare_values(a, b), Some(Ordering::Greater))
}

pub fn js_gte(a: &Value, b: &Value) -> bool {
    matches!(compare_values(a, b), Some(Ordering::Greater | Ordering::Equal))
}

fn kind_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}

/// Total order over optional values for sorting.
pub fn sort_order(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    let a = a.filter(|v| !v.is_null());
    let b = b.filter(|v| !v.is_null());
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(x), Some(y)) => kind_rank(x)
            .cmp(&kind_rank(y))
            .then_with(|| compare_values(x, y).unwrap_or(Ordering::Equal)),
    }
}
