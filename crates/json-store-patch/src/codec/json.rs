//! JSON wire codec.
//!
//! A record is `{"op", "path", "value"?, "from"?}`: `value` and `from` appear
//! only on the variants that carry them. `oldValue` is never written.

use json_store_pointer::Pointer;
use serde_json::{json, Map, Value};

use crate::patch::Patch;
use crate::types::{Operation, OperationKind, PatchError, PatchResult};

fn decode_pointer(record: &Map<String, Value>, field: &str) -> PatchResult<Option<Pointer>> {
    match record.get(field) {
        None => Ok(None),
        Some(Value::String(s)) => Pointer::parse(s)
            .map(Some)
            .map_err(|e| PatchError::Argument(format!("{field}: {e}"))),
        Some(_) => Err(PatchError::Argument(format!("{field} must be a string"))),
    }
}

/// Serialize an operation to its wire record.
pub fn to_json(op: &Operation) -> Value {
    let mut record = Map::new();
    record.insert("op".into(), json!(op.kind().as_str()));
    record.insert("path".into(), json!(op.path().to_string()));
    if let Some(value) = op.value() {
        record.insert("value".into(), value.clone());
    }
    if let Some(from) = op.from() {
        record.insert("from".into(), json!(from.to_string()));
    }
    Value::Object(record)
}

/// Decode one wire record.
pub fn from_json(record: &Value) -> PatchResult<Operation> {
    let record = record
        .as_object()
        .ok_or_else(|| PatchError::Argument("operation must be an object".into()))?;
    let kind = match record.get("op") {
        Some(Value::String(name)) => OperationKind::parse(name)?,
        _ => return Err(PatchError::Argument("op must be a string".into())),
    };
    let path = decode_pointer(record, "path")?
        .ok_or_else(|| PatchError::Argument("path is required".into()))?;
    let from = decode_pointer(record, "from")?;
    let value = record.get("value").cloned();
    Operation::new(kind, path, value, from, None)
}

pub fn to_json_patch(patch: &Patch) -> Value {
    Value::Array(patch.iter().map(to_json).collect())
}

pub fn from_json_patch(records: &Value) -> PatchResult<Patch> {
    records
        .as_array()
        .ok_or_else(|| PatchError::Argument("patch must be an array".into()))?
        .iter()
        .map(from_json)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ptr(s: &str) -> Pointer {
        Pointer::parse(s).unwrap()
    }

    #[test]
    fn records_omit_absent_fields() {
        assert_eq!(
            to_json(&Operation::remove(ptr("/a~1b"))),
            json!({"op": "remove", "path": "/a~1b"})
        );
        assert_eq!(
            to_json(&Operation::copy_value(ptr("/x"), ptr("/y"))),
            json!({"op": "copy", "path": "/y", "from": "/x"})
        );
        assert_eq!(
            to_json(&Operation::replace(ptr("/n"), json!(null), Some(json!(1)))),
            json!({"op": "replace", "path": "/n", "value": null})
        );
    }

    #[test]
    fn decode_each_kind() {
        let records = json!([
            {"op": "add", "path": "/a", "value": 1},
            {"op": "remove", "path": "/a"},
            {"op": "replace", "path": "/b", "value": [1]},
            {"op": "move", "path": "/c", "from": "/b"},
            {"op": "copy", "path": "/d", "from": "/c"},
            {"op": "test", "path": "/d", "value": [1]}
        ]);
        let patch = from_json_patch(&records).unwrap();
        assert_eq!(patch.len(), 6);
        assert_eq!(patch.operations()[3], Operation::move_value(ptr("/b"), ptr("/c")));
        assert_eq!(to_json_patch(&patch), records);
    }

    #[test]
    fn decode_errors() {
        assert!(from_json(&json!("add")).is_err());
        assert!(from_json(&json!({"op": "flip", "path": "/a"})).is_err());
        assert!(from_json(&json!({"op": "add", "path": "a", "value": 1})).is_err());
        assert!(from_json(&json!({"op": "add", "value": 1})).is_err());
        assert_eq!(
            from_json(&json!({"op": "move", "path": "/a"})).unwrap_err(),
            PatchError::Argument("from value is required for move operations".into())
        );
        assert!(from_json_patch(&json!({})).is_err());
    }
}
