//! Structural diff between two JSON values.

use json_store_pointer::Pointer;
use json_store_util::{deep_equal, same_container_kind};
use serde_json::{Map, Value};

use crate::types::Operation;

/// Operations that turn `src` into `dst`.
///
/// Only same-kind containers are diffed; any other pair yields no operations.
pub fn diff(src: &Value, dst: &Value) -> Vec<Operation> {
    let mut ops = Vec::new();
    if same_container_kind(src, dst) {
        diff_at_path(&mut ops, &Pointer::root(), src, dst);
    }
    ops
}

fn diff_at_path(ops: &mut Vec<Operation>, path: &Pointer, src: &Value, dst: &Value) {
    match (src, dst) {
        (Value::Object(s), Value::Object(d)) => diff_obj(ops, path, s, d),
        (Value::Array(s), Value::Array(d)) => diff_arr(ops, path, s, d),
        _ => {}
    }
}

fn diff_slot(ops: &mut Vec<Operation>, path: Pointer, src: &Value, dst: &Value) {
    if deep_equal(src, dst) {
        return;
    }
    if same_container_kind(src, dst) {
        diff_at_path(ops, &path, src, dst);
    } else {
        ops.push(Operation::replace(path, dst.clone(), Some(src.clone())));
    }
}

fn diff_obj(ops: &mut Vec<Operation>, path: &Pointer, src: &Map<String, Value>, dst: &Map<String, Value>) {
    for (key, src_val) in src {
        match dst.get(key) {
            None => ops.push(Operation::remove(path.add(key.as_str()))),
            Some(dst_val) => diff_slot(ops, path.add(key.as_str()), src_val, dst_val),
        }
    }
    for (key, dst_val) in dst {
        if !src.contains_key(key) {
            ops.push(Operation::add(path.add(key.as_str()), dst_val.clone()));
        }
    }
}

fn diff_arr(ops: &mut Vec<Operation>, path: &Pointer, src: &[Value], dst: &[Value]) {
    let common = src.len().min(dst.len());
    for i in 0..common {
        diff_slot(ops, path.add(i.to_string()), &src[i], &dst[i]);
    }
    // highest index first so pending indices never shift
    for i in (dst.len()..src.len()).rev() {
        ops.push(Operation::remove(path.add(i.to_string())));
    }
    for (i, dst_val) in dst.iter().enumerate().skip(src.len()) {
        ops.push(Operation::add(path.add(i.to_string()), dst_val.clone()));
    }
}
