//! Applying single operations.
//!
//! Every applicator validates first and writes once. Move is the exception
//! that needs two writes, so it is staged on a copy of the target.

use json_store_pointer::{find_slot_mut, get, Pointer};
use json_store_util::deep_equal;
use serde_json::Value;

use crate::types::{Operation, OperationKind, Outcome, PatchError, PatchResult};

fn apply_add(doc: &mut Value, path: &Pointer, value: Value) -> PatchResult<()> {
    if path.is_root() {
        *doc = value;
        return Ok(());
    }
    let slot = find_slot_mut(doc, path)?;
    slot.check_set()?;
    slot.set(value)?;
    Ok(())
}

fn apply_remove(doc: &mut Value, path: &Pointer) -> PatchResult<()> {
    let slot = find_slot_mut(doc, path)?;
    slot.remove();
    Ok(())
}

fn apply_replace(doc: &mut Value, path: &Pointer, value: Value) -> PatchResult<()> {
    if path.is_root() {
        *doc = value;
        return Ok(());
    }
    let slot = find_slot_mut(doc, path)?;
    if slot.get().is_none() {
        return Err(PatchError::Precondition {
            op: OperationKind::Replace,
            path: path.to_string(),
        });
    }
    slot.set(value)?;
    Ok(())
}

fn source_value(doc: &Value, from: &Pointer, op: OperationKind) -> PatchResult<Value> {
    get(doc, from.iter())
        .cloned()
        .ok_or_else(|| PatchError::Precondition {
            op,
            path: from.to_string(),
        })
}

fn apply_copy(doc: &mut Value, path: &Pointer, from: &Pointer) -> PatchResult<()> {
    let value = source_value(doc, from, OperationKind::Copy)?;
    apply_add(doc, path, value)
}

fn apply_move(doc: &mut Value, path: &Pointer, from: &Pointer) -> PatchResult<()> {
    if path == from {
        source_value(doc, from, OperationKind::Move)?;
        return Ok(());
    }
    if path.starts_with(from) {
        return Err(PatchError::Argument(format!(
            "cannot move {from} into its own child {path}"
        )));
    }
    let mut staged = doc.clone();
    let value = source_value(&staged, from, OperationKind::Move)?;
    find_slot_mut(&mut staged, from)?.remove();
    apply_add(&mut staged, path, value)?;
    *doc = staged;
    Ok(())
}

fn apply_test(doc: &Value, path: &Pointer, value: &Value) -> bool {
    get(doc, path.iter()).is_some_and(|actual| deep_equal(actual, value))
}

impl Operation {
    /// Apply this operation to `doc` in place.
    ///
    /// On error `doc` is unchanged. Test operations never mutate and report
    /// their result as [`Outcome::Tested`].
    pub fn apply(&self, doc: &mut Value) -> PatchResult<Outcome> {
        match self {
            Operation::Add { path, value } => apply_add(doc, path, value.clone())?,
            Operation::Remove { path } => apply_remove(doc, path)?,
            Operation::Replace { path, value, .. } => apply_replace(doc, path, value.clone())?,
            Operation::Move { path, from } => apply_move(doc, path, from)?,
            Operation::Copy { path, from } => apply_copy(doc, path, from)?,
            Operation::Test { path, value } => return Ok(Outcome::Tested(apply_test(doc, path, value))),
        }
        Ok(Outcome::Applied)
    }

    /// Evaluate without mutating. Only Test operations can be false.
    pub fn holds(&self, doc: &Value) -> bool {
        match self {
            Operation::Test { path, value } => apply_test(doc, path, value),
            _ => true,
        }
    }
}
