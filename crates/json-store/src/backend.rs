use std::sync::Arc;

use json_store_patch::Patch;
use json_store_pointer::{get, Pointer};
use serde_json::{Number, Value};

use crate::error::{StoreError, StoreResult};
use crate::update::Update;

/// What to write with [`Backend::put`].
#[derive(Debug, Clone)]
pub enum PutRequest {
    /// Replace the item with the same identity, or add it.
    Item(Value),
    /// Apply `patch` to a copy of the stored item with identity `id`.
    Patch { id: String, patch: Patch },
}

/// Storage primitives behind a [`Store`](crate::Store).
///
/// Implementations own the identity index and the version counter. Every
/// successful write bumps the version exactly once; a failed write leaves
/// all state untouched.
pub trait Backend: Send + Sync {
    fn id_path(&self) -> &Pointer;

    fn version(&self) -> u64;

    /// The items in insertion order, as of [`version`](Backend::version).
    fn snapshot(&self) -> Arc<Vec<Value>>;

    fn position(&self, id: &str) -> Option<usize>;

    fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    fn get(&self, id: &str) -> StoreResult<Value>;

    fn add(&mut self, item: Value) -> StoreResult<Update>;

    fn put(&mut self, request: PutRequest) -> StoreResult<Update>;

    fn delete(&mut self, id: &str) -> StoreResult<Update>;

    fn identity(&self, item: &Value) -> StoreResult<String> {
        identity_of(item, self.id_path())
    }
}

/// Largest magnitude below which every integral `f64` is exact.
const MAX_SAFE_FLOAT: f64 = 9_007_199_254_740_992.0;

/// Reads the identity at `id_path`. Numbers are accepted and rendered in
/// their JSON form, with integral floats written as integers so `1` and
/// `1.0` name the same item.
pub fn identity_of(item: &Value, id_path: &Pointer) -> StoreResult<String> {
    match get(item, id_path.iter()) {
        Some(Value::String(id)) => Ok(id.clone()),
        Some(Value::Number(id)) => Ok(number_identity(id)),
        _ => Err(StoreError::MissingIdentity {
            path: id_path.to_string(),
        }),
    }
}

fn number_identity(id: &Number) -> String {
    match id.as_f64() {
        Some(f) if id.is_f64() && f.fract() == 0.0 && f.abs() < MAX_SAFE_FLOAT => {
            (f as i64).to_string()
        }
        _ => id.to_string(),
    }
}
