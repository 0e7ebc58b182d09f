use json_store_pointer::Pointer;
use serde::{Deserialize, Serialize};

/// Store configuration.
///
/// Deserializable from any serde format; every field has a default.
///
/// ```
/// use json_store::StoreOptions;
///
/// let options: StoreOptions = serde_json::from_str(r#"{"id_path": "/meta/key"}"#).unwrap();
/// assert_eq!(options.id_path.segments(), vec!["meta", "key"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreOptions {
    /// Where each item keeps its identity. Defaults to `/id`.
    pub id_path: Pointer,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            id_path: Pointer::root().add("id"),
        }
    }
}

impl StoreOptions {
    pub fn with_id_path(id_path: Pointer) -> Self {
        Self { id_path }
    }
}
