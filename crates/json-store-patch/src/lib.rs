//! json-store-patch - structural diff and edit scripts over JSON values.
//!
//! An [`Operation`] is one of six edits (add, remove, replace, move, copy,
//! test) addressed by a [`Pointer`]. A [`Patch`] is an ordered list of them,
//! produced by [`Patch::diff`] and replayed by [`Patch::apply`].
//!
//! ```
//! use json_store_patch::Patch;
//! use serde_json::json;
//!
//! let from = json!({"id": "1", "tags": ["a", "b"]});
//! let to = json!({"id": "1", "tags": ["a"], "done": true});
//! let patch = Patch::diff(&from, &to);
//! assert_eq!(patch.to_string(), r#"[{"op":"remove","path":"/tags/1"},{"op":"add","path":"/done","value":true}]"#);
//! assert_eq!(patch.apply(from).unwrap(), to);
//! ```

mod apply;
pub mod codec;
mod diff;
mod patch;
mod types;

pub use json_store_pointer::Pointer;
pub use patch::Patch;
pub use types::{Operation, OperationKind, Outcome, PatchError, PatchResult};
