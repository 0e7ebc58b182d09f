//! JSON Pointer (RFC 6901) paths for json-store.
//!
//! A [`Pointer`] is an immutable, structurally shared sequence of unescaped
//! segments. [`get`] walks a document for reading and [`find_slot_mut`] yields
//! the container and final segment for writing.
//!
//! # Example
//!
//! ```
//! use json_store_pointer::{get, find_slot_mut, Pointer};
//! use serde_json::json;
//!
//! let path = Pointer::parse("/foo/bar").unwrap();
//! assert_eq!(path.segments(), vec!["foo", "bar"]);
//! assert_eq!(path.to_string(), "/foo/bar");
//!
//! let mut doc = json!({"foo": {"bar": 42}});
//! assert_eq!(get(&doc, path.iter()), Some(&json!(42)));
//!
//! find_slot_mut(&mut doc, &path).unwrap().set(json!(43)).unwrap();
//! assert_eq!(doc, json!({"foo": {"bar": 43}}));
//! ```

use thiserror::Error;

mod find;
mod get;
mod pointer;
mod util;

pub use find::{find_slot_mut, SlotMut};
pub use get::{get, get_mut};
pub use pointer::Pointer;
pub use util::{
    escape_component, format_json_pointer, is_valid_index, parse_json_pointer, unescape_component,
};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum JsonPointerError {
    /// An intermediate container on the way to the slot is absent.
    #[error("invalid path: {path} doesn't exist in target")]
    NotFound { path: String },
    #[error("invalid array index at {path}")]
    InvalidIndex { path: String },
    #[error("value at {path} is not a container")]
    NotContainer { path: String },
    #[error("the root has no parent slot")]
    NoParent,
    #[error("invalid pointer {pointer:?}: must be empty or start with '/'")]
    PointerInvalid { pointer: String },
}
