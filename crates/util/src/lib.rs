//! json-store-util - value helpers shared by the json-store crates.
//!
//! Equality and ordering of [`serde_json::Value`]s, truthiness, random item
//! identifiers and a thread-safe lazily computed cell.

pub mod compare;
pub mod id;
pub mod json_equal;
pub mod lazy_function;
pub mod truthy;

pub use compare::{compare_values, js_gt, js_gte, js_lt, js_lte, sort_order};
pub use id::random_id;
pub use json_equal::{deep_equal, numbers_equal, strict_equal};
pub use lazy_function::Lazy;
pub use truthy::{is_container, is_truthy, same_container_kind};
