//! Equality for JSON values.
//!
//! [`deep_equal`] is structural equality. [`strict_equal`] is the
//! identity-style equality used by `equal_to` filters: primitives compare by
//! type and value and containers compare structurally, since an owned
//! [`serde_json::Value`] has no identity of its own.

mod deep_equal;

pub use deep_equal::{deep_equal, numbers_equal, strict_equal};
