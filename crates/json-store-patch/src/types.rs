//! Core types: the operation enum, its kind tag and the error type.

use std::fmt;

use json_store_pointer::{JsonPointerError, Pointer};
use serde_json::Value;
use thiserror::Error;

// ── Error ─────────────────────────────────────────────────────────────────

#[derive(Debug, Error, Clone, PartialEq)]
pub enum PatchError {
    /// Write navigation hit an absent intermediate container.
    #[error("invalid path: {path} doesn't exist in target")]
    Address { path: String },
    /// Replace, Move or Copy addressed an empty slot.
    #[error("cannot {op} undefined path: {path}")]
    Precondition { op: OperationKind, path: String },
    #[error("{0}")]
    Argument(String),
    #[error("invalid array index at {path}")]
    InvalidIndex { path: String },
    #[error("value at {path} is not a container")]
    NotContainer { path: String },
    #[error("test failed at {path}")]
    TestFailed { path: String },
    #[error(transparent)]
    Pointer(JsonPointerError),
}

impl From<JsonPointerError> for PatchError {
    fn from(err: JsonPointerError) -> Self {
        match err {
            JsonPointerError::NotFound { path } => PatchError::Address { path },
            JsonPointerError::InvalidIndex { path } => PatchError::InvalidIndex { path },
            JsonPointerError::NotContainer { path } => PatchError::NotContainer { path },
            other => PatchError::Pointer(other),
        }
    }
}

pub type PatchResult<T> = Result<T, PatchError>;

// ── Kind ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Add,
    Remove,
    Replace,
    Move,
    Copy,
    Test,
}

impl OperationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::Add => "add",
            OperationKind::Remove => "remove",
            OperationKind::Replace => "replace",
            OperationKind::Move => "move",
            OperationKind::Copy => "copy",
            OperationKind::Test => "test",
        }
    }

    pub fn parse(name: &str) -> PatchResult<Self> {
        match name {
            "add" => Ok(OperationKind::Add),
            "remove" => Ok(OperationKind::Remove),
            "replace" => Ok(OperationKind::Replace),
            "move" => Ok(OperationKind::Move),
            "copy" => Ok(OperationKind::Copy),
            "test" => Ok(OperationKind::Test),
            other => Err(PatchError::Argument(format!("unknown operation: {other}"))),
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Operation ─────────────────────────────────────────────────────────────

/// One edit against a JSON document.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    Add {
        path: Pointer,
        value: Value,
    },
    Remove {
        path: Pointer,
    },
    Replace {
        path: Pointer,
        value: Value,
        /// Value the slot held when the operation was produced by a diff.
        old_value: Option<Value>,
    },
    Move {
        path: Pointer,
        from: Pointer,
    },
    Copy {
        path: Pointer,
        from: Pointer,
    },
    Test {
        path: Pointer,
        value: Value,
    },
}

/// Result of applying a single operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    /// A Test operation ran; carries whether it held.
    Tested(bool),
}

impl Operation {
    /// Checked constructor from loose parts.
    ///
    /// Move and Copy require `from`; Add, Replace and Test require `value`.
    /// Parts a variant does not carry are ignored.
    pub fn new(
        kind: OperationKind,
        path: Pointer,
        value: Option<Value>,
        from: Option<Pointer>,
        old_value: Option<Value>,
    ) -> PatchResult<Self> {
        let need_value = |value: Option<Value>| {
            value.ok_or_else(|| {
                PatchError::Argument(format!("value is required for {kind} operations"))
            })
        };
        let need_from = |from: Option<Pointer>| {
            from.ok_or_else(|| {
                PatchError::Argument(format!("from value is required for {kind} operations"))
            })
        };
        Ok(match kind {
            OperationKind::Add => Operation::Add {
                path,
                value: need_value(value)?,
            },
            OperationKind::Remove => Operation::Remove { path },
            OperationKind::Replace => Operation::Replace {
                path,
                value: need_value(value)?,
                old_value,
            },
            OperationKind::Move => Operation::Move {
                path,
                from: need_from(from)?,
            },
            OperationKind::Copy => Operation::Copy {
                path,
                from: need_from(from)?,
            },
            OperationKind::Test => Operation::Test {
                path,
                value: need_value(value)?,
            },
        })
    }

    pub fn add(path: Pointer, value: Value) -> Self {
        Operation::Add { path, value }
    }

    pub fn remove(path: Pointer) -> Self {
        Operation::Remove { path }
    }

    pub fn replace(path: Pointer, value: Value, old_value: Option<Value>) -> Self {
        Operation::Replace {
            path,
            value,
            old_value,
        }
    }

    pub fn move_value(from: Pointer, path: Pointer) -> Self {
        Operation::Move { path, from }
    }

    pub fn copy_value(from: Pointer, path: Pointer) -> Self {
        Operation::Copy { path, from }
    }

    pub fn test(path: Pointer, value: Value) -> Self {
        Operation::Test { path, value }
    }

    pub fn kind(&self) -> OperationKind {
        match self {
            Operation::Add { .. } => OperationKind::Add,
            Operation::Remove { .. } => OperationKind::Remove,
            Operation::Replace { .. } => OperationKind::Replace,
            Operation::Move { .. } => OperationKind::Move,
            Operation::Copy { .. } => OperationKind::Copy,
            Operation::Test { .. } => OperationKind::Test,
        }
    }

    pub fn path(&self) -> &Pointer {
        match self {
            Operation::Add { path, .. }
            | Operation::Remove { path }
            | Operation::Replace { path, .. }
            | Operation::Move { path, .. }
            | Operation::Copy { path, .. }
            | Operation::Test { path, .. } => path,
        }
    }

    pub fn value(&self) -> Option<&Value> {
        match self {
            Operation::Add { value, .. }
            | Operation::Replace { value, .. }
            | Operation::Test { value, .. } => Some(value),
            _ => None,
        }
    }

    pub fn from(&self) -> Option<&Pointer> {
        match self {
            Operation::Move { from, .. } | Operation::Copy { from, .. } => Some(from),
            _ => None,
        }
    }

    pub fn old_value(&self) -> Option<&Value> {
        match self {
            Operation::Replace { old_value, .. } => old_value.as_ref(),
            _ => None,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", crate::codec::json::to_json(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ptr(s: &str) -> Pointer {
        Pointer::parse(s).unwrap()
    }

    #[test]
    fn factory_requires_from_for_move_and_copy() {
        for kind in [OperationKind::Move, OperationKind::Copy] {
            let err = Operation::new(kind, ptr("/a"), None, None, None).unwrap_err();
            assert_eq!(
                err,
                PatchError::Argument(format!("from value is required for {kind} operations"))
            );
        }
    }

    #[test]
    fn factory_requires_value() {
        for kind in [OperationKind::Add, OperationKind::Replace, OperationKind::Test] {
            assert!(matches!(
                Operation::new(kind, ptr("/a"), None, None, None),
                Err(PatchError::Argument(_))
            ));
        }
        assert_eq!(
            Operation::new(OperationKind::Remove, ptr("/a"), None, None, None).unwrap(),
            Operation::remove(ptr("/a"))
        );
    }

    #[test]
    fn factory_keeps_old_value_on_replace() {
        let op = Operation::new(
            OperationKind::Replace,
            ptr("/a"),
            Some(json!(2)),
            None,
            Some(json!(1)),
        )
        .unwrap();
        assert_eq!(op.old_value(), Some(&json!(1)));
        assert_eq!(op.kind(), OperationKind::Replace);
    }

    #[test]
    fn kind_names_roundtrip() {
        for kind in [
            OperationKind::Add,
            OperationKind::Remove,
            OperationKind::Replace,
            OperationKind::Move,
            OperationKind::Copy,
            OperationKind::Test,
        ] {
            assert_eq!(OperationKind::parse(kind.as_str()).unwrap(), kind);
        }
        assert!(OperationKind::parse("str_ins").is_err());
    }
}
