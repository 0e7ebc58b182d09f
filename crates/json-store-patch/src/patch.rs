use std::fmt;

use serde_json::Value;

use crate::diff::diff;
use crate::types::{Operation, Outcome, PatchError, PatchResult};

/// An ordered edit script.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Patch {
    operations: Vec<Operation>,
}

impl Patch {
    pub fn new(operations: Vec<Operation>) -> Self {
        Self { operations }
    }

    /// The script that turns `from` into `to`. Empty unless both are
    /// containers of the same kind.
    pub fn diff(from: &Value, to: &Value) -> Self {
        Self::new(diff(from, to))
    }

    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    pub fn into_operations(self) -> Vec<Operation> {
        self.operations
    }

    pub fn push(&mut self, op: Operation) {
        self.operations.push(op);
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Operation> {
        self.operations.iter()
    }

    /// Apply every operation to `target` in order.
    ///
    /// Stops at the first failing operation, or at a Test that does not hold.
    /// Operations before it stay applied.
    pub fn apply_in_place(&self, target: &mut Value) -> PatchResult<()> {
        for op in &self.operations {
            if let Outcome::Tested(false) = op.apply(target)? {
                return Err(PatchError::TestFailed {
                    path: op.path().to_string(),
                });
            }
        }
        Ok(())
    }

    /// By-value form of [`Patch::apply_in_place`]: yields the patched value or
    /// only the error.
    pub fn apply(&self, mut target: Value) -> PatchResult<Value> {
        self.apply_in_place(&mut target)?;
        Ok(target)
    }
}

impl From<Vec<Operation>> for Patch {
    fn from(operations: Vec<Operation>) -> Self {
        Self::new(operations)
    }
}

impl FromIterator<Operation> for Patch {
    fn from_iter<T: IntoIterator<Item = Operation>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl IntoIterator for Patch {
    type Item = Operation;
    type IntoIter = std::vec::IntoIter<Operation>;

    fn into_iter(self) -> Self::IntoIter {
        self.operations.into_iter()
    }
}

impl<'a> IntoIterator for &'a Patch {
    type Item = &'a Operation;
    type IntoIter = std::slice::Iter<'a, Operation>;

    fn into_iter(self) -> Self::IntoIter {
        self.operations.iter()
    }
}

impl fmt::Display for Patch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, op) in self.operations.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{op}")?;
        }
        f.write_str("]")
    }
}
