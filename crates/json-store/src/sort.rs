use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use json_store_pointer::{get, Pointer};
use json_store_util::sort_order;
use serde_json::Value;

use crate::error::QueryError;
use crate::path::IntoPath;

pub type CompareFn = Arc<dyn Fn(&Value, &Value) -> Ordering + Send + Sync>;

#[derive(Clone)]
pub enum SortKey {
    /// Order by the value at a field; absent and `null` sort first.
    Field(Pointer),
    Comparator(CompareFn),
}

impl fmt::Debug for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortKey::Field(path) => f.debug_tuple("Field").field(path).finish(),
            SortKey::Comparator(_) => f.write_str("Comparator(..)"),
        }
    }
}

/// Stable, copying sort. The input is never reordered.
#[derive(Debug, Clone)]
pub struct Sort {
    key: SortKey,
    descending: bool,
}

impl Sort {
    pub fn by_field(path: impl IntoPath, descending: bool) -> Self {
        Self {
            key: SortKey::Field(path.into_path()),
            descending,
        }
    }

    pub fn by(compare: impl Fn(&Value, &Value) -> Ordering + Send + Sync + 'static, descending: bool) -> Self {
        Self {
            key: SortKey::Comparator(Arc::new(compare)),
            descending,
        }
    }

    pub fn key(&self) -> &SortKey {
        &self.key
    }

    pub fn is_descending(&self) -> bool {
        self.descending
    }

    fn directed(&self, ord: Ordering) -> Ordering {
        if self.descending {
            ord.reverse()
        } else {
            ord
        }
    }

    pub fn apply(&self, items: &[Value]) -> Vec<Value> {
        let mut out = items.to_vec();
        match &self.key {
            SortKey::Field(path) => {
                let segments: Vec<&str> = path.iter().collect();
                out.sort_by(|a, b| {
                    let (a, b) = (get(a, segments.iter().copied()), get(b, segments.iter().copied()));
                    self.directed(sort_order(a, b))
                });
            }
            SortKey::Comparator(compare) => out.sort_by(|a, b| self.directed(compare(a, b))),
        }
        out
    }

    /// `Sort(/field, +)`, `-` when descending. Comparator sorts cannot render.
    pub fn to_query_string(&self) -> Result<String, QueryError> {
        match &self.key {
            SortKey::Field(path) => Ok(format!(
                "Sort({path}, {})",
                if self.descending { '-' } else { '+' }
            )),
            SortKey::Comparator(_) => Err(QueryError::SerializationUnsupported {
                what: "comparator sort",
            }),
        }
    }
}
