use std::fmt;

use serde_json::Value;

/// `count` items starting at `start`, clamped to the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Range {
    pub start: usize,
    pub count: usize,
}

impl Range {
    pub fn new(start: usize, count: usize) -> Self {
        Self { start, count }
    }

    pub fn apply(&self, items: &[Value]) -> Vec<Value> {
        let start = self.start.min(items.len());
        let end = self.start.saturating_add(self.count).min(items.len());
        items[start..end].to_vec()
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "range({}, {})", self.start, self.count)
    }
}
