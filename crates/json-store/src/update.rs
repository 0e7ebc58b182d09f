use std::fmt;

use json_store_patch::Patch;
use json_store_util::Lazy;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UpdateType {
    Add,
    Update,
    Delete,
}

impl UpdateType {
    pub fn as_str(&self) -> &'static str {
        match self {
            UpdateType::Add => "add",
            UpdateType::Update => "update",
            UpdateType::Delete => "delete",
        }
    }
}

impl fmt::Display for UpdateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A replaced item together with the patch that turns `old_item` into `item`.
#[derive(Debug)]
pub struct ItemUpdated {
    pub id: String,
    pub item: Value,
    pub old_item: Value,
    pub index: usize,
    /// Position before the write. Updates replace in place, so this always
    /// equals `index`.
    pub previous_index: usize,
    diff: Lazy<Patch>,
}

impl ItemUpdated {
    /// The diff is computed on first call when the writer did not supply one.
    pub(crate) fn computed(id: String, old_item: Value, item: Value, index: usize) -> Self {
        let (from, to) = (old_item.clone(), item.clone());
        Self {
            id,
            item,
            old_item,
            index,
            previous_index: index,
            diff: Lazy::new(move || Patch::diff(&from, &to)),
        }
    }

    pub(crate) fn patched(id: String, old_item: Value, item: Value, index: usize, patch: Patch) -> Self {
        Self {
            id,
            item,
            old_item,
            index,
            previous_index: index,
            diff: Lazy::ready(patch),
        }
    }

    pub fn diff(&self) -> &Patch {
        self.diff.get()
    }
}

/// One committed change, as delivered to subscribers.
#[derive(Debug)]
pub enum Update {
    Added { id: String, item: Value, index: usize },
    Updated(ItemUpdated),
    Deleted { id: String, index: usize },
}

impl Update {
    pub fn kind(&self) -> UpdateType {
        match self {
            Update::Added { .. } => UpdateType::Add,
            Update::Updated(_) => UpdateType::Update,
            Update::Deleted { .. } => UpdateType::Delete,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Update::Added { id, .. } | Update::Deleted { id, .. } => id,
            Update::Updated(updated) => &updated.id,
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Update::Added { index, .. } | Update::Deleted { index, .. } => *index,
            Update::Updated(updated) => updated.index,
        }
    }

    /// The item as stored after the change. `None` for deletions.
    pub fn item(&self) -> Option<&Value> {
        match self {
            Update::Added { item, .. } => Some(item),
            Update::Updated(updated) => Some(&updated.item),
            Update::Deleted { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn computed_diff_is_lazy() {
        let updated = ItemUpdated::computed("1".into(), json!({"id": "1", "n": 1}), json!({"id": "1", "n": 2}), 0);
        assert!(!updated.diff.is_initialized());
        assert_eq!(updated.diff().to_string(), r#"[{"op":"replace","path":"/n","value":2}]"#);
        assert!(updated.diff.is_initialized());
    }

    #[test]
    fn accessors() {
        let added = Update::Added { id: "a".into(), item: json!({"id": "a"}), index: 3 };
        assert_eq!(added.kind(), UpdateType::Add);
        assert_eq!((added.id(), added.index()), ("a", 3));
        let deleted = Update::Deleted { id: "b".into(), index: 0 };
        assert_eq!(deleted.kind().to_string(), "delete");
        assert!(deleted.item().is_none());
    }
}
