use serde_json::Value;

use crate::util::{is_valid_index, parse_index};
use crate::{JsonPointerError, Pointer};

/// A writable slot: the container that holds the final segment of a path,
/// plus that segment.
///
/// Obtained from [`find_slot_mut`]. Nothing is written until [`SlotMut::set`]
/// or [`SlotMut::remove`] is called, so callers can inspect the slot and bail
/// out without touching the document.
#[derive(Debug)]
pub struct SlotMut<'a> {
    container: &'a mut Value,
    key: String,
    path: Pointer,
}

impl<'a> SlotMut<'a> {
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn path(&self) -> &Pointer {
        &self.path
    }

    pub fn is_array(&self) -> bool {
        self.container.is_array()
    }

    /// Current value in the slot, `None` if the slot is empty.
    pub fn get(&self) -> Option<&Value> {
        match &*self.container {
            Value::Array(arr) => arr.get(parse_index(&self.key)?),
            Value::Object(map) => map.get(&self.key),
            _ => None,
        }
    }

    /// Check that a set would succeed, without writing.
    pub fn check_set(&self) -> Result<(), JsonPointerError> {
        match &*self.container {
            Value::Array(arr) => self.insert_position(arr.len()).map(|_| ()),
            _ => Ok(()),
        }
    }

    /// Set the slot. On an array, index `len` (or `-`) appends, a smaller index
    /// overwrites and a larger one is an error.
    pub fn set(self, value: Value) -> Result<(), JsonPointerError> {
        match self.container {
            Value::Array(arr) => {
                let idx = insert_position(&self.key, arr.len(), &self.path)?;
                if idx == arr.len() {
                    arr.push(value);
                } else {
                    arr[idx] = value;
                }
                Ok(())
            }
            Value::Object(map) => {
                map.insert(self.key, value);
                Ok(())
            }
            _ => Err(JsonPointerError::NotContainer {
                path: self.path.to_string(),
            }),
        }
    }

    /// Delete the slot, returning what it held. Array elements after it shift
    /// down by one.
    pub fn remove(self) -> Option<Value> {
        match self.container {
            Value::Array(arr) => {
                let idx = parse_index(&self.key)?;
                if idx < arr.len() {
                    Some(arr.remove(idx))
                } else {
                    None
                }
            }
            Value::Object(map) => map.remove(&self.key),
            _ => None,
        }
    }

    fn insert_position(&self, len: usize) -> Result<usize, JsonPointerError> {
        insert_position(&self.key, len, &self.path)
    }
}

fn insert_position(key: &str, len: usize, path: &Pointer) -> Result<usize, JsonPointerError> {
    if key == "-" {
        return Ok(len);
    }
    if !is_valid_index(key) {
        return Err(JsonPointerError::InvalidIndex {
            path: path.to_string(),
        });
    }
    match key.parse::<usize>() {
        Ok(idx) if idx <= len => Ok(idx),
        _ => Err(JsonPointerError::InvalidIndex {
            path: path.to_string(),
        }),
    }
}

/// Write navigation: walk every segment but the last and return the slot the
/// last segment names.
///
/// Fails with [`JsonPointerError::NotFound`] naming the failing prefix as soon
/// as an intermediate container is absent, and with
/// [`JsonPointerError::NoParent`] for the root pointer.
pub fn find_slot_mut<'a>(doc: &'a mut Value, path: &Pointer) -> Result<SlotMut<'a>, JsonPointerError> {
    let segments = path.segments();
    let Some((key, parents)) = segments.split_last() else {
        return Err(JsonPointerError::NoParent);
    };

    let mut prefix = Pointer::root();
    let mut current = doc;
    for step in parents {
        prefix = prefix.add(step.as_str());
        current = match current {
            Value::Array(arr) => {
                let idx = parse_index(step).ok_or_else(|| JsonPointerError::NotFound {
                    path: prefix.to_string(),
                })?;
                arr.get_mut(idx).ok_or_else(|| JsonPointerError::NotFound {
                    path: prefix.to_string(),
                })?
            }
            Value::Object(map) => map.get_mut(step).ok_or_else(|| JsonPointerError::NotFound {
                path: prefix.to_string(),
            })?,
            _ => {
                return Err(JsonPointerError::NotFound {
                    path: prefix.to_string(),
                })
            }
        };
    }

    if !(current.is_array() || current.is_object()) {
        return Err(JsonPointerError::NotContainer {
            path: path.parent().unwrap_or_default().to_string(),
        });
    }

    Ok(SlotMut {
        container: current,
        key: key.clone(),
        path: path.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ptr(s: &str) -> Pointer {
        Pointer::parse(s).unwrap()
    }

    #[test]
    fn root_has_no_slot() {
        let mut doc = json!({});
        assert_eq!(
            find_slot_mut(&mut doc, &Pointer::root()).unwrap_err(),
            JsonPointerError::NoParent
        );
    }

    #[test]
    fn object_set_and_remove() {
        let mut doc = json!({"a": {"b": 1}});
        find_slot_mut(&mut doc, &ptr("/a/c")).unwrap().set(json!(2)).unwrap();
        assert_eq!(doc, json!({"a": {"b": 1, "c": 2}}));
        let removed = find_slot_mut(&mut doc, &ptr("/a/b")).unwrap().remove();
        assert_eq!(removed, Some(json!(1)));
        assert_eq!(doc, json!({"a": {"c": 2}}));
    }

    #[test]
    fn array_append_overwrite_and_gap() {
        let mut doc = json!([1, 2]);
        find_slot_mut(&mut doc, &ptr("/2")).unwrap().set(json!(3)).unwrap();
        find_slot_mut(&mut doc, &ptr("/-")).unwrap().set(json!(4)).unwrap();
        find_slot_mut(&mut doc, &ptr("/0")).unwrap().set(json!(0)).unwrap();
        assert_eq!(doc, json!([0, 2, 3, 4]));

        let err = find_slot_mut(&mut doc, &ptr("/9")).unwrap().set(json!(9));
        assert_eq!(err, Err(JsonPointerError::InvalidIndex { path: "/9".into() }));
        assert_eq!(doc, json!([0, 2, 3, 4]));
    }

    #[test]
    fn array_remove_shifts() {
        let mut doc = json!(["a", "b", "c"]);
        assert_eq!(find_slot_mut(&mut doc, &ptr("/0")).unwrap().remove(), Some(json!("a")));
        assert_eq!(doc, json!(["b", "c"]));
        assert_eq!(find_slot_mut(&mut doc, &ptr("/5")).unwrap().remove(), None);
    }

    #[test]
    fn absent_intermediate_names_prefix() {
        let mut doc = json!({"a": {}});
        let err = find_slot_mut(&mut doc, &ptr("/a/b/c/d")).unwrap_err();
        assert_eq!(err, JsonPointerError::NotFound { path: "/a/b".into() });
        assert_eq!(
            err.to_string(),
            "invalid path: /a/b doesn't exist in target"
        );
    }

    #[test]
    fn primitive_parent_is_not_a_container() {
        let mut doc = json!({"a": 1});
        let err = find_slot_mut(&mut doc, &ptr("/a/b")).unwrap_err();
        assert_eq!(err, JsonPointerError::NotContainer { path: "/a".into() });
    }

    #[test]
    fn slot_get_reads_current() {
        let mut doc = json!({"list": [10, 20]});
        let slot = find_slot_mut(&mut doc, &ptr("/list/1")).unwrap();
        assert_eq!(slot.key(), "1");
        assert!(slot.is_array());
        assert_eq!(slot.get(), Some(&json!(20)));
        assert!(slot.check_set().is_ok());
    }
}
