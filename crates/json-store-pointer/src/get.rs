use serde_json::Value;

use crate::util::parse_index;

/// Read navigation: follow `path` into `val`.
///
/// Returns `None` as soon as a step is absent, walks into a primitive, or is
/// not a valid index on an array. `-` never resolves.
pub fn get<'a, I, S>(val: &'a Value, path: I) -> Option<&'a Value>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut current = val;
    for step in path {
        let step = step.as_ref();
        current = match current {
            Value::Array(arr) => arr.get(parse_index(step)?)?,
            Value::Object(map) => map.get(step)?,
            _ => return None,
        };
    }
    Some(current)
}

/// Mutable counterpart of [`get`].
pub fn get_mut<'a, I, S>(val: &'a mut Value, path: I) -> Option<&'a mut Value>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut current = val;
    for step in path {
        let step = step.as_ref();
        current = match current {
            Value::Array(arr) => arr.get_mut(parse_index(step)?)?,
            Value::Object(map) => map.get_mut(step)?,
            _ => return None,
        };
    }
    Some(current)
}
