use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::util::{escape_component, parse_json_pointer};
use crate::JsonPointerError;

#[derive(Debug)]
struct Node {
    parent: Option<Arc<Node>>,
    segment: String,
    depth: usize,
}

/// An immutable path of unescaped segments.
///
/// Pointers are persistent: [`Pointer::add`] returns a new pointer that shares
/// every existing segment with the receiver, so deriving child paths while
/// walking a document is cheap and never touches the original.
///
/// ```
/// use json_store_pointer::Pointer;
///
/// let base = Pointer::parse("/a~1b").unwrap();
/// let child = base.add("c");
/// assert_eq!(base.to_string(), "/a~1b");
/// assert_eq!(child.segments(), vec!["a/b", "c"]);
/// ```
#[derive(Clone, Default)]
pub struct Pointer {
    tail: Option<Arc<Node>>,
}

impl Pointer {
    /// The root pointer, addressing the whole value. Encodes as `""`.
    pub fn root() -> Self {
        Self { tail: None }
    }

    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        segments
            .into_iter()
            .fold(Self::root(), |pointer, segment| pointer.add(segment))
    }

    /// Parse the encoded form, e.g. `/foo/0/a~1b`.
    pub fn parse(encoded: &str) -> Result<Self, JsonPointerError> {
        Ok(Self::from_segments(parse_json_pointer(encoded)?))
    }

    /// Return a new pointer with `segment` appended.
    pub fn add(&self, segment: impl Into<String>) -> Self {
        Self {
            tail: Some(Arc::new(Node {
                parent: self.tail.clone(),
                segment: segment.into(),
                depth: self.len() + 1,
            })),
        }
    }

    pub fn len(&self) -> usize {
        self.tail.as_ref().map_or(0, |node| node.depth)
    }

    pub fn is_root(&self) -> bool {
        self.tail.is_none()
    }

    /// Same as [`Pointer::is_root`].
    pub fn is_empty(&self) -> bool {
        self.is_root()
    }

    /// The final segment, `None` for the root.
    pub fn last(&self) -> Option<&str> {
        self.tail.as_deref().map(|node| node.segment.as_str())
    }

    /// The pointer without its final segment, `None` for the root.
    pub fn parent(&self) -> Option<Pointer> {
        self.tail.as_ref().map(|node| Pointer {
            tail: node.parent.clone(),
        })
    }

    /// Decoded segments, first to last.
    pub fn segments(&self) -> Vec<String> {
        self.iter().map(str::to_string).collect()
    }

    pub fn iter(&self) -> std::vec::IntoIter<&str> {
        let mut out = Vec::with_capacity(self.len());
        let mut cursor = self.tail.as_deref();
        while let Some(node) = cursor {
            out.push(node.segment.as_str());
            cursor = node.parent.as_deref();
        }
        out.reverse();
        out.into_iter()
    }

    /// True when `prefix` is this pointer or one of its ancestors.
    pub fn starts_with(&self, prefix: &Pointer) -> bool {
        let depth = prefix.len();
        if depth > self.len() {
            return false;
        }
        let mut cursor = self.clone();
        while cursor.len() > depth {
            match cursor.parent() {
                Some(parent) => cursor = parent,
                None => return false,
            }
        }
        cursor == *prefix
    }
}

impl PartialEq for Pointer {
    fn eq(&self, other: &Self) -> bool {
        let mut a = self.tail.as_ref();
        let mut b = other.tail.as_ref();
        loop {
            match (a, b) {
                (None, None) => return true,
                (Some(x), Some(y)) => {
                    if Arc::ptr_eq(x, y) {
                        return true;
                    }
                    if x.depth != y.depth || x.segment != y.segment {
                        return false;
                    }
                    a = x.parent.as_ref();
                    b = y.parent.as_ref();
                }
                _ => return false,
            }
        }
    }
}

impl Eq for Pointer {}

impl Hash for Pointer {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        for segment in self.iter() {
            segment.hash(state);
        }
    }
}

impl fmt::Display for Pointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in self.iter() {
            write!(f, "/{}", escape_component(segment))?;
        }
        Ok(())
    }
}

impl fmt::Debug for Pointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pointer({:?})", self.to_string())
    }
}

impl FromStr for Pointer {
    type Err = JsonPointerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl<S: Into<String>> FromIterator<S> for Pointer {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self::from_segments(iter)
    }
}

impl Serialize for Pointer {
    fn serialize<Ser: Serializer>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Pointer {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        Pointer::parse(&encoded).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_encodes_empty() {
        let root = Pointer::root();
        assert!(root.is_root());
        assert_eq!(root.len(), 0);
        assert_eq!(root.to_string(), "");
        assert_eq!(root.last(), None);
        assert!(root.parent().is_none());
    }

    #[test]
    fn add_leaves_receiver_untouched() {
        let a = Pointer::root().add("a");
        let ab = a.add("b");
        let ac = a.add("c");
        assert_eq!(a.segments(), vec!["a"]);
        assert_eq!(ab.segments(), vec!["a", "b"]);
        assert_eq!(ac.segments(), vec!["a", "c"]);
        assert_eq!(ab.parent(), Some(a.clone()));
    }

    #[test]
    fn equality_is_by_segments() {
        let shared = Pointer::root().add("x").add("y");
        let built = Pointer::from_segments(["x", "y"]);
        assert_eq!(shared, built);
        assert_ne!(shared, Pointer::from_segments(["x"]));
        assert_ne!(shared, Pointer::from_segments(["x", "z"]));
    }

    #[test]
    fn escapes_on_display() {
        let p = Pointer::from_segments(["a/b", "c~d", ""]);
        assert_eq!(p.to_string(), "/a~1b/c~0d/");
        assert_eq!(Pointer::parse(&p.to_string()).unwrap(), p);
    }

    #[test]
    fn starts_with_ancestors() {
        let p = Pointer::from_segments(["a", "b", "c"]);
        assert!(p.starts_with(&Pointer::root()));
        assert!(p.starts_with(&Pointer::from_segments(["a", "b"])));
        assert!(p.starts_with(&p));
        assert!(!p.starts_with(&Pointer::from_segments(["b"])));
        assert!(!Pointer::from_segments(["a"]).starts_with(&p));
    }

    #[test]
    fn parse_rejects_relative() {
        assert_eq!(
            "foo".parse::<Pointer>(),
            Err(JsonPointerError::PointerInvalid {
                pointer: "foo".into()
            })
        );
    }
}
