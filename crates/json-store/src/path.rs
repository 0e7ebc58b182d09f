use json_store_pointer::Pointer;

/// Anything that names a field inside an item.
///
/// A plain string is one segment (`"a/b"` is the key `a/b`, not a nested
/// path). Use a [`Pointer`] or a segment array for nested fields, and `()` for
/// the whole item.
pub trait IntoPath {
    fn into_path(self) -> Pointer;
}

impl IntoPath for Pointer {
    fn into_path(self) -> Pointer {
        self
    }
}

impl IntoPath for &Pointer {
    fn into_path(self) -> Pointer {
        self.clone()
    }
}

impl IntoPath for &str {
    fn into_path(self) -> Pointer {
        Pointer::root().add(self)
    }
}

impl IntoPath for String {
    fn into_path(self) -> Pointer {
        Pointer::root().add(self)
    }
}

impl IntoPath for &String {
    fn into_path(self) -> Pointer {
        Pointer::root().add(self.as_str())
    }
}

impl<const N: usize> IntoPath for [&str; N] {
    fn into_path(self) -> Pointer {
        Pointer::from_segments(self)
    }
}

impl IntoPath for &[&str] {
    fn into_path(self) -> Pointer {
        Pointer::from_segments(self.iter().copied())
    }
}

impl IntoPath for Vec<String> {
    fn into_path(self) -> Pointer {
        Pointer::from_segments(self)
    }
}

impl IntoPath for () {
    fn into_path(self) -> Pointer {
        Pointer::root()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_is_single_segment() {
        assert_eq!("a/b".into_path().segments(), vec!["a/b"]);
        assert_eq!("key".to_string().into_path().to_string(), "/key");
    }

    #[test]
    fn arrays_are_nested() {
        assert_eq!(["key", "key2"].into_path().to_string(), "/key/key2");
        assert!(().into_path().is_root());
    }
}
