use crate::JsonPointerError;

/// Unescapes a JSON Pointer path component.
///
/// `~1` is replaced with `/` and `~0` is replaced with `~`.
pub fn unescape_component(component: &str) -> String {
    if !component.contains('~') {
        return component.to_string();
    }
    // ~1 first, otherwise "~01" would decode to "/" instead of "~1"
    component.replace("~1", "/").replace("~0", "~")
}

/// Escapes a JSON Pointer path component.
///
/// `~` is replaced with `~0` and `/` is replaced with `~1`.
pub fn escape_component(component: &str) -> String {
    if !component.contains('/') && !component.contains('~') {
        return component.to_string();
    }
    component.replace('~', "~0").replace('/', "~1")
}

/// Parse an encoded pointer into unescaped components.
///
/// The empty string is the root and yields no components. Anything else must
/// start with `/`.
pub fn parse_json_pointer(pointer: &str) -> Result<Vec<String>, JsonPointerError> {
    if pointer.is_empty() {
        return Ok(Vec::new());
    }
    if !pointer.starts_with('/') {
        return Err(JsonPointerError::PointerInvalid {
            pointer: pointer.to_string(),
        });
    }
    Ok(pointer[1..].split('/').map(unescape_component).collect())
}

/// Format components into an encoded pointer. The root formats as `""`.
pub fn format_json_pointer<S: AsRef<str>>(path: &[S]) -> String {
    let mut out = String::new();
    for component in path {
        out.push('/');
        out.push_str(&escape_component(component.as_ref()));
    }
    out
}

/// Check if a string is a canonical non-negative array index (`0`, `17`, not `01`).
pub fn is_valid_index(index: &str) -> bool {
    if index.is_empty() {
        return false;
    }
    let bytes = index.as_bytes();
    if bytes.len() > 1 && bytes[0] == b'0' {
        return false;
    }
    bytes.iter().all(|&b| b.is_ascii_digit())
}

/// Parse an array index step. `-` is not an index and yields `None`.
pub(crate) fn parse_index(step: &str) -> Option<usize> {
    if !is_valid_index(step) {
        return None;
    }
    step.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unescape_component() {
        assert_eq!(unescape_component("foo"), "foo");
        assert_eq!(unescape_component("a~0b"), "a~b");
        assert_eq!(unescape_component("c~1d"), "c/d");
        assert_eq!(unescape_component("a~0b~1c"), "a~b/c");
        assert_eq!(unescape_component("~01"), "~1");
    }

    #[test]
    fn test_escape_component() {
        assert_eq!(escape_component("foo"), "foo");
        assert_eq!(escape_component("a~b"), "a~0b");
        assert_eq!(escape_component("c/d"), "c~1d");
        assert_eq!(escape_component("~1"), "~01");
        assert_eq!(escape_component("//"), "~1~1");
    }

    #[test]
    fn test_parse_json_pointer() {
        assert_eq!(parse_json_pointer("").unwrap(), Vec::<String>::new());
        assert_eq!(parse_json_pointer("/").unwrap(), vec![""]);
        assert_eq!(parse_json_pointer("/foo/bar").unwrap(), vec!["foo", "bar"]);
        assert_eq!(parse_json_pointer("/a~0b/c~1d").unwrap(), vec!["a~b", "c/d"]);
        assert_eq!(parse_json_pointer("/foo///").unwrap(), vec!["foo", "", "", ""]);
        assert!(parse_json_pointer("foo").is_err());
    }

    #[test]
    fn test_format_json_pointer() {
        assert_eq!(format_json_pointer::<&str>(&[]), "");
        assert_eq!(format_json_pointer(&["foo"]), "/foo");
        assert_eq!(format_json_pointer(&["a~b", "c/d"]), "/a~0b/c~1d");
        assert_eq!(format_json_pointer(&[""]), "/");
    }

    #[test]
    fn test_is_valid_index() {
        assert!(is_valid_index("0"));
        assert!(is_valid_index("123"));
        assert!(!is_valid_index("-1"));
        assert!(!is_valid_index("-"));
        assert!(!is_valid_index("1.5"));
        assert!(!is_valid_index(""));
        assert!(!is_valid_index("01"));
    }
}
