use json_store_pointer::{
    find_slot_mut, format_json_pointer, get, parse_json_pointer, JsonPointerError, Pointer,
};
use serde_json::json;
use std::collections::HashSet;

#[test]
fn pointer_parse_format_roundtrip_matrix() {
    let cases = [
        "",
        "/",
        "/foo",
        "/foo/bar",
        "/a~0b/c~1d",
        "/arr/0",
        "/~0/~1",
        "/~01",
        "/foo///",
    ];

    for encoded in cases {
        let path = parse_json_pointer(encoded).expect("valid pointer");
        assert_eq!(format_json_pointer(&path), encoded);

        let pointer = Pointer::parse(encoded).expect("valid pointer");
        assert_eq!(pointer.segments(), path);
        assert_eq!(pointer.to_string(), encoded);
    }
}

#[test]
fn pointer_segments_with_reserved_characters() {
    let segments = ["a/b", "~", "~1", "/~/", ""];
    let pointer = Pointer::from_segments(segments);
    let encoded = pointer.to_string();
    assert_eq!(encoded, "/a~1b/~0/~01/~1~0~1/");
    assert_eq!(Pointer::parse(&encoded).unwrap().segments(), segments);
}

#[test]
fn pointer_get_matrix() {
    let doc = json!({"foo": {"bar": [10, 20, null]}, "": {"": "empty"}});

    let cases: &[(&str, Option<serde_json::Value>)] = &[
        ("", Some(doc.clone())),
        ("/foo/bar/0", Some(json!(10))),
        ("/foo/bar/2", Some(json!(null))),
        ("/foo/bar/3", None),
        ("/foo/bar/-", None),
        ("/foo/baz/0", None),
        ("/foo/bar/0/deeper", None),
        ("//", Some(json!("empty"))),
    ];

    for (encoded, expected) in cases {
        let pointer = Pointer::parse(encoded).unwrap();
        assert_eq!(get(&doc, pointer.iter()), expected.as_ref(), "{encoded}");
    }
}

#[test]
fn pointer_write_navigation_matrix() {
    let mut doc = json!({"a": {"list": [1]}, "n": 1});

    find_slot_mut(&mut doc, &Pointer::parse("/a/list/-").unwrap())
        .unwrap()
        .set(json!(2))
        .unwrap();
    find_slot_mut(&mut doc, &Pointer::parse("/a/new").unwrap())
        .unwrap()
        .set(json!({}))
        .unwrap();
    assert_eq!(doc, json!({"a": {"list": [1, 2], "new": {}}, "n": 1}));

    let failures = [
        ("/missing/x", JsonPointerError::NotFound { path: "/missing".into() }),
        ("/a/list/7/x", JsonPointerError::NotFound { path: "/a/list/7".into() }),
        ("/n/x", JsonPointerError::NotContainer { path: "/n".into() }),
        ("", JsonPointerError::NoParent),
    ];
    for (encoded, expected) in failures {
        let pointer = Pointer::parse(encoded).unwrap();
        assert_eq!(find_slot_mut(&mut doc, &pointer).unwrap_err(), expected, "{encoded}");
    }
}

#[test]
fn pointer_hash_agrees_with_eq() {
    let shared = Pointer::root().add("a");
    let set: HashSet<Pointer> = [shared.add("b"), Pointer::from_segments(["a", "b"])]
        .into_iter()
        .collect();
    assert_eq!(set.len(), 1);
}

#[test]
fn pointer_serde_as_string() {
    let pointer = Pointer::from_segments(["x", "y/z"]);
    let encoded = serde_json::to_value(&pointer).unwrap();
    assert_eq!(encoded, json!("/x/y~1z"));
    let decoded: Pointer = serde_json::from_value(encoded).unwrap();
    assert_eq!(decoded, pointer);
    assert!(serde_json::from_value::<Pointer>(json!("relative")).is_err());
}
