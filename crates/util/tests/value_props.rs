use std::cmp::Ordering;

use json_store_util::{deep_equal, sort_order};
use proptest::prelude::*;
use serde_json::{json, Map, Value};

fn leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        (-1000i64..1000).prop_map(|n| json!(n)),
        "[a-z]{0,6}".prop_map(Value::String),
    ]
}

fn value() -> impl Strategy<Value = Value> {
    leaf().prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::btree_map("[a-d]", inner, 0..4)
                .prop_map(|m| Value::Object(m.into_iter().collect::<Map<_, _>>())),
        ]
    })
}

proptest! {
    #[test]
    fn prop_deep_equal_reflexive(v in value()) {
        prop_assert!(deep_equal(&v, &v.clone()));
    }

    #[test]
    fn prop_deep_equal_symmetric(a in value(), b in value()) {
        prop_assert_eq!(deep_equal(&a, &b), deep_equal(&b, &a));
    }

    #[test]
    fn prop_deep_equal_agrees_with_eq_for_integers(a in value(), b in value()) {
        // integer-only values, so the Value PartialEq is exact
        prop_assert_eq!(deep_equal(&a, &b), a == b);
    }

    #[test]
    fn prop_sort_order_antisymmetric(a in leaf(), b in leaf()) {
        let ab = sort_order(Some(&a), Some(&b));
        let ba = sort_order(Some(&b), Some(&a));
        prop_assert_eq!(ab, ba.reverse());
    }

    #[test]
    fn prop_sort_order_absent_is_least(a in leaf()) {
        let ord = sort_order(None, Some(&a));
        prop_assert!(ord == Ordering::Less || a.is_null());
    }
}
