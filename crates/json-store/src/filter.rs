//! Filter chains.
//!
//! A [`Filter`] is a persistent singly linked chain of members: boolean
//! operators, leaf predicates and nested filters. Builders never touch the
//! receiver; they return a new filter that shares the receiver's chain.
//!
//! Evaluation splits the chain on OR, ANDs the members of each part and passes
//! an item when any non-empty part holds. Two predicates with no operator
//! between them are ANDed.

use std::fmt;
use std::sync::Arc;

use json_store_pointer::{get, Pointer};
use json_store_util::{deep_equal, is_truthy, js_gt, js_gte, js_lt, js_lte, strict_equal};
use regex::Regex;
use serde_json::Value;

use crate::error::QueryError;
use crate::path::IntoPath;

pub type TestFn = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoolOp {
    And,
    Or,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Comparison {
    LessThan,
    LessThanOrEqualTo,
    GreaterThan,
    GreaterThanOrEqualTo,
    EqualTo,
    NotEqualTo,
    DeepEqualTo,
    NotDeepEqualTo,
    In,
    Contains,
}

impl Comparison {
    fn token(&self) -> &'static str {
        match self {
            Comparison::LessThan => "lt",
            Comparison::LessThanOrEqualTo => "lte",
            Comparison::GreaterThan => "gt",
            Comparison::GreaterThanOrEqualTo => "gte",
            Comparison::EqualTo | Comparison::DeepEqualTo => "eq",
            Comparison::NotEqualTo | Comparison::NotDeepEqualTo => "ne",
            Comparison::In => "in",
            Comparison::Contains => "contains",
        }
    }

    fn test(&self, property: Option<&Value>, value: &Value) -> bool {
        match self {
            Comparison::LessThan => property.is_some_and(|p| js_lt(p, value)),
            Comparison::LessThanOrEqualTo => property.is_some_and(|p| js_lte(p, value)),
            Comparison::GreaterThan => property.is_some_and(|p| js_gt(p, value)),
            Comparison::GreaterThanOrEqualTo => property.is_some_and(|p| js_gte(p, value)),
            Comparison::EqualTo => property.is_some_and(|p| strict_equal(p, value)),
            Comparison::NotEqualTo => !property.is_some_and(|p| strict_equal(p, value)),
            Comparison::DeepEqualTo => property.is_some_and(|p| deep_equal(p, value)),
            Comparison::NotDeepEqualTo => !property.is_some_and(|p| deep_equal(p, value)),
            Comparison::In | Comparison::Contains => property.is_some_and(|p| holds(p, value)),
        }
    }
}

/// Membership for arrays, truthy key lookup for everything else.
fn holds(property: &Value, value: &Value) -> bool {
    match property {
        Value::Array(items) => items.iter().any(|item| strict_equal(item, value)),
        Value::Object(map) => {
            let key = match value {
                Value::String(s) => s.clone(),
                Value::Number(n) => n.to_string(),
                _ => return false,
            };
            map.get(&key).is_some_and(is_truthy)
        }
        _ => false,
    }
}

fn matches_pattern(property: Option<&Value>, pattern: &Regex) -> bool {
    match property {
        Some(Value::String(s)) => pattern.is_match(s),
        Some(v @ (Value::Number(_) | Value::Bool(_))) => pattern.is_match(&v.to_string()),
        _ => false,
    }
}

/// A leaf test over one item.
#[derive(Clone)]
pub enum Predicate {
    Compare {
        op: Comparison,
        path: Pointer,
        value: Value,
    },
    Matches {
        path: Pointer,
        pattern: Regex,
    },
    Custom(TestFn),
}

impl Predicate {
    pub fn test(&self, item: &Value) -> bool {
        let segments: Vec<&str> = self.path().map(|p| p.iter().collect()).unwrap_or_default();
        self.test_at(item, &segments)
    }

    /// The field this predicate reads. `None` for custom predicates.
    pub fn path(&self) -> Option<&Pointer> {
        match self {
            Predicate::Compare { path, .. } | Predicate::Matches { path, .. } => Some(path),
            Predicate::Custom(_) => None,
        }
    }

    /// `segments` is the decoded form of [`Predicate::path`].
    fn test_at(&self, item: &Value, segments: &[&str]) -> bool {
        let property = || get(item, segments.iter().copied());
        match self {
            Predicate::Compare { op, value, .. } => op.test(property(), value),
            Predicate::Matches { pattern, .. } => matches_pattern(property(), pattern),
            Predicate::Custom(test) => test(item),
        }
    }

    fn to_query_string(&self) -> Result<String, QueryError> {
        let (token, path, operand) = match self {
            Predicate::Compare { op, path, value } => (op.token(), path, value.to_string()),
            Predicate::Matches { path, pattern } => {
                ("match", path, Value::String(pattern.as_str().to_string()).to_string())
            }
            Predicate::Custom(_) => {
                return Err(QueryError::SerializationUnsupported {
                    what: "custom filter predicate",
                })
            }
        };
        if path.is_root() {
            return Ok(format!("{token}({operand})"));
        }
        let field = path.to_string();
        Ok(format!("{token}({},{operand})", &field[1..]))
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Predicate::Compare { op, path, value } => f
                .debug_struct("Compare")
                .field("op", op)
                .field("path", path)
                .field("value", value)
                .finish(),
            Predicate::Matches { path, pattern } => f
                .debug_struct("Matches")
                .field("path", path)
                .field("pattern", &pattern.as_str())
                .finish(),
            Predicate::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

#[derive(Debug, Clone)]
pub enum Member {
    Op(BoolOp),
    Leaf(Arc<Predicate>),
    Nested(Filter),
}

#[derive(Debug)]
struct Link {
    prev: Option<Arc<Link>>,
    member: Member,
}

/// A chain flattened for evaluation: AND tokens dropped, leaf paths decoded,
/// nested filters planned in turn. Built once per `apply`.
enum Step<'f> {
    Or,
    Leaf {
        predicate: &'f Predicate,
        segments: Vec<&'f str>,
    },
    Nested(Vec<Step<'f>>),
}

fn plan(filter: &Filter) -> Vec<Step<'_>> {
    let mut steps = Vec::new();
    let mut cursor = filter.tail.as_deref();
    while let Some(link) = cursor {
        match &link.member {
            Member::Op(BoolOp::And) => {}
            Member::Op(BoolOp::Or) => steps.push(Step::Or),
            Member::Leaf(predicate) => steps.push(Step::Leaf {
                predicate: &**predicate,
                segments: predicate.path().map(|p| p.iter().collect()).unwrap_or_default(),
            }),
            Member::Nested(nested) => steps.push(Step::Nested(plan(nested))),
        }
        cursor = link.prev.as_deref();
    }
    steps.reverse();
    steps
}

fn passes(steps: &[Step<'_>], item: &Value) -> bool {
    let mut saw_segment = false;
    for segment in steps.split(|step| matches!(step, Step::Or)) {
        if segment.is_empty() {
            continue;
        }
        saw_segment = true;
        let passed = segment.iter().all(|step| match step {
            Step::Leaf { predicate, segments } => predicate.test_at(item, segments),
            Step::Nested(nested) => passes(nested, item),
            Step::Or => true,
        });
        if passed {
            return true;
        }
    }
    !saw_segment
}

/// Persistent predicate chain over items.
///
/// ```
/// use json_store::Filter;
/// use serde_json::json;
///
/// let items = vec![
///     json!({"id": "1", "key": 5}),
///     json!({"id": "2", "key": 7}),
///     json!({"id": "3", "key": 4}),
/// ];
/// let small = Filter::new().less_than(5, "key");
/// assert_eq!(small.apply(&items), vec![json!({"id": "3", "key": 4})]);
/// assert_eq!(small.or().equal_to("2", "id").to_query_string().unwrap(), r#"lt(key,5)|eq(id,"2")"#);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Filter {
    tail: Option<Arc<Link>>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, member: Member) -> Self {
        Self {
            tail: Some(Arc::new(Link {
                prev: self.tail.clone(),
                member,
            })),
        }
    }

    fn compare(&self, op: Comparison, value: impl Into<Value>, path: impl IntoPath) -> Self {
        self.push(Member::Leaf(Arc::new(Predicate::Compare {
            op,
            path: path.into_path(),
            value: value.into(),
        })))
    }

    /// Chain members, first to last.
    pub fn members(&self) -> Vec<Member> {
        let mut out = Vec::new();
        let mut cursor = self.tail.as_deref();
        while let Some(link) = cursor {
            out.push(link.member.clone());
            cursor = link.prev.as_deref();
        }
        out.reverse();
        out
    }

    pub fn is_empty(&self) -> bool {
        self.tail.is_none()
    }

    pub fn less_than(&self, value: impl Into<Value>, path: impl IntoPath) -> Self {
        self.compare(Comparison::LessThan, value, path)
    }

    pub fn less_than_or_equal_to(&self, value: impl Into<Value>, path: impl IntoPath) -> Self {
        self.compare(Comparison::LessThanOrEqualTo, value, path)
    }

    pub fn greater_than(&self, value: impl Into<Value>, path: impl IntoPath) -> Self {
        self.compare(Comparison::GreaterThan, value, path)
    }

    pub fn greater_than_or_equal_to(&self, value: impl Into<Value>, path: impl IntoPath) -> Self {
        self.compare(Comparison::GreaterThanOrEqualTo, value, path)
    }

    pub fn equal_to(&self, value: impl Into<Value>, path: impl IntoPath) -> Self {
        self.compare(Comparison::EqualTo, value, path)
    }

    pub fn not_equal_to(&self, value: impl Into<Value>, path: impl IntoPath) -> Self {
        self.compare(Comparison::NotEqualTo, value, path)
    }

    pub fn deep_equal_to(&self, value: impl Into<Value>, path: impl IntoPath) -> Self {
        self.compare(Comparison::DeepEqualTo, value, path)
    }

    pub fn not_deep_equal_to(&self, value: impl Into<Value>, path: impl IntoPath) -> Self {
        self.compare(Comparison::NotDeepEqualTo, value, path)
    }

    /// If the field is an array, passes when `value` is an element of it.
    /// Otherwise passes when the field has a truthy entry under key `value`.
    pub fn r#in(&self, value: impl Into<Value>, path: impl IntoPath) -> Self {
        self.compare(Comparison::In, value, path)
    }

    /// Same test as [`Filter::r#in`], rendered as `contains`.
    pub fn contains(&self, value: impl Into<Value>, path: impl IntoPath) -> Self {
        self.compare(Comparison::Contains, value, path)
    }

    pub fn matches(&self, pattern: Regex, path: impl IntoPath) -> Self {
        self.push(Member::Leaf(Arc::new(Predicate::Matches {
            path: path.into_path(),
            pattern,
        })))
    }

    /// Caller predicate over the whole item. Filters holding one cannot be
    /// rendered as a query string.
    pub fn custom(&self, test: impl Fn(&Value) -> bool + Send + Sync + 'static) -> Self {
        self.push(Member::Leaf(Arc::new(Predicate::Custom(Arc::new(test)))))
    }

    pub fn and(&self) -> Self {
        self.push(Member::Op(BoolOp::And))
    }

    pub fn or(&self) -> Self {
        self.push(Member::Op(BoolOp::Or))
    }

    /// `[self, AND, other]`
    pub fn and_filter(&self, other: &Filter) -> Self {
        Filter::new()
            .push(Member::Nested(self.clone()))
            .push(Member::Op(BoolOp::And))
            .push(Member::Nested(other.clone()))
    }

    /// `[self, OR, other]`
    pub fn or_filter(&self, other: &Filter) -> Self {
        Filter::new()
            .push(Member::Nested(self.clone()))
            .push(Member::Op(BoolOp::Or))
            .push(Member::Nested(other.clone()))
    }

    /// Whether `item` passes the chain.
    pub fn test(&self, item: &Value) -> bool {
        passes(&plan(self), item)
    }

    /// Items that pass, in collection order.
    pub fn apply(&self, items: &[Value]) -> Vec<Value> {
        if self.is_empty() {
            return items.to_vec();
        }
        let steps = plan(self);
        items.iter().filter(|item| passes(&steps, item)).cloned().collect()
    }

    /// Render as `lt(key,5)&eq(id,"1")`: `&` between ANDed members, `|` at an
    /// OR, nested filters parenthesized.
    pub fn to_query_string(&self) -> Result<String, QueryError> {
        let mut out = String::new();
        let mut pending: Option<BoolOp> = None;
        let mut first = true;
        for member in self.members() {
            let rendered = match member {
                Member::Op(op) => {
                    if pending != Some(BoolOp::Or) {
                        pending = Some(op);
                    }
                    continue;
                }
                Member::Leaf(predicate) => predicate.to_query_string()?,
                Member::Nested(filter) => format!("({})", filter.to_query_string()?),
            };
            if !first {
                out.push(match pending {
                    Some(BoolOp::Or) => '|',
                    _ => '&',
                });
            }
            out.push_str(&rendered);
            pending = None;
            first = false;
        }
        Ok(out)
    }
}
