use serde_json::Value;

use crate::error::QueryError;
use crate::filter::Filter;
use crate::range::Range;
use crate::sort::Sort;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKind {
    Filter,
    Sort,
    Range,
}

/// One transform in a view's pipeline.
#[derive(Debug, Clone)]
pub enum Query {
    Filter(Filter),
    Sort(Sort),
    Range(Range),
}

impl Query {
    pub fn kind(&self) -> QueryKind {
        match self {
            Query::Filter(_) => QueryKind::Filter,
            Query::Sort(_) => QueryKind::Sort,
            Query::Range(_) => QueryKind::Range,
        }
    }

    pub fn apply(&self, items: &[Value]) -> Vec<Value> {
        match self {
            Query::Filter(filter) => filter.apply(items),
            Query::Sort(sort) => sort.apply(items),
            Query::Range(range) => range.apply(items),
        }
    }

    pub fn to_query_string(&self) -> Result<String, QueryError> {
        match self {
            Query::Filter(filter) => filter.to_query_string(),
            Query::Sort(sort) => sort.to_query_string(),
            Query::Range(range) => Ok(range.to_string()),
        }
    }
}

impl From<Filter> for Query {
    fn from(filter: Filter) -> Self {
        Query::Filter(filter)
    }
}

impl From<Sort> for Query {
    fn from(sort: Sort) -> Self {
        Query::Sort(sort)
    }
}

impl From<Range> for Query {
    fn from(range: Range) -> Self {
        Query::Range(range)
    }
}

/// Fold `queries` over `items` in order.
pub fn apply_all(queries: &[Query], items: &[Value]) -> Vec<Value> {
    match queries.split_first() {
        None => items.to_vec(),
        Some((first, rest)) => rest
            .iter()
            .fold(first.apply(items), |acc, query| query.apply(&acc)),
    }
}
