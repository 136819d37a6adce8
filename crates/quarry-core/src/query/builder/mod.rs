//! Module: query::builder
//! Responsibility: fluent predicate and query construction.
//! Does not own: predicate normalization or record evaluation.
//! Boundary: user-facing ergonomic builder layer.

mod field;
mod predicate;
mod query;

#[cfg(test)]
mod tests;

pub use field::{ParameterSink, WhereClause};
pub use predicate::{Branch, PredicateBuilder};
pub use query::{IdClause, QueryBuilder};

pub(crate) use query::{SharedState, Snapshot};
