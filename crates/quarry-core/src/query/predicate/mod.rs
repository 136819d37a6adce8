//! Module: query::predicate
//! Responsibility: the predicate algebra: comparison leaves, AND/OR nodes,
//! DNF normalization, and in-memory evaluation against records.
//! Does not own: fluent construction (see `query::builder`).

mod ast;
mod dnf;
mod operator;
mod parameter;

#[cfg(test)]
mod tests;

pub use ast::Predicate;
pub use operator::{ComparisonOperator, LogicalOperator};
pub use parameter::Parameter;
