//! Core runtime for quarry: typed columns, values, the predicate algebra with
//! its DNF normalizer, the fluent query builder, and observability hooks.
#![warn(unreachable_pub)]

// public exports are one module level down
pub mod error;
pub mod model;
pub mod obs;
pub mod query;
pub mod traits;
pub mod types;
pub mod value;

// test
#[cfg(test)]
pub(crate) mod test_fixtures;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No errors, sinks, or helpers are re-exported here.
///

pub mod prelude {
    pub use crate::{
        model::Column,
        query::{
            Query, SortDirective,
            builder::{Branch, PredicateBuilder, QueryBuilder},
            mask::FieldMask,
            order::OrderDirection,
            predicate::{ComparisonOperator, LogicalOperator, Parameter, Predicate},
        },
        traits::{EntityKind, FieldValue},
        types::{Blob, Float64, Timestamp},
        value::{Value, ValueKind},
    };
}
