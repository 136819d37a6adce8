//! Module: query
//! Responsibility: immutable query snapshots (subject, mask, sorting, limit)
//! and the predicate algebra they carry.
//! Does not own: storage execution or index selection; adapters translate a
//! finalized `Query` into backend-specific filters.

pub mod builder;
pub mod mask;
pub mod order;
pub mod predicate;

mod snapshot;
mod subject;


pub use order::SortDirective;
pub use snapshot::Query;
pub use subject::{IdConstraint, Subject};
