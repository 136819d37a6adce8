//! ## Crate layout
//! - `core`: columns, values, the predicate algebra and DNF normalizer, the
//!   fluent query builder, and observability hooks.
//!
//! The `prelude` module carries the vocabulary needed to declare columns,
//! build queries, and read them back.

pub use quarry_core as core;

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//
// Errors
//

pub use core::error::{ErrorClass, QueryError};

///
/// Prelude
///

pub mod prelude {
    pub use crate::core::prelude::*;
}
