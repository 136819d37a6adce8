use crate::{query::predicate::ComparisonOperator, value::ValueKind};
use derive_more::Display;
use thiserror::Error as ThisError;

///
/// QueryError
///
/// Synchronous validation failure raised while constructing columns,
/// finalizing queries, or evaluating comparisons.
/// Every variant maps onto a stable `ErrorClass`.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum QueryError {
    #[error("column name must not be blank")]
    BlankColumnName,

    #[error("query limit {limit} requires at least one sort directive")]
    LimitWithoutOrder { limit: u32 },

    #[error("query limit must be positive")]
    ZeroLimit,

    #[error("cannot compare a {left} value with a {right} value")]
    OperandTypeMismatch { left: ValueKind, right: ValueKind },

    #[error("operator '{operator}' is not supported for {kind} values")]
    UnorderedOperand {
        operator: ComparisonOperator,
        kind: ValueKind,
    },

    #[error("column '{column}' holds {kind} values, which cannot be sorted")]
    UnsortableColumn { column: &'static str, kind: ValueKind },
}

impl QueryError {
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::BlankColumnName
            | Self::LimitWithoutOrder { .. }
            | Self::ZeroLimit
            | Self::OperandTypeMismatch { .. } => ErrorClass::InvalidArgument,
            Self::UnorderedOperand { .. } | Self::UnsortableColumn { .. } => {
                ErrorClass::Unsupported
            }
        }
    }

    #[must_use]
    pub fn display_with_class(&self) -> String {
        format!("{}: {self}", self.class())
    }
}

///
/// ErrorClass
/// Internal error taxonomy for runtime classification.
/// Not a stable API; may change without notice.
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum ErrorClass {
    #[display("invalid_argument")]
    InvalidArgument,
    #[display("unsupported")]
    Unsupported,
}

///
/// TESTS
///
